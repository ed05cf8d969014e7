//! Shared message log primitives for CLI and future UIs.
use std::collections::VecDeque;

use game_core::Millis;

/// Severity level for UI messages produced from runtime events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageEntry {
    pub text: String,
    /// Session time the message refers to, when known.
    pub at: Option<Millis>,
    pub level: MessageLevel,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, at: Option<Millis>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            at,
            level,
        }
    }
}

/// Circular buffer of messages displayed to the player.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn info(&mut self, text: impl Into<String>, at: Option<Millis>) {
        self.push(MessageEntry::new(text, at, MessageLevel::Info));
    }

    pub fn warn(&mut self, text: impl Into<String>, at: Option<Millis>) {
        self.push(MessageEntry::new(text, at, MessageLevel::Warning));
    }

    pub fn error(&mut self, text: impl Into<String>, at: Option<Millis>) {
        self.push(MessageEntry::new(text, at, MessageLevel::Error));
    }

    /// Most recent entries first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
