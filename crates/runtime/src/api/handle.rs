//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! feeding key events, querying snapshots, or streaming events from specific
//! topics.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Key, Snapshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, LedgerMetrics};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    ledger_metrics: Arc<LedgerMetrics>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        ledger_metrics: Arc<LedgerMetrics>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            ledger_metrics,
        }
    }

    /// Feed a key press. Ignored by the session outside of play.
    pub async fn key_down(&self, key: Key) -> Result<()> {
        self.send(Command::KeyDown { key }).await
    }

    pub async fn key_up(&self, key: Key) -> Result<()> {
        self.send(Command::KeyUp { key }).await
    }

    /// Press and release `key` in one go, for terminals without key-release
    /// reporting.
    pub async fn tap(&self, key: Key) -> Result<()> {
        self.key_down(key).await?;
        self.key_up(key).await
    }

    /// Restart from room 0 after game over.
    ///
    /// Fails with [`game_core::SessionError::NotGameOver`] while the game is
    /// still being played.
    pub async fn restart(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Command::Restart { reply: reply_tx }).await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current session view
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Command::QuerySnapshot { reply: reply_tx })
            .await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut ledger_rx = handle.subscribe(Topic::Ledger);
    /// while let Ok(event) = ledger_rx.recv().await {
    ///     // Update the wallet panel
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Room-advance call statistics.
    pub fn ledger_metrics(&self) -> Arc<LedgerMetrics> {
        Arc::clone(&self.ledger_metrics)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
