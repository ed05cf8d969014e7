//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use game_core::{GameEvent, Snapshot};

use super::types::LedgerEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Simulation events and the snapshots that follow them
    Game,
    /// Room-advance ledger calls
    Ledger,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Game(GameEvent),

    /// Fresh view of the session, published after every batch of commands or
    /// timers. Enemy pursuit moves sprites without emitting a [`GameEvent`],
    /// so renderers should redraw from these.
    Snapshot(Box<Snapshot>),

    Ledger(LedgerEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(_) | Event::Snapshot(_) => Topic::Game,
            Event::Ledger(_) => Topic::Ledger,
        }
    }
}

struct Channels {
    game: broadcast::Sender<Event>,
    ledger: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Game => &self.game,
            Topic::Ledger => &self.ledger,
        }
    }
}

/// Topic-based event bus
///
/// Slow subscribers lag rather than block the simulation: a receiver that
/// falls more than the channel capacity behind gets
/// [`broadcast::error::RecvError::Lagged`] and resumes from the oldest
/// retained event.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                game: broadcast::channel(capacity).0,
                ledger: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "runtime::events", ?topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::AdvanceTicket;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::new();
        let mut game_rx = bus.subscribe(Topic::Game);
        let mut ledger_rx = bus.subscribe(Topic::Ledger);

        bus.publish(Event::Game(GameEvent::Restarted));
        bus.publish(Event::Ledger(LedgerEvent::AdvanceFailed {
            ticket: AdvanceTicket { id: 0, room: 0 },
            reason: "no wallet".into(),
        }));

        assert!(matches!(
            game_rx.recv().await,
            Ok(Event::Game(GameEvent::Restarted))
        ));
        assert!(game_rx.try_recv().is_err());
        assert!(matches!(ledger_rx.recv().await, Ok(Event::Ledger(_))));
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(4);
        bus.publish(Event::Game(GameEvent::Restarted));
        assert_eq!(bus.subscriber_count(Topic::Game), 0);

        let receivers = bus.subscribe_multiple(&[Topic::Game, Topic::Ledger]);
        assert_eq!(receivers.len(), 2);
        assert_eq!(bus.subscriber_count(Topic::Ledger), 1);
    }
}
