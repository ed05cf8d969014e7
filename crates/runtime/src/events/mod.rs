//! Topic-based event bus for runtime events.
//!
//! Events are published to topics and consumers subscribe only to the topics
//! they need: renderers follow [`Topic::Game`], wallet panels follow
//! [`Topic::Ledger`].

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::LedgerEvent;
