//! Async orchestration layer for the combat game.
//!
//! The runtime owns a [`game_core::GameSession`] inside a background worker,
//! drives its virtual clock from the tokio timer, forwards room-advance
//! requests to a [`client_blockchain_core::GameLedger`], and exposes a
//! cloneable [`RuntimeHandle`] plus a topic-based [`EventBus`] to clients.
pub mod api;
pub mod events;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, LedgerEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::SessionContext;
pub use workers::LedgerMetrics;

pub use game_core::{GameConfig, GameEvent, Key, RoomPhase, Snapshot, ViviState};
