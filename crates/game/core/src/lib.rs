//! Deterministic real-time simulation for the single-room combat game.
//!
//! `game-core` defines the canonical rules (input, combat, room progression)
//! and exposes a pure, synchronous API. All state mutation flows through
//! [`session::GameSession`]; drivers feed it key events and wall-clock
//! milliseconds and read back [`snapshot::Snapshot`]s and [`event::GameEvent`]s.
//!
//! Nothing in this crate sleeps, spawns, or performs I/O. Timers live in a
//! virtual [`clock::Scheduler`] that fires only when the driver advances time,
//! so every sequence of inputs replays identically for a given RNG seed.
pub mod clock;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod input;
pub mod room;
pub mod session;
pub mod snapshot;
pub mod state;

pub use clock::{Millis, Scheduler, Timer, TimerId, TimerTag};
pub use config::{GameConfig, PlayArea};
pub use env::{PcgRng, RngOracle, ScriptedRng};
pub use error::{ErrorSeverity, GameError, SessionError};
pub use event::{AdvanceOutcome, AdvanceRequest, AdvanceTicket, GameEvent};
pub use input::{InputController, Key, KeyPress};
pub use room::{RoomPhase, RoomState};
pub use session::GameSession;
pub use snapshot::Snapshot;
pub use state::{
    AnimationFrame, Enemy, EnemyId, EntitiesState, Facing, Player, Position, ViviState,
};
