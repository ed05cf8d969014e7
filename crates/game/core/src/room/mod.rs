//! Room controller state.
//!
//! The phase machine is `Active -> Cleared -> Transitioning -> Active`, with
//! `GameOver` reachable from `Active` and `Cleared` whenever the player's
//! health reaches zero. The session drives the transitions; this module holds
//! the state each transition reads and writes.
mod spawn;

pub use spawn::{enemy_count, spawn_enemies};

use strum::Display;

use crate::event::AdvanceTicket;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomPhase {
    /// Enemies present, some alive.
    #[default]
    Active,
    /// Every enemy is dead and the door is open.
    Cleared,
    /// A room-advance request is outstanding against the ledger.
    Transitioning,
    /// Player health reached zero. Only a restart leaves this phase.
    GameOver,
}

impl RoomPhase {
    /// Phases in which enemy ticks and player input take effect.
    pub const fn is_playable(self) -> bool {
        matches!(self, RoomPhase::Active | RoomPhase::Cleared)
    }
}

/// Room index, phase, and the per-room damage accumulator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomState {
    pub index: u32,
    pub phase: RoomPhase,
    /// Contact hits taken in this room; reported to the ledger on advance.
    pub damage: u32,
    /// Door trigger latch. Re-armed whenever the player is seen outside the
    /// door zone, disarmed when a transition fires.
    pub door_armed: bool,
    pub pending: Option<AdvanceTicket>,
}

impl RoomState {
    pub fn enter(index: u32) -> Self {
        Self {
            index,
            phase: RoomPhase::Active,
            damage: 0,
            door_armed: true,
            pending: None,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == RoomPhase::Transitioning
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RoomPhase::GameOver
    }
}
