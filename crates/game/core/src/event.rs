//! Events emitted by the session and the room-advance handshake types.

use crate::state::{EnemyId, Facing, Position};

/// Identifies one room-advance attempt.
///
/// A ticket is issued when the session enters `Transitioning` and must be
/// handed back with the ledger's verdict. Tickets from earlier attempts are
/// rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvanceTicket {
    pub id: u64,
    /// Index of the room being left.
    pub room: u32,
}

/// Payload for the external "advance room" ledger call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvanceRequest {
    pub ticket: AdvanceTicket,
    pub damage: u32,
    pub heal: u32,
}

/// Result of the ledger call as seen by the session: success, or a reason.
pub type AdvanceOutcome = Result<(), String>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    PlayerMoved {
        position: Position,
        facing: Facing,
    },
    AttackStarted {
        facing: Facing,
    },
    /// Enemies struck by one attack. They die one attack duration later.
    EnemyHit {
        enemies: Vec<EnemyId>,
    },
    EnemyKilled {
        enemy: EnemyId,
    },
    DamageTaken {
        enemy: EnemyId,
        health: u32,
        room_damage: u32,
    },
    DoorOpened {
        room: u32,
    },
    RoomAdvanceRequested(AdvanceRequest),
    RoomAdvanceFailed {
        ticket: AdvanceTicket,
        reason: String,
    },
    RoomEntered {
        room: u32,
        enemies: usize,
    },
    GameOver {
        room: u32,
    },
    Restarted,
}
