//! Read-only view of the session for rendering.

use crate::clock::Millis;
use crate::room::RoomPhase;
use crate::state::{Enemy, Player, ViviState};

/// Presentation boundary: everything a renderer needs, copied out of the
/// session. Holding a snapshot never blocks the simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub room: u32,
    pub door_open: bool,
    pub health: u32,
    pub max_health: u32,
    /// Damage accumulated in the current room.
    pub damage: u32,
    pub phase: RoomPhase,
    pub game_over: bool,
    pub transitioning: bool,
    pub damage_flash: bool,
    pub vivi: Option<ViviState>,
    pub now: Millis,
}

impl Snapshot {
    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|enemy| enemy.alive).count()
    }

    /// Health as a fraction of max health, for health bars.
    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }
}
