//! Entity state store for the active room.
//!
//! [`EntitiesState`] exclusively owns the player and the enemy list. The list
//! is replaced wholesale on room entry; nothing outside the session holds a
//! reference into it.
mod entities;
mod vivi;

pub use entities::{AnimationFrame, Enemy, EnemyId, EntitiesState, Facing, Player, Position};
pub use vivi::ViviState;
