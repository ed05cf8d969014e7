//! Combat resolution.
//!
//! Pure functions over [`EntitiesState`](crate::state::EntitiesState): the melee
//! hit-box test run on attack, and the pursuit/contact pass run on every enemy
//! tick. Timers and bookkeeping live in the session.
//!
//! - `strike`: marks every targetable enemy inside the hit-box as hit
//! - `pursue`: steps living enemies toward the player without overshooting
//! - `first_contact`: finds at most one enemy in contact range

mod attack;
mod pursuit;

pub use attack::{HitBox, strike};
pub use pursuit::{first_contact, pursue};
