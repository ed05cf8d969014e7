//! Input controller.
//!
//! Turns raw key-down/key-up events into discrete movement deltas and attack
//! triggers. The controller only tracks which keys are held; applying a press
//! to the world is the session's job.

use std::collections::BTreeSet;

use strum::Display;

use crate::state::Facing;

/// Logical key understood by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Attack,
    Other,
}

impl Key {
    /// Maps a key name as reported by a keyboard layer.
    ///
    /// Accepts `w/a/s/d` in either case, a literal space or `"space"`, and
    /// arrow names such as `"ArrowUp"` or `"up"`. Anything else is `Other`.
    pub fn from_name(name: &str) -> Key {
        match name {
            "w" | "W" => Key::Up,
            "s" | "S" => Key::Down,
            "a" | "A" => Key::Left,
            "d" | "D" => Key::Right,
            " " => Key::Attack,
            _ => match name.to_ascii_lowercase().as_str() {
                "space" | "spacebar" => Key::Attack,
                "arrowup" | "up" => Key::Up,
                "arrowdown" | "down" => Key::Down,
                "arrowleft" | "left" => Key::Left,
                "arrowright" | "right" => Key::Right,
                _ => Key::Other,
            },
        }
    }

    pub const fn is_movement(self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right)
    }
}

/// What a single key-down means for the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyPress {
    /// Displace the player; horizontal keys also set facing.
    Move {
        dx: f32,
        dy: f32,
        facing: Option<Facing>,
    },
    /// Rising edge of the attack key.
    Attack,
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct InputController {
    held_movement: BTreeSet<Key>,
    attack_held: bool,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key-down and classifies it.
    ///
    /// Movement keys produce a move every time (keyboard auto-repeat keeps
    /// walking). The attack key produces `Attack` only on its rising edge.
    pub fn press(&mut self, key: Key, step: f32) -> KeyPress {
        match key {
            Key::Up | Key::Down | Key::Left | Key::Right => {
                self.held_movement.insert(key);
                let (dx, dy, facing) = match key {
                    Key::Up => (0.0, -step, None),
                    Key::Down => (0.0, step, None),
                    Key::Left => (-step, 0.0, Some(Facing::Left)),
                    _ => (step, 0.0, Some(Facing::Right)),
                };
                KeyPress::Move { dx, dy, facing }
            }
            Key::Attack => {
                if self.attack_held {
                    KeyPress::Ignored
                } else {
                    self.attack_held = true;
                    KeyPress::Attack
                }
            }
            Key::Other => KeyPress::Ignored,
        }
    }

    /// Records a key-up. Returns true while any movement key is still held.
    pub fn release(&mut self, key: Key) -> bool {
        match key {
            Key::Attack => self.attack_held = false,
            key if key.is_movement() => {
                self.held_movement.remove(&key);
            }
            _ => {}
        }
        self.is_moving()
    }

    pub fn is_moving(&self) -> bool {
        !self.held_movement.is_empty()
    }

    /// Forgets every held key.
    pub fn clear(&mut self) {
        self.held_movement.clear();
        self.attack_held = false;
    }
}
