//! Player and enemy types.

use strum::Display;

use crate::config::GameConfig;

/// Real-valued pixel-space position (top-left corner of the sprite box).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationFrame {
    #[default]
    Idle,
    Walk,
}

impl AnimationFrame {
    pub fn toggled(self) -> Self {
        match self {
            AnimationFrame::Idle => AnimationFrame::Walk,
            AnimationFrame::Walk => AnimationFrame::Idle,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub position: Position,
    pub facing: Facing,
    /// Always in `0..=max_health`.
    pub health: u32,
    pub frame: AnimationFrame,
    pub attacking: bool,
    pub moving: bool,
}

impl Player {
    pub fn new(position: Position, health: u32) -> Self {
        Self {
            position,
            facing: Facing::Right,
            health,
            frame: AnimationFrame::Idle,
            attacking: false,
            moving: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies `amount` damage, flooring health at zero. Returns the new health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }
}

/// Stable identifier of an enemy within one room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyId(pub u32);

impl core::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub id: EnemyId,
    pub position: Position,
    pub alive: bool,
    /// Transient "just struck" flag. A struck enemy stays alive until its
    /// death resolves one attack duration later.
    pub hit: bool,
}

impl Enemy {
    pub fn new(id: EnemyId, position: Position) -> Self {
        Self {
            id,
            position,
            alive: true,
            hit: false,
        }
    }

    /// Center of the enemy sprite box, used for hit-box tests.
    pub fn body_point(&self) -> Position {
        let half = GameConfig::ENEMY_SIZE / 2.0;
        self.position.offset(half, half)
    }

    /// Alive and not already struck by a pending attack.
    pub fn is_targetable(&self) -> bool {
        self.alive && !self.hit
    }
}

/// Player plus the current room's enemies.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
}

impl EntitiesState {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            enemies: Vec::new(),
        }
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|enemy| enemy.alive)
    }

    pub fn has_living_enemies(&self) -> bool {
        self.enemies.iter().any(|enemy| enemy.alive)
    }

    /// Door rule: the room has enemies and none of them is alive.
    pub fn all_enemies_dead(&self) -> bool {
        !self.enemies.is_empty() && !self.has_living_enemies()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_rule_requires_non_empty_room() {
        let mut entities = EntitiesState::new(Player::new(Position::ORIGIN, 10));
        assert!(!entities.all_enemies_dead());

        entities.enemies.push(Enemy::new(EnemyId(0), Position::ORIGIN));
        entities.enemies.push(Enemy::new(EnemyId(1), Position::ORIGIN));
        assert!(!entities.all_enemies_dead());

        entities.enemies[0].alive = false;
        assert!(!entities.all_enemies_dead());

        entities.enemies[1].alive = false;
        assert!(entities.all_enemies_dead());
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut player = Player::new(Position::ORIGIN, 1);
        assert_eq!(player.take_damage(3), 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn body_point_is_sprite_center() {
        let enemy = Enemy::new(EnemyId(3), Position::new(100.0, 50.0));
        assert_eq!(enemy.body_point(), Position::new(132.0, 82.0));
    }
}
