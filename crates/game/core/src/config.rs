//! Game configuration constants and tunable parameters.
use crate::clock::Millis;
use crate::state::Position;

/// Pixel-space viewport the room is played in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top-left position that centers a square box of `size` in the area.
    pub fn center_for(&self, size: f32) -> Position {
        Position::new(self.width / 2.0 - size / 2.0, self.height / 2.0 - size / 2.0)
    }

    /// Clamps a top-left position so a box of `size` stays inside the area.
    pub fn clamp(&self, position: Position, size: f32) -> Position {
        let max_x = (self.width - size).max(0.0);
        let max_y = (self.height - size).max(0.0);
        Position::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
    }

    /// Returns true if the player's position lies inside the door hit-zone.
    ///
    /// The door sits on the left wall at 40% of the area height.
    pub fn door_contains(&self, position: Position) -> bool {
        let door_y = self.height * GameConfig::DOOR_HEIGHT_RATIO;
        position.x <= GameConfig::DOOR_WIDTH
            && position.y >= door_y - GameConfig::DOOR_HALF_SPAN
            && position.y <= door_y + GameConfig::DOOR_HALF_SPAN
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(
            GameConfig::DEFAULT_PLAY_WIDTH,
            GameConfig::DEFAULT_PLAY_HEIGHT,
        )
    }
}

/// Tunable gameplay parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub play_area: PlayArea,
    pub max_health: u32,
    /// Displacement applied per movement key-down.
    pub move_step: f32,
    /// Width of the melee hit-box in the facing direction.
    pub attack_range: f32,
    /// Lifetime of the attack flag, and the delay before struck enemies die.
    pub attack_duration: Millis,
    /// Period of the enemy AI tick.
    pub enemy_tick: Millis,
    /// Maximum pursuit distance per enemy tick.
    pub enemy_speed: f32,
    /// Distance below which an enemy inflicts contact damage.
    pub contact_radius: f32,
    /// Walk-frame toggle period while the player is moving.
    pub animation_period: Millis,
    pub damage_flash: Millis,
}

impl GameConfig {
    // ===== geometry (sprite boxes; positions are top-left corners) =====
    pub const PLAYER_SIZE: f32 = 128.0;
    pub const ENEMY_SIZE: f32 = 64.0;
    pub const SPAWN_MARGIN: f32 = 128.0;
    pub const PURSUIT_EPSILON: f32 = 1.0;
    pub const DOOR_WIDTH: f32 = 40.0;
    pub const DOOR_HALF_SPAN: f32 = 40.0;
    pub const DOOR_HEIGHT_RATIO: f32 = 0.4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PLAY_WIDTH: f32 = 1280.0;
    pub const DEFAULT_PLAY_HEIGHT: f32 = 720.0;
    pub const DEFAULT_MAX_HEALTH: u32 = 10;
    pub const DEFAULT_MOVE_STEP: f32 = 16.0;
    pub const DEFAULT_ATTACK_RANGE: f32 = 80.0;
    pub const DEFAULT_ATTACK_DURATION: Millis = Millis(200);
    pub const DEFAULT_ENEMY_TICK: Millis = Millis(200);
    pub const DEFAULT_ENEMY_SPEED: f32 = 12.0;
    pub const DEFAULT_CONTACT_RADIUS: f32 = 48.0;
    pub const DEFAULT_ANIMATION_PERIOD: Millis = Millis(120);
    pub const DEFAULT_DAMAGE_FLASH: Millis = Millis(200);

    pub fn new() -> Self {
        Self {
            play_area: PlayArea::default(),
            max_health: Self::DEFAULT_MAX_HEALTH,
            move_step: Self::DEFAULT_MOVE_STEP,
            attack_range: Self::DEFAULT_ATTACK_RANGE,
            attack_duration: Self::DEFAULT_ATTACK_DURATION,
            enemy_tick: Self::DEFAULT_ENEMY_TICK,
            enemy_speed: Self::DEFAULT_ENEMY_SPEED,
            contact_radius: Self::DEFAULT_CONTACT_RADIUS,
            animation_period: Self::DEFAULT_ANIMATION_PERIOD,
            damage_flash: Self::DEFAULT_DAMAGE_FLASH,
        }
    }

    pub fn with_play_area(mut self, play_area: PlayArea) -> Self {
        self.play_area = play_area;
        self
    }

    pub fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health.max(1);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_zone_sits_on_left_wall_at_forty_percent() {
        let area = PlayArea::new(1000.0, 1000.0);

        assert!(area.door_contains(Position::new(0.0, 400.0)));
        assert!(area.door_contains(Position::new(40.0, 360.0)));
        assert!(area.door_contains(Position::new(40.0, 440.0)));
        assert!(!area.door_contains(Position::new(41.0, 400.0)));
        assert!(!area.door_contains(Position::new(0.0, 441.0)));
        assert!(!area.door_contains(Position::new(0.0, 359.0)));
    }

    #[test]
    fn clamp_keeps_player_box_inside_area() {
        let area = PlayArea::new(1280.0, 720.0);

        let clamped = area.clamp(Position::new(-20.0, 900.0), GameConfig::PLAYER_SIZE);
        assert_eq!(clamped, Position::new(0.0, 592.0));

        let center = area.center_for(GameConfig::PLAYER_SIZE);
        assert_eq!(center, Position::new(576.0, 296.0));
    }
}
