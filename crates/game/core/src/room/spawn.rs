use crate::config::{GameConfig, PlayArea};
use crate::env::RngOracle;
use crate::state::{Enemy, EnemyId, Position};

/// Number of enemies for `room`: one in room 0, otherwise uniform in
/// `[1, room]`.
pub fn enemy_count(room: u32, rng: &mut dyn RngOracle) -> u32 {
    if room == 0 {
        return 1;
    }
    let roll = (rng.unit() * room as f32).floor() as u32 + 1;
    roll.clamp(1, room)
}

/// Spawns a fresh enemy list for `room`.
///
/// Positions are uniform in `[0, width - margin) x [0, height - margin)`.
/// Ids are assigned in spawn order starting from zero.
pub fn spawn_enemies(room: u32, area: &PlayArea, rng: &mut dyn RngOracle) -> Vec<Enemy> {
    let count = enemy_count(room, rng);
    let span_x = (area.width - GameConfig::SPAWN_MARGIN).max(0.0);
    let span_y = (area.height - GameConfig::SPAWN_MARGIN).max(0.0);
    (0..count)
        .map(|i| {
            let x = rng.unit() * span_x;
            let y = rng.unit() * span_y;
            Enemy::new(EnemyId(i), Position::new(x, y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};

    #[test]
    fn first_room_always_has_one_enemy() {
        let mut rng = ScriptedRng::from_units(&[0.99]);
        assert_eq!(enemy_count(0, &mut rng), 1);
    }

    #[test]
    fn later_rooms_roll_between_one_and_index() {
        let mut rng = ScriptedRng::from_units(&[0.0, 0.5, 0.999]);
        assert_eq!(enemy_count(3, &mut rng), 1);
        assert_eq!(enemy_count(3, &mut rng), 2);
        assert_eq!(enemy_count(3, &mut rng), 3);
    }

    #[test]
    fn spawn_positions_stay_inside_margin() {
        let area = PlayArea::new(1280.0, 720.0);
        let mut rng = PcgRng::new(7);
        for room in 0..20 {
            for enemy in spawn_enemies(room, &area, &mut rng) {
                assert!(enemy.alive && !enemy.hit);
                assert!((0.0..=1152.0).contains(&enemy.position.x));
                assert!((0.0..=592.0).contains(&enemy.position.y));
            }
        }
    }

    #[test]
    fn scripted_units_place_enemies() {
        let area = PlayArea::new(1280.0, 720.0);
        let mut rng = ScriptedRng::from_units(&[0.5, 0.25, 0.75]);
        let enemies = spawn_enemies(0, &area, &mut rng);
        // Room 0 does not consume a count roll.
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].position, Position::new(576.0, 148.0));
    }
}
