use crate::config::GameConfig;
use crate::state::{EnemyId, EntitiesState};

/// Moves every living enemy toward the player by `min(speed, distance)`.
///
/// Enemies within [`GameConfig::PURSUIT_EPSILON`] of the player hold still.
pub fn pursue(entities: &mut EntitiesState, speed: f32) {
    let target = entities.player.position;
    for enemy in entities.enemies.iter_mut().filter(|enemy| enemy.alive) {
        let dx = target.x - enemy.position.x;
        let dy = target.y - enemy.position.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance <= GameConfig::PURSUIT_EPSILON {
            continue;
        }
        let step = speed.min(distance);
        enemy.position = enemy
            .position
            .offset(dx / distance * step, dy / distance * step);
    }
}

/// Returns the first living enemy, in list order, closer than `radius` to the
/// player.
pub fn first_contact(entities: &EntitiesState, radius: f32) -> Option<EnemyId> {
    let player = entities.player.position;
    entities
        .living_enemies()
        .find(|enemy| enemy.position.distance(player) < radius)
        .map(|enemy| enemy.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Enemy, Player, Position};

    fn entities(player: Position, enemies: &[(f32, f32)]) -> EntitiesState {
        let mut entities = EntitiesState::new(Player::new(player, 10));
        entities.enemies = enemies
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Enemy::new(EnemyId(i as u32), Position::new(x, y)))
            .collect();
        entities
    }

    #[test]
    fn pursuit_steps_by_speed_and_never_overshoots() {
        let mut state = entities(Position::new(0.0, 0.0), &[(30.0, 40.0), (6.0, 8.0), (0.5, 0.0)]);

        pursue(&mut state, 12.0);

        let far = state.enemies[0].position;
        assert!((far.x - 22.8).abs() < 1e-4 && (far.y - 30.4).abs() < 1e-4);
        assert!(state.enemies[1].position.distance(Position::ORIGIN) < 1e-4);
        assert_eq!(state.enemies[2].position, Position::new(0.5, 0.0));
    }

    #[test]
    fn dead_enemies_do_not_move_or_touch() {
        let mut state = entities(Position::new(0.0, 0.0), &[(10.0, 0.0), (100.0, 0.0)]);
        state.enemies[0].alive = false;

        pursue(&mut state, 12.0);

        assert_eq!(state.enemies[0].position, Position::new(10.0, 0.0));
        assert_eq!(first_contact(&state, 48.0), None);
    }

    #[test]
    fn contact_reports_first_enemy_in_range() {
        let state = entities(Position::new(0.0, 0.0), &[(100.0, 0.0), (47.0, 0.0), (10.0, 0.0)]);
        assert_eq!(first_contact(&state, 48.0), Some(EnemyId(1)));
    }
}
