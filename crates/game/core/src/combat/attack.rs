use crate::config::GameConfig;
use crate::state::{EnemyId, EntitiesState, Facing, Player, Position};

/// Axis-aligned melee hit-box, inclusive on every edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl HitBox {
    /// Box extending `range` pixels out from the player's leading edge, as tall
    /// as the player sprite.
    ///
    /// Facing right the leading edge is the sprite's horizontal midpoint;
    /// facing left it is the sprite's left edge.
    pub fn for_player(player: &Player, range: f32) -> Self {
        let Position { x, y } = player.position;
        let (min_x, max_x) = match player.facing {
            Facing::Right => {
                let edge = x + GameConfig::PLAYER_SIZE / 2.0;
                (edge, edge + range)
            }
            Facing::Left => (x - range, x),
        };
        Self {
            min_x,
            max_x,
            min_y: y,
            max_y: y + GameConfig::PLAYER_SIZE,
        }
    }

    pub fn contains(&self, point: Position) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }
}

/// Marks every alive, not-yet-hit enemy whose body point is inside the
/// player's hit-box. Returns the ids of the enemies struck by this call.
pub fn strike(entities: &mut EntitiesState, range: f32) -> Vec<EnemyId> {
    let hit_box = HitBox::for_player(&entities.player, range);
    entities
        .enemies
        .iter_mut()
        .filter(|enemy| enemy.is_targetable() && hit_box.contains(enemy.body_point()))
        .map(|enemy| {
            enemy.hit = true;
            enemy.id
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Enemy;

    fn entities_at(player: Position, facing: Facing, enemies: &[(f32, f32)]) -> EntitiesState {
        let mut player = Player::new(player, 10);
        player.facing = facing;
        let mut entities = EntitiesState::new(player);
        entities.enemies = enemies
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Enemy::new(EnemyId(i as u32), Position::new(x, y)))
            .collect();
        entities
    }

    #[test]
    fn right_facing_box_starts_at_sprite_midpoint() {
        // Body x must land in [164, 244]; body y in [100, 228].
        let mut entities = entities_at(
            Position::new(100.0, 100.0),
            Facing::Right,
            &[(132.0, 68.0), (212.0, 196.0), (131.0, 100.0), (213.0, 100.0)],
        );

        let struck = strike(&mut entities, 80.0);

        assert_eq!(struck, vec![EnemyId(0), EnemyId(1)]);
        assert!(entities.enemies[0].hit && entities.enemies[0].alive);
        assert!(!entities.enemies[2].hit);
    }

    #[test]
    fn left_facing_box_ends_at_left_edge() {
        // Body x must land in [20, 100].
        let mut entities = entities_at(
            Position::new(100.0, 100.0),
            Facing::Left,
            &[(-12.0, 100.0), (68.0, 100.0), (69.0, 100.0)],
        );

        assert_eq!(strike(&mut entities, 80.0), vec![EnemyId(0), EnemyId(1)]);
    }

    #[test]
    fn already_hit_or_dead_enemies_are_skipped() {
        let mut entities = entities_at(
            Position::new(100.0, 100.0),
            Facing::Right,
            &[(150.0, 120.0), (150.0, 120.0)],
        );
        entities.enemies[1].alive = false;

        assert_eq!(strike(&mut entities, 80.0), vec![EnemyId(0)]);
        assert!(strike(&mut entities, 80.0).is_empty());
    }
}
