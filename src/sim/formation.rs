//! Enemy formation: grid layout and the synchronized sweep-and-drop
//!
//! All alive members move by the same delta every frame. When any of them
//! touches the wall it is heading toward, the whole formation drops one
//! step and reverses instead of moving sideways.

use super::state::{Enemy, EnemyTier};
use crate::tuning::Tuning;

/// What the formation did on one advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationStep {
    /// Moved sideways by `speed * direction`
    Swept,
    /// Hit a wall: dropped and reversed, no sideways movement
    Dropped,
    /// Nothing alive to move
    Idle,
}

/// Tier for a grid row at the given level
///
/// Commanders take the top two rows from level 3, soldiers the top three
/// from level 2. The commander check comes first so it wins on shared rows.
pub fn tier_for(level: u32, row: usize) -> EnemyTier {
    if level >= 3 && row < 2 {
        EnemyTier::Commander
    } else if level >= 2 && row < 3 {
        EnemyTier::Soldier
    } else {
        EnemyTier::Grunt
    }
}

/// Lay out a fresh, fully alive formation for `level` (row-major order)
pub fn create_formation(level: u32, tuning: &Tuning) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(tuning.formation_size());
    for row in 0..tuning.formation_rows {
        for col in 0..tuning.formation_cols {
            let x = tuning.formation_origin_x + col as f32 * tuning.formation_spacing_x;
            let y = tuning.formation_origin_y + row as f32 * tuning.formation_spacing_y;
            enemies.push(Enemy::new(x, y, tier_for(level, row)));
        }
    }
    enemies
}

/// Advance the formation by one frame
///
/// `direction` is flipped in place when the formation drops.
pub fn advance_formation(
    enemies: &mut [Enemy],
    direction: &mut f32,
    drop_distance: f32,
    speed: f32,
    playfield_width: f32,
) -> FormationStep {
    let mut any_alive = false;
    let mut at_wall = false;

    for enemy in enemies.iter().filter(|e| e.alive) {
        any_alive = true;
        let moving_left = *direction < 0.0;
        let moving_right = *direction > 0.0;
        if (moving_left && enemy.rect.left() <= 0.0)
            || (moving_right && enemy.rect.right() >= playfield_width)
        {
            at_wall = true;
            break;
        }
    }

    if !any_alive {
        return FormationStep::Idle;
    }

    if at_wall {
        *direction = -*direction;
        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            enemy.rect.pos.y += drop_distance;
        }
        FormationStep::Dropped
    } else {
        let dx = speed * *direction;
        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            enemy.rect.pos.x += dx;
        }
        FormationStep::Swept
    }
}

/// Whether any alive enemy's bottom edge has reached `line_y`
pub fn reached_line(enemies: &[Enemy], line_y: f32) -> bool {
    enemies.iter().any(|e| e.alive && e.rect.bottom() >= line_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xs(enemies: &[Enemy]) -> Vec<f32> {
        enemies.iter().map(|e| e.rect.pos.x).collect()
    }

    #[test]
    fn test_grid_layout() {
        let tuning = Tuning::default();
        let enemies = create_formation(1, &tuning);
        assert_eq!(enemies.len(), 50);
        assert!(enemies.iter().all(|e| e.alive));

        // Row-major: index 11 is row 1, col 1
        assert_eq!(enemies[0].rect.pos.x, 100.0);
        assert_eq!(enemies[0].rect.pos.y, 50.0);
        assert_eq!(enemies[11].rect.pos.x, 160.0);
        assert_eq!(enemies[11].rect.pos.y, 100.0);
        assert_eq!(enemies[49].rect.pos.x, 640.0);
        assert_eq!(enemies[49].rect.pos.y, 250.0);
    }

    #[test]
    fn test_tier_selection_by_level() {
        let rows = |level| (0..5).map(|row| tier_for(level, row)).collect::<Vec<_>>();

        assert!(rows(1).iter().all(|t| *t == EnemyTier::Grunt));

        assert_eq!(
            rows(2),
            vec![
                EnemyTier::Soldier,
                EnemyTier::Soldier,
                EnemyTier::Soldier,
                EnemyTier::Grunt,
                EnemyTier::Grunt,
            ]
        );

        // Commander rows override the overlapping soldier rows
        assert_eq!(
            rows(3),
            vec![
                EnemyTier::Commander,
                EnemyTier::Commander,
                EnemyTier::Soldier,
                EnemyTier::Grunt,
                EnemyTier::Grunt,
            ]
        );
    }

    #[test]
    fn test_points_follow_tier() {
        let enemies = create_formation(3, &Tuning::default());
        assert_eq!(enemies[0].points, 30);
        assert_eq!(enemies[25].points, 20);
        assert_eq!(enemies[49].points, 10);
    }

    #[test]
    fn test_sweep_moves_only_alive() {
        let tuning = Tuning::default();
        let mut enemies = create_formation(1, &tuning);
        enemies[3].alive = false;
        let before = xs(&enemies);
        let mut dir = 1.0;

        let step = advance_formation(&mut enemies, &mut dir, 20.0, 1.0, 800.0);

        assert_eq!(step, FormationStep::Swept);
        assert_eq!(dir, 1.0);
        assert_eq!(enemies[3].rect.pos.x, before[3]);
        assert_eq!(enemies[0].rect.pos.x, before[0] + 1.0);
        assert!(enemies.iter().all(|e| e.rect.pos.y >= 50.0));
    }

    #[test]
    fn test_drop_and_reverse_at_right_wall() {
        let tuning = Tuning::default();
        let mut enemies = create_formation(1, &tuning);
        let mut dir = 1.0;

        // Rightmost column starts at x = 640 with width 40: touches 800 after 120 sweeps
        let mut sweeps = 0;
        while !enemies.iter().any(|e| e.alive && e.rect.right() >= 800.0) {
            assert_eq!(
                advance_formation(&mut enemies, &mut dir, 20.0, 1.0, 800.0),
                FormationStep::Swept
            );
            sweeps += 1;
        }
        assert_eq!(sweeps, 120);

        let x_before = xs(&enemies);
        let y_before: Vec<f32> = enemies.iter().map(|e| e.rect.pos.y).collect();

        let step = advance_formation(&mut enemies, &mut dir, 20.0, 1.0, 800.0);
        assert_eq!(step, FormationStep::Dropped);
        assert_eq!(dir, -1.0);
        assert_eq!(xs(&enemies), x_before);
        for (enemy, y) in enemies.iter().zip(y_before) {
            assert_eq!(enemy.rect.pos.y, y + 20.0);
        }

        // Next frame sweeps left
        advance_formation(&mut enemies, &mut dir, 20.0, 1.0, 800.0);
        assert_eq!(enemies[0].rect.pos.x, x_before[0] - 1.0);
    }

    #[test]
    fn test_drop_skips_dead_members() {
        let tuning = Tuning::default();
        let mut enemies = create_formation(1, &tuning);
        enemies[0].alive = false;
        let dead_y = enemies[0].rect.pos.y;
        let mut dir = -1.0;
        for e in enemies.iter_mut() {
            e.rect.pos.x -= 100.0; // left column now at x = 0
        }

        assert_eq!(
            advance_formation(&mut enemies, &mut dir, 20.0, 1.0, 800.0),
            FormationStep::Dropped
        );
        assert_eq!(dir, 1.0);
        assert_eq!(enemies[0].rect.pos.y, dead_y);
        assert_eq!(enemies[10].rect.pos.y, 100.0 + 20.0);
    }

    #[test]
    fn test_wall_contact_only_counts_in_travel_direction() {
        let tuning = Tuning::default();
        let mut enemies = create_formation(1, &tuning);
        for e in enemies.iter_mut() {
            e.rect.pos.x -= 100.0;
        }
        // Touching the left wall while moving right: keep sweeping
        let mut dir = 1.0;
        assert_eq!(
            advance_formation(&mut enemies, &mut dir, 20.0, 1.0, 800.0),
            FormationStep::Swept
        );
    }

    #[test]
    fn test_empty_formation_is_idle() {
        let tuning = Tuning::default();
        let mut enemies = create_formation(1, &tuning);
        enemies.iter_mut().for_each(|e| e.alive = false);
        let mut dir = 1.0;
        assert_eq!(
            advance_formation(&mut enemies, &mut dir, 20.0, 1.0, 800.0),
            FormationStep::Idle
        );
        assert_eq!(dir, 1.0);
    }

    #[test]
    fn test_reached_line_ignores_dead() {
        let tuning = Tuning::default();
        let mut enemies = create_formation(1, &tuning);
        // Bottom row bottom edge: 250 + 30 = 280
        assert!(reached_line(&enemies, 280.0));
        assert!(!reached_line(&enemies, 280.5));

        for e in enemies.iter_mut().skip(40) {
            e.alive = false;
        }
        // Row 3 bottom edge: 200 + 30 = 230
        assert!(!reached_line(&enemies, 280.0));
        assert!(reached_line(&enemies, 230.0));
    }
}
