//! Per-frame render pass
//!
//! Draw order: background, player, then (while running) player bullets,
//! enemies, enemy bullets, power-ups.

use glam::Vec2;

use super::Surface;
use crate::sim::{Enemy, EnemyTier, GameState, Rect};

pub const BACKGROUND: &str = "#000";
pub const OUTLINE: &str = "#ffffff";
pub const PLAYER: &str = "#00ff00";
pub const PLAYER_SHIELDED: &str = "#00ffff";
pub const PLAYER_BULLET: &str = "#ffff00";
pub const ENEMY_BULLET: &str = "#ff00ff";
/// Corner radius of the rounded (tier 1) enemy
pub const SOLDIER_CORNER_RADIUS: f32 = 5.0;

/// Corner points of the diamond inscribed in `rect` (top, right, bottom, left)
pub fn diamond(rect: &Rect) -> [Vec2; 4] {
    let cx = rect.center_x();
    let cy = rect.top() + rect.size.y / 2.0;
    [
        Vec2::new(cx, rect.top()),
        Vec2::new(rect.right(), cy),
        Vec2::new(cx, rect.bottom()),
        Vec2::new(rect.left(), cy),
    ]
}

fn draw_enemy<S: Surface>(enemy: &Enemy, surface: &mut S) {
    let color = enemy.tier.color();
    match enemy.tier {
        EnemyTier::Grunt => {
            surface.fill_rect(&enemy.rect, color);
            surface.stroke_rect(&enemy.rect, OUTLINE);
        }
        EnemyTier::Soldier => {
            surface.fill_round_rect(&enemy.rect, SOLDIER_CORNER_RADIUS, color);
            surface.stroke_rect(&enemy.rect, OUTLINE);
        }
        EnemyTier::Commander => {
            let points = diamond(&enemy.rect);
            surface.fill_polygon(&points, color);
            surface.stroke_polygon(&points, OUTLINE);
        }
    }
}

/// Redraw the whole surface from the current state
pub fn draw_frame<S: Surface>(state: &GameState, surface: &mut S) {
    let tuning = &state.tuning;
    surface.clear(tuning.playfield_width, tuning.playfield_height, BACKGROUND);

    // The ship stays visible on the idle and game-over screens
    let player = &state.player;
    let body = if player.shielded { PLAYER_SHIELDED } else { PLAYER };
    surface.fill_rect(&player.rect, body);
    surface.stroke_rect(&player.rect, OUTLINE);

    if !state.is_running() {
        return;
    }

    for bullet in &state.player_bullets {
        surface.fill_rect(&bullet.rect, PLAYER_BULLET);
    }

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        draw_enemy(enemy, surface);
    }

    for bullet in &state.enemy_bullets {
        surface.fill_rect(&bullet.rect, ENEMY_BULLET);
    }

    for power_up in &state.power_ups {
        surface.fill_rect(&power_up.rect, power_up.kind.color());
        surface.stroke_rect(&power_up.rect, OUTLINE);
    }
}
