//! Falling power-ups and the single active timed effect

use rand::Rng;

use super::collision::{Rect, intersects};
use super::state::{ActiveEffect, GameEvent, GameState, PowerUp, PowerUpKind};

/// Roll the per-frame spawn chance; spawns at most one item
///
/// Returns the spawned kind, if any.
pub fn maybe_spawn(state: &mut GameState) -> Option<PowerUpKind> {
    let rate = state.tuning.power_up_spawn_rate;
    if rate <= 0.0 || !state.rng.random_bool(rate) {
        return None;
    }

    let max_x = (state.tuning.playfield_width - state.tuning.power_up_size).max(0.0);
    let x = state.rng.random::<f32>() * max_x;
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    spawn_at(state, x, kind);
    Some(kind)
}

/// Drop a power-up from the top edge at horizontal position `x`
pub fn spawn_at(state: &mut GameState, x: f32, kind: PowerUpKind) {
    let size = state.tuning.power_up_size;
    state.power_ups.push(PowerUp {
        rect: Rect::new(x, 0.0, size, size),
        kind,
    });
}

/// Apply an effect, replacing (and reverting) whatever was active
pub fn apply(state: &mut GameState, kind: PowerUpKind, now: f64) {
    if let Some(previous) = state.active_effect.take() {
        revert(state, previous.kind);
    }

    if kind == PowerUpKind::Shield {
        state.player.shielded = true;
    }
    let expires_at = now + state.tuning.power_up_duration_ms;
    state.active_effect = Some(ActiveEffect { kind, expires_at });
    log::debug!("Power-up {:?} ({}) active until {}", kind, kind.description(), expires_at);
    state.emit(GameEvent::PowerUpCollected(kind));
}

/// Undo the stateful part of an effect
fn revert(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Shield => state.player.shielded = false,
        PowerUpKind::DoubleShot => {}
    }
}

/// Move falling items, collect the ones touching the player, expire the active effect
pub fn update_power_ups(state: &mut GameState, now: f64) {
    let fall = state.tuning.power_up_fall_speed;
    let floor = state.tuning.playfield_height;
    let player = state.player.rect;
    let mut collected = Vec::new();

    state.power_ups.retain_mut(|p| {
        p.rect.pos.y += fall;
        if p.rect.top() > floor {
            false
        } else if intersects(&p.rect, &player) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        apply(state, kind, now);
    }

    if let Some(effect) = state.active_effect {
        if now >= effect.expires_at {
            revert(state, effect.kind);
            state.active_effect = None;
            log::debug!("Power-up {:?} expired", effect.kind);
            state.emit(GameEvent::PowerUpExpired(effect.kind));
        }
    }
}
