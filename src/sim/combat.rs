//! Bullets: firing, motion and hit resolution

use rand::Rng;

use super::collision::intersects;
use super::state::{Bullet, GameEvent, GameState, PowerUpKind};

/// Fire from the player's ship
///
/// Rejected when the live bullet count has already reached the cap. The cap
/// is checked once before firing, so a double shot from `cap - 1` live
/// bullets briefly overshoots to `cap + 1` unless `strict_bullet_cap` is set.
/// Returns whether anything was fired.
pub fn player_fire(state: &mut GameState) -> bool {
    let cap = state.tuning.max_player_bullets;
    let live = state.player_bullets.len();
    if live >= cap {
        return false;
    }

    let tuning = &state.tuning;
    let player = &state.player.rect;
    let y = player.top();
    let center = player.center_x();

    state
        .player_bullets
        .push(Bullet::player(center - tuning.bullet_width / 2.0, y, tuning));

    let double = state.effect_active(PowerUpKind::DoubleShot);
    if double && (!tuning.strict_bullet_cap || live + 1 < cap) {
        state
            .player_bullets
            .push(Bullet::player(center + tuning.double_shot_offset, y, tuning));
    }

    state.emit(GameEvent::ShotFired);
    true
}

/// Let a random alive enemy shoot, if the cooldown has elapsed and the roll succeeds
///
/// Returns the index of the enemy that fired.
pub fn enemy_fire(state: &mut GameState, now: f64) -> Option<usize> {
    if let Some(last) = state.last_enemy_shot {
        if now - last <= state.tuning.enemy_fire_cooldown_ms {
            return None;
        }
    }

    let alive = state.alive_enemies();
    if alive == 0 || !state.rng.random_bool(state.tuning.enemy_fire_chance) {
        return None;
    }

    let pick = state.rng.random_range(0..alive);
    let (index, shooter) = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive)
        .nth(pick)?;

    let x = shooter.rect.center_x() - state.tuning.bullet_width / 2.0;
    let y = shooter.rect.bottom();
    let bullet = Bullet::enemy(x, y, &state.tuning);
    state.enemy_bullets.push(bullet);
    state.last_enemy_shot = Some(now);
    Some(index)
}

/// Move both bullet streams and drop the ones that left the playfield
pub fn move_bullets(state: &mut GameState) {
    state.player_bullets.retain_mut(|b| {
        b.advance();
        b.rect.top() >= 0.0
    });

    let floor = state.tuning.playfield_height;
    state.enemy_bullets.retain_mut(|b| {
        b.advance();
        b.rect.top() <= floor
    });
}

/// Player bullets against the formation
///
/// Each bullet destroys at most the first alive enemy (in grid order) it
/// overlaps, then disappears.
pub fn resolve_player_hits(state: &mut GameState) {
    let enemies = &mut state.enemies;
    let mut kills = Vec::new();

    state.player_bullets.retain(|bullet| {
        match enemies
            .iter_mut()
            .find(|e| e.alive && intersects(&bullet.rect, &e.rect))
        {
            Some(enemy) => {
                enemy.alive = false;
                kills.push((enemy.tier, enemy.points));
                false
            }
            None => true,
        }
    });

    for (tier, points) in kills {
        state.score += u64::from(points);
        state.emit(GameEvent::EnemyDestroyed { tier, points });
        state.emit(GameEvent::ScoreChanged(state.score));
    }
}

/// Enemy bullets against the player
///
/// Returns true if the hit that took the last life ended the session.
pub fn resolve_enemy_hits(state: &mut GameState) -> bool {
    let mut i = 0;
    while i < state.enemy_bullets.len() {
        if !intersects(&state.enemy_bullets[i].rect, &state.player.rect) {
            i += 1;
            continue;
        }

        state.enemy_bullets.remove(i);
        if state.player.shielded {
            state.emit(GameEvent::ShieldAbsorbed);
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        state.emit(GameEvent::LivesChanged(state.lives));
        if state.lives == 0 {
            state.end_session();
            return true;
        }
    }
    false
}
