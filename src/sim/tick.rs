//! Per-frame simulation tick
//!
//! Advances the game by one display frame. Movement is per-frame rather
//! than per-second, so the caller is expected to tick at the display rate.

use super::combat;
use super::formation::{self, FormationStep};
use super::powerup;
use super::state::{GameEvent, GamePhase, GameState, Player};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move-left held (key or touch)
    pub left: bool,
    /// Move-right held (key or touch)
    pub right: bool,
    /// Fire once this frame, after the player moves
    pub fire: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Reset every piece of session state and start playing
pub fn start_new_game(state: &mut GameState) {
    let tuning = &state.tuning;

    state.player = Player::new(tuning);
    state.score = 0;
    state.lives = tuning.starting_lives;
    state.level = 1;
    state.frame = 0;
    state.player_bullets.clear();
    state.enemy_bullets.clear();
    state.power_ups.clear();
    state.active_effect = None;
    state.last_enemy_shot = None;
    state.level_advance_at = None;
    state.formation_speed = tuning.formation_base_speed;
    state.formation_direction = 1.0;
    state.enemies = formation::create_formation(1, tuning);
    state.phase = GamePhase::Running;

    log::info!("New game started (seed {})", state.seed);

    state.emit(GameEvent::SessionStarted);
    state.emit(GameEvent::ScoreChanged(state.score));
    state.emit(GameEvent::LivesChanged(state.lives));
    state.emit(GameEvent::LevelChanged(state.level));
}

/// Fire request from outside the tick (key press, touch button)
///
/// Ignored unless a session is running.
pub fn shoot_request(state: &mut GameState) -> bool {
    state.is_running() && combat::player_fire(state)
}

/// Advance the game state by one frame. `now` is wall-clock time in milliseconds.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    if !state.is_running() {
        return;
    }

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    state.frame += 1;

    // Player
    let width = state.tuning.playfield_width;
    let speed = state.player.speed;
    if input.left {
        state.player.shift(-speed, width);
    }
    if input.right {
        state.player.shift(speed, width);
    }
    if input.fire {
        combat::player_fire(state);
    }

    combat::move_bullets(state);

    let step = formation::advance_formation(
        &mut state.enemies,
        &mut state.formation_direction,
        state.tuning.formation_drop,
        state.formation_speed,
        width,
    );
    if step == FormationStep::Dropped {
        log::trace!("Formation dropped, now heading {}", state.formation_direction);
    }

    combat::resolve_player_hits(state);
    if combat::resolve_enemy_hits(state) {
        return;
    }

    let line = state.player.rect.top() - state.tuning.formation_reach_margin;
    if formation::reached_line(&state.enemies, line) {
        log::info!("Formation reached the player");
        state.end_session();
        return;
    }

    check_level_clear(state, now);

    powerup::update_power_ups(state, now);
    combat::enemy_fire(state, now);
    powerup::maybe_spawn(state);
}

/// Schedule the next level once the formation is gone, and run it when due
fn check_level_clear(state: &mut GameState, now: f64) {
    if state.alive_enemies() > 0 {
        return;
    }

    let due = match state.level_advance_at {
        Some(due) => due,
        None => {
            let due = now + state.tuning.level_clear_delay_ms;
            log::debug!("Formation cleared at level {}, advancing at {}", state.level, due);
            state.level_advance_at = Some(due);
            due
        }
    };

    if now >= due {
        state.level_advance_at = None;
        advance_level(state);
    }
}

/// Move to the next level: bonus life, faster formation, fresh grid
fn advance_level(state: &mut GameState) {
    let tuning = &state.tuning;

    state.level += 1;
    state.lives = state.lives.saturating_add(tuning.level_up_life_bonus);
    state.formation_speed =
        (state.formation_speed + tuning.formation_speed_step).min(tuning.formation_max_speed);
    state.formation_direction = 1.0;
    state.enemies = formation::create_formation(state.level, tuning);

    log::info!(
        "Level {} (formation speed {}, lives {})",
        state.level,
        state.formation_speed,
        state.lives
    );

    state.emit(GameEvent::LevelChanged(state.level));
    state.emit(GameEvent::LivesChanged(state.lives));
}

/// Demo-mode input: line up under the lowest alive enemy and shoot
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player.rect;
    let center = player.center_x();

    let target = state
        .enemies
        .iter()
        .filter(|e| e.alive)
        .max_by(|a, b| {
            a.rect
                .bottom()
                .total_cmp(&b.rect.bottom())
                .then_with(|| {
                    // Prefer the nearer one on ties
                    let da = (a.rect.center_x() - center).abs();
                    let db = (b.rect.center_x() - center).abs();
                    db.total_cmp(&da)
                })
        })
        .map(|e| (e.rect.center_x(), e.rect.bottom()));

    let Some((target_x, target_bottom)) = target else {
        return TickInput {
            idle_mode: true,
            ..Default::default()
        };
    };

    // Lead the target by the distance the formation sweeps while the bullet climbs
    let bullet_speed = state.tuning.player_bullet_speed.max(1.0);
    let flight_frames = ((player.top() - target_bottom) / bullet_speed).max(0.0);
    let lead = state.formation_speed * state.formation_direction * flight_frames;
    let delta = target_x + lead - center;
    let speed = state.player.speed;

    TickInput {
        left: delta < -speed,
        right: delta > speed,
        fire: delta.abs() <= speed * 2.0,
        idle_mode: true,
    }
}
