//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON blob can retune a build
//! without recompiling. Missing fields fall back to the stock values in
//! [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Player ===
    pub player_start_x: f32,
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub starting_lives: u32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    pub max_player_bullets: usize,
    /// Never let a double shot push the live count past `max_player_bullets`
    pub strict_bullet_cap: bool,
    pub double_shot_offset: f32,
    pub enemy_fire_cooldown_ms: f64,
    pub enemy_fire_chance: f64,

    // === Formation ===
    pub formation_rows: usize,
    pub formation_cols: usize,
    pub formation_origin_x: f32,
    pub formation_origin_y: f32,
    pub formation_spacing_x: f32,
    pub formation_spacing_y: f32,
    pub formation_base_speed: f32,
    pub formation_speed_step: f32,
    pub formation_max_speed: f32,
    pub formation_drop: f32,
    pub formation_reach_margin: f32,

    // === Progression ===
    pub level_clear_delay_ms: f64,
    pub level_up_life_bonus: u32,

    // === Power-ups ===
    pub power_up_size: f32,
    pub power_up_fall_speed: f32,
    pub power_up_duration_ms: f64,
    pub power_up_spawn_rate: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            player_start_x: PLAYER_START_X,
            player_start_y: PLAYER_START_Y,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            starting_lives: STARTING_LIVES,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            max_player_bullets: MAX_PLAYER_BULLETS,
            strict_bullet_cap: false,
            double_shot_offset: DOUBLE_SHOT_OFFSET,
            enemy_fire_cooldown_ms: ENEMY_FIRE_COOLDOWN_MS,
            enemy_fire_chance: ENEMY_FIRE_CHANCE,

            formation_rows: FORMATION_ROWS,
            formation_cols: FORMATION_COLS,
            formation_origin_x: FORMATION_ORIGIN_X,
            formation_origin_y: FORMATION_ORIGIN_Y,
            formation_spacing_x: FORMATION_SPACING_X,
            formation_spacing_y: FORMATION_SPACING_Y,
            formation_base_speed: FORMATION_BASE_SPEED,
            formation_speed_step: FORMATION_SPEED_STEP,
            formation_max_speed: FORMATION_MAX_SPEED,
            formation_drop: FORMATION_DROP,
            formation_reach_margin: FORMATION_REACH_MARGIN,

            level_clear_delay_ms: LEVEL_CLEAR_DELAY_MS,
            level_up_life_bonus: LEVEL_UP_LIFE_BONUS,

            power_up_size: POWER_UP_SIZE,
            power_up_fall_speed: POWER_UP_FALL_SPEED,
            power_up_duration_ms: POWER_UP_DURATION_MS,
            power_up_spawn_rate: POWER_UP_SPAWN_RATE,
        }
    }
}

/// Replace NaN/negative values with the stock value
fn non_negative(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

fn non_negative_ms(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

/// Upper bound for either formation grid dimension
const MAX_FORMATION_DIM: usize = 32;
/// Upper bound for the live player bullet cap
const MAX_BULLET_CAP: usize = 32;
/// Upper bound for the starting life count
const MAX_STARTING_LIVES: u32 = 99;
/// Upper bound for lives awarded per cleared level
const MAX_LIFE_BONUS: u32 = 10;

/// Clamp a count into `[min, max]`, warning when it moves
fn bounded<T: Copy + Ord + std::fmt::Display>(name: &str, value: T, min: T, max: T) -> T {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("Tuning {} = {} out of range, using {}", name, value, clamped);
    }
    clamped
}

fn probability(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

impl Tuning {
    /// Parse tuning from JSON. Fields not present keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Parse tuning from JSON, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring malformed tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Clamp every field into its valid domain
    ///
    /// Probabilities end up in [0, 1]; lengths, speeds and durations are
    /// non-negative and finite. Invalid values revert to the stock value.
    /// Counts are clamped: the grid and the bullet cap are never empty, and
    /// lives stay small enough that awarding them cannot overflow.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();

        self.formation_rows = bounded("formation_rows", self.formation_rows, 1, MAX_FORMATION_DIM);
        self.formation_cols = bounded("formation_cols", self.formation_cols, 1, MAX_FORMATION_DIM);
        self.max_player_bullets =
            bounded("max_player_bullets", self.max_player_bullets, 1, MAX_BULLET_CAP);
        self.starting_lives = bounded("starting_lives", self.starting_lives, 1, MAX_STARTING_LIVES);
        self.level_up_life_bonus =
            bounded("level_up_life_bonus", self.level_up_life_bonus, 0, MAX_LIFE_BONUS);

        self.playfield_width = non_negative(self.playfield_width, d.playfield_width);
        self.playfield_height = non_negative(self.playfield_height, d.playfield_height);
        self.player_start_x = non_negative(self.player_start_x, d.player_start_x);
        self.player_start_y = non_negative(self.player_start_y, d.player_start_y);
        self.player_width = non_negative(self.player_width, d.player_width);
        self.player_height = non_negative(self.player_height, d.player_height);
        self.player_speed = non_negative(self.player_speed, d.player_speed);

        self.bullet_width = non_negative(self.bullet_width, d.bullet_width);
        self.bullet_height = non_negative(self.bullet_height, d.bullet_height);
        self.player_bullet_speed = non_negative(self.player_bullet_speed, d.player_bullet_speed);
        self.enemy_bullet_speed = non_negative(self.enemy_bullet_speed, d.enemy_bullet_speed);
        self.double_shot_offset = non_negative(self.double_shot_offset, d.double_shot_offset);
        self.enemy_fire_cooldown_ms =
            non_negative_ms(self.enemy_fire_cooldown_ms, d.enemy_fire_cooldown_ms);
        self.enemy_fire_chance = probability(self.enemy_fire_chance, d.enemy_fire_chance);

        self.formation_origin_x = non_negative(self.formation_origin_x, d.formation_origin_x);
        self.formation_origin_y = non_negative(self.formation_origin_y, d.formation_origin_y);
        self.formation_spacing_x = non_negative(self.formation_spacing_x, d.formation_spacing_x);
        self.formation_spacing_y = non_negative(self.formation_spacing_y, d.formation_spacing_y);
        self.formation_base_speed =
            non_negative(self.formation_base_speed, d.formation_base_speed);
        self.formation_speed_step =
            non_negative(self.formation_speed_step, d.formation_speed_step);
        self.formation_max_speed = non_negative(self.formation_max_speed, d.formation_max_speed)
            .max(self.formation_base_speed);
        self.formation_drop = non_negative(self.formation_drop, d.formation_drop);
        self.formation_reach_margin =
            non_negative(self.formation_reach_margin, d.formation_reach_margin);

        self.level_clear_delay_ms =
            non_negative_ms(self.level_clear_delay_ms, d.level_clear_delay_ms);

        self.power_up_size = non_negative(self.power_up_size, d.power_up_size);
        self.power_up_fall_speed = non_negative(self.power_up_fall_speed, d.power_up_fall_speed);
        self.power_up_duration_ms =
            non_negative_ms(self.power_up_duration_ms, d.power_up_duration_ms);
        self.power_up_spawn_rate = probability(self.power_up_spawn_rate, d.power_up_spawn_rate);

        self
    }

    /// Number of enemies in a freshly created formation
    pub fn formation_size(&self) -> usize {
        self.formation_rows.saturating_mul(self.formation_cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 5, "strict_bullet_cap": true }"#)
            .expect("valid json");
        assert_eq!(tuning.starting_lives, 5);
        assert!(tuning.strict_bullet_cap);
        assert_eq!(tuning.max_player_bullets, 3);
        assert_eq!(tuning.formation_size(), 50);
    }

    #[test]
    fn test_sanitize_clamps_bad_values() {
        let tuning = Tuning {
            enemy_fire_chance: 4.0,
            power_up_spawn_rate: -1.0,
            player_speed: f32::NAN,
            formation_drop: -20.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(tuning.enemy_fire_chance, 1.0);
        assert_eq!(tuning.power_up_spawn_rate, 0.0);
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
        assert_eq!(tuning.formation_drop, FORMATION_DROP);
    }

    #[test]
    fn test_sanitize_clamps_counts() {
        let tuning = Tuning::from_json(
            r#"{
                "formation_rows": 1000000,
                "formation_cols": 0,
                "max_player_bullets": 0,
                "starting_lives": 0,
                "level_up_life_bonus": 4294967295
            }"#,
        )
        .expect("valid json");

        assert_eq!(tuning.formation_rows, MAX_FORMATION_DIM);
        assert_eq!(tuning.formation_cols, 1);
        assert_eq!(tuning.formation_size(), MAX_FORMATION_DIM);
        assert_eq!(tuning.max_player_bullets, 1);
        assert_eq!(tuning.starting_lives, 1);
        assert_eq!(tuning.level_up_life_bonus, MAX_LIFE_BONUS);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let tuning = Tuning::from_json_or_default("{ not json");
        assert_eq!(tuning, Tuning::default());
    }
}
