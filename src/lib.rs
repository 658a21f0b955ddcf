//! Canvas Invaders - a formation-sweep arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (formation, combat, power-ups, game state)
//! - `game`: Loop driver wiring the simulation to its collaborators
//! - `renderer`: Draw-command surface and the per-frame render pass
//! - `platform`: Input unification and audio/HUD collaborator traits
//! - `tuning`: Data-driven game balance
//! - `settings`: Player audio preferences
//! - `audio`: Web Audio cues (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// These are the stock values; `Tuning::default()` is built from them.
pub mod consts {
    /// Playfield dimensions (canvas backing-store size)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 375.0;
    pub const PLAYER_START_Y: f32 = 520.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const STARTING_LIVES: u32 = 3;

    /// Bullets (both owners share a shape)
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const PLAYER_BULLET_SPEED: f32 = 7.0;
    pub const ENEMY_BULLET_SPEED: f32 = 3.0;
    pub const MAX_PLAYER_BULLETS: usize = 3;
    /// Horizontal offset of the second double-shot bullet from the player's center
    pub const DOUBLE_SHOT_OFFSET: f32 = 10.0;

    /// Enemy fire pacing
    pub const ENEMY_FIRE_COOLDOWN_MS: f64 = 1000.0;
    pub const ENEMY_FIRE_CHANCE: f64 = 0.3;

    /// Formation grid
    pub const FORMATION_ROWS: usize = 5;
    pub const FORMATION_COLS: usize = 10;
    pub const FORMATION_ORIGIN_X: f32 = 100.0;
    pub const FORMATION_ORIGIN_Y: f32 = 50.0;
    pub const FORMATION_SPACING_X: f32 = 60.0;
    pub const FORMATION_SPACING_Y: f32 = 50.0;
    pub const FORMATION_BASE_SPEED: f32 = 1.0;
    pub const FORMATION_SPEED_STEP: f32 = 0.5;
    pub const FORMATION_MAX_SPEED: f32 = 3.0;
    pub const FORMATION_DROP: f32 = 20.0;
    /// Formation loses when an alive enemy's bottom edge comes this close to the player
    pub const FORMATION_REACH_MARGIN: f32 = 10.0;

    /// Delay between clearing the formation and the next level starting
    pub const LEVEL_CLEAR_DELAY_MS: f64 = 1000.0;
    pub const LEVEL_UP_LIFE_BONUS: u32 = 1;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 30.0;
    pub const POWER_UP_FALL_SPEED: f32 = 2.0;
    pub const POWER_UP_DURATION_MS: f64 = 10_000.0;
    /// Per-frame spawn probability (a 1% frame gate times a 10% spawn roll)
    pub const POWER_UP_SPAWN_RATE: f64 = 0.001;
}
