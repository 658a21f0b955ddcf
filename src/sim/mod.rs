//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Seeded RNG only
//! - Wall-clock time is passed in, never read
//! - Collaborators are notified through queued `GameEvent`s

pub mod collision;
pub mod combat;
pub mod formation;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{Rect, intersects};
pub use combat::{enemy_fire, move_bullets, player_fire, resolve_enemy_hits, resolve_player_hits};
pub use formation::{FormationStep, advance_formation, create_formation, reached_line, tier_for};
pub use state::{
    ActiveEffect, Bullet, Enemy, EnemyTier, GameEvent, GamePhase, GameState, Player, PowerUp,
    PowerUpKind,
};
pub use tick::{TickInput, shoot_request, start_new_game, tick};
