//! Game state and core simulation types
//!
//! Everything a session owns lives in [`GameState`]; nothing outlives a
//! new-game reset.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session has been started yet
    NotStarted,
    /// Active gameplay (includes the pause between a cleared formation and the next level)
    Running,
    /// Session ended; only a new game leaves this phase
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal movement per frame
    pub speed: f32,
    /// Enemy bullets are absorbed while set
    pub shielded: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(
                tuning.player_start_x,
                tuning.player_start_y,
                tuning.player_width,
                tuning.player_height,
            ),
            speed: tuning.player_speed,
            shielded: false,
        }
    }

    /// Move horizontally, staying inside `[0, playfield_width]`
    pub fn shift(&mut self, dx: f32, playfield_width: f32) {
        let max_x = (playfield_width - self.rect.size.x).max(0.0);
        self.rect.pos.x = (self.rect.pos.x + dx).clamp(0.0, max_x);
    }
}

/// A projectile. Player bullets travel up, enemy bullets travel down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    /// Vertical displacement per frame (negative = upward)
    pub vy: f32,
}

impl Bullet {
    /// Player bullet whose top-left corner sits at `(x, y)`
    pub fn player(x: f32, y: f32, tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(x, y, tuning.bullet_width, tuning.bullet_height),
            vy: -tuning.player_bullet_speed,
        }
    }

    /// Enemy bullet whose top-left corner sits at `(x, y)`
    pub fn enemy(x: f32, y: f32, tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(x, y, tuning.bullet_width, tuning.bullet_height),
            vy: tuning.enemy_bullet_speed,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.rect.pos.y += self.vy;
    }
}

/// Enemy classification; higher tiers are bigger and worth more
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTier {
    /// Tier 0: red square
    Grunt,
    /// Tier 1: orange rounded block
    Soldier,
    /// Tier 2: magenta diamond
    Commander,
}

impl EnemyTier {
    pub fn points(&self) -> u32 {
        match self {
            EnemyTier::Grunt => 10,
            EnemyTier::Soldier => 20,
            EnemyTier::Commander => 30,
        }
    }

    /// Sprite size (width, height)
    pub fn size(&self) -> Vec2 {
        match self {
            EnemyTier::Grunt => Vec2::new(40.0, 30.0),
            EnemyTier::Soldier => Vec2::new(45.0, 35.0),
            EnemyTier::Commander => Vec2::new(50.0, 40.0),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EnemyTier::Grunt => "#ff0000",
            EnemyTier::Soldier => "#ff8800",
            EnemyTier::Commander => "#ff00ff",
        }
    }
}

/// A formation member. Destroyed enemies stay in place with `alive = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub alive: bool,
    pub tier: EnemyTier,
    pub points: u32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, tier: EnemyTier) -> Self {
        let size = tier.size();
        Self {
            rect: Rect::new(x, y, size.x, size.y),
            alive: true,
            tier,
            points: tier.points(),
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    DoubleShot,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::DoubleShot, PowerUpKind::Shield];

    pub fn color(&self) -> &'static str {
        match self {
            PowerUpKind::DoubleShot => "#00ffff",
            PowerUpKind::Shield => "#ffff00",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PowerUpKind::DoubleShot => "Shoot two bullets at once",
            PowerUpKind::Shield => "Temporary invincibility",
        }
    }
}

/// A falling power-up item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

/// The single timed effect currently applied to the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    /// Absolute time (ms) at which the effect wears off
    pub expires_at: f64,
}

/// Notifications for the audio and HUD collaborators, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New session began (start ambient loop, hide game-over panel)
    SessionStarted,
    /// Player fire request accepted
    ShotFired,
    EnemyDestroyed { tier: EnemyTier, points: u32 },
    /// Shield soaked up an enemy bullet
    ShieldAbsorbed,
    ScoreChanged(u64),
    LivesChanged(u32),
    LevelChanged(u32),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    GameOver { final_score: u64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Balance parameters this session runs with
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    /// Frames simulated this session
    pub frame: u64,
    pub player: Player,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    /// Fixed-size grid; indices are stable for the whole level
    pub enemies: Vec<Enemy>,
    /// +1 sweeping right, -1 sweeping left
    pub formation_direction: f32,
    /// Horizontal sweep per frame
    pub formation_speed: f32,
    pub power_ups: Vec<PowerUp>,
    pub active_effect: Option<ActiveEffect>,
    /// Time (ms) of the most recent enemy shot this session
    pub last_enemy_shot: Option<f64>,
    /// Deadline (ms) of the pending level advance, if the formation was cleared
    pub level_advance_at: Option<f64>,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state; call `start_new_game` to begin playing
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        Self {
            player: Player::new(&tuning),
            formation_speed: tuning.formation_base_speed,
            lives: tuning.starting_lives,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            score: 0,
            level: 1,
            frame: 0,
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            formation_direction: 1.0,
            power_ups: Vec::new(),
            active_effect: None,
            last_enemy_shot: None,
            level_advance_at: None,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Number of enemies still alive in the formation
    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Whether the given effect is currently applied
    pub fn effect_active(&self, kind: PowerUpKind) -> bool {
        self.active_effect.is_some_and(|e| e.kind == kind)
    }

    /// Queue a notification for the collaborators
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending notifications (not yet drained)
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// End the running session. Later calls are no-ops.
    pub fn end_session(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        if self.level_advance_at.take().is_some() {
            log::debug!("Dropped pending level advance (session ended)");
        }
        log::info!(
            "Game over: score {} at level {} after {} frames",
            self.score,
            self.level,
            self.frame
        );
        self.emit(GameEvent::GameOver {
            final_score: self.score,
        });
    }
}
