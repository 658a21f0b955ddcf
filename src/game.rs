//! Loop driver
//!
//! Owns the simulation and its collaborators. The host calls [`Game::frame`]
//! once per display frame and forwards input events as they arrive.

use crate::platform::{AudioCues, Control, Hud, InputState, dispatch};
use crate::renderer::{Surface, draw_frame};
use crate::sim::{self, GamePhase, GameState};
use crate::tuning::Tuning;

pub struct Game<S: Surface, A: AudioCues, H: Hud> {
    state: GameState,
    input: InputState,
    surface: S,
    audio: A,
    hud: H,
}

impl<S: Surface, A: AudioCues, H: Hud> Game<S, A, H> {
    /// Build an idle game; nothing runs until [`Game::start_new_game`]
    pub fn new(tuning: Tuning, seed: u64, surface: S, audio: A, hud: H) -> Self {
        Self {
            state: GameState::new(tuning, seed),
            input: InputState::new(),
            surface,
            audio,
            hud,
        }
    }

    /// Reset and start a session (also the restart button)
    pub fn start_new_game(&mut self) {
        sim::start_new_game(&mut self.state);
        self.flush_events();
    }

    /// Fire at event time. Ignored unless running.
    pub fn shoot_request(&mut self) -> bool {
        let fired = sim::shoot_request(&mut self.state);
        self.flush_events();
        fired
    }

    pub fn key_down(&mut self, code: &str) {
        if self.input.key_down(code) {
            self.shoot_request();
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    pub fn touch_start(&mut self, control: Control) {
        if self.input.touch_start(control) {
            self.shoot_request();
        }
    }

    pub fn touch_end(&mut self, control: Control) {
        self.input.touch_end(control);
    }

    /// One display frame: tick while running, notify collaborators, redraw
    pub fn frame(&mut self, now: f64) {
        let input = self.input.tick_input();
        sim::tick(&mut self.state, &input, now);
        self.flush_events();
        self.audio.update(now);
        draw_frame(&self.state, &mut self.surface);
    }

    fn flush_events(&mut self) {
        let events = self.state.drain_events();
        dispatch(&events, &mut self.audio, &mut self.hud);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::renderer::shapes::{PLAYER, PLAYER_BULLET};

    #[derive(Default)]
    struct FakeAudio {
        shots: u32,
        booms: u32,
        ambient: bool,
        updates: u32,
    }

    impl AudioCues for FakeAudio {
        fn shot_fired(&mut self) {
            self.shots += 1;
        }
        fn enemy_destroyed(&mut self) {
            self.booms += 1;
        }
        fn start_ambient(&mut self) {
            self.ambient = true;
        }
        fn stop_ambient(&mut self) {
            self.ambient = false;
        }
        fn update(&mut self, _now: f64) {
            self.updates += 1;
        }
    }

    #[derive(Default)]
    struct FakeHud {
        score: u64,
        lives: u32,
        level: u32,
        game_over: Option<u64>,
    }

    impl Hud for FakeHud {
        fn set_score(&mut self, score: u64) {
            self.score = score;
        }
        fn set_lives(&mut self, lives: u32) {
            self.lives = lives;
        }
        fn set_level(&mut self, level: u32) {
            self.level = level;
        }
        fn show_game_over(&mut self, final_score: u64) {
            self.game_over = Some(final_score);
        }
        fn hide_game_over(&mut self) {
            self.game_over = None;
        }
    }

    type TestGame = Game<DrawList, FakeAudio, FakeHud>;

    fn game() -> TestGame {
        let tuning = Tuning {
            enemy_fire_chance: 0.0,
            power_up_spawn_rate: 0.0,
            ..Default::default()
        };
        Game::new(
            tuning,
            7,
            DrawList::new(),
            FakeAudio::default(),
            FakeHud::default(),
        )
    }

    #[test]
    fn test_idle_frame_draws_without_ticking() {
        let mut game = game();
        game.frame(16.0);
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.state().frame, 0);
        assert_eq!(game.surface().count_color(PLAYER), 1);
        assert_eq!(game.audio().updates, 1);
    }

    #[test]
    fn test_start_updates_hud_and_music() {
        let mut game = game();
        game.start_new_game();
        assert!(game.audio().ambient);
        assert_eq!(game.hud().lives, 3);
        assert_eq!(game.hud().level, 1);
        assert_eq!(game.hud().score, 0);
        assert_eq!(game.hud().game_over, None);
    }

    #[test]
    fn test_space_fires_only_while_running() {
        let mut game = game();
        game.key_down("Space");
        assert_eq!(game.audio().shots, 0);

        game.start_new_game();
        game.key_down("Space");
        assert_eq!(game.audio().shots, 1);
        assert_eq!(game.state().player_bullets.len(), 1);

        game.frame(16.0);
        assert_eq!(game.surface().count_color(PLAYER_BULLET), 1);
    }

    #[test]
    fn test_held_key_moves_player() {
        let mut game = game();
        game.start_new_game();
        let x0 = game.state().player.rect.pos.x;

        game.key_down("ArrowRight");
        game.frame(16.0);
        game.frame(32.0);
        game.key_up("ArrowRight");
        game.frame(48.0);

        assert_eq!(game.state().player.rect.pos.x, x0 + 10.0);
    }

    #[test]
    fn test_touch_fire_button() {
        let mut game = game();
        game.start_new_game();
        game.touch_start(Control::Fire);
        game.touch_end(Control::Fire);
        assert_eq!(game.state().player_bullets.len(), 1);
    }

    #[test]
    fn test_game_over_reaches_hud() {
        let mut game = game();
        game.start_new_game();
        game.state.score = 120;
        game.state.lives = 1;
        let player = game.state.player.rect;
        let mut bullet = sim::Bullet::enemy(player.center_x(), player.top(), &game.state.tuning);
        bullet.vy = 0.0;
        game.state.enemy_bullets.push(bullet);

        game.frame(16.0);

        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.hud().game_over, Some(120));
        assert_eq!(game.hud().lives, 0);
        assert!(!game.audio().ambient);

        game.start_new_game();
        assert_eq!(game.hud().game_over, None);
        assert_eq!(game.hud().score, 0);
    }
}
