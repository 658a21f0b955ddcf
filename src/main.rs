//! Canvas Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use canvas_invaders::audio::AudioManager;
    use canvas_invaders::platform::{Control, Hud};
    use canvas_invaders::renderer::CanvasSurface;
    use canvas_invaders::{Game, Settings, Tuning};

    type WebGame = Game<CanvasSurface, AudioManager, DomHud>;

    /// Score/lives/level readouts and the game-over panel
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_panel_display(&self, display: &str) {
            let panel = self
                .document
                .get_element_by_id("gameOverScreen")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(panel) = panel {
                let _ = panel.style().set_property("display", display);
            }
        }
    }

    impl Hud for DomHud {
        fn set_score(&mut self, score: u64) {
            self.set_text("score", &score.to_string());
        }

        fn set_lives(&mut self, lives: u32) {
            self.set_text("lives", &lives.to_string());
        }

        fn set_level(&mut self, level: u32) {
            self.set_text("level", &level.to_string());
        }

        fn show_game_over(&mut self, final_score: u64) {
            self.set_text("finalScore", &final_score.to_string());
            self.set_panel_display("block");
        }

        fn hide_game_over(&mut self) {
            self.set_panel_display("none");
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Canvas Invaders starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas element")?
            .dyn_into()?;

        let tuning = Tuning::default();
        canvas.set_width(tuning.playfield_width as u32);
        canvas.set_height(tuning.playfield_height as u32);

        let surface = CanvasSurface::new(&canvas)?;
        let audio = AudioManager::new(load_settings(&document));
        let hud = DomHud {
            document: document.clone(),
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, seed, surface, audio, hud)));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(&document, game.clone())?;
        setup_touch_buttons(&document, game.clone())?;
        setup_restart_button(&document, game.clone())?;

        game.borrow_mut().start_new_game();
        request_animation_frame(game);

        log::info!("Canvas Invaders running!");
        Ok(())
    }

    /// Preferences from an optional `#settings` JSON element
    fn load_settings(document: &Document) -> Settings {
        let Some(json) = document
            .get_element_by_id("settings")
            .and_then(|el| el.text_content())
        else {
            return Settings::default();
        };
        Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Invalid settings JSON, using defaults: {}", e);
            Settings::default()
        })
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<WebGame>>) -> Result<(), JsValue> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if code == "Space" {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                g.audio().resume();
                g.key_down(&code);
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key_up(&event.code());
            });
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_touch_buttons(
        document: &Document,
        game: Rc<RefCell<WebGame>>,
    ) -> Result<(), JsValue> {
        for (id, control) in [
            ("leftBtn", Control::Left),
            ("rightBtn", Control::Right),
            ("fireBtn", Control::Fire),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Touch button #{} missing", id);
                continue;
            };

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.audio().resume();
                    g.touch_start(control);
                });
                btn.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                    game.borrow_mut().touch_end(control);
                });
                btn.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }

        Ok(())
    }

    /// The game-over panel's button starts a fresh session
    fn setup_restart_button(
        document: &Document,
        game: Rc<RefCell<WebGame>>,
    ) -> Result<(), JsValue> {
        let Some(btn) = document.query_selector("#gameOverScreen button")? else {
            log::warn!("No restart button in #gameOverScreen");
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            g.audio().resume();
            g.start_new_game();
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use canvas_invaders::Game;
    use canvas_invaders::platform::{AudioCues, Hud};
    use canvas_invaders::renderer::DrawList;
    use canvas_invaders::tuning::Tuning;

    /// Nominal display frame (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEFAULT_FRAMES: u64 = 60 * 60 * 5;

    /// Audio cues go to the log
    struct LogAudio;

    impl AudioCues for LogAudio {
        fn shot_fired(&mut self) {
            log::trace!("pew");
        }
        fn enemy_destroyed(&mut self) {
            log::trace!("boom");
        }
        fn start_ambient(&mut self) {
            log::debug!("Ambient loop on");
        }
        fn stop_ambient(&mut self) {
            log::debug!("Ambient loop off");
        }
    }

    /// HUD readouts go to the log
    struct LogHud;

    impl Hud for LogHud {
        fn set_score(&mut self, score: u64) {
            log::trace!("Score: {}", score);
        }
        fn set_lives(&mut self, lives: u32) {
            log::debug!("Lives: {}", lives);
        }
        fn set_level(&mut self, level: u32) {
            log::info!("Level: {}", level);
        }
        fn show_game_over(&mut self, final_score: u64) {
            log::info!("GAME OVER - final score {}", final_score);
        }
        fn hide_game_over(&mut self) {}
    }

    /// `canvas-invaders [seed] [frames] [tuning.json]`
    pub fn run() {
        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xC0FFEE);
        let frames = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_FRAMES);
        let tuning = match args.next() {
            Some(path) => match std::fs::read_to_string(&path) {
                Ok(json) => Tuning::from_json_or_default(&json),
                Err(e) => {
                    log::warn!("Could not read tuning file {}: {}", path, e);
                    Tuning::default()
                }
            },
            None => Tuning::default(),
        };

        log::info!("Headless autopilot run: seed {}, {} frames", seed, frames);

        let mut game = Game::new(tuning, seed, DrawList::new(), LogAudio, LogHud);
        game.input_mut().idle_mode = true;
        game.start_new_game();

        let mut now = 0.0;
        let mut played = 0;
        while played < frames && game.state().is_running() {
            now += FRAME_MS;
            game.frame(now);
            played += 1;
        }

        let state = game.state();
        log::info!(
            "Finished after {} frames: {:?}, score {}, level {}, lives {}, {} draw commands in last frame",
            played,
            state.phase,
            state.score,
            state.level,
            state.lives,
            game.surface().commands.len()
        );

        if log::log_enabled!(log::Level::Debug) {
            match serde_json::to_string(state) {
                Ok(json) => log::debug!("Final state: {}", json),
                Err(e) => log::warn!("Could not serialize state: {}", e),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas Invaders (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build to play");
    headless::run();
}
