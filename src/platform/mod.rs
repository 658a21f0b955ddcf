//! Platform abstraction layer
//!
//! The simulation never talks to the browser directly. It queues
//! `GameEvent`s, and the loop driver hands them to:
//! - an [`AudioCues`] sink (shot, enemy destroyed, ambient loop)
//! - a [`Hud`] sink (score/lives/level readouts, game-over panel)
//!
//! Input from keys and touch buttons is unified in [`input::InputState`].

pub mod input;
pub mod music;

pub use input::{Control, InputState};
pub use music::AmbientTrack;

use crate::sim::GameEvent;

/// Sound collaborator
pub trait AudioCues {
    fn shot_fired(&mut self);
    fn enemy_destroyed(&mut self);
    fn start_ambient(&mut self);
    fn stop_ambient(&mut self);
    /// Called once per frame with the current time (ms)
    fn update(&mut self, _now: f64) {}
}

/// Score/lives/level display collaborator
pub trait Hud {
    fn set_score(&mut self, score: u64);
    fn set_lives(&mut self, lives: u32);
    fn set_level(&mut self, level: u32);
    fn show_game_over(&mut self, final_score: u64);
    fn hide_game_over(&mut self);
}

/// Route simulation events to the collaborators
pub fn dispatch<A: AudioCues, H: Hud>(events: &[GameEvent], audio: &mut A, hud: &mut H) {
    for event in events {
        match *event {
            GameEvent::SessionStarted => {
                audio.start_ambient();
                hud.hide_game_over();
            }
            GameEvent::ShotFired => audio.shot_fired(),
            GameEvent::EnemyDestroyed { .. } => audio.enemy_destroyed(),
            GameEvent::ScoreChanged(score) => hud.set_score(score),
            GameEvent::LivesChanged(lives) => hud.set_lives(lives),
            GameEvent::LevelChanged(level) => hud.set_level(level),
            GameEvent::GameOver { final_score } => {
                audio.stop_ambient();
                hud.show_game_over(final_score);
            }
            GameEvent::ShieldAbsorbed
            | GameEvent::PowerUpCollected(_)
            | GameEvent::PowerUpExpired(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EnemyTier;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl AudioCues for Recorder {
        fn shot_fired(&mut self) {
            self.calls.push("shot".into());
        }
        fn enemy_destroyed(&mut self) {
            self.calls.push("boom".into());
        }
        fn start_ambient(&mut self) {
            self.calls.push("music on".into());
        }
        fn stop_ambient(&mut self) {
            self.calls.push("music off".into());
        }
    }

    impl Hud for Recorder {
        fn set_score(&mut self, score: u64) {
            self.calls.push(format!("score {score}"));
        }
        fn set_lives(&mut self, lives: u32) {
            self.calls.push(format!("lives {lives}"));
        }
        fn set_level(&mut self, level: u32) {
            self.calls.push(format!("level {level}"));
        }
        fn show_game_over(&mut self, final_score: u64) {
            self.calls.push(format!("game over {final_score}"));
        }
        fn hide_game_over(&mut self) {
            self.calls.push("hide panel".into());
        }
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut audio = Recorder::default();
        let mut hud = Recorder::default();
        let events = [
            GameEvent::SessionStarted,
            GameEvent::ShotFired,
            GameEvent::EnemyDestroyed {
                tier: EnemyTier::Grunt,
                points: 10,
            },
            GameEvent::ScoreChanged(10),
            GameEvent::ShieldAbsorbed,
            GameEvent::LivesChanged(2),
            GameEvent::LevelChanged(2),
            GameEvent::GameOver { final_score: 10 },
        ];

        dispatch(&events, &mut audio, &mut hud);

        assert_eq!(audio.calls, vec!["music on", "shot", "boom", "music off"]);
        assert_eq!(
            hud.calls,
            vec!["hide panel", "score 10", "lives 2", "level 2", "game over 10"]
        );
    }
}
