//! Keyboard and touch input, merged into one per-frame command set

use crate::sim::TickInput;

/// On-screen touch buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Fire,
}

/// Held-state of every input source
#[derive(Debug, Clone, Default)]
pub struct InputState {
    key_left: bool,
    key_right: bool,
    touch_left: bool,
    touch_right: bool,
    /// Autopilot toggle
    pub idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press (`KeyboardEvent.code`)
    ///
    /// Returns true when the press is a fire request.
    pub fn key_down(&mut self, code: &str) -> bool {
        match code {
            "ArrowLeft" => self.key_left = true,
            "ArrowRight" => self.key_right = true,
            "Space" => return true,
            "KeyI" => {
                self.idle_mode = !self.idle_mode;
                log::info!("Idle mode: {}", self.idle_mode);
            }
            _ => {}
        }
        false
    }

    /// Record a key release
    pub fn key_up(&mut self, code: &str) {
        match code {
            "ArrowLeft" => self.key_left = false,
            "ArrowRight" => self.key_right = false,
            _ => {}
        }
    }

    /// Touch button pressed. Returns true when it is a fire request.
    pub fn touch_start(&mut self, control: Control) -> bool {
        match control {
            Control::Left => self.touch_left = true,
            Control::Right => self.touch_right = true,
            Control::Fire => return true,
        }
        false
    }

    /// Touch button released
    pub fn touch_end(&mut self, control: Control) {
        match control {
            Control::Left => self.touch_left = false,
            Control::Right => self.touch_right = false,
            Control::Fire => {}
        }
    }

    /// Commands for the next tick. Firing goes through the shoot request
    /// path at event time, so `fire` is never set here.
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.key_left || self.touch_left,
            right: self.key_right || self.touch_right,
            fire: false,
            idle_mode: self.idle_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_and_touch_merge() {
        let mut input = InputState::new();
        assert!(!input.key_down("ArrowLeft"));
        assert!(!input.touch_start(Control::Right));
        let cmd = input.tick_input();
        assert!(cmd.left && cmd.right);

        input.key_up("ArrowLeft");
        input.touch_end(Control::Right);
        assert_eq!(input.tick_input(), TickInput::default());
    }

    #[test]
    fn test_touch_hold_survives_key_release() {
        let mut input = InputState::new();
        input.touch_start(Control::Left);
        input.key_down("ArrowLeft");
        input.key_up("ArrowLeft");
        assert!(input.tick_input().left);
    }

    #[test]
    fn test_fire_sources() {
        let mut input = InputState::new();
        assert!(input.key_down("Space"));
        assert!(input.touch_start(Control::Fire));
        assert!(!input.key_down("KeyQ"));
        assert!(!input.tick_input().fire);
    }

    #[test]
    fn test_idle_toggle() {
        let mut input = InputState::new();
        input.key_down("KeyI");
        assert!(input.tick_input().idle_mode);
        input.key_down("KeyI");
        assert!(!input.tick_input().idle_mode);
    }
}
