//! Ambient loop sequencing
//!
//! Pure timing logic; the audio backend only retunes its oscillators to
//! whatever note this hands back.

/// Note cycle in Hz
pub const AMBIENT_NOTES: [f32; 8] = [220.0, 247.0, 262.0, 294.0, 330.0, 294.0, 262.0, 247.0];
/// Ratio of the harmony voice to the melody voice
pub const HARMONY_RATIO: f32 = 1.5;
/// Time each note is held (ms)
pub const NOTE_INTERVAL_MS: f64 = 800.0;

/// Steps through [`AMBIENT_NOTES`] on a fixed interval
#[derive(Debug, Clone, Default)]
pub struct AmbientTrack {
    index: usize,
    next_step_at: Option<f64>,
}

impl AmbientTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.next_step_at.is_some()
    }

    /// Begin from the first note. Returns the note to sound now.
    pub fn start(&mut self, now: f64) -> f32 {
        self.index = 0;
        self.next_step_at = Some(now + NOTE_INTERVAL_MS);
        AMBIENT_NOTES[0]
    }

    pub fn stop(&mut self) {
        self.next_step_at = None;
    }

    /// Returns the new note when the interval has elapsed
    ///
    /// A long stall advances a single note and re-arms from `now`, so the
    /// loop never fires a burst of catch-up steps.
    pub fn advance(&mut self, now: f64) -> Option<f32> {
        let due = self.next_step_at?;
        if now < due {
            return None;
        }
        self.index = (self.index + 1) % AMBIENT_NOTES.len();
        self.next_step_at = Some(now + NOTE_INTERVAL_MS);
        Some(AMBIENT_NOTES[self.index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_every_interval() {
        let mut track = AmbientTrack::new();
        assert_eq!(track.start(0.0), 220.0);
        assert_eq!(track.advance(799.0), None);
        assert_eq!(track.advance(800.0), Some(247.0));
        assert_eq!(track.advance(1599.0), None);
        assert_eq!(track.advance(1600.0), Some(262.0));
    }

    #[test]
    fn test_cycle_wraps() {
        let mut track = AmbientTrack::new();
        track.start(0.0);
        let mut now = 0.0;
        let mut heard = Vec::new();
        for _ in 0..AMBIENT_NOTES.len() {
            now += NOTE_INTERVAL_MS;
            heard.extend(track.advance(now));
        }
        assert_eq!(heard.last(), Some(&220.0));
        assert_eq!(heard.len(), AMBIENT_NOTES.len());
    }

    #[test]
    fn test_stopped_track_is_silent() {
        let mut track = AmbientTrack::new();
        assert_eq!(track.advance(10_000.0), None);
        track.start(0.0);
        track.stop();
        assert!(!track.is_playing());
        assert_eq!(track.advance(10_000.0), None);
    }

    #[test]
    fn test_stall_advances_once() {
        let mut track = AmbientTrack::new();
        track.start(0.0);
        assert_eq!(track.advance(5_000.0), Some(247.0));
        assert_eq!(track.advance(5_001.0), None);
    }
}
