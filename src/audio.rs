//! Audio system using Web Audio API
//!
//! Procedurally generated tones, no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::AudioCues;
use crate::platform::music::{AmbientTrack, HARMONY_RATIO};
use crate::settings::Settings;

/// Peak gain of the shot blip before volume scaling
const SHOT_GAIN: f32 = 0.1;
/// Peak gain of the explosion before volume scaling
const HIT_GAIN: f32 = 0.15;
/// Ambient loop gain before volume scaling
const AMBIENT_GAIN: f32 = 0.03;
/// Envelope floor (exponential ramps cannot reach zero)
const RAMP_FLOOR: f32 = 0.01;

/// The two running ambient voices and their shared gain
struct AmbientVoices {
    melody: OscillatorNode,
    harmony: OscillatorNode,
    _gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    settings: Settings,
    track: AmbientTrack,
    voices: Option<AmbientVoices>,
    /// Last frame time seen by `update` (ms)
    clock: f64,
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            settings,
            track: AmbientTrack::new(),
            voices: None,
            clock: 0.0,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single falling sweep
    fn sweep(&self, from_hz: f32, to_hz: f32, peak: f32, secs: f64) {
        let vol = self.settings.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        let Some((osc, gain)) = self.create_osc(ctx, from_hz, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(from_hz, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to_hz, t + secs)
            .ok();
        gain.gain()
            .set_value_at_time((peak * vol).max(RAMP_FLOOR), t)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(RAMP_FLOOR, t + secs)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + secs).ok();
    }

    fn retune(&self, note: f32) {
        let (Some(ctx), Some(voices)) = (&self.ctx, &self.voices) else {
            return;
        };
        let t = ctx.current_time();
        voices.melody.frequency().set_value_at_time(note, t).ok();
        voices
            .harmony
            .frequency()
            .set_value_at_time(note * HARMONY_RATIO, t)
            .ok();
    }
}

impl AudioCues for AudioManager {
    /// Shot - quick 800 to 200 Hz blip
    fn shot_fired(&mut self) {
        self.sweep(800.0, 200.0, SHOT_GAIN, 0.1);
    }

    /// Enemy destroyed - low 150 to 50 Hz thud
    fn enemy_destroyed(&mut self) {
        self.sweep(150.0, 50.0, HIT_GAIN, 0.3);
    }

    fn start_ambient(&mut self) {
        if self.voices.is_some() {
            return;
        }
        let vol = self.settings.effective_music_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        let note = self.track.start(self.clock);
        let voices = (|| {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(AMBIENT_GAIN * vol);
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let melody = ctx.create_oscillator().ok()?;
            let harmony = ctx.create_oscillator().ok()?;
            melody.frequency().set_value(note);
            harmony.frequency().set_value(note * HARMONY_RATIO);
            melody.connect_with_audio_node(&gain).ok()?;
            harmony.connect_with_audio_node(&gain).ok()?;
            melody.start().ok()?;
            harmony.start().ok()?;

            Some(AmbientVoices {
                melody,
                harmony,
                _gain: gain,
            })
        })();

        if voices.is_none() {
            log::warn!("Failed to start ambient loop");
            self.track.stop();
        }
        self.voices = voices;
    }

    fn stop_ambient(&mut self) {
        self.track.stop();
        if let Some(voices) = self.voices.take() {
            voices.melody.stop().ok();
            voices.harmony.stop().ok();
        }
    }

    fn update(&mut self, now: f64) {
        self.clock = now;
        if let Some(note) = self.track.advance(now) {
            self.retune(note);
        }
    }
}
