//! Audio system
//!
//! Sound effects are synthesized with the Web Audio API, so no effect files
//! are needed. The ambient loop streams from `assets/bgm.wav`. Effects and
//! the ambient track are independent channels.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Vault stolen
    Steal,
    /// Trap or guard ended the run
    Fail,
    /// Speed power-up collected
    PowerUp,
}

/// Background track location, relative to the page
pub const AMBIENT_TRACK: &str = "assets/bgm.wav";

/// Anything that can play the game's audio
///
/// Playback is fire-and-forget: implementations swallow their own failures.
pub trait AudioSink {
    /// Play an effect, cutting off whichever effect is still sounding
    fn play_effect(&mut self, effect: SoundEffect);
    /// Start or stop the looping background track
    fn set_ambient_loop(&mut self, playing: bool);
    /// Pick up changed volumes or mute state
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Audio sink that plays nothing (native builds)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_effect(&mut self, effect: SoundEffect) {
        log::debug!("Sound: {:?}", effect);
    }

    fn set_ambient_loop(&mut self, playing: bool) {
        log::debug!("Ambient loop: {}", if playing { "on" } else { "off" });
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use wasm_bindgen::prelude::Closure;
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{AMBIENT_TRACK, AudioSink, SoundEffect};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        ambient: Option<HtmlAudioElement>,
        /// Oscillators of the effect currently sounding
        current: Vec<OscillatorNode>,
        sfx_volume: f32,
        /// Swallows rejected `play()` promises (autoplay policy)
        on_play_rejected: Closure<dyn FnMut(JsValue)>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - effects disabled");
            }

            let ambient = HtmlAudioElement::new_with_src(AMBIENT_TRACK).ok();
            match &ambient {
                Some(track) => {
                    track.set_loop(true);
                    track.set_volume(settings.effective_music_volume() as f64);
                }
                None => log::warn!("Failed to create ambient track - music disabled"),
            }

            let on_play_rejected = Closure::<dyn FnMut(JsValue)>::new(|err: JsValue| {
                log::debug!("Ambient playback blocked: {:?}", err);
            });

            Self {
                ctx,
                ambient,
                current: Vec::new(),
                sfx_volume: settings.effective_sfx_volume(),
                on_play_rejected,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Stop whatever effect is still sounding
        fn interrupt(&mut self) {
            for osc in self.current.drain(..) {
                osc.stop().ok();
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
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

        /// Play a short arpeggio; each note fades out before the next
        fn arpeggio(
            ctx: &AudioContext,
            notes: &[f32],
            spacing: f64,
            length: f64,
            osc_type: OscillatorType,
            vol: f32,
        ) -> Vec<OscillatorNode> {
            let mut nodes = Vec::with_capacity(notes.len());
            for (i, freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = Self::create_osc(ctx, *freq, osc_type) else {
                    continue;
                };
                let t = ctx.current_time() + i as f64 * spacing;
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + length)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + length + 0.05).ok();
                nodes.push(osc);
            }
            nodes
        }

        /// Vault stolen - bright rising chime
        fn play_steal(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
            Self::arpeggio(
                ctx,
                &[523.0, 659.0, 784.0, 1047.0],
                0.07,
                0.25,
                OscillatorType::Triangle,
                vol * 0.3,
            )
        }

        /// Caught - harsh descending buzz
        fn play_fail(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
            let Some((osc, gain)) = Self::create_osc(ctx, 300.0, OscillatorType::Sawtooth) else {
                return Vec::new();
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.7)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.7)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.8).ok();
            vec![osc]
        }

        /// Power-up - quick sparkle
        fn play_powerup(ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
            Self::arpeggio(
                ctx,
                &[600.0, 800.0, 1000.0, 1200.0],
                0.05,
                0.15,
                OscillatorType::Sine,
                vol * 0.25,
            )
        }
    }

    impl AudioSink for AudioManager {
        fn play_effect(&mut self, effect: SoundEffect) {
            self.interrupt();

            let vol = self.sfx_volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            self.current = match effect {
                SoundEffect::Steal => Self::play_steal(ctx, vol),
                SoundEffect::Fail => Self::play_fail(ctx, vol),
                SoundEffect::PowerUp => Self::play_powerup(ctx, vol),
            };
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.sfx_volume = settings.effective_sfx_volume();
            if let Some(track) = &self.ambient {
                track.set_volume(settings.effective_music_volume() as f64);
            }
        }

        fn set_ambient_loop(&mut self, playing: bool) {
            let Some(track) = &self.ambient else { return };

            if !playing {
                track.pause().ok();
                return;
            }
            if !track.paused() {
                return;
            }
            match track.play() {
                Ok(promise) => {
                    let _ = promise.catch(&self.on_play_rejected);
                }
                Err(err) => log::debug!("Ambient playback failed: {:?}", err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_audio_accepts_everything() {
        let mut audio = SilentAudio;
        audio.set_ambient_loop(true);
        audio.play_effect(SoundEffect::Steal);
        audio.play_effect(SoundEffect::Fail);
        audio.set_ambient_loop(false);
        audio.apply_settings(&Settings::default());
    }

    #[test]
    fn test_ambient_track_is_shipped() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(AMBIENT_TRACK);
        assert!(path.is_file(), "missing {}", path.display());
    }
}
