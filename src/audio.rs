//! Audio cues
//!
//! Procedurally generated sound effects through the Web Audio API on wasm;
//! native builds only log the cue.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Vehicle leaves the ground
    Jump,
    /// Coin picked up
    Coin,
    /// Obstacle jumped over
    Clear,
    /// Obstacle hit a grounded vehicle
    Crash,
    /// Heart picked up
    Life,
    /// Run over
    GameOver,
}

impl SoundEffect {
    /// Cue for a gameplay event
    pub fn from_event(event: GameEvent) -> Self {
        match event {
            GameEvent::Jumped => SoundEffect::Jump,
            GameEvent::CoinCollected => SoundEffect::Coin,
            GameEvent::ObstacleCleared => SoundEffect::Clear,
            GameEvent::Crashed => SoundEffect::Crash,
            GameEvent::LifeGained => SoundEffect::Life,
            GameEvent::RunOver { .. } => SoundEffect::GameOver,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            // May fail outside a secure context
            let ctx = web_sys::AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            ctx
        };
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Pick up volume/mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play the cue for every event, in order
    pub fn play_events(&self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::from_event(*event));
        }
    }

    /// Play a sound effect (fire and forget)
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        log::debug!("Cue: {effect:?}");

        #[cfg(target_arch = "wasm32")]
        web::play(self.ctx.as_ref(), effect, self.volume);
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;

    pub(super) fn play(ctx: Option<&AudioContext>, effect: SoundEffect, vol: f32) {
        let Some(ctx) = ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => sweep(ctx, vol * 0.3, 200.0, 600.0, 0.2),
            SoundEffect::Coin => arpeggio(ctx, vol * 0.25, &[600.0, 800.0, 1000.0], 0.06),
            SoundEffect::Clear => arpeggio(ctx, vol * 0.3, &[400.0, 500.0, 600.0, 800.0], 0.07),
            SoundEffect::Crash => sweep(ctx, vol * 0.5, 150.0, 40.0, 0.35),
            SoundEffect::Life => arpeggio(ctx, vol * 0.25, &[500.0, 700.0, 1000.0], 0.08),
            SoundEffect::GameOver => descend(ctx, vol * 0.3, &[400.0, 350.0, 300.0, 200.0]),
        }
    }

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

    /// Single tone gliding from `from` to `to`
    fn sweep(ctx: &AudioContext, vol: f32, from: f32, to: f32, len: f64) {
        let Some((osc, gain)) = create_osc(ctx, from, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + len)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + len * 0.75)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + len + 0.05).ok();
    }

    /// Quick rising notes
    fn arpeggio(ctx: &AudioContext, vol: f32, notes: &[f32], step: f64) {
        for (i, freq) in notes.iter().enumerate() {
            let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * step;
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }

    /// Sad descending notes
    fn descend(ctx: &AudioContext, vol: f32, notes: &[f32]) {
        for (i, freq) in notes.iter().enumerate() {
            let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * 0.2;
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.4).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_event_has_a_cue() {
        assert_eq!(SoundEffect::from_event(GameEvent::Jumped), SoundEffect::Jump);
        assert_eq!(
            SoundEffect::from_event(GameEvent::CoinCollected),
            SoundEffect::Coin
        );
        assert_eq!(
            SoundEffect::from_event(GameEvent::ObstacleCleared),
            SoundEffect::Clear
        );
        assert_eq!(SoundEffect::from_event(GameEvent::Crashed), SoundEffect::Crash);
        assert_eq!(SoundEffect::from_event(GameEvent::LifeGained), SoundEffect::Life);
        assert_eq!(
            SoundEffect::from_event(GameEvent::RunOver { score: 5 }),
            SoundEffect::GameOver
        );
    }

    #[test]
    fn test_volume_follows_settings() {
        let mut settings = Settings::default();
        let mut audio = AudioManager::new(&settings);
        assert!(audio.volume() > 0.0);

        settings.muted = true;
        audio.apply_settings(&settings);
        assert_eq!(audio.volume(), 0.0);
        // Silent play is a no-op
        audio.play_events(&[GameEvent::Crashed]);
    }
}
