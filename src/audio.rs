//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Ran into an obstacle, smashed or not
    ObstacleHit,
    /// Giant power-up collected
    PowerUp,
    /// Health item collected
    Heal,
    /// Giant posture wore off
    Shrink,
    /// Flag reached
    LevelClear,
    /// Run lost
    GameOver,
}

impl SoundEffect {
    /// Sound to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::ObstacleHit { .. } => Some(SoundEffect::ObstacleHit),
            GameEvent::PowerUpCollected => Some(SoundEffect::PowerUp),
            GameEvent::HealthRecovered => Some(SoundEffect::Heal),
            GameEvent::GiantExpired => Some(SoundEffect::Shrink),
            GameEvent::FlagReached => Some(SoundEffect::LevelClear),
            GameEvent::GameOver(_) => Some(SoundEffect::GameOver),
            GameEvent::LevelCleared => None,
        }
    }
}

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
}

#[cfg(target_arch = "wasm32")]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new() -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play the sound for each event, in order
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::ObstacleHit => self.play_obstacle_hit(ctx, vol),
            SoundEffect::PowerUp => self.play_notes(
                ctx,
                vol * 0.25,
                &[600.0, 800.0, 1000.0, 1200.0],
                0.07,
                OscillatorType::Sine,
            ),
            SoundEffect::Heal => self.play_notes(
                ctx,
                vol * 0.25,
                &[700.0, 1050.0],
                0.1,
                OscillatorType::Triangle,
            ),
            SoundEffect::Shrink => self.play_shrink(ctx, vol),
            SoundEffect::LevelClear => self.play_notes(
                ctx,
                vol * 0.3,
                &[400.0, 500.0, 600.0, 800.0],
                0.1,
                OscillatorType::Triangle,
            ),
            SoundEffect::GameOver => self.play_notes(
                ctx,
                vol * 0.3,
                &[400.0, 350.0, 300.0, 200.0],
                0.2,
                OscillatorType::Sine,
            ),
        }
    }

    // === Sound generators ===

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

    /// Jump - quick upward sweep
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 250.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.18)
            .ok();
        osc.frequency().set_value_at_time(250.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(700.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Obstacle hit - dull thump
    fn play_obstacle_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Giant wears off - sliding down
    fn play_shrink(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 500.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();
        osc.frequency().set_value_at_time(500.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(150.0, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.45).ok();
    }

    /// A run of short notes, `spacing` seconds apart
    fn play_notes(
        &self,
        ctx: &AudioContext,
        peak: f32,
        freqs: &[f32],
        spacing: f64,
        osc_type: OscillatorType,
    ) {
        for (i, freq) in freqs.iter().enumerate() {
            let delay = i as f64 * spacing;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(peak, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + spacing * 2.5)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + spacing * 3.0).ok();
            }
        }
    }
}
