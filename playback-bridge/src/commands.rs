//! Command surface
//!
//! Thin setters that normalize their input and forward it to the engine.
//! No command publishes an event; events only come from engine state
//! changes. Every command is a no-op once the player is disposed.

use crate::engine::{EventChannel, PlaybackEngine, PlaybackParameters, RenderTarget, RepeatMode};
use crate::player::VideoPlayer;

/// Playback commands accepted from the remote side
pub trait PlaybackCommands {
    fn play(&mut self);
    fn pause(&mut self);
    fn set_looping(&mut self, looping: bool);
    /// Volume in `[0.0, 1.0]`; out-of-range input is clamped
    fn set_volume(&mut self, volume: f64);
    /// Playback rate multiplier
    fn set_playback_speed(&mut self, speed: f64);
    /// Seek to an absolute position; the engine clamps to the media duration
    fn seek_to(&mut self, position_ms: i64);
    /// Current playback position in milliseconds
    fn position(&self) -> i64;
}

/// Clamp a requested volume into `[0.0, 1.0]`
///
/// NaN maps to silence.
pub fn clamp_volume(volume: f64) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0) as f32
}

impl<E, T, C> PlaybackCommands for VideoPlayer<E, T, C>
where
    E: PlaybackEngine,
    T: RenderTarget,
    C: EventChannel,
{
    fn play(&mut self) {
        if let Some(engine) = self.engine_mut() {
            engine.set_play_when_ready(true);
        }
    }

    fn pause(&mut self) {
        if let Some(engine) = self.engine_mut() {
            engine.set_play_when_ready(false);
        }
    }

    fn set_looping(&mut self, looping: bool) {
        let mode = if looping { RepeatMode::All } else { RepeatMode::Off };
        if let Some(engine) = self.engine_mut() {
            engine.set_repeat_mode(mode);
        }
    }

    fn set_volume(&mut self, volume: f64) {
        let clamped = clamp_volume(volume);
        if let Some(engine) = self.engine_mut() {
            engine.set_volume(clamped);
        }
    }

    fn set_playback_speed(&mut self, speed: f64) {
        if let Some(engine) = self.engine_mut() {
            engine.set_playback_parameters(PlaybackParameters::new(speed as f32));
        }
    }

    fn seek_to(&mut self, position_ms: i64) {
        if let Some(engine) = self.engine_mut() {
            engine.seek_to(position_ms);
        }
    }

    fn position(&self) -> i64 {
        self.engine_ref()
            .map(|engine| engine.current_position_ms())
            .unwrap_or(0)
    }
}
