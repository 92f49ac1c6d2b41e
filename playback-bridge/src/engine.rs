//! Engine-facing types and the traits external collaborators implement
//!
//! The decoding engine, the render target it draws into and the transport
//! channel are all owned by the host. The bridge only sees them through the
//! traits below, which keeps the classifier and the lifecycle controller
//! testable without a real engine.

use event_sink::QueuingEventSink;

use crate::config::MediaItem;
use crate::error::EngineError;
use crate::event::PlaybackEvent;

/// Raw playback state reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    Idle,
    Buffering,
    Ready,
    Ended,
    Error,
}

/// Video track descriptor as reported by the engine
///
/// `width` and `height` describe the unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFormat {
    pub width: u32,
    pub height: u32,
    /// One of 0, 90, 180, 270
    pub rotation_degrees: u32,
}

impl VideoFormat {
    pub fn new(width: u32, height: u32, rotation_degrees: u32) -> Self {
        Self {
            width,
            height,
            rotation_degrees,
        }
    }

    /// Dimensions as the viewer sees them
    ///
    /// Only quarter turns (90 and 270) swap width and height.
    pub fn display_dimensions(&self) -> (u32, u32) {
        match self.rotation_degrees {
            90 | 270 => (self.height, self.width),
            _ => (self.width, self.height),
        }
    }
}

/// Engine repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    Off,
    All,
}

/// Playback rate parameters
///
/// Only `speed` is ever changed by the bridge; pitch and silence skipping
/// stay at the engine defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackParameters {
    pub speed: f32,
    pub pitch: f32,
    pub skip_silence: bool,
}

impl PlaybackParameters {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }
}

impl Default for PlaybackParameters {
    fn default() -> Self {
        Self {
            speed: 1.0,
            pitch: 1.0,
            skip_silence: false,
        }
    }
}

/// Audio content type declared to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Movie,
}

/// Audio output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioAttributes {
    pub content_type: ContentType,
    /// Take exclusive audio focus; false mixes with other audio
    pub handle_audio_focus: bool,
}

impl AudioAttributes {
    /// Movie audio; exclusive focus unless `mix_with_others`
    pub fn movie(mix_with_others: bool) -> Self {
        Self {
            content_type: ContentType::Movie,
            handle_audio_focus: !mix_with_others,
        }
    }
}

/// Opaque handle to a render surface, passed to the engine for binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Read-only queries the classifier needs
pub trait EngineProbe {
    fn buffered_position_ms(&self) -> i64;
    fn duration_ms(&self) -> i64;
    /// `None` when the media has no video track
    fn video_format(&self) -> Option<VideoFormat>;
}

/// The media decoding/rendering engine
pub trait PlaybackEngine: EngineProbe + Send {
    fn set_video_surface(&mut self, surface: SurfaceHandle);
    fn set_audio_attributes(&mut self, attributes: AudioAttributes);

    /// Load the media item (source plus ad configuration)
    fn load_media(&mut self, item: &MediaItem) -> Result<(), EngineError>;
    fn prepare(&mut self) -> Result<(), EngineError>;

    fn set_play_when_ready(&mut self, play_when_ready: bool);
    fn seek_to(&mut self, position_ms: i64);
    fn set_volume(&mut self, volume: f32);
    fn set_playback_parameters(&mut self, parameters: PlaybackParameters);
    fn set_repeat_mode(&mut self, mode: RepeatMode);
    fn current_position_ms(&self) -> i64;

    fn stop(&mut self);
    fn release(&mut self) -> Result<(), EngineError>;
}

/// A surface allocated from a render target
pub trait RenderSurface: Send {
    fn handle(&self) -> SurfaceHandle;
    fn release(&mut self) -> Result<(), EngineError>;
}

/// The texture/surface registry entry frames are rendered into
pub trait RenderTarget: Send {
    type Surface: RenderSurface;

    /// Identifier the remote side uses to find the texture
    fn id(&self) -> i64;
    fn create_surface(&mut self) -> Result<Self::Surface, EngineError>;
    fn release(&mut self) -> Result<(), EngineError>;
}

/// Transport-side registration point for the remote listener
///
/// While a sink is registered, the transport calls `attach` on it when the
/// remote listener subscribes and `detach` when it cancels. Passing `None`
/// unregisters the hook.
pub trait EventChannel: Send {
    fn set_stream_handler(&mut self, sink: Option<QueuingEventSink<PlaybackEvent>>);
}
