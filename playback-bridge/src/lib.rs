//! Playback Event Bridge
//!
//! Connects a continuously running media engine to a remote listener that
//! may attach and detach at any time. Raw engine notifications are
//! classified into domain events, queued until someone is listening, and
//! delivered in order without loss.
//!
//! # Architecture
//!
//! ```text
//! Engine ──► Notification ──► Classifier ──► PlaybackEvent ──► QueuingEventSink ──► Listener
//!                                                                  ▲
//! Remote caller ──► PlaybackCommands ──► Engine        EventChannel (attach / detach)
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use playback_bridge::prelude::*;
//!
//! let config = PlayerConfig::new("https://example.com/video.mp4")
//!     .with_ad_tag("https://ads.example.com/vast.xml");
//! let mut player = VideoPlayer::new(config, engine, texture_entry, event_channel)?;
//!
//! // Forward engine callbacks
//! player.on_playback_state_changed(EngineState::Ready);
//!
//! // Listen (usually done by the transport through the EventChannel)
//! let (listener, messages) = channel_listener();
//! player.event_sink().attach(listener);
//!
//! for message in messages.try_iter() {
//!     println!("{:?}", message);
//! }
//!
//! player.dispose();
//! ```
//!
//! # Threaded engines
//!
//! When callbacks arrive on an engine thread, share the player and let the
//! notification worker apply them in order:
//!
//! ```rust,ignore
//! use playback_bridge::worker::{notification_channel, shared, spawn_notification_worker};
//!
//! let player = shared(VideoPlayer::new(config, engine, target, channel)?);
//! let (tx, rx) = notification_channel();
//! let worker = spawn_notification_worker(Arc::clone(&player), rx);
//!
//! // engine thread
//! tx.send(Notification::StateChanged(EngineState::Buffering))?;
//! ```

// Core modules
pub mod classifier;
pub mod commands;
pub mod config;
pub mod engine;
pub mod event;
pub mod player;
pub mod worker;

// Error types
pub mod error;

// Logging infrastructure
pub mod logging;

// ============================================================================
// Re-exports
// ============================================================================

pub use classifier::{transition, BridgeState, Notification, Transition};
pub use commands::{clamp_volume, PlaybackCommands};
pub use config::{
    FormatHint, MediaItem, PlayerConfig, PlayerOptions, SourceKind, DEFAULT_USER_AGENT,
};
pub use engine::{
    AudioAttributes, ContentType, EngineProbe, EngineState, EventChannel, PlaybackEngine,
    PlaybackParameters, RenderSurface, RenderTarget, RepeatMode, SurfaceHandle, VideoFormat,
};
pub use error::{BridgeError, EngineError, Result};
pub use event::{BufferedRange, PlaybackEvent, VIDEO_ERROR_CODE};
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};
pub use player::VideoPlayer;
pub use worker::{spawn_notification_worker, SharedPlayer};

// Sink types callers need to listen
pub use event_sink::{
    channel_listener, EventListener, MessageIterator, QueuingEventSink, SinkMessage,
};

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::classifier::Notification;
    pub use crate::commands::PlaybackCommands;
    pub use crate::config::{PlayerConfig, PlayerOptions};
    pub use crate::engine::{EngineState, EventChannel, PlaybackEngine, RenderTarget, VideoFormat};
    pub use crate::error::{BridgeError, Result};
    pub use crate::event::PlaybackEvent;
    pub use crate::player::VideoPlayer;
    pub use event_sink::{channel_listener, SinkMessage};
}
