//! Error types for playback-bridge

use thiserror::Error;

use crate::logging::LoggingError;

/// Result type for playback-bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors surfaced synchronously by the bridge
///
/// Only player construction and logging setup return these. Everything that
/// goes wrong once playback is running travels to the listener as an event.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The player configuration was rejected before anything was touched
    #[error("Invalid player configuration: {0}")]
    Config(String),

    /// The engine refused the media source during setup
    #[error("Failed to set up media source: {0}")]
    MediaSource(#[source] EngineError),

    /// The render target could not provide a surface
    #[error("Failed to create render surface: {0}")]
    RenderTarget(#[source] EngineError),

    /// An operation needed a resource that disposal already released
    #[error("Player has been disposed")]
    Disposed,

    /// Logging could not be initialized
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Errors reported by engine, render target and surface implementations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The media source could not be loaded or prepared
    #[error("media source error: {0}")]
    MediaSource(String),

    /// Releasing a resource failed
    #[error("release failed: {0}")]
    Release(String),

    /// The engine (or render target) is not available
    #[error("engine unavailable")]
    Unavailable,
}
