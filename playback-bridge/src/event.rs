//! Domain events delivered to the remote listener
//!
//! Events serialize as tagged records, e.g.
//! `{"event":"bufferingUpdate","values":[[0,1500]]}`.

use event_sink::SinkMessage;
use serde::{Deserialize, Serialize};

/// Error code used on the sink's error channel for playback failures
pub const VIDEO_ERROR_CODE: &str = "VideoError";

/// A buffered interval in milliseconds, `(start, end)`
pub type BufferedRange = (i64, i64);

/// A discrete playback event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// First transition into READY. Dimensions are display-oriented and
    /// absent when the media has no video track.
    Initialized {
        #[serde(rename = "duration")]
        duration_ms: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },

    BufferingStart,

    BufferingEnd,

    /// Buffered ranges, always a single `[0, buffered_position]` range here
    BufferingUpdate {
        #[serde(rename = "values")]
        ranges: Vec<BufferedRange>,
    },

    /// Playback reached the natural end of the media
    Completed,

    /// Terminal playback failure
    Error { message: String },
}

impl PlaybackEvent {
    /// Single-range buffering update covering `[0, buffered_position_ms]`
    pub fn buffering_update(buffered_position_ms: i64) -> Self {
        PlaybackEvent::BufferingUpdate {
            ranges: vec![(0, buffered_position_ms)],
        }
    }

    /// Wire name of the event (the `event` tag)
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackEvent::Initialized { .. } => "initialized",
            PlaybackEvent::BufferingStart => "bufferingStart",
            PlaybackEvent::BufferingEnd => "bufferingEnd",
            PlaybackEvent::BufferingUpdate { .. } => "bufferingUpdate",
            PlaybackEvent::Completed => "completed",
            PlaybackEvent::Error { .. } => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PlaybackEvent::Error { .. })
    }

    /// Serialize to the JSON record sent over the transport
    pub fn to_wire(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Route the event onto the matching sink channel
    ///
    /// Errors go to the error channel with [`VIDEO_ERROR_CODE`]; everything
    /// else is a success event.
    pub fn into_message(self) -> SinkMessage<PlaybackEvent> {
        match self {
            PlaybackEvent::Error { message } => SinkMessage::Error {
                code: VIDEO_ERROR_CODE.to_string(),
                message,
                details: None,
            },
            event => SinkMessage::Event(event),
        }
    }
}
