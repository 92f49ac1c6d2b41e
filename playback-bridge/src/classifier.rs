//! Playback state classifier
//!
//! Turns raw engine notifications into domain events. The classifier is a
//! pure function over [`BridgeState`]: given the current flags, one
//! notification and read access to the engine, it returns the next flags and
//! the events to publish, in order.
//!
//! ```text
//! Notification ──► transition(state, notification, probe) ──► (state', [PlaybackEvent])
//! ```

use crate::engine::{EngineProbe, EngineState};
use crate::event::PlaybackEvent;

/// Flags the classifier carries between notifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeState {
    /// Set on the first READY; gates `Initialized`
    pub initialized: bool,
    /// A `BufferingStart` is open without its `BufferingEnd`
    pub buffering: bool,
    /// An error notification has been classified
    pub errored: bool,
}

/// A raw notification from the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Playback state transition
    StateChanged(EngineState),
    /// Playback failure, with the engine's description of the cause
    PlayerError(String),
}

/// Result of classifying one notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: BridgeState,
    pub events: Vec<PlaybackEvent>,
}

/// Classify one notification
///
/// State changes:
/// 1. BUFFERING opens buffering (once) and always reports a fresh
///    buffered range.
/// 2. The first READY reports `Initialized`.
/// 3. ENDED reports `Completed`.
/// 4. Any non-BUFFERING state closes an open buffering span, after the
///    events above.
///
/// Errors close an open buffering span and then report the error.
pub fn transition<P>(state: BridgeState, notification: &Notification, probe: &P) -> Transition
where
    P: EngineProbe + ?Sized,
{
    let mut next = state;
    let mut events = Vec::new();

    match notification {
        Notification::StateChanged(engine_state) => {
            match engine_state {
                EngineState::Buffering => {
                    if !next.buffering {
                        next.buffering = true;
                        events.push(PlaybackEvent::BufferingStart);
                    }
                    events.push(PlaybackEvent::buffering_update(probe.buffered_position_ms()));
                }
                EngineState::Ready => {
                    if !next.initialized {
                        next.initialized = true;
                        events.push(initialized_event(probe));
                    }
                }
                EngineState::Ended => events.push(PlaybackEvent::Completed),
                EngineState::Idle | EngineState::Error => {}
            }

            if *engine_state != EngineState::Buffering && next.buffering {
                next.buffering = false;
                events.push(PlaybackEvent::BufferingEnd);
            }
        }
        Notification::PlayerError(description) => {
            if next.buffering {
                next.buffering = false;
                events.push(PlaybackEvent::BufferingEnd);
            }
            next.errored = true;
            events.push(PlaybackEvent::Error {
                message: format!("Video player had error {description}"),
            });
        }
    }

    tracing::debug!(
        "Classified {:?}: {} events, initialized={}, buffering={}",
        notification,
        events.len(),
        next.initialized,
        next.buffering
    );

    Transition {
        state: next,
        events,
    }
}

/// `Initialized` for the engine's current duration and video track
pub fn initialized_event<P>(probe: &P) -> PlaybackEvent
where
    P: EngineProbe + ?Sized,
{
    let dimensions = probe.video_format().map(|format| format.display_dimensions());

    PlaybackEvent::Initialized {
        duration_ms: probe.duration_ms(),
        width: dimensions.map(|(width, _)| width),
        height: dimensions.map(|(_, height)| height),
    }
}
