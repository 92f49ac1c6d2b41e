//! Resource lifecycle controller
//!
//! `VideoPlayer` owns the engine handle, the render target and surface, and
//! the remote channel registration. It runs the construction sequence,
//! feeds engine notifications through the classifier into the event sink,
//! and tears everything down in a fixed order on `dispose()`.

use event_sink::QueuingEventSink;

use crate::classifier::{transition, BridgeState, Notification};
use crate::config::PlayerConfig;
use crate::engine::{
    AudioAttributes, EngineProbe, EngineState, EventChannel, PlaybackEngine, RenderSurface,
    RenderTarget,
};
use crate::error::{BridgeError, Result};
use crate::event::PlaybackEvent;

/// Bridges one engine instance to one remote event stream
///
/// # Example
///
/// ```rust,ignore
/// use playback_bridge::{PlayerConfig, VideoPlayer, EngineState, PlaybackCommands};
///
/// let config = PlayerConfig::new("https://example.com/video.mp4");
/// let mut player = VideoPlayer::new(config, engine, texture_entry, event_channel)?;
///
/// // Engine callbacks
/// player.on_playback_state_changed(EngineState::Buffering);
/// player.on_playback_state_changed(EngineState::Ready);
///
/// // Commands
/// player.set_volume(0.5);
/// player.play();
///
/// player.dispose();
/// ```
pub struct VideoPlayer<E, T, C>
where
    E: PlaybackEngine,
    T: RenderTarget,
    C: EventChannel,
{
    engine: Option<E>,
    render_target: Option<T>,
    surface: Option<T::Surface>,
    channel: Option<C>,
    sink: QueuingEventSink<PlaybackEvent>,
    state: BridgeState,
    config: PlayerConfig,
    disposed: bool,
}

impl<E, T, C> VideoPlayer<E, T, C>
where
    E: PlaybackEngine,
    T: RenderTarget,
    C: EventChannel,
{
    /// Build a player and run the construction sequence
    ///
    /// Order: render surface created and bound, audio attributes set, media
    /// item loaded and prepared (paused), then the event channel hook
    /// registered. If any step fails, whatever was already set up is
    /// disposed and the error is returned.
    pub fn new(config: PlayerConfig, engine: E, render_target: T, channel: C) -> Result<Self> {
        config.validate()?;

        let mut player = Self {
            engine: Some(engine),
            render_target: Some(render_target),
            surface: None,
            channel: Some(channel),
            sink: QueuingEventSink::new(),
            state: BridgeState::default(),
            config,
            disposed: false,
        };

        if let Err(e) = player.setup() {
            tracing::warn!("Player setup failed, releasing partial resources: {}", e);
            player.dispose();
            return Err(e);
        }

        tracing::info!(
            "Player ready for {} on render target {}",
            player.config.source,
            player.render_target_id().unwrap_or_default()
        );

        Ok(player)
    }

    fn setup(&mut self) -> Result<()> {
        let (Some(engine), Some(target)) = (self.engine.as_mut(), self.render_target.as_mut())
        else {
            return Err(BridgeError::Disposed);
        };

        let surface = target.create_surface().map_err(BridgeError::RenderTarget)?;
        engine.set_video_surface(surface.handle());
        self.surface = Some(surface);

        engine.set_audio_attributes(AudioAttributes::movie(self.config.options.mix_with_others));

        let item = self.config.media_item();
        tracing::debug!("Loading media item {:?}", item);
        engine.load_media(&item).map_err(BridgeError::MediaSource)?;
        engine.prepare().map_err(BridgeError::MediaSource)?;
        engine.set_play_when_ready(false);

        // Engine notifications arrive through `handle_notification`, so the
        // remote hook is the last thing to register.
        if let Some(channel) = self.channel.as_mut() {
            channel.set_stream_handler(Some(self.sink.clone()));
        }

        Ok(())
    }

    /// Classify one engine notification and publish the resulting events
    ///
    /// Ignored after disposal.
    pub fn handle_notification(&mut self, notification: Notification) {
        for event in self.classify(notification) {
            self.publish(event);
        }
    }

    /// Advance the bridge state and return the events without publishing
    ///
    /// The notification worker publishes them after releasing the player
    /// lock, so listeners may call back into the player.
    pub(crate) fn classify(&mut self, notification: Notification) -> Vec<PlaybackEvent> {
        if self.disposed {
            tracing::trace!("Ignoring {:?} on disposed player", notification);
            return Vec::new();
        }
        let Some(engine) = self.engine.as_ref() else {
            return Vec::new();
        };

        let result = transition(self.state, &notification, engine);
        self.state = result.state;
        result.events
    }

    /// Engine callback: playback state changed
    pub fn on_playback_state_changed(&mut self, state: EngineState) {
        self.handle_notification(Notification::StateChanged(state));
    }

    /// Engine callback: playback failed
    pub fn on_player_error(&mut self, description: impl Into<String>) {
        self.handle_notification(Notification::PlayerError(description.into()));
    }

    /// Publish a buffering update for the current buffered position
    pub fn send_buffering_update(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(engine) = self.engine.as_ref() {
            let event = PlaybackEvent::buffering_update(engine.buffered_position_ms());
            self.publish(event);
        }
    }

    fn publish(&self, event: PlaybackEvent) {
        publish_to(&self.sink, event);
    }

    /// Release everything the player owns
    ///
    /// Stops playback if it was initialized, publishes end of stream, then
    /// releases the render target, unregisters the channel hook, releases the surface and
    /// finally the engine. Release failures are logged and swallowed.
    /// Calling this again does nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            tracing::debug!("Player already disposed");
            return;
        }
        self.disposed = true;

        if self.state.initialized {
            if let Some(engine) = self.engine.as_mut() {
                engine.stop();
            }
        }

        // Still attached listeners learn the stream is over before the
        // channel hook goes away
        self.sink.end_of_stream();

        if let Some(mut target) = self.render_target.take() {
            if let Err(e) = target.release() {
                tracing::warn!("Failed to release render target {}: {}", target.id(), e);
            }
        }

        if let Some(mut channel) = self.channel.take() {
            channel.set_stream_handler(None);
        }

        if let Some(mut surface) = self.surface.take() {
            if let Err(e) = surface.release() {
                tracing::warn!("Failed to release render surface: {}", e);
            }
        }

        if let Some(mut engine) = self.engine.take() {
            if let Err(e) = engine.release() {
                tracing::warn!("Failed to release engine: {}", e);
            }
        }

        self.sink.close();
        tracing::info!("Player for {} disposed", self.config.source);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn bridge_state(&self) -> BridgeState {
        self.state
    }

    /// The sink events are published to; clones share the same queue
    pub fn event_sink(&self) -> QueuingEventSink<PlaybackEvent> {
        self.sink.clone()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Render target id, `None` once disposed
    pub fn render_target_id(&self) -> Option<i64> {
        self.render_target.as_ref().map(|target| target.id())
    }

    pub(crate) fn engine_mut(&mut self) -> Option<&mut E> {
        if self.disposed {
            return None;
        }
        self.engine.as_mut()
    }

    pub(crate) fn engine_ref(&self) -> Option<&E> {
        if self.disposed {
            return None;
        }
        self.engine.as_ref()
    }
}

pub(crate) fn publish_to(sink: &QueuingEventSink<PlaybackEvent>, event: PlaybackEvent) {
    tracing::debug!("Publishing {}", event.name());
    sink.publish(event.into_message());
}

impl<E, T, C> Drop for VideoPlayer<E, T, C>
where
    E: PlaybackEngine,
    T: RenderTarget,
    C: EventChannel,
{
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<E, T, C> std::fmt::Debug for VideoPlayer<E, T, C>
where
    E: PlaybackEngine,
    T: RenderTarget,
    C: EventChannel,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoPlayer")
            .field("source", &self.config.source)
            .field("state", &self.state)
            .field("sink", &self.sink)
            .field("disposed", &self.disposed)
            .finish()
    }
}
