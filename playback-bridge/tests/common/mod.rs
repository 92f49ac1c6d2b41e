//! Mock engine, render target and event channel for integration tests.
//!
//! Every mock writes into one shared `CallLog`, so tests can assert on the
//! global order of construction and disposal steps. Engine queries read
//! from a shared `EngineKnobs` that tests tweak between notifications.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use playback_bridge::{
    AudioAttributes, EngineError, EngineProbe, EventChannel, MediaItem, PlaybackEngine,
    PlaybackEvent, PlaybackParameters, PlayerConfig, QueuingEventSink, RenderSurface,
    RenderTarget, RepeatMode, SurfaceHandle, VideoFormat, VideoPlayer,
};

/// Ordered record of every call made into the mocks
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn contains(&self, call: &str) -> bool {
        self.calls.lock().iter().any(|c| c == call)
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls.lock().iter().position(|c| c == call)
    }
}

/// Values the mock engine reports, plus what it was last told
#[derive(Debug, Clone)]
pub struct EngineKnobs {
    pub buffered_ms: i64,
    pub duration_ms: i64,
    pub position_ms: i64,
    pub format: Option<VideoFormat>,
    pub fail_load: bool,
    pub fail_release: bool,

    pub volume: Option<f32>,
    pub parameters: Option<PlaybackParameters>,
    pub repeat_mode: Option<RepeatMode>,
    pub play_when_ready: Option<bool>,
    pub seeked_to: Option<i64>,
    pub loaded: Option<MediaItem>,
    pub audio: Option<AudioAttributes>,
    pub surface: Option<SurfaceHandle>,
}

impl Default for EngineKnobs {
    fn default() -> Self {
        Self {
            buffered_ms: 4_000,
            duration_ms: 120_000,
            position_ms: 0,
            format: Some(VideoFormat::new(1280, 720, 0)),
            fail_load: false,
            fail_release: false,
            volume: None,
            parameters: None,
            repeat_mode: None,
            play_when_ready: None,
            seeked_to: None,
            loaded: None,
            audio: None,
            surface: None,
        }
    }
}

pub struct MockEngine {
    log: CallLog,
    knobs: Arc<Mutex<EngineKnobs>>,
}

impl EngineProbe for MockEngine {
    fn buffered_position_ms(&self) -> i64 {
        self.knobs.lock().buffered_ms
    }

    fn duration_ms(&self) -> i64 {
        self.knobs.lock().duration_ms
    }

    fn video_format(&self) -> Option<VideoFormat> {
        self.knobs.lock().format
    }
}

impl PlaybackEngine for MockEngine {
    fn set_video_surface(&mut self, surface: SurfaceHandle) {
        self.log.record("engine.set_video_surface");
        self.knobs.lock().surface = Some(surface);
    }

    fn set_audio_attributes(&mut self, attributes: AudioAttributes) {
        self.log.record("engine.set_audio_attributes");
        self.knobs.lock().audio = Some(attributes);
    }

    fn load_media(&mut self, item: &MediaItem) -> Result<(), EngineError> {
        self.log.record("engine.load_media");
        let mut knobs = self.knobs.lock();
        if knobs.fail_load {
            return Err(EngineError::MediaSource("source unavailable".to_string()));
        }
        knobs.loaded = Some(item.clone());
        Ok(())
    }

    fn prepare(&mut self) -> Result<(), EngineError> {
        self.log.record("engine.prepare");
        Ok(())
    }

    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        self.log.record(format!("engine.set_play_when_ready({play_when_ready})"));
        self.knobs.lock().play_when_ready = Some(play_when_ready);
    }

    fn seek_to(&mut self, position_ms: i64) {
        self.log.record("engine.seek_to");
        self.knobs.lock().seeked_to = Some(position_ms);
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.record("engine.set_volume");
        self.knobs.lock().volume = Some(volume);
    }

    fn set_playback_parameters(&mut self, parameters: PlaybackParameters) {
        self.log.record("engine.set_playback_parameters");
        self.knobs.lock().parameters = Some(parameters);
    }

    fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.log.record("engine.set_repeat_mode");
        self.knobs.lock().repeat_mode = Some(mode);
    }

    fn current_position_ms(&self) -> i64 {
        self.knobs.lock().position_ms
    }

    fn stop(&mut self) {
        self.log.record("engine.stop");
    }

    fn release(&mut self) -> Result<(), EngineError> {
        self.log.record("engine.release");
        if self.knobs.lock().fail_release {
            return Err(EngineError::Release("engine busy".to_string()));
        }
        Ok(())
    }
}

pub struct MockSurface {
    log: CallLog,
    handle: SurfaceHandle,
}

impl RenderSurface for MockSurface {
    fn handle(&self) -> SurfaceHandle {
        self.handle
    }

    fn release(&mut self) -> Result<(), EngineError> {
        self.log.record("surface.release");
        Ok(())
    }
}

pub struct MockRenderTarget {
    log: CallLog,
    id: i64,
    fail_surface: bool,
}

impl RenderTarget for MockRenderTarget {
    type Surface = MockSurface;

    fn id(&self) -> i64 {
        self.id
    }

    fn create_surface(&mut self) -> Result<MockSurface, EngineError> {
        self.log.record("target.create_surface");
        if self.fail_surface {
            return Err(EngineError::Unavailable);
        }
        Ok(MockSurface {
            log: self.log.clone(),
            handle: SurfaceHandle(self.id as u64),
        })
    }

    fn release(&mut self) -> Result<(), EngineError> {
        self.log.record("target.release");
        Ok(())
    }
}

/// Event channel that exposes the registered sink, like a transport would
pub struct MockChannel {
    log: CallLog,
    registered: Arc<Mutex<Option<QueuingEventSink<PlaybackEvent>>>>,
}

impl EventChannel for MockChannel {
    fn set_stream_handler(&mut self, sink: Option<QueuingEventSink<PlaybackEvent>>) {
        self.log.record(if sink.is_some() {
            "channel.register"
        } else {
            "channel.unregister"
        });
        *self.registered.lock() = sink;
    }
}

pub type TestPlayer = VideoPlayer<MockEngine, MockRenderTarget, MockChannel>;

/// Handles to everything the mocks share with the test
pub struct Harness {
    pub log: CallLog,
    pub knobs: Arc<Mutex<EngineKnobs>>,
    pub registered: Arc<Mutex<Option<QueuingEventSink<PlaybackEvent>>>>,
}

impl Harness {
    /// The sink the transport currently holds, if registered
    pub fn transport_sink(&self) -> Option<QueuingEventSink<PlaybackEvent>> {
        self.registered.lock().clone()
    }
}

pub struct MockParts {
    pub engine: MockEngine,
    pub target: MockRenderTarget,
    pub channel: MockChannel,
    pub harness: Harness,
}

pub fn mock_parts() -> MockParts {
    let log = CallLog::default();
    let knobs = Arc::new(Mutex::new(EngineKnobs::default()));
    let registered = Arc::new(Mutex::new(None));

    MockParts {
        engine: MockEngine {
            log: log.clone(),
            knobs: Arc::clone(&knobs),
        },
        target: MockRenderTarget {
            log: log.clone(),
            id: 7,
            fail_surface: false,
        },
        channel: MockChannel {
            log: log.clone(),
            registered: Arc::clone(&registered),
        },
        harness: Harness {
            log,
            knobs,
            registered,
        },
    }
}

impl MockParts {
    pub fn failing_surface(mut self) -> Self {
        self.target.fail_surface = true;
        self
    }
}

/// Build a player over fresh mocks with a default network config
pub fn test_player() -> (TestPlayer, Harness) {
    test_player_with(PlayerConfig::new("https://example.com/video.mp4"))
}

pub fn test_player_with(config: PlayerConfig) -> (TestPlayer, Harness) {
    let parts = mock_parts();
    let player = VideoPlayer::new(config, parts.engine, parts.target, parts.channel)
        .expect("player construction");
    (player, parts.harness)
}
