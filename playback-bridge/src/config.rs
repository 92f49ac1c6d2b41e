//! Player configuration
//!
//! A `PlayerConfig` is built once and handed to `VideoPlayer::new`. It
//! carries everything the construction sequence needs: the media source,
//! request headers for network sources, an optional ad tag and the audio
//! mixing choice.

use std::collections::BTreeMap;
use std::str::FromStr;

use url::Url;

use crate::error::{BridgeError, Result};

/// User agent applied to network sources unless a `User-Agent` header is given
pub const DEFAULT_USER_AGENT: &str = "video_player_plugin";

/// Container/streaming format hint passed through to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Dash,
    Hls,
    SmoothStreaming,
    Other,
}

impl FromStr for FormatHint {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dash" => Ok(FormatHint::Dash),
            "hls" => Ok(FormatHint::Hls),
            "ss" => Ok(FormatHint::SmoothStreaming),
            "other" => Ok(FormatHint::Other),
            other => Err(BridgeError::Config(format!("unknown format hint '{other}'"))),
        }
    }
}

/// Where the media bytes come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `http` or `https`; the only kind that receives request headers
    Network,
    /// `asset:` URI bundled with the host application
    Asset,
    /// Local file, content URI or bare path
    File,
}

/// Per-session playback options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerOptions {
    /// Mix audio with other apps instead of taking exclusive audio focus
    /// Default: false
    pub mix_with_others: bool,
}

/// Immutable configuration record for one player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Media URI or local path
    pub source: String,

    /// Optional format hint
    pub format_hint: Option<FormatHint>,

    /// Request headers, applied to network sources only
    pub http_headers: BTreeMap<String, String>,

    /// VAST ad tag URI handed to the ad-insertion engine
    pub ad_tag_uri: Option<String>,

    pub options: PlayerOptions,
}

impl PlayerConfig {
    /// Configuration for a source with no headers, hint or ads
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            format_hint: None,
            http_headers: BTreeMap::new(),
            ad_tag_uri: None,
            options: PlayerOptions::default(),
        }
    }

    /// Configuration for a network source with request headers
    pub fn network(url: impl Into<String>, headers: BTreeMap<String, String>) -> Self {
        Self {
            http_headers: headers,
            ..Self::new(url)
        }
    }

    pub fn with_ad_tag(mut self, ad_tag_uri: impl Into<String>) -> Self {
        self.ad_tag_uri = Some(ad_tag_uri.into());
        self
    }

    pub fn with_format_hint(mut self, hint: FormatHint) -> Self {
        self.format_hint = Some(hint);
        self
    }

    pub fn with_options(mut self, options: PlayerOptions) -> Self {
        self.options = options;
        self
    }

    /// Check the configuration before any resource is created
    pub fn validate(&self) -> Result<()> {
        let source = self.source.trim();
        if source.is_empty() {
            return Err(BridgeError::Config("media source is empty".to_string()));
        }

        match Url::parse(source) {
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {}
            Err(e) => {
                return Err(BridgeError::Config(format!(
                    "invalid media source '{source}': {e}"
                )))
            }
        }

        if let Some(tag) = &self.ad_tag_uri {
            Url::parse(tag)
                .map_err(|e| BridgeError::Config(format!("invalid ad tag URI '{tag}': {e}")))?;
        }

        for name in self.http_headers.keys() {
            if name.is_empty() || name.contains(|c: char| c == ':' || c.is_whitespace()) {
                return Err(BridgeError::Config(format!("invalid header name '{name}'")));
            }
        }

        Ok(())
    }

    /// Classify the source by its URI scheme
    pub fn source_kind(&self) -> SourceKind {
        match Url::parse(self.source.trim()) {
            Ok(url) => match url.scheme() {
                "http" | "https" => SourceKind::Network,
                "asset" => SourceKind::Asset,
                _ => SourceKind::File,
            },
            Err(_) => SourceKind::File,
        }
    }

    /// User agent for network requests, `None` for non-network sources
    pub fn user_agent(&self) -> Option<String> {
        if self.source_kind() != SourceKind::Network {
            return None;
        }
        let user_agent = self
            .http_headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        Some(user_agent)
    }

    /// The media item handed to the engine
    pub fn media_item(&self) -> MediaItem {
        let http_headers = match self.source_kind() {
            SourceKind::Network => self.http_headers.clone(),
            _ => BTreeMap::new(),
        };

        MediaItem {
            uri: self.source.trim().to_string(),
            format_hint: self.format_hint,
            http_headers,
            ad_tag_uri: self.ad_tag_uri.clone(),
            user_agent: self.user_agent(),
        }
    }
}

/// Resolved media description loaded into the engine
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub uri: String,
    pub format_hint: Option<FormatHint>,
    pub http_headers: BTreeMap<String, String>,
    pub ad_tag_uri: Option<String>,
    pub user_agent: Option<String>,
}
