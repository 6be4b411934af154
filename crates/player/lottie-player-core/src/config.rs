//! Widget configuration.

use serde::{Deserialize, Serialize};

use crate::error::PlayerError;

/// Renderer backend requested from the animation library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    #[default]
    Svg,
    Canvas,
    Html,
}

impl Renderer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Renderer::Svg => "svg",
            Renderer::Canvas => "canvas",
            Renderer::Html => "html",
        }
    }
}

/// Icon names written into the transport buttons (Material Symbols ligatures).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Glyphs {
    pub play: String,
    pub pause: String,
    pub step: String,
    pub first: String,
    pub last: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            play: "play_arrow".into(),
            pause: "pause".into(),
            step: "eject".into(),
            first: "skip_previous".into(),
            last: "skip_next".into(),
        }
    }
}

/// Maximum log level forwarded to the console.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Player configuration. Every field has a default, so `{}` is valid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub renderer: Renderer,
    /// Loop playback instead of completing at the last frame.
    #[serde(rename = "loop")]
    pub loop_playback: bool,
    /// Start playing as soon as an animation is loaded.
    pub autoplay: bool,
    pub glyphs: Glyphs,
    pub log_level: LogLevel,
}

impl PlayerConfig {
    pub fn from_json(text: &str) -> Result<Self, PlayerError> {
        serde_json::from_str(text).map_err(|e| PlayerError::Config {
            reason: e.to_string(),
        })
    }
}
