//! Error types for the player

use serde::{Deserialize, Serialize};

/// Everything that can go wrong between a drop and a rendered frame.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerError {
    /// A transport action was requested with nothing loaded
    #[error("No animation loaded")]
    NoAnimation,

    /// An action arrived while another was still being handled
    #[error("Player is busy")]
    Busy,

    /// Seek target is not a finite number
    #[error("Invalid frame: {frame}")]
    InvalidFrame { frame: f64 },

    /// Drop carried no data-transfer items
    #[error("Drop contained no items")]
    EmptyDrop,

    /// First dropped item is not a file
    #[error("Dropped item is not a file (kind: {kind})")]
    NotAFile { kind: String },

    /// Reading the dropped file failed
    #[error("Failed to read dropped file: {reason}")]
    FileRead { reason: String },

    /// Dropped text is not JSON
    #[error("Invalid animation JSON: {reason}")]
    InvalidJson { reason: String },

    /// Dropped JSON is not an object
    #[error("Animation data must be a JSON object")]
    NotAnObject,

    /// The rendering library raised an exception
    #[error("Animation library error: {reason}")]
    Library { reason: String },

    /// Configuration could not be parsed
    #[error("Config error: {reason}")]
    Config { reason: String },
}

impl PlayerError {
    /// Get error category for logging and JS error events
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NoAnimation | Self::Busy | Self::InvalidFrame { .. } => "playback",
            Self::EmptyDrop | Self::NotAFile { .. } | Self::FileRead { .. } => "drop",
            Self::InvalidJson { .. } | Self::NotAnObject => "data",
            Self::Library { .. } => "library",
            Self::Config { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for PlayerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson {
            reason: err.to_string(),
        }
    }
}
