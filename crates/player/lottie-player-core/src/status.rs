use serde::{Deserialize, Serialize};

/// Playback status of the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// Nothing is playing and the position is at the start
    #[default]
    Stopped,
    /// The library is advancing frames
    Playing,
    /// Playback is held at the current frame
    Paused,
}

impl PlaybackStatus {
    /// Get the name of this status
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }

    /// Check if the library is actively playing
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Status reached by pressing the play/pause button.
    #[inline]
    pub fn toggled(&self) -> Self {
        match self {
            Self::Playing => Self::Paused,
            Self::Stopped | Self::Paused => Self::Playing,
        }
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
