//! Semantic notifications produced by the player.
//!
//! Adapters drain these after each action and forward them to the host.

use serde::{Deserialize, Serialize};

use crate::ids::AnimationId;
use crate::status::PlaybackStatus;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum PlayerEvent {
    AnimationLoaded {
        id: AnimationId,
        total_frames: f64,
    },
    AnimationDisposed {
        id: AnimationId,
    },
    StatusChanged {
        from: PlaybackStatus,
        to: PlaybackStatus,
    },
    FrameEntered {
        id: AnimationId,
        frame: f64,
    },
    Completed {
        id: AnimationId,
    },
    Error {
        category: String,
        message: String,
    },
}

impl PlayerEvent {
    pub fn error(err: &crate::PlayerError) -> Self {
        PlayerEvent::Error {
            category: err.category().to_string(),
            message: err.to_string(),
        }
    }
}
