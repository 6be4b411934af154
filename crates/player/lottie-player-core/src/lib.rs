//! Lottie Player Core (platform-agnostic)
//!
//! Playback controller for a drag-and-drop animation widget. The rendering
//! library is reached through the `AnimationHandle` trait and the widget's
//! controls are exposed as a `Controls` view-model, so web and test adapters
//! share the same state machine.

pub mod config;
pub mod controls;
pub mod data;
pub mod error;
pub mod events;
pub mod handle;
pub mod ids;
pub mod player;
pub mod status;

// Re-exports for consumers (adapters)
pub use config::{Glyphs, LogLevel, PlayerConfig, Renderer};
pub use controls::{Button, ButtonKind, Controls, Slider};
pub use data::parse_animation_data;
pub use error::PlayerError;
pub use events::PlayerEvent;
pub use handle::{AnimationEvent, AnimationHandle};
pub use ids::AnimationId;
pub use player::{FrameBoundary, Player, StepDirection};
pub use status::PlaybackStatus;

/// Player result type
pub type Result<T> = core::result::Result<T, PlayerError>;
