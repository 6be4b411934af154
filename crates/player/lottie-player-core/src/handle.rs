//! Contract with the external rendering library.
//!
//! The library owns parsing and rendering. The player only drives playback
//! through this trait; adapters (web, tests) provide the implementation.

use serde::{Deserialize, Serialize};

/// One live animation created by the rendering library.
pub trait AnimationHandle {
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Move to `value` (a frame when `is_frame`, else milliseconds) and hold.
    fn go_to_and_stop(&mut self, value: f64, is_frame: bool);
    /// Move to `value` and keep playing.
    fn go_to_and_play(&mut self, value: f64, is_frame: bool);
    /// Total duration, in frames when `in_frames`, else seconds.
    fn duration(&self, in_frames: bool) -> f64;
    /// Release the animation. No other method is called afterwards.
    fn destroy(&mut self);
}

/// Callbacks raised by the rendering library for one animation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimationEvent {
    EnterFrame { current_time: f64 },
    Complete,
    Destroy,
}
