//! Playback controller.
//!
//! `Player` forwards transport actions to the live `AnimationHandle` and folds
//! the library's callbacks back into `Controls`. It never touches the DOM.

use std::convert::Infallible;

use log::{debug, info, trace, warn};

use crate::config::PlayerConfig;
use crate::controls::{ButtonKind, Controls};
use crate::error::PlayerError;
use crate::events::PlayerEvent;
use crate::handle::{AnimationEvent, AnimationHandle};
use crate::ids::{AnimationId, IdAllocator};
use crate::status::PlaybackStatus;
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameBoundary {
    First,
    Last,
}

struct LiveAnimation<H> {
    id: AnimationId,
    handle: H,
    total_frames: f64,
}

impl<H: AnimationHandle> LiveAnimation<H> {
    #[inline]
    fn last_frame(&self) -> f64 {
        (self.total_frames - 1.0).max(0.0)
    }
}

pub struct Player<H: AnimationHandle> {
    config: PlayerConfig,
    ids: IdAllocator,
    status: PlaybackStatus,
    live: Option<LiveAnimation<H>>,
    controls: Controls,
    events: Vec<PlayerEvent>,
}

impl<H: AnimationHandle> Player<H> {
    pub fn new(config: PlayerConfig) -> Self {
        let controls = Controls::new(&config.glyphs);
        Self {
            config,
            ids: IdAllocator::new(),
            status: PlaybackStatus::Stopped,
            live: None,
            controls,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Id of the live animation, if any.
    pub fn current_animation(&self) -> Option<AnimationId> {
        self.live.as_ref().map(|live| live.id)
    }

    pub fn handle(&self) -> Option<&H> {
        self.live.as_ref().map(|live| &live.handle)
    }

    /// Frame shown by the slider.
    pub fn current_frame(&self) -> f64 {
        self.controls.slider.value
    }

    pub fn total_frames(&self) -> Option<f64> {
        self.live.as_ref().map(|live| live.total_frames)
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn report_error(&mut self, err: &PlayerError) {
        self.events.push(PlayerEvent::error(err));
    }

    // ---- drop zone ----

    pub fn set_drop_hover(&mut self, hovering: bool) {
        self.controls.drop_over = hovering;
    }

    /// A file was dropped and is about to be read.
    pub fn begin_drop(&mut self) {
        self.controls.drop_over = false;
        self.controls.idle = false;
    }

    // ---- loading ----

    /// Replace the live animation with one built by `create`.
    ///
    /// The previous animation is destroyed before `create` runs. If `create`
    /// fails the player is left empty with its controls disabled.
    pub fn load_with<F, E>(&mut self, create: F) -> std::result::Result<AnimationId, E>
    where
        F: FnOnce(AnimationId) -> std::result::Result<H, E>,
    {
        self.unload();
        self.controls.idle = false;

        let id = self.ids.alloc_animation();
        let handle = create(id)?;
        let total_frames = handle.duration(true);
        let live = LiveAnimation {
            id,
            handle,
            total_frames,
        };
        let last_frame = live.last_frame();
        self.live = Some(live);

        self.controls.slider.set_value(0.0);
        self.controls.enable_for(last_frame);
        info!("animation {id} loaded ({total_frames} frames)");
        self.events.push(PlayerEvent::AnimationLoaded { id, total_frames });

        if self.config.autoplay {
            self.set_status(PlaybackStatus::Playing);
        }
        Ok(id)
    }

    /// Load an already constructed handle.
    pub fn load(&mut self, handle: H) -> AnimationId {
        match self.load_with(|_| Ok::<H, Infallible>(handle)) {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }

    /// Destroy the live animation, if any, and reset the controls.
    pub fn unload(&mut self) -> Option<AnimationId> {
        let mut live = self.live.take()?;
        live.handle.destroy();
        info!("animation {} disposed", live.id);
        self.events.push(PlayerEvent::AnimationDisposed { id: live.id });
        self.reset();
        self.controls.disable_all();
        Some(live.id)
    }

    // ---- transport ----

    /// Play when stopped or paused, pause when playing.
    pub fn toggle_play(&mut self) -> Result<PlaybackStatus> {
        let next = self.status.toggled();
        let live = self.live_mut()?;
        if next.is_playing() {
            live.handle.play();
        } else {
            live.handle.pause();
        }
        self.set_status(next);
        Ok(next)
    }

    /// Move one frame relative to the slider position.
    pub fn step(&mut self, direction: StepDirection) -> Result<f64> {
        let current = self.controls.slider.value;
        let target = match direction {
            StepDirection::Forward => current + 1.0,
            StepDirection::Backward => current - 1.0,
        };
        self.seek(target)
    }

    pub fn jump(&mut self, boundary: FrameBoundary) -> Result<f64> {
        let target = match boundary {
            FrameBoundary::First => 0.0,
            FrameBoundary::Last => self.live_mut()?.handle.duration(true) - 1.0,
        };
        self.seek(target)
    }

    /// Move to `frame` (floored, clamped to the animation). Keeps playing
    /// when playing, holds otherwise. Returns the frame that was applied.
    pub fn seek(&mut self, frame: f64) -> Result<f64> {
        if !frame.is_finite() {
            warn!("rejecting seek to {frame}");
            return Err(PlayerError::InvalidFrame { frame });
        }
        let status = self.status;
        let live = self.live_mut()?;
        let target = frame.floor().clamp(0.0, live.last_frame());
        match status {
            PlaybackStatus::Playing => live.handle.go_to_and_play(target, true),
            PlaybackStatus::Stopped | PlaybackStatus::Paused => {
                live.handle.go_to_and_stop(target, true)
            }
        }
        trace!("seek {frame} -> {target} while {status}");
        Ok(target)
    }

    /// Run the action bound to a transport button.
    pub fn press(&mut self, button: ButtonKind) -> Result<()> {
        match button {
            ButtonKind::FirstFrame => self.jump(FrameBoundary::First).map(drop),
            ButtonKind::StepBackward => self.step(StepDirection::Backward).map(drop),
            ButtonKind::PlayPause => self.toggle_play().map(drop),
            ButtonKind::StepForward => self.step(StepDirection::Forward).map(drop),
            ButtonKind::LastFrame => self.jump(FrameBoundary::Last).map(drop),
        }
    }

    // ---- library callbacks ----

    pub fn handle_event(&mut self, id: AnimationId, event: AnimationEvent) {
        match event {
            AnimationEvent::EnterFrame { current_time } => self.on_frame(id, current_time),
            AnimationEvent::Complete => self.on_complete(id),
            AnimationEvent::Destroy => self.on_destroy(id),
        }
    }

    pub fn on_frame(&mut self, id: AnimationId, frame: f64) {
        let Some(last_frame) = self.live_last_frame(id) else {
            trace!("ignoring frame {frame} from stale animation {id}");
            return;
        };
        self.controls.refresh_boundaries(frame, last_frame);
        self.controls.slider.set_value(frame);
        self.events.push(PlayerEvent::FrameEntered { id, frame });
    }

    pub fn on_complete(&mut self, id: AnimationId) {
        let Some(live) = self.live.as_mut().filter(|live| live.id == id) else {
            trace!("ignoring completion of stale animation {id}");
            return;
        };
        live.handle.stop();
        self.events.push(PlayerEvent::Completed { id });
        self.reset();
    }

    /// The library destroyed the live animation on its own.
    pub fn on_destroy(&mut self, id: AnimationId) {
        if self.current_animation() != Some(id) {
            trace!("ignoring destroy of stale animation {id}");
            return;
        }
        self.live = None;
        info!("animation {id} destroyed by library");
        self.events.push(PlayerEvent::AnimationDisposed { id });
        self.reset();
        self.controls.disable_all();
    }

    // ---- internals ----

    fn reset(&mut self) {
        self.set_status(PlaybackStatus::Stopped);
        self.controls.slider.set_value(0.0);
        if let Some(last_frame) = self.live.as_ref().map(LiveAnimation::last_frame) {
            self.controls.refresh_boundaries(0.0, last_frame);
        }
    }

    fn set_status(&mut self, to: PlaybackStatus) {
        let glyph = if to.is_playing() {
            &self.config.glyphs.pause
        } else {
            &self.config.glyphs.play
        };
        self.controls.set_play_glyph(glyph);

        let from = std::mem::replace(&mut self.status, to);
        if from != to {
            debug!("status {from} -> {to}");
            self.events.push(PlayerEvent::StatusChanged { from, to });
        }
    }

    fn live_mut(&mut self) -> Result<&mut LiveAnimation<H>> {
        self.live.as_mut().ok_or(PlayerError::NoAnimation)
    }

    fn live_last_frame(&self, id: AnimationId) -> Option<f64> {
        self.live
            .as_ref()
            .filter(|live| live.id == id)
            .map(LiveAnimation::last_frame)
    }
}

impl<H: AnimationHandle> Drop for Player<H> {
    fn drop(&mut self) {
        if let Some(live) = self.live.as_mut() {
            live.handle.destroy();
        }
    }
}
