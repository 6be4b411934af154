//! `AnimationHandle` over a lottie-web `AnimationItem`.

use std::rc::Weak;

use js_sys::{Object, Reflect};
use log::{debug, warn};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use lottie_player_core::{AnimationEvent, AnimationHandle, AnimationId, PlayerConfig, PlayerError};

use crate::bindings::{self, AnimationItem};
use crate::Shared;

/// Plain part of the `loadAnimation` parameters; `container` and
/// `animationData` are attached as live JS values afterwards.
#[derive(Serialize)]
struct LoadParams {
    renderer: &'static str,
    #[serde(rename = "loop")]
    loop_playback: bool,
    autoplay: bool,
}

type Callback = Closure<dyn FnMut(JsValue)>;

pub struct JsAnimation {
    item: AnimationItem,
    // Dropped with the handle; the library has released them by then.
    _callbacks: Vec<Callback>,
}

impl JsAnimation {
    /// Ask the library to render `data` into `container` and subscribe the
    /// player to its callbacks under `id`.
    pub(crate) fn create(
        container: &HtmlElement,
        config: &PlayerConfig,
        data: &JsValue,
        id: AnimationId,
        shared: Weak<Shared>,
    ) -> Result<Self, PlayerError> {
        let params = swb::to_value(&LoadParams {
            renderer: config.renderer.as_str(),
            loop_playback: config.loop_playback,
            autoplay: config.autoplay,
        })
        .map_err(|e| PlayerError::Library {
            reason: format!("params serialization error: {e}"),
        })?;
        set_field(&params, "container", container)?;
        set_field(&params, "animationData", data)?;

        let item = bindings::load_animation(&params).map_err(library_error)?;

        let mut callbacks = Vec::with_capacity(3);
        for name in ["enterFrame", "complete", "destroy"] {
            let shared = shared.clone();
            let callback = Callback::new(move |payload: JsValue| {
                let Some(event) = decode_event(name, &payload) else {
                    return;
                };
                if let Some(shared) = shared.upgrade() {
                    shared.enqueue(id, event);
                }
            });
            item.add_event_listener(name, callback.as_ref().unchecked_ref())
                .map_err(library_error)?;
            callbacks.push(callback);
        }

        debug!("lottie animation {id} created ({})", config.renderer.as_str());
        Ok(Self {
            item,
            _callbacks: callbacks,
        })
    }
}

fn set_field(target: &JsValue, key: &str, value: &JsValue) -> Result<(), PlayerError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(drop)
        .map_err(library_error)
}

fn library_error(err: JsValue) -> PlayerError {
    PlayerError::Library {
        reason: bindings::describe(&err),
    }
}

fn decode_event(name: &str, payload: &JsValue) -> Option<AnimationEvent> {
    match name {
        "enterFrame" => {
            let current_time = payload
                .dyn_ref::<Object>()
                .and_then(|obj| Reflect::get(obj, &JsValue::from_str("currentTime")).ok())
                .and_then(|v| v.as_f64())?;
            Some(AnimationEvent::EnterFrame { current_time })
        }
        "complete" => Some(AnimationEvent::Complete),
        "destroy" => Some(AnimationEvent::Destroy),
        _ => None,
    }
}

/// Log instead of failing: the trait methods mirror fire-and-forget JS calls.
fn check(op: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!("lottie {op} failed: {}", bindings::describe(&err));
    }
}

impl AnimationHandle for JsAnimation {
    fn play(&mut self) {
        check("play", self.item.play());
    }

    fn pause(&mut self) {
        check("pause", self.item.pause());
    }

    fn stop(&mut self) {
        check("stop", self.item.stop());
    }

    fn go_to_and_stop(&mut self, value: f64, is_frame: bool) {
        check("goToAndStop", self.item.go_to_and_stop(value, is_frame));
    }

    fn go_to_and_play(&mut self, value: f64, is_frame: bool) {
        check("goToAndPlay", self.item.go_to_and_play(value, is_frame));
    }

    fn duration(&self, in_frames: bool) -> f64 {
        match self.item.get_duration(in_frames) {
            Ok(d) if d.is_finite() => d,
            Ok(d) => {
                warn!("lottie getDuration returned {d}");
                0.0
            }
            Err(err) => {
                warn!("lottie getDuration failed: {}", bindings::describe(&err));
                0.0
            }
        }
    }

    fn destroy(&mut self) {
        check("destroy", self.item.destroy());
    }
}
