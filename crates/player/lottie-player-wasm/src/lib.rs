//! Drag-and-drop Lottie player widget for the browser.
//!
//! `LottiePlayer` builds its controls inside a host element, accepts dropped
//! animation files and drives lottie-web (expected as the global `lottie`)
//! through `lottie_player_core::Player`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::file::callbacks::FileReader;
use js_sys::{Array, Function, JSON};
use log::{error, warn};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use lottie_player_core::{
    AnimationEvent, AnimationId, FrameBoundary, Player, PlayerConfig, PlayerError, PlayerEvent,
    StepDirection,
};

mod animation;
mod bindings;
mod dom;
mod drop_zone;
mod logger;

pub use animation::JsAnimation;
pub use dom::{button_class, CONTAINER_CLASS, DROP_OVER_CLASS, IDLE_CLASS, SURFACE_CLASS};

type CoreResult<T> = lottie_player_core::Result<T>;

/// ABI version of the exported class; bump on breaking JS API changes.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js(err: PlayerError) -> JsError {
    JsError::new(&err.to_string())
}

/// State shared between the exported object and every DOM/library callback.
pub(crate) struct Shared {
    player: RefCell<Player<JsAnimation>>,
    /// Library callbacks that arrived while the player was borrowed.
    pending: RefCell<VecDeque<(AnimationId, AnimationEvent)>>,
    widget: dom::Widget,
    listener: RefCell<Option<Function>>,
    reader: RefCell<Option<FileReader>>,
}

impl Shared {
    fn new(player: Player<JsAnimation>, widget: dom::Widget) -> Self {
        Self {
            player: RefCell::new(player),
            pending: RefCell::new(VecDeque::new()),
            widget,
            listener: RefCell::new(None),
            reader: RefCell::new(None),
        }
    }

    pub(crate) fn widget(&self) -> &dom::Widget {
        &self.widget
    }

    /// Run `f` on the player, then deliver queued callbacks and re-sync.
    pub(crate) fn act<T>(
        &self,
        f: impl FnOnce(&mut Player<JsAnimation>) -> CoreResult<T>,
    ) -> CoreResult<T> {
        let result = {
            let mut player = self
                .player
                .try_borrow_mut()
                .map_err(|_| PlayerError::Busy)?;
            f(&mut player)
        };
        self.flush();
        result
    }

    pub(crate) fn act_or_report(
        &self,
        f: impl FnOnce(&mut Player<JsAnimation>) -> CoreResult<()>,
    ) {
        if let Err(err) = self.act(f) {
            self.report(&err);
        }
    }

    /// Log an error raised inside a callback and forward it to the host.
    pub(crate) fn report(&self, err: &PlayerError) {
        match err.category() {
            "playback" | "drop" => warn!("{} error: {err}", err.category()),
            _ => error!("{} error: {err}", err.category()),
        }
        let forwarded = self.act(|player| {
            player.report_error(err);
            Ok(())
        });
        if let Err(busy) = forwarded {
            warn!("could not forward {} error to the host: {busy}", err.category());
        }
    }

    pub(crate) fn enqueue(&self, id: AnimationId, event: AnimationEvent) {
        self.pending.borrow_mut().push_back((id, event));
        self.flush();
    }

    /// Deliver queued library callbacks, then push the view-model to the DOM
    /// and events to the host. No-op while the player is borrowed; the
    /// borrowing frame flushes when it finishes.
    fn flush(&self) {
        let (events, controls) = {
            let Ok(mut player) = self.player.try_borrow_mut() else {
                return;
            };
            loop {
                let next = self.pending.borrow_mut().pop_front();
                let Some((id, event)) = next else {
                    break;
                };
                player.handle_event(id, event);
            }
            (player.drain_events(), player.controls().clone())
        };
        if let Err(err) = self.widget.sync(&controls) {
            warn!("widget sync failed: {}", bindings::describe(&err));
        }
        self.emit(events);
    }

    fn emit(&self, events: Vec<PlayerEvent>) {
        if events.is_empty() {
            return;
        }
        // Cloned so the listener may replace itself.
        let Some(listener) = self.listener.borrow().clone() else {
            return;
        };
        for event in events {
            let value = match swb::to_value(&event) {
                Ok(v) => v,
                Err(e) => {
                    warn!("event serialization error: {e}");
                    continue;
                }
            };
            if let Err(err) = listener.call1(&JsValue::UNDEFINED, &value) {
                warn!("event listener threw: {}", bindings::describe(&err));
            }
        }
    }

    pub(crate) fn load_data(self: &Rc<Self>, data: JsValue) -> CoreResult<AnimationId> {
        if !data.is_object() || Array::is_array(&data) {
            return Err(PlayerError::NotAnObject);
        }
        let weak = Rc::downgrade(self);
        let surface = self.widget.surface.clone();
        self.act(move |player| {
            let config = player.config().clone();
            player.load_with(|id| JsAnimation::create(&surface, &config, &data, id, weak))
        })
    }

    /// Parse with the browser's `JSON.parse`, which accepts everything the
    /// renderer would.
    pub(crate) fn load_text(self: &Rc<Self>, text: &str) -> CoreResult<AnimationId> {
        let data = JSON::parse(text).map_err(|e| PlayerError::InvalidJson {
            reason: bindings::describe(&e),
        })?;
        self.load_data(data)
    }

    pub(crate) fn keep_reader(&self, reader: FileReader) {
        self.reader.replace(Some(reader));
    }
}

#[wasm_bindgen]
pub struct LottiePlayer {
    shared: Rc<Shared>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl LottiePlayer {
    /// Build the widget inside `container`. Pass a config object or
    /// undefined/null for defaults.
    /// Example:
    ///   new LottiePlayer(document.getElementById("player"), { renderer: "canvas" })
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, config: JsValue) -> Result<LottiePlayer, JsError> {
        console_error_panic_hook::set_once();

        let cfg: PlayerConfig = if jsvalue_is_undefined_or_null(&config) {
            PlayerConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        logger::init(cfg.log_level.into());

        let widget = dom::Widget::build(&container)
            .map_err(|e| JsError::new(&format!("widget error: {}", bindings::describe(&e))))?;
        let shared = Rc::new(Shared::new(Player::new(cfg), widget));
        shared.flush();

        let mut listeners = drop_zone::attach(&shared);
        listeners.extend(dom::attach_transport(&shared));

        Ok(LottiePlayer { shared, listeners })
    }

    /// Load animation data given as a JS object. Returns the animation id.
    #[wasm_bindgen(js_name = load_animation)]
    pub fn load_animation(&self, data: JsValue) -> Result<u32, JsError> {
        self.shared.load_data(data).map(|id| id.0).map_err(to_js)
    }

    /// Load animation data given as JSON text. Returns the animation id.
    #[wasm_bindgen(js_name = load_animation_json)]
    pub fn load_animation_json(&self, text: &str) -> Result<u32, JsError> {
        self.shared.load_text(text).map(|id| id.0).map_err(to_js)
    }

    /// Toggle play/pause. Returns the new status name.
    #[wasm_bindgen(js_name = toggle_play)]
    pub fn toggle_play(&self) -> Result<String, JsError> {
        self.shared
            .act(|player| player.toggle_play())
            .map(|status| status.name().to_string())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = step_forward)]
    pub fn step_forward(&self) -> Result<f64, JsError> {
        self.shared
            .act(|player| player.step(StepDirection::Forward))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = step_backward)]
    pub fn step_backward(&self) -> Result<f64, JsError> {
        self.shared
            .act(|player| player.step(StepDirection::Backward))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = first_frame)]
    pub fn first_frame(&self) -> Result<f64, JsError> {
        self.shared
            .act(|player| player.jump(FrameBoundary::First))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = last_frame)]
    pub fn last_frame(&self) -> Result<f64, JsError> {
        self.shared
            .act(|player| player.jump(FrameBoundary::Last))
            .map_err(to_js)
    }

    /// Move to a frame (floored). Returns the frame actually applied.
    #[wasm_bindgen]
    pub fn seek(&self, frame: f64) -> Result<f64, JsError> {
        self.shared
            .act(|player| player.seek(frame))
            .map_err(to_js)
    }

    /// "stopped" | "playing" | "paused"
    #[wasm_bindgen]
    pub fn status(&self) -> Result<String, JsError> {
        self.shared
            .act(|player| Ok(player.status().name().to_string()))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = current_frame)]
    pub fn current_frame(&self) -> Result<f64, JsError> {
        self.shared
            .act(|player| Ok(player.current_frame()))
            .map_err(to_js)
    }

    /// Frame count of the loaded animation, or undefined.
    #[wasm_bindgen(js_name = total_frames)]
    pub fn total_frames(&self) -> Result<Option<f64>, JsError> {
        self.shared
            .act(|player| Ok(player.total_frames()))
            .map_err(to_js)
    }

    /// Current control state as a JSON-compatible object.
    #[wasm_bindgen]
    pub fn controls(&self) -> Result<JsValue, JsError> {
        let controls = self
            .shared
            .act(|player| Ok(player.controls().clone()))
            .map_err(to_js)?;
        swb::to_value(&controls).map_err(|e| JsError::new(&format!("serialization error: {e}")))
    }

    /// Receive player events as `{ type, ... }` objects. Pass null to stop.
    #[wasm_bindgen(js_name = set_event_listener)]
    pub fn set_event_listener(&self, listener: Option<Function>) {
        self.shared.listener.replace(listener);
    }

    /// Destroy the animation, remove listeners and the widget's elements.
    #[wasm_bindgen]
    pub fn destroy(&mut self) -> Result<(), JsError> {
        self.shared
            .act(|player| {
                player.unload();
                Ok(())
            })
            .map_err(to_js)?;
        self.listeners.clear();
        self.shared.reader.replace(None);
        self.shared.widget.remove();
        Ok(())
    }
}
