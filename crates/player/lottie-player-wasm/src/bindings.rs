//! Imports from lottie-web, reached through its global `lottie` object.
//!
//! Every method is imported with `catch` so an exception inside the library
//! surfaces as `Err` instead of unwinding through Rust frames.

use js_sys::Function;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Animation instance returned by `lottie.loadAnimation`.
    pub type AnimationItem;

    #[wasm_bindgen(catch, js_namespace = lottie, js_name = loadAnimation)]
    pub fn load_animation(params: &JsValue) -> Result<AnimationItem, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn play(this: &AnimationItem) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn pause(this: &AnimationItem) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn stop(this: &AnimationItem) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = goToAndStop)]
    pub fn go_to_and_stop(this: &AnimationItem, value: f64, is_frame: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = goToAndPlay)]
    pub fn go_to_and_play(this: &AnimationItem, value: f64, is_frame: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = getDuration)]
    pub fn get_duration(this: &AnimationItem, in_frames: bool) -> Result<f64, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn destroy(this: &AnimationItem) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addEventListener)]
    pub fn add_event_listener(
        this: &AnimationItem,
        name: &str,
        callback: &Function,
    ) -> Result<JsValue, JsValue>;
}

/// Best-effort message for a thrown JS value.
pub fn describe(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{err:?}")
}
