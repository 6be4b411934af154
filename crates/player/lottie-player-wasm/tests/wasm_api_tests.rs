#![cfg(target_arch = "wasm32")]
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Object, Reflect};
use lottie_player_core::ButtonKind;
use lottie_player_wasm::{abi_version, button_class, LottiePlayer, DROP_OVER_CLASS, IDLE_CLASS};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

/// Minimal stand-in for lottie-web. `goToAndStop`/`goToAndPlay` raise
/// `enterFrame` synchronously, like the real library.
const LOTTIE_STUB: &str = r#"
window.__lottieCalls = [];
window.lottie = {
  loadAnimation: function (params) {
    var data = params.animationData;
    if (data.fail) { throw new Error("bad animation"); }
    var listeners = {};
    var frames = data.op - data.ip;
    var fire = function (name, payload) {
      (listeners[name] || []).slice().forEach(function (cb) { cb(payload); });
    };
    var item = {
      params: params,
      play: function () { __lottieCalls.push("play"); },
      pause: function () { __lottieCalls.push("pause"); },
      stop: function () { __lottieCalls.push("stop"); },
      goToAndStop: function (v) {
        __lottieCalls.push("goToAndStop:" + v);
        fire("enterFrame", { type: "enterFrame", currentTime: v });
      },
      goToAndPlay: function (v) {
        __lottieCalls.push("goToAndPlay:" + v);
        fire("enterFrame", { type: "enterFrame", currentTime: v });
      },
      getDuration: function (inFrames) { return inFrames ? frames : frames / data.fr; },
      destroy: function () {
        __lottieCalls.push("destroy");
        fire("destroy", { type: "destroy" });
        listeners = {};
      },
      addEventListener: function (name, cb) {
        (listeners[name] = listeners[name] || []).push(cb);
      },
      finish: function () { fire("complete", { type: "complete" }); }
    };
    window.__lottieLast = item;
    return item;
  }
};
window.__dropEvent = function (entries) {
  var dt = new DataTransfer();
  entries.forEach(function (e) {
    if (e.file) {
      dt.items.add(new File([e.text], e.file, { type: "application/json" }));
    } else {
      dt.items.add(e.text, "text/plain");
    }
  });
  return new DragEvent("drop", { dataTransfer: dt, bubbles: true, cancelable: true });
};
"#;

const BOUNCE: &str = r#"{ "v": "5.7.4", "fr": 30, "ip": 0, "op": 60, "w": 200, "h": 200, "layers": [] }"#;
const SHORT: &str = r#"{ "v": "5.7.4", "fr": 24, "ip": 0, "op": 10, "w": 64, "h": 64, "layers": [] }"#;

fn install_stub() {
    js_sys::eval(LOTTIE_STUB).unwrap();
}

fn eval(code: &str) -> JsValue {
    js_sys::eval(code).unwrap()
}

fn calls() -> Vec<String> {
    Array::from(&eval("__lottieCalls"))
        .iter()
        .filter_map(|v| v.as_string())
        .collect()
}

fn mount() -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let container: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    document.body().unwrap().append_child(&container).unwrap();
    container
}

fn player_with(config: JsValue) -> (LottiePlayer, HtmlElement) {
    install_stub();
    let container = mount();
    let player = LottiePlayer::new(container.clone(), config).unwrap();
    (player, container)
}

fn button(container: &HtmlElement, kind: ButtonKind) -> HtmlButtonElement {
    container
        .query_selector(&format!(".{}", button_class(kind)))
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn slider(container: &HtmlElement) -> HtmlInputElement {
    container
        .query_selector(".lottie-player__slider")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn surface(container: &HtmlElement) -> HtmlElement {
    container
        .query_selector(".lottie-player__player")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn dispatch(target: &HtmlElement, kind: &str) {
    let event = web_sys::Event::new(kind).unwrap();
    target.dispatch_event(&event).unwrap();
}

/// Dispatch a real `DragEvent` carrying `items`: `(Some(name), text)` is a
/// file, `(None, text)` a plain string item.
fn drop_items(target: &HtmlElement, items: &[(Option<&str>, &str)]) {
    let entries = Array::new();
    for (name, text) in items {
        let entry = Object::new();
        Reflect::set(&entry, &JsValue::from_str("text"), &JsValue::from_str(text)).unwrap();
        if let Some(name) = name {
            Reflect::set(&entry, &JsValue::from_str("file"), &JsValue::from_str(name)).unwrap();
        }
        entries.push(&entry);
    }
    let make: Function = eval("__dropEvent").dyn_into().unwrap();
    let event = make.call1(&JsValue::UNDEFINED, &entries).unwrap();
    target.dispatch_event(event.unchecked_ref()).unwrap();
}

fn record_events(player: &LottiePlayer) {
    eval("window.__events = []");
    let listener = Function::new_with_args("e", "window.__events.push(e);");
    player.set_event_listener(Some(listener));
}

fn error_categories() -> Vec<String> {
    Array::from(&eval(
        "__events.filter(function (e) { return e.type === 'error'; })\
         .map(function (e) { return e.category; })",
    ))
    .iter()
    .filter_map(|v| v.as_string())
    .collect()
}

/// Yield to the event loop until `done` holds; file reads complete there.
async fn wait_until(done: impl Fn() -> bool) {
    for _ in 0..200 {
        if done() {
            return;
        }
        TimeoutFuture::new(5).await;
    }
    panic!("condition not reached");
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn builds_disabled_widget() {
    let (_player, container) = player_with(JsValue::UNDEFINED);

    assert!(container.class_list().contains("lottie-player"));
    assert_eq!(container.child_element_count(), 3);
    for kind in ButtonKind::ALL {
        let b = button(&container, kind);
        assert!(b.disabled());
        assert!(b.class_list().contains("material-symbols-outlined"));
    }
    assert_eq!(button(&container, ButtonKind::PlayPause).inner_text(), "play_arrow");
    assert_eq!(button(&container, ButtonKind::LastFrame).inner_text(), "skip_next");
    let s = slider(&container);
    assert_eq!(s.type_(), "range");
    assert!(s.disabled());
    assert!(surface(&container).class_list().contains(IDLE_CLASS));
}

#[wasm_bindgen_test]
fn rejects_bad_config() {
    install_stub();
    let config = js_sys::JSON::parse(r#"{ "renderer": "webgl" }"#).unwrap();
    assert!(LottiePlayer::new(mount(), config).is_err());
}

#[wasm_bindgen_test]
fn loading_enables_controls() {
    let (player, container) = player_with(JsValue::NULL);
    player.load_animation_json(BOUNCE).unwrap();

    let s = slider(&container);
    assert!(!s.disabled());
    assert_eq!(s.max(), "59");
    assert_eq!(s.value(), "0");
    assert!(!button(&container, ButtonKind::PlayPause).disabled());
    assert!(!button(&container, ButtonKind::StepForward).disabled());
    assert!(!button(&container, ButtonKind::LastFrame).disabled());
    assert!(button(&container, ButtonKind::StepBackward).disabled());
    assert!(button(&container, ButtonKind::FirstFrame).disabled());
    assert!(!surface(&container).class_list().contains(IDLE_CLASS));
    assert_eq!(player.status().unwrap(), "stopped");
    assert_eq!(player.total_frames().unwrap(), Some(60.0));

    let params = Reflect::get(&eval("__lottieLast"), &JsValue::from_str("params")).unwrap();
    let renderer = Reflect::get(&params, &JsValue::from_str("renderer")).unwrap();
    assert_eq!(renderer.as_string().as_deref(), Some("svg"));
    let looping = Reflect::get(&params, &JsValue::from_str("loop")).unwrap();
    assert_eq!(looping.as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn play_button_toggles() {
    let (player, container) = player_with(JsValue::UNDEFINED);
    player.load_animation_json(BOUNCE).unwrap();
    let play = button(&container, ButtonKind::PlayPause);

    play.click();
    assert_eq!(player.status().unwrap(), "playing");
    assert_eq!(play.inner_text(), "pause");
    assert_eq!(calls().last().map(String::as_str), Some("play"));

    play.click();
    assert_eq!(player.status().unwrap(), "paused");
    assert_eq!(play.inner_text(), "play_arrow");
    assert_eq!(calls().last().map(String::as_str), Some("pause"));
}

#[wasm_bindgen_test]
fn synchronous_frame_callbacks_update_controls() {
    let (player, container) = player_with(JsValue::UNDEFINED);
    player.load_animation_json(BOUNCE).unwrap();

    assert_eq!(player.seek(10.7).unwrap(), 10.0);
    assert_eq!(player.current_frame().unwrap(), 10.0);
    assert_eq!(slider(&container).value(), "10");
    assert!(!button(&container, ButtonKind::FirstFrame).disabled());

    button(&container, ButtonKind::StepForward).click();
    assert_eq!(player.current_frame().unwrap(), 11.0);

    button(&container, ButtonKind::LastFrame).click();
    assert_eq!(player.current_frame().unwrap(), 59.0);
    assert!(button(&container, ButtonKind::StepForward).disabled());
    assert!(button(&container, ButtonKind::LastFrame).disabled());

    button(&container, ButtonKind::StepBackward).click();
    assert_eq!(player.current_frame().unwrap(), 58.0);

    button(&container, ButtonKind::FirstFrame).click();
    assert_eq!(player.current_frame().unwrap(), 0.0);
    assert_eq!(calls().last().map(String::as_str), Some("goToAndStop:0"));
}

#[wasm_bindgen_test]
fn slider_input_seeks() {
    let (player, container) = player_with(JsValue::UNDEFINED);
    player.load_animation_json(BOUNCE).unwrap();
    player.toggle_play().unwrap();

    let s = slider(&container);
    s.set_value("25");
    dispatch(&s, "input");
    assert_eq!(calls().last().map(String::as_str), Some("goToAndPlay:25"));
    assert_eq!(player.current_frame().unwrap(), 25.0);
}

#[wasm_bindgen_test]
fn completion_resets() {
    let (player, container) = player_with(JsValue::UNDEFINED);
    player.load_animation_json(BOUNCE).unwrap();
    player.toggle_play().unwrap();
    player.seek(40.0).unwrap();

    eval("__lottieLast.finish()");
    assert_eq!(player.status().unwrap(), "stopped");
    assert_eq!(player.current_frame().unwrap(), 0.0);
    assert_eq!(slider(&container).value(), "0");
    assert_eq!(button(&container, ButtonKind::PlayPause).inner_text(), "play_arrow");
    assert!(calls().iter().any(|c| c == "stop"));
}

#[wasm_bindgen_test]
fn reloading_destroys_previous() {
    let (player, container) = player_with(JsValue::UNDEFINED);
    let first = player.load_animation_json(BOUNCE).unwrap();
    player.toggle_play().unwrap();

    let second = player.load_animation_json(SHORT).unwrap();
    assert_ne!(first, second);
    assert!(calls().iter().any(|c| c == "destroy"));
    assert_eq!(player.status().unwrap(), "stopped");
    assert_eq!(slider(&container).max(), "9");
    assert_eq!(player.total_frames().unwrap(), Some(10.0));
}

#[wasm_bindgen_test]
fn bad_data_is_rejected() {
    let (player, container) = player_with(JsValue::UNDEFINED);
    assert!(player.load_animation_json("not json").is_err());
    assert!(player.load_animation_json("[1, 2]").is_err());
    assert!(player.load_animation(JsValue::from_f64(3.0)).is_err());

    player.load_animation_json(BOUNCE).unwrap();
    assert!(player.load_animation_json(r#"{ "fail": true }"#).is_err());
    assert!(slider(&container).disabled());
    assert!(button(&container, ButtonKind::PlayPause).disabled());
    assert!(player.toggle_play().is_err());
}

#[wasm_bindgen_test]
fn event_listener_receives_events() {
    let (player, _container) = player_with(JsValue::UNDEFINED);
    record_events(&player);

    player.load_animation_json(BOUNCE).unwrap();
    player.toggle_play().unwrap();

    let types: Vec<String> = Array::from(&eval("__events.map(function (e) { return e.type; })"))
        .iter()
        .filter_map(|v| v.as_string())
        .collect();
    assert_eq!(types[0], "animation_loaded");
    assert!(types.iter().any(|t| t == "status_changed"));

    player.set_event_listener(None);
    player.toggle_play().unwrap();
    let count = Reflect::get(&eval("__events"), &JsValue::from_str("length")).unwrap();
    assert_eq!(count.as_f64(), Some(types.len() as f64));
}

#[wasm_bindgen_test]
fn drag_hover_toggles_class() {
    let (_player, container) = player_with(JsValue::UNDEFINED);
    let surface = surface(&container);

    dispatch(&container, "dragover");
    assert!(surface.class_list().contains(DROP_OVER_CLASS));
    dispatch(&container, "dragleave");
    assert!(!surface.class_list().contains(DROP_OVER_CLASS));

    dispatch(&container, "dragover");
    // A plain Event is not a DragEvent, so nothing is read, but the hover
    // state still clears.
    dispatch(&container, "drop");
    assert!(!surface.class_list().contains(DROP_OVER_CLASS));
    assert!(surface.class_list().contains(IDLE_CLASS));
}

#[wasm_bindgen_test]
fn destroy_removes_widget() {
    let (mut player, container) = player_with(JsValue::UNDEFINED);
    player.load_animation_json(BOUNCE).unwrap();
    player.destroy().unwrap();

    assert_eq!(container.child_element_count(), 0);
    assert!(!container.class_list().contains("lottie-player"));
    assert!(calls().iter().any(|c| c == "destroy"));
}

#[wasm_bindgen_test]
fn text_accepted_by_json_parse_loads() {
    let (player, _container) = player_with(JsValue::UNDEFINED);
    let huge = r#"{ "fr": 30, "ip": 0, "op": 60, "layers": [], "meta": 1e400 }"#;
    player.load_animation_json(huge).unwrap();

    let deep = format!(
        r#"{{ "fr": 30, "ip": 0, "op": 20, "layers": [], "extra": {}{} }}"#,
        "[".repeat(200),
        "]".repeat(200)
    );
    player.load_animation_json(&deep).unwrap();
    assert_eq!(player.total_frames().unwrap(), Some(20.0));
}

#[wasm_bindgen_test]
async fn dropped_file_is_read_and_loaded() {
    let (player, container) = player_with(JsValue::UNDEFINED);
    let surface = surface(&container);

    drop_items(&container, &[(Some("bounce.json"), BOUNCE)]);
    assert!(!surface.class_list().contains(IDLE_CLASS));
    wait_until(|| player.total_frames().unwrap().is_some()).await;

    assert_eq!(player.total_frames().unwrap(), Some(60.0));
    assert!(!slider(&container).disabled());
    assert!(!button(&container, ButtonKind::PlayPause).disabled());
    assert_eq!(player.status().unwrap(), "stopped");
}

#[wasm_bindgen_test]
async fn newer_drop_replaces_pending_read() {
    let (player, container) = player_with(JsValue::UNDEFINED);

    drop_items(&container, &[(Some("bounce.json"), BOUNCE)]);
    drop_items(&container, &[(Some("short.json"), SHORT)]);
    wait_until(|| player.total_frames().unwrap().is_some()).await;
    TimeoutFuture::new(50).await;

    assert_eq!(player.total_frames().unwrap(), Some(10.0));
    // Only one animation was ever created, so nothing was destroyed.
    assert!(!calls().iter().any(|c| c == "destroy"));
}

#[wasm_bindgen_test]
fn dropping_text_or_nothing_reports_drop_errors() {
    let (player, container) = player_with(JsValue::UNDEFINED);
    record_events(&player);

    drop_items(&container, &[(None, BOUNCE)]);
    drop_items(&container, &[]);

    assert_eq!(error_categories(), vec!["drop", "drop"]);
    let message = Reflect::get(
        &eval("__events.filter(function (e) { return e.type === 'error'; })[0]"),
        &JsValue::from_str("message"),
    )
    .unwrap()
    .as_string()
    .unwrap();
    assert!(message.contains("kind: string"), "{message}");
    assert!(surface(&container).class_list().contains(IDLE_CLASS));
    assert_eq!(player.total_frames().unwrap(), None);
}

#[wasm_bindgen_test]
fn error_raised_while_busy_is_logged() {
    let (player, container) = player_with(JsValue::UNDEFINED);
    player.load_animation_json(BOUNCE).unwrap();

    eval("window.__warnings = []; window.__warn = console.warn; \
          console.warn = function (m) { __warnings.push(String(m)); };");
    let play = button(&container, ButtonKind::PlayPause);
    Reflect::set(&js_sys::global(), &JsValue::from_str("__playButton"), &play).unwrap();
    // The renderer clicks "play" from inside goToAndStop, while the player
    // is still borrowed.
    let reentrant = Function::new_no_args("__playButton.click();");
    Reflect::set(&eval("__lottieLast"), &JsValue::from_str("goToAndStop"), &reentrant).unwrap();
    let seeked = player.seek(5.0);
    eval("console.warn = window.__warn;");

    assert!(seeked.is_ok());
    assert_eq!(player.status().unwrap(), "stopped");
    assert_eq!(play.inner_text(), "play_arrow");
    let warnings: Vec<String> = Array::from(&eval("__warnings"))
        .iter()
        .filter_map(|v| v.as_string())
        .collect();
    assert!(warnings.iter().any(|w| w.contains("could not forward playback error")));
}
