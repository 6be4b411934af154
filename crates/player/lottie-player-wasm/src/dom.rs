//! Widget elements and their synchronization with `Controls`.

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlInputElement};

use lottie_player_core::{ButtonKind, Controls};

use crate::Shared;

pub const CONTAINER_CLASS: &str = "lottie-player";
pub const DROP_ZONE_CLASS: &str = "lottie-player__drop-zone";
pub const SURFACE_CLASS: &str = "lottie-player__player";
pub const CONTROLS_CLASS: &str = "lottie-player__controls";
pub const SLIDER_CLASS: &str = "lottie-player__slider";
pub const BUTTONS_CLASS: &str = "lottie-player__buttons";
pub const ICON_CLASS: &str = "material-symbols-outlined";
pub const DROP_OVER_CLASS: &str = "drop-over";
pub const IDLE_CLASS: &str = "idle";

pub fn button_class(kind: ButtonKind) -> &'static str {
    match kind {
        ButtonKind::FirstFrame => "button__first-frame",
        ButtonKind::StepBackward => "button__one-frame-backward",
        ButtonKind::PlayPause => "button__play",
        ButtonKind::StepForward => "button__one-frame-forward",
        ButtonKind::LastFrame => "button__last-frame",
    }
}

pub(crate) struct Widget {
    pub container: HtmlElement,
    pub surface: HtmlElement,
    pub slider: HtmlInputElement,
    buttons: Vec<(ButtonKind, HtmlButtonElement)>,
    nodes: Vec<HtmlElement>,
}

fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let element = document.create_element(tag)?;
    element.class_list().add_1(class)?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("<{tag}> has an unexpected type")))
}

impl Widget {
    /// Build the drop zone, the player surface and the controls inside
    /// `container`.
    pub fn build(container: &HtmlElement) -> Result<Self, JsValue> {
        let document = container
            .owner_document()
            .ok_or_else(|| JsValue::from_str("container is not attached to a document"))?;
        container.class_list().add_1(CONTAINER_CLASS)?;

        let drop_zone: HtmlElement = create(&document, "div", DROP_ZONE_CLASS)?;
        let surface: HtmlElement = create(&document, "div", SURFACE_CLASS)?;
        let controls: HtmlElement = create(&document, "div", CONTROLS_CLASS)?;
        let row: HtmlElement = create(&document, "div", BUTTONS_CLASS)?;

        let slider: HtmlInputElement = create(&document, "input", SLIDER_CLASS)?;
        slider.set_type("range");
        slider.set_min("0");
        slider.set_step("1");

        let mut buttons = Vec::with_capacity(ButtonKind::ALL.len());
        for kind in ButtonKind::ALL {
            let button: HtmlButtonElement = create(&document, "button", button_class(kind))?;
            button.class_list().add_1(ICON_CLASS)?;
            button.set_type("button");
            row.append_child(&button)?;
            buttons.push((kind, button));
        }

        controls.append_child(&slider)?;
        controls.append_child(&row)?;
        container.append_child(&drop_zone)?;
        container.append_child(&surface)?;
        container.append_child(&controls)?;

        Ok(Self {
            container: container.clone(),
            surface,
            slider,
            buttons,
            nodes: vec![drop_zone, controls],
        })
    }

    pub fn buttons(&self) -> impl Iterator<Item = &(ButtonKind, HtmlButtonElement)> {
        self.buttons.iter()
    }

    /// Copy the view-model onto the elements.
    pub fn sync(&self, controls: &Controls) -> Result<(), JsValue> {
        let slider = &controls.slider;
        self.slider.set_max(&slider.max.to_string());
        self.slider.set_disabled(!slider.enabled);
        let value = slider.value.to_string();
        if self.slider.value() != value {
            self.slider.set_value(&value);
        }

        for (kind, element) in &self.buttons {
            let button = controls.button(*kind);
            element.set_disabled(!button.enabled);
            if element.inner_text() != button.glyph {
                element.set_inner_text(&button.glyph);
            }
        }

        let classes = self.surface.class_list();
        classes.toggle_with_force(DROP_OVER_CLASS, controls.drop_over)?;
        classes.toggle_with_force(IDLE_CLASS, controls.idle)?;
        Ok(())
    }

    /// Detach every element this widget added.
    pub fn remove(&self) {
        self.surface.remove();
        for node in &self.nodes {
            node.remove();
        }
        let _ = self.container.class_list().remove_1(CONTAINER_CLASS);
    }
}

/// Wire the slider and the five buttons to the player.
pub(crate) fn attach_transport(shared: &Rc<Shared>) -> Vec<EventListener> {
    let widget = shared.widget();
    let mut listeners = Vec::with_capacity(ButtonKind::ALL.len() + 1);

    let slider = widget.slider.clone();
    let on_input = shared.clone();
    listeners.push(EventListener::new(&widget.slider, "input", move |_| {
        let frame = slider.value_as_number();
        on_input.act_or_report(|player| player.seek(frame).map(drop));
    }));

    for (kind, button) in widget.buttons() {
        let kind = *kind;
        let on_click = shared.clone();
        listeners.push(EventListener::new(button, "click", move |_| {
            on_click.act_or_report(|player| player.press(kind));
        }));
    }

    listeners
}
