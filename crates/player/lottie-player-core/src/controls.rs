//! View-model for the transport controls.
//!
//! Nothing here is authoritative: the controller recomputes these values from
//! the current frame and duration, and the web adapter copies them onto the
//! real DOM elements after each dispatched event.

use serde::Serialize;

use crate::config::Glyphs;

/// The five transport buttons, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    FirstFrame,
    StepBackward,
    PlayPause,
    StepForward,
    LastFrame,
}

impl ButtonKind {
    pub const ALL: [ButtonKind; 5] = [
        ButtonKind::FirstFrame,
        ButtonKind::StepBackward,
        ButtonKind::PlayPause,
        ButtonKind::StepForward,
        ButtonKind::LastFrame,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            ButtonKind::FirstFrame => 0,
            ButtonKind::StepBackward => 1,
            ButtonKind::PlayPause => 2,
            ButtonKind::StepForward => 3,
            ButtonKind::LastFrame => 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Button {
    pub enabled: bool,
    pub glyph: String,
}

/// Range input state. `value` is always sanitized against `min`, `max` and
/// `step` the way a browser sanitizes `<input type="range">`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
    pub enabled: bool,
}

impl Default for Slider {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            step: 1.0,
            value: 0.0,
            enabled: false,
        }
    }
}

impl Slider {
    pub fn set_value(&mut self, value: f64) {
        self.value = self.sanitize(value);
    }

    pub fn set_max(&mut self, max: f64) {
        self.max = if max.is_finite() { max.max(self.min) } else { self.min };
        self.value = self.sanitize(self.value);
    }

    fn sanitize(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let mut snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        if snapped > self.max {
            snapped -= self.step;
        }
        snapped.max(self.min)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Controls {
    pub slider: Slider,
    buttons: [Button; 5],
    /// A drag is hovering the container.
    pub drop_over: bool,
    /// No file has been dropped yet.
    pub idle: bool,
}

impl Controls {
    pub fn new(glyphs: &Glyphs) -> Self {
        let button = |glyph: &str| Button {
            enabled: false,
            glyph: glyph.to_string(),
        };
        Self {
            slider: Slider::default(),
            buttons: [
                button(&glyphs.first),
                button(&glyphs.step),
                button(&glyphs.play),
                button(&glyphs.step),
                button(&glyphs.last),
            ],
            drop_over: false,
            idle: true,
        }
    }

    #[inline]
    pub fn button(&self, kind: ButtonKind) -> &Button {
        &self.buttons[kind.index()]
    }

    #[inline]
    pub(crate) fn button_mut(&mut self, kind: ButtonKind) -> &mut Button {
        &mut self.buttons[kind.index()]
    }

    pub fn buttons(&self) -> impl Iterator<Item = (ButtonKind, &Button)> {
        ButtonKind::ALL.into_iter().zip(self.buttons.iter())
    }

    /// Enable the controls for a freshly loaded animation.
    pub(crate) fn enable_for(&mut self, last_frame: f64) {
        self.slider.set_max(last_frame);
        self.slider.enabled = true;
        self.button_mut(ButtonKind::PlayPause).enabled = true;
        self.refresh_boundaries(self.slider.value, last_frame);
    }

    pub(crate) fn disable_all(&mut self) {
        self.slider.enabled = false;
        self.slider.set_max(0.0);
        for button in self.buttons.iter_mut() {
            button.enabled = false;
        }
    }

    /// Disable the backward pair at the first frame and the forward pair at
    /// the last one.
    pub(crate) fn refresh_boundaries(&mut self, frame: f64, last_frame: f64) {
        let at_start = frame <= 0.0;
        let at_end = frame >= last_frame;
        self.button_mut(ButtonKind::StepBackward).enabled = !at_start;
        self.button_mut(ButtonKind::FirstFrame).enabled = !at_start;
        self.button_mut(ButtonKind::StepForward).enabled = !at_end;
        self.button_mut(ButtonKind::LastFrame).enabled = !at_end;
    }

    pub(crate) fn set_play_glyph(&mut self, glyph: &str) {
        let button = self.button_mut(ButtonKind::PlayPause);
        if button.glyph != glyph {
            button.glyph = glyph.to_string();
        }
    }
}
