//! The three mode buttons.

use embassy_rp::Peri;
use embassy_rp::gpio::{Input, Pin, Pull};

use crate::mode::ButtonState;

/// One momentary button wired to ground, read as a level (no debouncing).
///
/// The internal pull-up holds the line high, so pressed reads low.
pub struct Button {
    input: Input<'static>,
}

impl Button {
    #[must_use]
    pub fn new(pin: Peri<'static, impl Pin>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
        }
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.input.is_low()
    }
}

/// Red, white and green buttons, sampled together.
pub struct Buttons {
    red: Button,
    white: Button,
    green: Button,
}

impl Buttons {
    #[must_use]
    pub fn new(
        red: Peri<'static, impl Pin>,
        white: Peri<'static, impl Pin>,
        green: Peri<'static, impl Pin>,
    ) -> Self {
        Self {
            red: Button::new(red),
            white: Button::new(white),
            green: Button::new(green),
        }
    }

    #[must_use]
    pub fn state(&self) -> ButtonState {
        ButtonState::new(
            self.red.is_pressed(),
            self.white.is_pressed(),
            self.green.is_pressed(),
        )
    }
}
