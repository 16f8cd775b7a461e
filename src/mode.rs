//! Button combinations to display modes, and what each mode draws.
//!
//! Classification is memoryless: every tick the three button levels pick exactly one of eight
//! modes. The only state a mode can change is the ring brightness, returned in [`ModeOutput`].

use crate::color::palette::{BLUE, GREEN, ORANGE, PINK, PURPLE, RED, WHITE, YELLOW};
use crate::color::{Rgb, ring_offset, three_band_pattern, wheel_wrapped};
use crate::constants::{BRIGHTNESS_STEPS, FALLBACK_TICK_DIVISOR, WHEEL_SIZE};
use crate::led_ring::{Brightness, Frame};
use crate::touch_strip::{Voltage, voltage_to_index};

/// Which buttons are held this tick.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    pub red: bool,
    pub white: bool,
    pub green: bool,
}

impl ButtonState {
    #[must_use]
    pub const fn new(red: bool, white: bool, green: bool) -> Self {
        Self { red, white, green }
    }

    /// Red is bit 2, white bit 1, green bit 0.
    #[must_use]
    pub const fn mask(self) -> u8 {
        let red = if self.red { 0b100 } else { 0 };
        let white = if self.white { 0b010 } else { 0 };
        let green = if self.green { 0b001 } else { 0 };
        red | white | green
    }

    /// Inverse of [`ButtonState::mask`]; bits above 2 are ignored.
    #[must_use]
    pub const fn from_mask(mask: u8) -> Self {
        Self::new(mask & 0b100 != 0, mask & 0b010 != 0, mask & 0b001 != 0)
    }
}

/// Display modes, one per button combination.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// No buttons: lights off.
    Off,
    /// Red: pink/purple/yellow bands, rotate with touch.
    RedOnly,
    /// White: red/blue/green bands, rotate with touch; touch also sets brightness.
    WhiteOnly,
    /// Green: orange/red/white bands, rotate with touch.
    GreenOnly,
    /// Red + green: one pink pixel follows the finger.
    Follow,
    /// Red + white: rainbow around the ring, rotate with touch.
    RainbowWheel,
    /// White + green: the whole ring shows the wheel color under the finger.
    ColorPicker,
    /// All three: the whole ring fades through the wheel, ignores touch.
    RainbowFade,
}

impl Mode {
    pub const ALL: [Self; 8] = [
        Self::Off,
        Self::RedOnly,
        Self::WhiteOnly,
        Self::GreenOnly,
        Self::Follow,
        Self::RainbowWheel,
        Self::ColorPicker,
        Self::RainbowFade,
    ];

    /// Picks the mode for a button combination. Total over all eight combinations.
    #[must_use]
    pub const fn classify(buttons: ButtonState) -> Self {
        match (buttons.red, buttons.white, buttons.green) {
            (false, false, false) => Self::Off,
            (true, false, false) => Self::RedOnly,
            (false, true, false) => Self::WhiteOnly,
            (false, false, true) => Self::GreenOnly,
            (true, false, true) => Self::Follow,
            (true, true, false) => Self::RainbowWheel,
            (false, true, true) => Self::ColorPicker,
            (true, true, true) => Self::RainbowFade,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "Lights off",
            Self::RedOnly => "Red button pressed",
            Self::WhiteOnly => "White button pressed",
            Self::GreenOnly => "Green button pressed",
            Self::Follow => "Red+Green = Follow mode",
            Self::RainbowWheel => "Red+White = Rainbow wheel",
            Self::ColorPicker => "White+Green = Rainbow picker",
            Self::RainbowFade => "Red+White+Green = Rainbow fade",
        }
    }

    /// Computes this mode's frame for one tick.
    ///
    /// `touch` is the ring-relative touch index for this tick (see
    /// [`voltage_to_index`]); `voltage` is kept for modes that remap it onto a different range.
    #[must_use]
    pub fn render<const N: usize>(
        self,
        touch: Option<u16>,
        voltage: Voltage,
        tick: u64,
    ) -> ModeOutput<N> {
        let offset = touch.map_or_else(|| fallback_offset(tick), u64::from);
        match self {
            Self::Off => ModeOutput::frame(Frame::new()),
            Self::RedOnly => ModeOutput::frame(three_band_pattern(PINK, PURPLE, YELLOW, offset)),
            Self::WhiteOnly => {
                let brightness = touch
                    .and(voltage_to_index(voltage, BRIGHTNESS_STEPS))
                    .map(|step| Brightness::new(f32::from(step) / f32::from(BRIGHTNESS_STEPS)));
                ModeOutput {
                    frame: three_band_pattern(RED, BLUE, GREEN, offset),
                    brightness,
                }
            }
            Self::GreenOnly => ModeOutput::frame(three_band_pattern(ORANGE, RED, WHITE, offset)),
            Self::Follow => ModeOutput::frame(follow_frame(offset)),
            Self::RainbowWheel => ModeOutput::frame(rainbow_frame(offset)),
            Self::ColorPicker => {
                let position = touch.and(voltage_to_index(voltage, WHEEL_SIZE)).map_or_else(
                    || fallback_offset(tick),
                    u64::from,
                );
                ModeOutput::frame(Frame::filled(wheel_wrapped(position)))
            }
            Self::RainbowFade => ModeOutput::frame(Frame::filled(wheel_wrapped(tick))),
        }
    }
}

/// A computed frame plus any brightness change the mode asks for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeOutput<const N: usize> {
    pub frame: Frame<N>,
    pub brightness: Option<Brightness>,
}

impl<const N: usize> ModeOutput<N> {
    const fn frame(frame: Frame<N>) -> Self {
        Self {
            frame,
            brightness: None,
        }
    }
}

/// Slow automatic rotation used when nobody touches the strip.
#[must_use]
pub const fn fallback_offset(tick: u64) -> u64 {
    tick / FALLBACK_TICK_DIVISOR
}

fn follow_frame<const N: usize>(offset: u64) -> Frame<N> {
    let mut frame = Frame::new();
    let lit = ring_offset::<N>(offset)
        .checked_add(1)
        .and_then(|index| index.checked_rem(N));
    if let Some(pixel) = lit.and_then(|index| frame.get_mut(index)) {
        *pixel = PINK;
    }
    frame
}

#[expect(clippy::arithmetic_side_effects, reason = "index and start are below N, N is non-zero")]
fn rainbow_frame<const N: usize>(offset: u64) -> Frame<N> {
    let mut frame = Frame::new();
    if N == 0 {
        return frame;
    }
    // Reduce first so the multiply below cannot overflow.
    let start = ring_offset::<N>(offset);
    for (index, pixel) in frame.iter_mut().enumerate() {
        let position = (index + start) * usize::from(WHEEL_SIZE) / N;
        *pixel = wheel_wrapped(position as u64);
    }
    frame
}

/// Band colors for the three single-button modes, in pattern order.
#[must_use]
pub const fn band_colors(mode: Mode) -> Option<[Rgb; 3]> {
    match mode {
        Mode::RedOnly => Some([PINK, PURPLE, YELLOW]),
        Mode::WhiteOnly => Some([RED, BLUE, GREEN]),
        Mode::GreenOnly => Some([ORANGE, RED, WHITE]),
        Mode::Off | Mode::Follow | Mode::RainbowWheel | Mode::ColorPicker | Mode::RainbowFade => {
            None
        }
    }
}
