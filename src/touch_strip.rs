//! Maps the soft-pot touch strip's voltage onto ring positions and color-wheel angles.
//!
//! The strip reads below [`TOUCH_MIN_V`] when nobody touches it, and rises toward
//! [`TOUCH_MAX_V`] around the ring. Indexes are rotated by half the range so index 0 sits at the
//! physical midpoint of the strip, which lines the pattern start up with pixel 0.

use crate::constants::{ADC_FULL_SCALE, ADC_REFERENCE_V, TOUCH_MAX_V, TOUCH_MIN_V};

/// Voltage on the touch-strip pin, in volts.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Voltage(pub f32);

impl Voltage {
    /// Converts a 16-bit (left-aligned) ADC sample to volts.
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        Self(f32::from(raw) * ADC_REFERENCE_V / ADC_FULL_SCALE)
    }

    #[must_use]
    pub const fn volts(self) -> f32 {
        self.0
    }

    /// True when the strip is being touched.
    #[must_use]
    pub fn is_touched(self) -> bool {
        self.0 >= TOUCH_MIN_V
    }
}

/// Converts a 16-bit raw sample to the strip voltage.
#[must_use]
pub fn raw_to_voltage(raw: u16) -> Voltage {
    Voltage::from_raw(raw)
}

/// Linearly maps `value` from `[left_min, left_max]` to `[right_min, right_max]`.
///
/// No clamping: values outside the left range extrapolate.
#[must_use]
pub fn translate(value: f32, left_min: f32, left_max: f32, right_min: f32, right_max: f32) -> f32 {
    let left_span = left_max - left_min;
    let right_span = right_max - right_min;
    let scaled = (value - left_min) / left_span;
    right_min + scaled * right_span
}

/// Translates the circular touch strip to an index in `0..range_size`.
///
/// Returns `None` when the strip is not touched (voltage below [`TOUCH_MIN_V`]) or when
/// `range_size` is zero. Voltages above [`TOUCH_MAX_V`] extrapolate and wrap.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "range_size is non-zero; mapped is non-negative once the threshold check passes"
)]
pub fn voltage_to_index(voltage: Voltage, range_size: u16) -> Option<u16> {
    if !voltage.is_touched() || range_size == 0 {
        return None;
    }
    let max_index = f32::from(range_size - 1);
    let mapped = translate(voltage.0, TOUCH_MIN_V, TOUCH_MAX_V, 0.0, max_index);
    // mapped >= 0 here, so truncation is the same as floor.
    let whole = mapped as u64;
    let range = u64::from(range_size);
    let index = (whole % range + range / 2) % range;
    u16::try_from(index).ok()
}
