//! Pure color generation: the hue wheel, the three-band ring pattern and the named palette.
//!
//! Everything here is in plain RGB order. Device channel order is applied by
//! [`LedRing`](crate::led_ring::LedRing) and nowhere else.

use smart_leds::RGB8;

use crate::led_ring::Frame;

/// RGB color representation re-exported from `smart_leds`.
pub type Rgb = RGB8;

/// Named colors used by the ring modes.
pub mod palette {
    use super::Rgb;

    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const PINK: Rgb = Rgb::new(241, 0, 249);
    pub const PURPLE: Rgb = Rgb::new(113, 5, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 150, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const ORANGE: Rgb = Rgb::new(214, 111, 2);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
}

/// Color wheel from 0 to 255.
///
/// Three linear ramps that meet without a jump at 85 and 170, so stepping `position` walks the
/// hue circle. Positions outside `0..=255` are black.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "position is within 0..=255, so each ramp stays within 0..=255"
)]
pub const fn wheel(position: i32) -> Rgb {
    if position < 0 || position > 255 {
        return palette::BLACK;
    }
    if position < 85 {
        let ramp = (position * 3) as u8;
        Rgb::new(ramp, 255 - ramp, 0)
    } else if position < 170 {
        let ramp = ((position - 85) * 3) as u8;
        Rgb::new(255 - ramp, 0, ramp)
    } else {
        let ramp = ((position - 170) * 3) as u8;
        Rgb::new(0, ramp, 255 - ramp)
    }
}

/// Wheel lookup for an unbounded position, wrapped onto the 256-step circle.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "masked to 0..=255"
)]
pub const fn wheel_wrapped(position: u64) -> Rgb {
    wheel((position & 0xFF) as i32)
}

/// Fills the ring with three equal bands of color, rotated by `offset`.
///
/// Pattern slot `i` belongs to band `i * 3 / N` and is written to pixel `(i + offset) % N`. On a
/// 12-pixel ring that is four pixels each of `first`, `second` and `third`.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    reason = "slot and shift are below N, so every index is in bounds"
)]
pub fn three_band_pattern<const N: usize>(
    first: Rgb,
    second: Rgb,
    third: Rgb,
    offset: u64,
) -> Frame<N> {
    let mut frame = Frame::new();
    if N == 0 {
        return frame;
    }
    let shift = ring_offset::<N>(offset);
    for slot in 0..N {
        let color = match slot * 3 / N {
            0 => first,
            1 => second,
            _ => third,
        };
        frame[(slot + shift) % N] = color;
    }
    frame
}

/// Reduces an unbounded offset to a pixel index on an `N`-pixel ring.
#[must_use]
#[expect(clippy::cast_possible_truncation, reason = "result is below N")]
pub const fn ring_offset<const N: usize>(offset: u64) -> usize {
    match offset.checked_rem(N as u64) {
        Some(index) => index as usize,
        None => 0,
    }
}
