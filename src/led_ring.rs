//! Renders frames onto the physical LED ring.
//! See [`LedRing`] for the main entry point.
//!
//! Frames are computed in RGB order at full intensity. [`LedRing::render`] scales them by the
//! current brightness and the current-budget cap, permutes channels into device order, then hands
//! the whole frame to the writer in one call so a partial frame is never visible.

use core::marker::PhantomData;

use crate::Result;
use crate::color::Rgb;
use crate::constants::{DEFAULT_BRIGHTNESS, MILLIAMPS_PER_LED};

/// One full set of pixel colors for an `N`-pixel ring, pixel 0 first.
///
/// Modes compute frames in plain RGB at full intensity; [`LedRing::render`] turns them into what
/// goes on the wire. Indexing goes through the inner array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<const N: usize>(pub [Rgb; N]);

impl<const N: usize> Frame<N> {
    /// Every pixel off.
    #[must_use]
    pub const fn new() -> Self {
        Self::filled(Rgb::new(0, 0, 0))
    }

    /// Every pixel the same color.
    #[must_use]
    pub const fn filled(color: Rgb) -> Self {
        Self([color; N])
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.0.iter().all(|pixel| *pixel == Rgb::default())
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> From<[Rgb; N]> for Frame<N> {
    fn from(pixels: [Rgb; N]) -> Self {
        Self(pixels)
    }
}

impl<const N: usize> core::ops::Deref for Frame<N> {
    type Target = [Rgb; N];

    fn deref(&self) -> &[Rgb; N] {
        &self.0
    }
}

impl<const N: usize> core::ops::DerefMut for Frame<N> {
    fn deref_mut(&mut self) -> &mut [Rgb; N] {
        &mut self.0
    }
}

/// Global ring brightness in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(f32);

impl Brightness {
    pub const FULL: Self = Self(1.0);

    /// Clamps into `0.0..=1.0`. NaN becomes zero.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Brightness as a 0-255 channel multiplier.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is clamped to 0.0..=1.0"
    )]
    pub fn level(self) -> u8 {
        (self.0 * 255.0 + 0.5) as u8
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self(DEFAULT_BRIGHTNESS)
    }
}

/// Device channel order for the LED hardware.
///
/// Fixed at the type level; the ring never changes order at runtime.
pub trait ColorOrder {
    /// Permutes a plain RGB color into the slot order the device expects. The returned value's
    /// `r`, `g`, `b` fields are the first, second and third bytes on the wire.
    fn to_device(color: Rgb) -> Rgb;
}

/// Green-red-blue, as used by WS2812 parts.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrbOrder;

impl ColorOrder for GrbOrder {
    fn to_device(color: Rgb) -> Rgb {
        Rgb::new(color.g, color.r, color.b)
    }
}

/// Identity order, for parts wired red-green-blue.
#[derive(Clone, Copy, Debug, Default)]
pub struct RgbOrder;

impl ColorOrder for RgbOrder {
    fn to_device(color: Rgb) -> Rgb {
        color
    }
}

/// Sink for device-ordered frames.
///
/// One call is one visible update of the whole ring.
#[expect(async_fn_in_trait, reason = "futures run on a single-threaded executor")]
pub trait WriteFrame<const N: usize> {
    async fn write_frame(&mut self, frame: &Frame<N>) -> Result<()>;
}

/// Computes the highest channel level the current budget allows for `N` LEDs at full white.
#[must_use]
#[expect(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    reason = "`u64::from` is not const; the result is clamped to 255 before narrowing"
)]
pub const fn max_brightness_for<const N: usize>(max_current_ma: u32) -> u8 {
    let worst_case_ma = (N as u64).saturating_mul(MILLIAMPS_PER_LED as u64);
    let Some(brightness) = (max_current_ma as u64).saturating_mul(255).checked_div(worst_case_ma)
    else {
        return 255;
    };
    if brightness >= 255 { 255 } else { brightness as u8 }
}

#[inline]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    reason = "u8 * u8 fits in u16, and dividing by 255 fits back in u8"
)]
fn scale_brightness(value: u8, brightness: u8) -> u8 {
    ((u16::from(value) * u16::from(brightness)) / 255) as u8
}

/// The LED ring: brightness, current cap and channel order in front of a frame writer.
///
/// # Example
/// ```
/// use embassy_futures::block_on;
/// use touch_ring::led_ring::{Brightness, Frame, GrbOrder, LedRing, WriteFrame};
/// use touch_ring::{Result, Rgb};
///
/// struct LastFrame(Frame<3>);
///
/// impl WriteFrame<3> for LastFrame {
///     async fn write_frame(&mut self, frame: &Frame<3>) -> Result<()> {
///         self.0 = *frame;
///         Ok(())
///     }
/// }
///
/// let mut ring = LedRing::<_, GrbOrder, 3>::new(LastFrame(Frame::new()), 255);
/// ring.set_brightness(Brightness::FULL);
/// block_on(ring.render(&Frame::filled(Rgb::new(10, 20, 30)))).unwrap();
/// assert_eq!(ring.writer().0[0], Rgb::new(20, 10, 30));
/// ```
pub struct LedRing<W, O, const N: usize>
where
    W: WriteFrame<N>,
    O: ColorOrder,
{
    writer: W,
    brightness: Brightness,
    max_brightness: u8,
    _order: PhantomData<O>,
}

impl<W, O, const N: usize> LedRing<W, O, N>
where
    W: WriteFrame<N>,
    O: ColorOrder,
{
    /// Wraps a writer. `max_brightness` caps every channel (see [`max_brightness_for`]).
    pub fn new(writer: W, max_brightness: u8) -> Self {
        Self {
            writer,
            brightness: Brightness::default(),
            max_brightness,
            _order: PhantomData,
        }
    }

    /// Sets the global brightness. Persists until the next call.
    pub fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }

    #[must_use]
    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Combined multiplier applied to every channel.
    #[must_use]
    pub fn effective_level(&self) -> u8 {
        scale_brightness(self.brightness.level(), self.max_brightness)
    }

    /// Converts a computed frame into what goes on the wire.
    #[must_use]
    pub fn device_frame(&self, frame: &Frame<N>) -> Frame<N> {
        let level = self.effective_level();
        let mut device = *frame;
        for pixel in device.iter_mut() {
            let scaled = Rgb::new(
                scale_brightness(pixel.r, level),
                scale_brightness(pixel.g, level),
                scale_brightness(pixel.b, level),
            );
            *pixel = O::to_device(scaled);
        }
        device
    }

    /// Writes the whole frame to the ring in one update.
    pub async fn render(&mut self, frame: &Frame<N>) -> Result<()> {
        let device = self.device_frame(frame);
        self.writer.write_frame(&device).await
    }

    /// Turns every pixel off.
    pub async fn clear(&mut self) -> Result<()> {
        self.writer.write_frame(&Frame::new()).await
    }

    #[must_use]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    struct Capture {
        frames: std::vec::Vec<Frame<4>>,
    }

    impl WriteFrame<4> for Capture {
        async fn write_frame(&mut self, frame: &Frame<4>) -> Result<()> {
            self.frames.push(*frame);
            Ok(())
        }
    }

    fn ring<O: ColorOrder>(max_brightness: u8) -> LedRing<Capture, O, 4> {
        LedRing::new(Capture { frames: std::vec::Vec::new() }, max_brightness)
    }

    #[test]
    fn brightness_clamps() {
        assert_eq!(Brightness::new(1.7), Brightness::FULL);
        assert_eq!(Brightness::new(-0.3).value(), 0.0);
        assert_eq!(Brightness::new(f32::NAN).value(), 0.0);
        assert_eq!(Brightness::default().value(), DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn brightness_level() {
        assert_eq!(Brightness::FULL.level(), 255);
        assert_eq!(Brightness::new(0.0).level(), 0);
        assert_eq!(Brightness::new(0.5).level(), 128);
    }

    #[test]
    fn grb_swaps_red_and_green() {
        assert_eq!(GrbOrder::to_device(Rgb::new(1, 2, 3)), Rgb::new(2, 1, 3));
        assert_eq!(RgbOrder::to_device(Rgb::new(1, 2, 3)), Rgb::new(1, 2, 3));
    }

    #[test]
    fn max_brightness_from_current_budget() {
        // 12 LEDs * 60 mA = 720 mA worst case.
        assert_eq!(max_brightness_for::<12>(720), 255);
        assert_eq!(max_brightness_for::<12>(5000), 255);
        assert_eq!(max_brightness_for::<12>(360), 127);
        assert_eq!(max_brightness_for::<12>(0), 0);
    }

    #[test]
    fn max_brightness_edge_budgets() {
        assert_eq!(max_brightness_for::<0>(10), 255);
        assert_eq!(max_brightness_for::<12>(u32::MAX), 255);
        assert_eq!(max_brightness_for::<1>(59), 250);
    }

    #[test]
    fn scale_brightness_bounds() {
        assert_eq!(scale_brightness(255, 255), 255);
        assert_eq!(scale_brightness(255, 0), 0);
        assert_eq!(scale_brightness(128, 128), 64);
    }

    #[test]
    fn render_writes_one_full_frame() {
        let mut ring = ring::<GrbOrder>(255);
        ring.set_brightness(Brightness::FULL);
        let frame = Frame::from([
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(10, 20, 30),
        ]);
        block_on(ring.render(&frame)).expect("write");
        let written = &ring.writer().frames;
        assert_eq!(written.len(), 1);
        assert_eq!(
            written[0].0,
            [
                Rgb::new(0, 255, 0),
                Rgb::new(255, 0, 0),
                Rgb::new(0, 0, 255),
                Rgb::new(20, 10, 30),
            ]
        );
    }

    #[test]
    fn render_scales_by_brightness_and_cap() {
        let mut ring = ring::<RgbOrder>(128);
        ring.set_brightness(Brightness::FULL);
        block_on(ring.render(&Frame::filled(Rgb::new(255, 255, 0)))).expect("write");
        assert_eq!(ring.writer().frames[0][0], Rgb::new(128, 128, 0));

        ring.set_brightness(Brightness::new(0.0));
        block_on(ring.render(&Frame::filled(Rgb::new(255, 255, 255)))).expect("write");
        assert!(ring.writer().frames[1].is_dark());
    }

    #[test]
    fn brightness_persists_across_renders() {
        let mut ring = ring::<RgbOrder>(255);
        ring.set_brightness(Brightness::new(0.5));
        for _ in 0..3 {
            block_on(ring.render(&Frame::filled(Rgb::new(200, 0, 0)))).expect("write");
        }
        assert_eq!(ring.brightness(), Brightness::new(0.5));
        assert!(ring.writer().frames.iter().all(|f| f[0] == Rgb::new(100, 0, 0)));
    }

    #[test]
    fn clear_writes_dark_frame() {
        let mut ring = ring::<GrbOrder>(255);
        block_on(ring.clear()).expect("write");
        assert!(ring.writer().frames[0].is_dark());
    }
}
