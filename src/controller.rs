//! The tick loop: sample inputs, pick a mode, render one frame.
//!
//! [`DeviceContext`] bundles everything that used to be global on the device: the input source,
//! the LED ring (which owns the persistent brightness) and the tick counter. [`run`] drives it
//! from a [`TickSource`], so the same loop runs off a hardware ticker or a scripted sequence.

use crate::Result;
use crate::led_ring::{Brightness, ColorOrder, LedRing, WriteFrame};
use crate::mode::{ButtonState, Mode, ModeOutput};
use crate::touch_strip::{Voltage, voltage_to_index};

/// One tick's worth of input, sampled together.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSample {
    pub buttons: ButtonState,
    pub voltage: Voltage,
}

impl InputSample {
    #[must_use]
    pub const fn new(buttons: ButtonState, voltage: Voltage) -> Self {
        Self { buttons, voltage }
    }
}

/// Source of button and touch-strip readings.
#[expect(async_fn_in_trait, reason = "futures run on a single-threaded executor")]
pub trait RingInputs {
    async fn sample(&mut self) -> Result<InputSample>;
}

/// Paces the loop and numbers the ticks. `None` ends [`run`].
#[expect(async_fn_in_trait, reason = "futures run on a single-threaded executor")]
pub trait TickSource {
    async fn next_tick(&mut self) -> Option<u64>;
}

/// Inputs, ring and tick counter for one device.
pub struct DeviceContext<I, W, O, const N: usize>
where
    I: RingInputs,
    W: WriteFrame<N>,
    O: ColorOrder,
{
    inputs: I,
    ring: LedRing<W, O, N>,
    last_tick: u64,
    last_mode: Option<Mode>,
}

impl<I, W, O, const N: usize> DeviceContext<I, W, O, N>
where
    I: RingInputs,
    W: WriteFrame<N>,
    O: ColorOrder,
{
    pub fn new(inputs: I, ring: LedRing<W, O, N>) -> Self {
        Self {
            inputs,
            ring,
            last_tick: 0,
            last_mode: None,
        }
    }

    /// Runs one tick: sample, classify, update brightness if asked, render.
    ///
    /// Returns what the mode computed, before brightness scaling and channel order.
    ///
    /// # Errors
    ///
    /// Propagates input and writer failures.
    pub async fn tick(&mut self, tick: u64) -> Result<ModeOutput<N>> {
        let InputSample { buttons, voltage } = self.inputs.sample().await?;
        let touch = voltage_to_index(voltage, N.try_into().unwrap_or(u16::MAX));
        let mode = Mode::classify(buttons);
        info!(
            "tick {} buttons={} voltage={} touch={} {}",
            tick,
            buttons,
            voltage,
            touch,
            mode.name()
        );
        if self.last_mode != Some(mode) {
            debug!("mode -> {}", mode);
            self.last_mode = Some(mode);
        }

        let output = mode.render::<N>(touch, voltage, tick);
        if let Some(brightness) = output.brightness {
            if brightness != self.ring.brightness() {
                debug!("brightness -> {}", brightness);
            }
            self.ring.set_brightness(brightness);
        }
        self.ring.render(&output.frame).await?;
        self.last_tick = tick;
        Ok(output)
    }

    /// Tick number of the last completed tick, 0 before the first.
    #[must_use]
    pub const fn last_tick(&self) -> u64 {
        self.last_tick
    }

    #[must_use]
    pub const fn last_mode(&self) -> Option<Mode> {
        self.last_mode
    }

    #[must_use]
    pub const fn brightness(&self) -> Brightness {
        self.ring.brightness()
    }

    #[must_use]
    pub const fn ring(&self) -> &LedRing<W, O, N> {
        &self.ring
    }

    pub fn inputs_mut(&mut self) -> &mut I {
        &mut self.inputs
    }
}

/// Clears the ring, then runs one [`DeviceContext::tick`] per tick until the source ends.
///
/// On the device the source never ends, so this only returns on error.
///
/// # Errors
///
/// Returns the first input or writer error.
pub async fn run<T, I, W, O, const N: usize>(
    ticks: &mut T,
    context: &mut DeviceContext<I, W, O, N>,
) -> Result<()>
where
    T: TickSource,
    I: RingInputs,
    W: WriteFrame<N>,
    O: ColorOrder,
{
    context.ring.clear().await?;
    info!("touch ring running with {} pixels", N);
    while let Some(tick) = ticks.next_tick().await {
        context.tick(tick).await?;
    }
    info!("tick source ended after tick {}", context.last_tick);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette::{BLUE, GREEN, RED};
    use crate::color::three_band_pattern;
    use crate::led_ring::{Frame, RgbOrder};
    use embassy_futures::block_on;

    struct Fixed(InputSample);

    impl RingInputs for Fixed {
        async fn sample(&mut self) -> Result<InputSample> {
            Ok(self.0)
        }
    }

    #[derive(Default)]
    struct Last {
        frame: Option<Frame<12>>,
        writes: usize,
    }

    impl WriteFrame<12> for Last {
        async fn write_frame(&mut self, frame: &Frame<12>) -> Result<()> {
            self.frame = Some(*frame);
            self.writes += 1;
            Ok(())
        }
    }

    fn context(sample: InputSample) -> DeviceContext<Fixed, Last, RgbOrder, 12> {
        DeviceContext::new(Fixed(sample), LedRing::new(Last::default(), 255))
    }

    const WHITE_ONLY: ButtonState = ButtonState::new(false, true, false);

    #[test]
    fn white_touch_updates_brightness_and_persists() {
        let mut ctx = context(InputSample::new(WHITE_ONLY, Voltage(2.5)));
        block_on(ctx.tick(1)).expect("tick");
        assert_eq!(ctx.brightness(), Brightness::new(0.99));

        // Finger lifted: brightness stays, rotation falls back to the tick.
        ctx.inputs_mut().0.voltage = Voltage(1.0);
        let output = block_on(ctx.tick(20)).expect("tick");
        assert_eq!(ctx.brightness(), Brightness::new(0.99));
        assert_eq!(output.frame, three_band_pattern::<12>(RED, BLUE, GREEN, 4));

        // Other modes never touch brightness.
        ctx.inputs_mut().0 = InputSample::new(ButtonState::new(true, true, true), Voltage(3.0));
        block_on(ctx.tick(21)).expect("tick");
        assert_eq!(ctx.brightness(), Brightness::new(0.99));
        assert_eq!(ctx.last_tick(), 21);
        assert_eq!(ctx.last_mode(), Some(Mode::RainbowFade));
    }

    #[test]
    fn tick_renders_scaled_frame() {
        let mut ctx = context(InputSample::new(WHITE_ONLY, Voltage(1.0)));
        let output = block_on(ctx.tick(5)).expect("tick");
        let written = ctx.ring().writer().frame.expect("written");
        assert_eq!(written, ctx.ring().device_frame(&output.frame));
        // Default brightness 0.2 -> level 51.
        assert_eq!(written[1], crate::Rgb::new(51, 0, 0));
    }

    struct Countdown(u64);

    impl TickSource for Countdown {
        async fn next_tick(&mut self) -> Option<u64> {
            (self.0 > 0).then(|| {
                self.0 -= 1;
                3 - self.0
            })
        }
    }

    #[test]
    fn run_clears_then_ticks_until_source_ends() {
        let mut ctx = context(InputSample::default());
        block_on(run(&mut Countdown(3), &mut ctx)).expect("run");
        assert_eq!(ctx.ring().writer().writes, 4);
        assert_eq!(ctx.last_tick(), 3);
        assert_eq!(ctx.last_mode(), Some(Mode::Off));
    }
}
