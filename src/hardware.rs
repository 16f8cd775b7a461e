//! Pico wiring for the touch ring: pins, ADC, PIO and the tick timer.
//!
//! | Part          | Pin          |
//! |---------------|--------------|
//! | LED data      | GP0 (PIO0)   |
//! | Red button    | GP13         |
//! | White button  | GP14         |
//! | Green button  | GP15         |
//! | Touch strip   | GP26 (ADC0)  |

use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{self, Common, Pio};
use embassy_rp::pio_programs::ws2812::{self, PioWs2812, PioWs2812Program};
use embassy_rp::{Peripherals, bind_interrupts};
use embassy_time::Ticker;

use crate::Result;
use crate::buttons::Buttons;
use crate::constants::{MAX_BRIGHTNESS, PIXEL_COUNT, TICK_PERIOD};
use crate::controller::{DeviceContext, InputSample, RingInputs, TickSource};
use crate::led_ring::{Frame, GrbOrder, LedRing, WriteFrame};
use crate::touch_strip::Voltage;

bind_interrupts!(pub struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

/// The ring as the controller sees it on a Pico.
pub type PicoContext = DeviceContext<PicoInputs, Ws2812Ring, GrbOrder, PIXEL_COUNT>;

/// Everything the touch ring needs, split out of the RP2040 peripherals.
pub struct Hardware {
    pub inputs: PicoInputs,
    pub ring: Ws2812Ring,
    pub ticks: TickerTicks,
}

impl Hardware {
    #[must_use]
    pub fn new(peripherals: Peripherals) -> Self {
        let buttons = Buttons::new(peripherals.PIN_13, peripherals.PIN_14, peripherals.PIN_15);

        let adc = Adc::new(peripherals.ADC, Irqs, adc::Config::default());
        let touch = adc::Channel::new_pin(peripherals.PIN_26, Pull::None);

        let Pio {
            mut common, sm0, ..
        } = Pio::new(peripherals.PIO0, Irqs);
        let program = PioWs2812Program::new(&mut common);
        let driver = PioWs2812::new(
            &mut common,
            sm0,
            peripherals.DMA_CH0,
            peripherals.PIN_0,
            &program,
        );

        Self {
            inputs: PicoInputs {
                buttons,
                adc,
                touch,
            },
            ring: Ws2812Ring {
                driver,
                _common: common,
            },
            ticks: TickerTicks::new(),
        }
    }

    /// Splits into the tick source and a ready-to-run device context.
    #[must_use]
    pub fn into_context(self) -> (TickerTicks, PicoContext) {
        let ring = LedRing::new(self.ring, MAX_BRIGHTNESS);
        (self.ticks, DeviceContext::new(self.inputs, ring))
    }
}

/// Buttons plus the touch strip's ADC channel.
pub struct PicoInputs {
    buttons: Buttons,
    adc: Adc<'static, adc::Async>,
    touch: adc::Channel<'static>,
}

impl PicoInputs {
    /// Reads the touch strip. The ADC is 12-bit; samples are left-aligned to 16 bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AdcRead`](crate::Error::AdcRead) when the conversion fails.
    #[expect(clippy::arithmetic_side_effects, reason = "12-bit sample, the shift cannot overflow")]
    pub async fn read_voltage(&mut self) -> Result<Voltage> {
        let raw = self.adc.read(&mut self.touch).await?;
        Ok(Voltage::from_raw(raw << 4))
    }
}

impl RingInputs for PicoInputs {
    async fn sample(&mut self) -> Result<InputSample> {
        let buttons = self.buttons.state();
        let voltage = self.read_voltage().await?;
        Ok(InputSample::new(buttons, voltage))
    }
}

/// WS2812 ring on PIO0 state machine 0.
///
/// The driver passes bytes through unchanged; [`LedRing`] has already put them in GRB order.
pub struct Ws2812Ring {
    driver: PioWs2812<'static, PIO0, 0, PIXEL_COUNT, ws2812::Rgb>,
    _common: Common<'static, PIO0>,
}

impl WriteFrame<PIXEL_COUNT> for Ws2812Ring {
    async fn write_frame(&mut self, frame: &Frame<PIXEL_COUNT>) -> Result<()> {
        self.driver.write(frame).await;
        Ok(())
    }
}

/// Fixed-period ticks from the embassy timer, numbered from 1. Never ends.
pub struct TickerTicks {
    ticker: Ticker,
    count: u64,
}

impl TickerTicks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ticker: Ticker::every(TICK_PERIOD),
            count: 0,
        }
    }
}

impl Default for TickerTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for TickerTicks {
    async fn next_tick(&mut self) -> Option<u64> {
        self.ticker.next().await;
        self.count = self.count.saturating_add(1);
        Some(self.count)
    }
}
