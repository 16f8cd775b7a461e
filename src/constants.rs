use embassy_time::Duration;

use crate::led_ring::max_brightness_for;

/// Number of pixels on the ring.
pub const PIXEL_COUNT: usize = 12;

/// One tick of the polling loop.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Without a touch, the pattern advances one pixel every this many ticks.
pub const FALLBACK_TICK_DIVISOR: u64 = 5;

// Soft-pot voltage window. Below the minimum nobody is touching the strip.
pub const TOUCH_MIN_V: f32 = 1.8;
pub const TOUCH_MAX_V: f32 = 3.2;

/// ADC reference voltage.
pub const ADC_REFERENCE_V: f32 = 3.3;
/// Raw samples are treated as 16-bit, left-aligned.
pub const ADC_FULL_SCALE: f32 = 65536.0;

/// Number of positions on the color wheel.
pub const WHEEL_SIZE: u16 = 256;
/// Resolution of touch-selected brightness.
pub const BRIGHTNESS_STEPS: u16 = 100;
/// Brightness at power-up.
pub const DEFAULT_BRIGHTNESS: f32 = 0.2;

/// Worst-case draw of one WS2812 at full white, in milliamps.
pub const MILLIAMPS_PER_LED: u32 = 60;

include!(concat!(env!("OUT_DIR"), "/ring_config.rs"));

/// Channel cap that keeps a full-white ring inside [`MAX_CURRENT_MA`].
pub const MAX_BRIGHTNESS: u8 = max_brightness_for::<PIXEL_COUNT>(MAX_CURRENT_MA);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_budget_matches_build_env() {
        let from_env: u32 = env!("RING_MAX_CURRENT_MA").parse().expect("decimal milliamps");
        assert_eq!(MAX_CURRENT_MA, from_env);
        assert_eq!(MAX_BRIGHTNESS, max_brightness_for::<PIXEL_COUNT>(from_env));
    }

    #[test]
    fn default_budget_dims_a_full_white_ring() {
        // 250 mA over 12 * 60 mA.
        if MAX_CURRENT_MA == 250 {
            assert_eq!(MAX_BRIGHTNESS, 88);
        }
    }
}
