//! Touch-ring light controller: three buttons and a circular touch strip drive a 12-LED ring.
//!
//! The mode logic ([`mode`]), touch mapping ([`touch_strip`]), color generation ([`color`]) and
//! the tick loop ([`controller`]) are hardware-free and run on the host. The `pico1` feature adds
//! the RP2040 hardware layer ([`hardware`], [`buttons`]).
#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the other modules.
mod fmt;

pub mod color;
pub mod constants;
pub mod controller;
mod error;
pub mod led_ring;
pub mod mode;
pub mod replay;
pub mod touch_strip;

#[cfg(feature = "pico1")]
pub mod buttons;
#[cfg(feature = "pico1")]
pub mod hardware;

// Re-export commonly used items
pub use color::Rgb;
pub use controller::{DeviceContext, InputSample, RingInputs, TickSource, run};
pub use error::{Error, Result};
pub use led_ring::{Brightness, Frame, LedRing, WriteFrame};
pub use mode::{ButtonState, Mode, ModeOutput};
pub use touch_strip::Voltage;
