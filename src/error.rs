use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// The mode logic itself cannot fail; these variants cover the I/O seams around it.
#[derive(Debug, Display, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_rp::adc::Error` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(feature = "pico1")]
    #[display("ADC read failed: {_0:?}")]
    AdcRead(#[error(not(source))] embassy_rp::adc::Error),

    #[display("Scripted input has no sample for tick {_0}")]
    ScriptExhausted(#[error(not(source))] u64),

    #[display("Frame recorder is full")]
    RecorderFull,
}

#[cfg(feature = "pico1")]
impl From<embassy_rp::adc::Error> for Error {
    fn from(err: embassy_rp::adc::Error) -> Self {
        Self::AdcRead(err)
    }
}
