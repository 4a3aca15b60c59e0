//! Crate-wide error type.

use derive_more::{Display, Error};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced by platform adapters.
///
/// Gameplay mistakes are not errors; a wrong selection is ordinary game flow.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// An analog channel read did not complete.
    #[display("ADC conversion failed")]
    AdcConversion,
}

#[cfg(not(feature = "host"))]
impl From<embassy_rp::adc::Error> for Error {
    fn from(_: embassy_rp::adc::Error) -> Self {
        Self::AdcConversion
    }
}
