//! [`AnalogAxes`] on the RP2040/RP2350 ADC.

use embassy_rp::Peri;
use embassy_rp::adc::{Adc, AdcPin, Async, Channel};
use embassy_rp::gpio::Pull;

use super::{AnalogAxes, AxisSample};
use crate::Result;

/// Two ADC channels read one after the other on a shared converter.
pub struct AdcAxes<'d> {
    adc: Adc<'d, Async>,
    x: Channel<'d>,
    y: Channel<'d>,
}

impl<'d> AdcAxes<'d> {
    /// Bind the horizontal axis to `x_pin` and the vertical axis to `y_pin`.
    ///
    /// On the reference board these are GPIO27 (ADC1) and GPIO26 (ADC0).
    pub fn new(
        adc: Adc<'d, Async>,
        x_pin: Peri<'d, impl AdcPin + 'd>,
        y_pin: Peri<'d, impl AdcPin + 'd>,
    ) -> Self {
        Self {
            adc,
            x: Channel::new_pin(x_pin, Pull::None),
            y: Channel::new_pin(y_pin, Pull::None),
        }
    }
}

impl AnalogAxes for AdcAxes<'_> {
    async fn read(&mut self) -> Result<AxisSample> {
        let x = self.adc.read(&mut self.x).await?;
        let y = self.adc.read(&mut self.y).await?;
        Ok(AxisSample { x, y })
    }
}
