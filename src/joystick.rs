//! Two-axis analog joystick with a confirm switch, as an [`InputSource`].
//!
//! Each axis reading (0–4095) is classified with hysteresis thresholds: above the
//! high threshold pushes one way, below the low threshold pushes the other, and
//! the band between is neutral. The cursor moves one cell per push and an axis
//! must return to neutral before it can move again, so holding the stick does not
//! scroll.
//!
//! The confirm switch selects the cell under the cursor.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::Result;
use crate::button::Button;
use crate::input::{InputEvent, InputSource};
use crate::led2d::{Coordinate, LED_COUNT};

#[cfg(not(feature = "host"))]
pub mod adc_axes;

/// Largest value a 12-bit ADC returns.
pub const AXIS_MAX: u16 = 4095;

/// Reading of a centred stick.
pub const AXIS_CENTER: u16 = 2048;

// ============================================================================
// Thresholds and directions
// ============================================================================

/// Where one axis is pushed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisDirection {
    /// Below the low threshold.
    Decrease,
    /// Between the thresholds.
    Neutral,
    /// Above the high threshold.
    Increase,
}

impl AxisDirection {
    /// Cursor step for this direction: -1, 0 or 1.
    #[must_use]
    pub const fn delta(self) -> i8 {
        match self {
            Self::Decrease => -1,
            Self::Neutral => 0,
            Self::Increase => 1,
        }
    }
}

/// Hysteresis band for one axis. `low < high` is checked on construction.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    low: u16,
    high: u16,
}

impl Thresholds {
    /// Create a band. Panics (at compile time in `const` context) unless `low < high`.
    #[must_use]
    pub const fn new(low: u16, high: u16) -> Self {
        assert!(low < high, "low threshold must be below high threshold");
        Self { low, high }
    }

    /// Lower edge of the neutral band.
    #[must_use]
    pub const fn low(self) -> u16 {
        self.low
    }

    /// Upper edge of the neutral band.
    #[must_use]
    pub const fn high(self) -> u16 {
        self.high
    }

    /// Classify a raw reading. Readings equal to a threshold are neutral.
    #[must_use]
    pub const fn direction(self, reading: u16) -> AxisDirection {
        if reading > self.high {
            AxisDirection::Increase
        } else if reading < self.low {
            AxisDirection::Decrease
        } else {
            AxisDirection::Neutral
        }
    }
}

/// Thresholds of the reference board.
pub const THRESHOLDS_DEFAULT: Thresholds = Thresholds::new(1000, 3000);

/// How an axis is mounted relative to the matrix.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisOrientation {
    /// A high reading moves the cursor towards larger coordinates.
    Normal,
    /// A high reading moves the cursor towards smaller coordinates.
    Inverted,
}

impl AxisOrientation {
    /// Map a reading direction to a cursor direction.
    #[must_use]
    pub const fn orient(self, direction: AxisDirection) -> AxisDirection {
        match (self, direction) {
            (Self::Inverted, AxisDirection::Increase) => AxisDirection::Decrease,
            (Self::Inverted, AxisDirection::Decrease) => AxisDirection::Increase,
            (_, direction) => direction,
        }
    }
}

/// Edge trigger for one axis: fires once per push, re-arms on neutral.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AxisLatch {
    moved: bool,
}

impl AxisLatch {
    /// An armed latch.
    #[must_use]
    pub const fn new() -> Self {
        Self { moved: false }
    }

    /// Feed the current direction; returns the step to take now.
    ///
    /// Only [`AxisDirection::Neutral`] re-arms the latch.
    pub const fn update(&mut self, direction: AxisDirection) -> AxisDirection {
        match direction {
            AxisDirection::Neutral => {
                self.moved = false;
                AxisDirection::Neutral
            }
            _ if self.moved => AxisDirection::Neutral,
            _ => {
                self.moved = true;
                direction
            }
        }
    }

    /// Whether the axis has fired and not yet returned to neutral.
    #[must_use]
    pub const fn is_latched(&self) -> bool {
        self.moved
    }
}

// ============================================================================
// Analog source
// ============================================================================

/// One raw reading of both axes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSample {
    /// Horizontal axis, 0–4095.
    pub x: u16,
    /// Vertical axis, 0–4095.
    pub y: u16,
}

impl AxisSample {
    /// Both axes centred.
    pub const CENTER: Self = Self {
        x: AXIS_CENTER,
        y: AXIS_CENTER,
    };
}

/// The platform's analog inputs for the two joystick axes.
pub trait AnalogAxes {
    /// Read both axes, each on its own channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AdcConversion`](crate::Error::AdcConversion) when a channel
    /// cannot be read.
    async fn read(&mut self) -> Result<AxisSample>;
}

// ============================================================================
// Joystick
// ============================================================================

/// Joystick settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickConfig {
    /// Hysteresis band, shared by both axes.
    pub thresholds: Thresholds,
    /// Mounting of the horizontal axis.
    pub x_orientation: AxisOrientation,
    /// Mounting of the vertical axis.
    pub y_orientation: AxisOrientation,
    /// Cursor position at power-up.
    pub start: Coordinate,
}

impl JoystickConfig {
    /// Settings of the reference board, whose horizontal axis reads high when
    /// pushed left.
    pub const DEFAULT: Self = Self {
        thresholds: THRESHOLDS_DEFAULT,
        x_orientation: AxisOrientation::Inverted,
        y_orientation: AxisOrientation::Normal,
        start: Coordinate::clamped(1, 1),
    };
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Cursor-and-confirm input strategy.
///
/// Every target is a matrix cell, so sequences may use any of the 25 LEDs.
pub struct Joystick<A, P> {
    axes: A,
    confirm: Button<P>,
    config: JoystickConfig,
    cursor: Coordinate,
    x_latch: AxisLatch,
    y_latch: AxisLatch,
}

impl<A: AnalogAxes, P: InputPin> Joystick<A, P> {
    /// Combine the axes and the confirm switch.
    #[must_use]
    pub const fn new(axes: A, confirm: Button<P>, config: JoystickConfig) -> Self {
        Self {
            axes,
            confirm,
            config,
            cursor: config.start,
            x_latch: AxisLatch::new(),
            y_latch: AxisLatch::new(),
        }
    }

    /// Read the axes once and move the cursor at most one cell per axis.
    ///
    /// An unreadable ADC counts as a centred stick.
    pub async fn update_cursor(&mut self) -> Coordinate {
        let sample = match self.axes.read().await {
            Ok(sample) => sample,
            Err(err) => {
                warn!("Joystick: {}, treating as centred", err);
                AxisSample::CENTER
            }
        };
        self.apply(sample)
    }

    /// Move the cursor for an already-read sample.
    pub fn apply(&mut self, sample: AxisSample) -> Coordinate {
        let thresholds = self.config.thresholds;
        let dx = self
            .x_latch
            .update(self.config.x_orientation.orient(thresholds.direction(sample.x)));
        let dy = self
            .y_latch
            .update(self.config.y_orientation.orient(thresholds.direction(sample.y)));

        let moved = self.cursor.step(dx.delta(), dy.delta());
        if moved != self.cursor {
            trace!("Joystick: cursor ({}, {})", moved.x(), moved.y());
        }
        self.cursor = moved;
        moved
    }

    /// Current cursor cell.
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.cursor
    }
}

impl<A: AnalogAxes, P: InputPin> InputSource for Joystick<A, P> {
    fn target_count(&self) -> usize {
        LED_COUNT
    }

    fn target_led(&self, target: usize) -> Option<usize> {
        (target < LED_COUNT).then_some(target)
    }

    async fn sample<D: DelayNs>(&mut self, delay: &mut D) -> InputEvent {
        let cursor = self.update_cursor().await;
        if self.confirm.is_pressed_debounced(delay).await {
            debug!("Joystick: confirmed ({}, {})", cursor.x(), cursor.y());
            InputEvent::PositionSelected(cursor)
        } else {
            InputEvent::NoInput
        }
    }

    fn cursor(&self) -> Option<Coordinate> {
        Some(self.cursor)
    }
}
