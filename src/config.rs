//! Compile-time game settings and the timed hold used by every pause.
//!
//! Everything has a `*_DEFAULT` constant matching the reference board; build a
//! different [`SimonConfig`] with the `with_*` methods when the hardware differs.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::led_strip::Brightness;

/// Brightness used by the reference board (40 of 255).
pub const BRIGHTNESS_DEFAULT: Brightness = Brightness::new(40);

/// Longest sequence the game builds. Growth stops here.
pub const MAX_LEN: usize = 10;

/// Every fixed-length pause in the game.
///
/// All of these are blocking holds: nothing is sampled while one runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Dark pause before a playback starts.
    pub lead_in: Duration,
    /// How long each sequence element is lit during playback.
    pub sequence_on: Duration,
    /// Dark gap after each sequence element.
    pub sequence_off: Duration,
    /// How long a correct selection stays lit.
    pub confirm: Duration,
    /// Pause after a completed round, before the next playback.
    pub round_pause: Duration,
    /// How long the matrix is red during each failure flash.
    pub flash_on: Duration,
    /// How long the matrix is dark between failure flashes.
    pub flash_off: Duration,
    /// Number of red flashes after a wrong selection.
    pub flash_count: u8,
    /// Pause after the failure flashes, before the new game.
    pub failure_pause: Duration,
    /// Gap between input samples while waiting for the player.
    pub poll_interval: Duration,
    /// Settle time at power-up before the first frame.
    pub startup: Duration,
}

impl Timing {
    /// Timings of the reference firmware.
    pub const DEFAULT: Self = Self {
        lead_in: Duration::from_millis(500),
        sequence_on: Duration::from_millis(500),
        sequence_off: Duration::from_millis(250),
        confirm: Duration::from_millis(300),
        round_pause: Duration::from_millis(500),
        flash_on: Duration::from_millis(200),
        flash_off: Duration::from_millis(200),
        flash_count: 3,
        failure_pause: Duration::from_millis(1000),
        poll_interval: Duration::from_millis(100),
        startup: Duration::from_millis(2000),
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Default timings (see [`Timing::DEFAULT`]).
pub const TIMING_DEFAULT: Timing = Timing::DEFAULT;

/// Settings for one game engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimonConfig {
    /// Scale applied to every LED write.
    pub brightness: Brightness,
    /// Pause lengths.
    pub timing: Timing,
}

impl SimonConfig {
    /// Settings of the reference firmware.
    pub const DEFAULT: Self = Self {
        brightness: BRIGHTNESS_DEFAULT,
        timing: TIMING_DEFAULT,
    };

    /// Replace the brightness.
    #[must_use]
    pub const fn with_brightness(self, brightness: Brightness) -> Self {
        Self { brightness, ..self }
    }

    /// Replace the timings.
    #[must_use]
    pub const fn with_timing(self, timing: Timing) -> Self {
        Self { timing, ..self }
    }
}

impl Default for SimonConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Block for `duration`. Durations past `u32::MAX` microseconds saturate.
pub async fn hold<D: DelayNs>(delay: &mut D, duration: Duration) {
    let micros = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
    delay.delay_us(micros).await;
}
