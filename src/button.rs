//! Buttons with debouncing, and the one-button-per-target input strategy.
//!
//! See [`Button`] and [`ButtonPad`] for usage examples.

use embassy_time::Duration;
use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::config::hold;
use crate::input::{InputEvent, InputSource};
use crate::led2d::{LED_COUNT, led_index};

// ============================================================================
// Constants
// ============================================================================

/// How long a press must persist before it counts.
pub const BUTTON_DEBOUNCE_DELAY: Duration = Duration::from_millis(50);

/// LEDs bound to a four-button pad by default: the four corners, in reading order.
pub const BUTTON_LEDS_DEFAULT: [usize; 4] = [
    led_index(0, 0),
    led_index(4, 0),
    led_index(0, 4),
    led_index(4, 4),
];

// ============================================================================
// PressedTo - How the button is wired
// ============================================================================

/// Describes how the button is physically wired.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressedTo {
    /// Button connects pin to voltage (3.3V) when pressed.
    /// Uses internal pull-down resistor. Pin reads HIGH when pressed.
    ///
    /// Note: The original Pico 2 (RP2350) has a known silicon bug with pull-down resistors
    /// that can cause pins to stay HIGH after button release. Use Ground instead.
    Voltage,

    /// Button connects pin to ground (GND) when pressed.
    /// Uses internal pull-up resistor. Pin reads LOW when pressed.
    Ground,
}

// ============================================================================
// Button
// ============================================================================

/// A push-button (or joystick switch) read through any `embedded-hal` input pin.
///
/// A read error counts as "not pressed".
///
/// # Example
///
/// ```rust
/// # use core::convert::Infallible;
/// use embedded_hal::digital::{ErrorType, InputPin};
/// use simon_matrix::button::{Button, PressedTo};
///
/// struct Grounded;
/// impl ErrorType for Grounded {
///     type Error = Infallible;
/// }
/// impl InputPin for Grounded {
///     fn is_high(&mut self) -> Result<bool, Infallible> { Ok(false) }
///     fn is_low(&mut self) -> Result<bool, Infallible> { Ok(true) }
/// }
///
/// let mut button = Button::new(Grounded, PressedTo::Ground);
/// assert!(button.is_pressed());
/// ```
pub struct Button<P> {
    input: P,
    pressed_to: PressedTo,
}

impl<P: InputPin> Button<P> {
    /// Wrap an input pin that is already configured with the right pull.
    #[must_use]
    pub const fn new(input: P, pressed_to: PressedTo) -> Self {
        Self { input, pressed_to }
    }

    /// Returns whether the button is pressed right now (no debouncing).
    #[must_use]
    pub fn is_pressed(&mut self) -> bool {
        let level = match self.pressed_to {
            PressedTo::Voltage => self.input.is_high(),
            PressedTo::Ground => self.input.is_low(),
        };
        level.unwrap_or(false)
    }

    /// Returns whether the button is pressed and still pressed after
    /// [`BUTTON_DEBOUNCE_DELAY`].
    ///
    /// Only waits when the first read looks pressed.
    pub async fn is_pressed_debounced<D: DelayNs>(&mut self, delay: &mut D) -> bool {
        if !self.is_pressed() {
            return false;
        }
        hold(delay, BUTTON_DEBOUNCE_DELAY).await;
        // otherwise it was bounce
        self.is_pressed()
    }
}

#[cfg(not(feature = "host"))]
impl<'a> Button<embassy_rp::gpio::Input<'a>> {
    /// Creates a new `Button` from a pin.
    ///
    /// The pin is configured based on the connection type:
    /// - [`PressedTo::Voltage`]: Uses internal pull-down (button to 3.3V)
    /// - [`PressedTo::Ground`]: Uses internal pull-up (button to GND)
    #[must_use]
    pub fn from_pin<P: embassy_rp::gpio::Pin>(
        pin: embassy_rp::Peri<'a, P>,
        pressed_to: PressedTo,
    ) -> Self {
        use embassy_rp::gpio::{Input, Pull};

        let pull = match pressed_to {
            PressedTo::Voltage => Pull::Down,
            PressedTo::Ground => Pull::Up,
        };
        Self::new(Input::new(pin, pull), pressed_to)
    }
}

// ============================================================================
// ButtonPad - one button per target
// ============================================================================

/// `K` buttons, each bound to one LED.
///
/// Sampling scans buttons in index order and reports the first one that survives
/// debouncing, so when several are held the lowest index wins.
///
/// # Example
///
/// ```rust
/// # use core::convert::Infallible;
/// use embedded_hal::digital::{ErrorType, InputPin};
/// use simon_matrix::button::{BUTTON_LEDS_DEFAULT, Button, ButtonPad, PressedTo};
/// use simon_matrix::input::InputSource;
///
/// struct Released;
/// impl ErrorType for Released {
///     type Error = Infallible;
/// }
/// impl InputPin for Released {
///     fn is_high(&mut self) -> Result<bool, Infallible> { Ok(true) }
///     fn is_low(&mut self) -> Result<bool, Infallible> { Ok(false) }
/// }
///
/// let pad = ButtonPad::new(
///     [Released, Released, Released, Released].map(|pin| Button::new(pin, PressedTo::Ground)),
///     BUTTON_LEDS_DEFAULT,
/// );
/// assert_eq!(pad.target_count(), 4);
/// assert_eq!(pad.target_led(3), Some(24));
/// ```
pub struct ButtonPad<P, const K: usize> {
    buttons: [Button<P>; K],
    leds: [usize; K],
}

impl<P: InputPin, const K: usize> ButtonPad<P, K> {
    /// Bind `buttons[i]` to LED `leds[i]`.
    #[must_use]
    pub const fn new(buttons: [Button<P>; K], leds: [usize; K]) -> Self {
        Self { buttons, leds }
    }

    /// Index of the first button that stays pressed through debouncing.
    pub async fn pressed<D: DelayNs>(&mut self, delay: &mut D) -> Option<usize> {
        for (index, button) in self.buttons.iter_mut().enumerate() {
            if button.is_pressed_debounced(delay).await {
                return Some(index);
            }
        }
        None
    }
}

impl<P: InputPin, const K: usize> InputSource for ButtonPad<P, K> {
    fn target_count(&self) -> usize {
        K
    }

    fn target_led(&self, target: usize) -> Option<usize> {
        self.leds
            .get(target)
            .copied()
            .filter(|&led| led < LED_COUNT)
    }

    async fn sample<D: DelayNs>(&mut self, delay: &mut D) -> InputEvent {
        match self.pressed(delay).await {
            Some(index) => {
                debug!("ButtonPad: button {} pressed", index);
                InputEvent::ButtonSelected(index)
            }
            None => InputEvent::NoInput,
        }
    }
}
