//! What the player did this tick, independent of how they did it.
//!
//! Two strategies implement [`InputSource`]: [`Joystick`](crate::joystick::Joystick)
//! (move a cursor, press to confirm) and [`ButtonPad`](crate::button::ButtonPad)
//! (one button per target). The game engine is written once against the trait.

use embedded_hal_async::delay::DelayNs;

use crate::led2d::Coordinate;

/// Result of sampling an [`InputSource`] once.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Nothing selected. Also reported for unreadable or disconnected inputs.
    #[default]
    NoInput,
    /// The player confirmed a matrix cell.
    PositionSelected(Coordinate),
    /// The player pressed the button with this index.
    ButtonSelected(usize),
}

/// A way for the player to pick a target.
///
/// Targets are numbered `0..target_count()`; each one lights a single LED. The
/// game draws its sequence from these targets only, so every element is reachable.
pub trait InputSource {
    /// Number of distinct targets the player can pick.
    fn target_count(&self) -> usize;

    /// LED lit by `target`, or `None` when out of range.
    fn target_led(&self, target: usize) -> Option<usize>;

    /// Read the hardware once, debouncing as needed.
    ///
    /// May block for the debounce interval when something looks pressed.
    async fn sample<D: DelayNs>(&mut self, delay: &mut D) -> InputEvent;

    /// Cell to highlight while waiting for the player, if this strategy has one.
    fn cursor(&self) -> Option<Coordinate> {
        None
    }

    /// LED index chosen by `event`, if it chose one.
    fn selected_led(&self, event: InputEvent) -> Option<usize> {
        match event {
            InputEvent::NoInput => None,
            InputEvent::PositionSelected(coordinate) => Some(coordinate.led_index()),
            InputEvent::ButtonSelected(button) => self.target_led(button),
        }
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn target_count(&self) -> usize {
        (**self).target_count()
    }

    fn target_led(&self, target: usize) -> Option<usize> {
        (**self).target_led(target)
    }

    async fn sample<D: DelayNs>(&mut self, delay: &mut D) -> InputEvent {
        (**self).sample(delay).await
    }

    fn cursor(&self) -> Option<Coordinate> {
        (**self).cursor()
    }

    fn selected_led(&self, event: InputEvent) -> Option<usize> {
        (**self).selected_led(event)
    }
}
