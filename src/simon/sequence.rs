//! The target sequence and the player's progress through it.

use heapless::Vec;
use rand::{Rng, RngCore};

use crate::config::MAX_LEN;
use crate::input::InputSource;
use crate::led2d::LED_COUNT;

/// Up to [`MAX_LEN`] LED indexes, each drawn independently. Repeats are allowed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sequence {
    leds: Vec<usize, MAX_LEN>,
}

impl Sequence {
    /// An empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { leds: Vec::new() }
    }

    /// A fixed sequence, e.g. for replaying a known game.
    ///
    /// Returns `None` if `leds` is longer than [`MAX_LEN`] or names an LED past
    /// the end of the matrix.
    #[must_use]
    pub fn from_leds(leds: &[usize]) -> Option<Self> {
        if leds.iter().any(|&led| led >= LED_COUNT) {
            return None;
        }
        Vec::from_slice(leds).ok().map(|leds| Self { leds })
    }

    /// Append one uniformly drawn target of `input`. Returns `false` when full.
    pub fn push_random<R: RngCore, I: InputSource>(&mut self, rng: &mut R, input: &I) -> bool {
        let led = draw(rng, input);
        self.leds.push(led).is_ok()
    }

    /// Drop every element that no target of `input` lights.
    pub fn retain_reachable<I: InputSource>(&mut self, input: &I) {
        self.leds.retain(|&led| is_target(input, led));
    }

    /// Forget every element.
    pub fn clear(&mut self) {
        self.leds.clear();
    }

    /// Element at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<usize> {
        self.leds.get(position).copied()
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leds.len()
    }

    /// Whether there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    /// Whether the sequence has reached [`MAX_LEN`].
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.leds.is_full()
    }

    /// The elements in play order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.leds
    }
}

fn is_target<I: InputSource>(input: &I, led: usize) -> bool {
    (0..input.target_count()).any(|target| input.target_led(target) == Some(led))
}

/// Draw one target uniformly and return the LED it lights.
fn draw<R: RngCore, I: InputSource>(rng: &mut R, input: &I) -> usize {
    let count = input.target_count().max(1);
    let target = rng.gen_range(0..count);
    input.target_led(target).unwrap_or_default()
}

/// How far the player has come: `0 <= position <= length <= MAX_LEN`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Progress {
    length: usize,
    position: usize,
}

impl Progress {
    /// Before the first game: nothing to match.
    pub const IDLE: Self = Self {
        length: 0,
        position: 0,
    };

    /// A fresh game: one element, nothing matched yet.
    pub const START: Self = Self {
        length: 1,
        position: 0,
    };

    /// Progress at `position` through a `length`-long round.
    ///
    /// Returns `None` unless `position <= length <= MAX_LEN`.
    #[must_use]
    pub const fn new(length: usize, position: usize) -> Option<Self> {
        if position <= length && length <= MAX_LEN {
            Some(Self { length, position })
        } else {
            None
        }
    }

    /// Elements the player must repeat this round.
    #[must_use]
    pub const fn length(self) -> usize {
        self.length
    }

    /// Index of the next element to match.
    #[must_use]
    pub const fn position(self) -> usize {
        self.position
    }

    /// Record one correct selection. Returns `true` when the round is complete.
    pub const fn advance(&mut self) -> bool {
        if self.position < self.length {
            self.position += 1;
        }
        self.position == self.length
    }

    /// Start the next round, one element longer unless already at [`MAX_LEN`].
    /// Returns whether the length grew.
    pub const fn grow(&mut self) -> bool {
        self.position = 0;
        if self.length < MAX_LEN {
            self.length += 1;
            true
        } else {
            false
        }
    }
}
