//! The Simon game engine: show a growing sequence, then check the player's repeat.
//!
//! [`Simon`] owns every piece of game state (the LED matrix, the input strategy,
//! the delay, the random source, the sequence and the player's progress) and runs
//! as one cooperative loop. Every pause is a plain timed hold, and nothing is
//! sampled during playback or feedback.
//!
//! ```text
//! Idle -> Displaying -> AwaitingInput -> match    -> AwaitingInput
//!                                     -> complete -> Displaying (one longer)
//!                                     -> mismatch -> red flashes -> Displaying (new game)
//! ```

use embedded_hal_async::delay::DelayNs;
use rand::RngCore;

use crate::config::{MAX_LEN, SimonConfig, Timing, hold};
use crate::input::{InputEvent, InputSource};
use crate::led2d::LED_COUNT;
use crate::led_strip::{LedMatrix, Rgb, WordSink};

mod sequence;

pub use sequence::{Progress, Sequence};

/// Color of each element during playback.
pub const SEQUENCE_COLOR: Rgb = Rgb { r: 0, g: 255, b: 0 };
/// Color of a correct selection made with a cursor.
pub const POSITION_CONFIRM_COLOR: Rgb = Rgb { r: 0, g: 255, b: 0 };
/// Color of a correct selection made with a button.
pub const BUTTON_CONFIRM_COLOR: Rgb = Rgb { r: 0, g: 0, b: 255 };
/// Color of the whole matrix during a failure flash.
pub const FAILURE_COLOR: Rgb = Rgb { r: 255, g: 0, b: 0 };
/// Color of the cursor cell while waiting for the player.
pub const CURSOR_COLOR: Rgb = Rgb { r: 50, g: 50, b: 50 };

/// Where the engine is in the game loop.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No game yet. The next [`Simon::tick`] starts one.
    Idle,
    /// The sequence is being shown.
    Displaying,
    /// Waiting for the player's next selection.
    AwaitingInput,
}

/// What happened to one selection.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Judgement {
    /// Matched, and more elements remain in this round.
    Correct,
    /// Matched the last element; the next round has been shown.
    RoundComplete {
        /// `false` when the sequence was already [`MAX_LEN`] long.
        grew: bool,
    },
    /// Did not match; the failure was shown and a new game started.
    Incorrect,
}

/// One game on a 5×5 matrix.
///
/// `S` drives the LEDs, `I` reads the player, `D` times every hold and `R`
/// draws new sequence elements.
pub struct Simon<S, I, D, R> {
    matrix: LedMatrix<S, LED_COUNT>,
    input: I,
    delay: D,
    rng: R,
    timing: Timing,
    sequence: Sequence,
    progress: Progress,
    phase: Phase,
}

impl<S, I, D, R> Simon<S, I, D, R>
where
    S: WordSink,
    I: InputSource,
    D: DelayNs,
    R: RngCore,
{
    /// Create an idle engine. Nothing is drawn until the first game starts.
    #[must_use]
    pub fn new(sink: S, input: I, delay: D, rng: R, config: SimonConfig) -> Self {
        Self {
            matrix: LedMatrix::new(sink, config.brightness),
            input,
            delay,
            rng,
            timing: config.timing,
            sequence: Sequence::new(),
            progress: Progress::IDLE,
            phase: Phase::Idle,
        }
    }

    /// Power-up: let the LEDs settle, then blank them.
    pub async fn power_on(&mut self) {
        hold(&mut self.delay, self.timing.startup).await;
        self.matrix.clear();
        self.matrix.flush(&mut self.delay).await;
    }

    /// Start a new game: one freshly drawn element, then show it.
    pub async fn reset(&mut self) {
        self.sequence.clear();
        self.sequence.push_random(&mut self.rng, &self.input);
        self.progress = Progress::START;
        info!(
            "Simon: new game, first LED {}",
            self.sequence.get(0).unwrap_or_default()
        );
        self.show_sequence().await;
    }

    /// Start a game on a fixed sequence, then show it.
    ///
    /// The round length is the whole of `sequence`. Elements that no target of
    /// the input strategy lights are dropped, since the player could never pick
    /// them. If nothing is left, a normal random game starts instead.
    pub async fn start_with(&mut self, mut sequence: Sequence) {
        sequence.retain_reachable(&self.input);
        if sequence.is_empty() {
            self.reset().await;
            return;
        }
        self.progress = Progress::new(sequence.len(), 0).unwrap_or(Progress::START);
        self.sequence = sequence;
        self.show_sequence().await;
    }

    /// Play back the first `length` elements. Not interruptible.
    pub async fn show_sequence(&mut self) {
        self.phase = Phase::Displaying;
        let length = self.progress.length();
        info!("Simon: playing {} steps", length);

        self.matrix.clear();
        self.matrix.flush(&mut self.delay).await;
        hold(&mut self.delay, self.timing.lead_in).await;

        for &led in self.sequence.as_slice().iter().take(length) {
            self.matrix.set(led, SEQUENCE_COLOR);
            self.matrix.flush(&mut self.delay).await;
            hold(&mut self.delay, self.timing.sequence_on).await;
            self.matrix.clear();
            self.matrix.flush(&mut self.delay).await;
            hold(&mut self.delay, self.timing.sequence_off).await;
        }

        self.phase = Phase::AwaitingInput;
    }

    /// Run one step of the loop.
    ///
    /// Idle starts a game. Awaiting input samples the player once, redraws the
    /// cursor (if the input strategy has one) and judges any selection.
    pub async fn tick(&mut self) -> Option<Judgement> {
        match self.phase {
            Phase::Idle => {
                self.reset().await;
                None
            }
            // Playback runs to completion inside one call, so this is only seen
            // if a caller's future was dropped mid-playback. Replay from the start.
            Phase::Displaying => {
                self.show_sequence().await;
                None
            }
            Phase::AwaitingInput => {
                let event = self.input.sample(&mut self.delay).await;
                self.draw_cursor().await;
                let led = self.input.selected_led(event)?;
                Some(self.judge(led, confirm_color(event)).await)
            }
        }
    }

    /// Compare a selected LED with the next expected element and act on it.
    pub async fn judge(&mut self, led: usize, color: Rgb) -> Judgement {
        let expected = self.sequence.get(self.progress.position());
        debug!(
            "Simon: expected {} got {}",
            expected.unwrap_or_default(),
            led
        );
        if expected != Some(led) {
            self.fail().await;
            return Judgement::Incorrect;
        }

        self.matrix.clear();
        self.matrix.set(led, color);
        self.matrix.flush(&mut self.delay).await;
        hold(&mut self.delay, self.timing.confirm).await;

        if !self.progress.advance() {
            return Judgement::Correct;
        }

        let grew = self.progress.grow();
        if grew {
            self.sequence.push_random(&mut self.rng, &self.input);
            info!("Simon: round complete, length {}", self.progress.length());
        } else {
            info!("Simon: round complete at the {}-step cap", MAX_LEN);
        }
        hold(&mut self.delay, self.timing.round_pause).await;
        self.show_sequence().await;
        Judgement::RoundComplete { grew }
    }

    /// Play forever: settle, start a game, then tick every poll interval.
    pub async fn run(&mut self) -> ! {
        self.power_on().await;
        self.reset().await;
        loop {
            self.tick().await;
            hold(&mut self.delay, self.timing.poll_interval).await;
        }
    }

    /// The current sequence. Only the first [`Progress::length`] elements are in play.
    #[must_use]
    pub const fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Round length and the player's position in it.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Where the engine is in the game loop.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The LED matrix, including the last frame written.
    #[must_use]
    pub const fn matrix(&self) -> &LedMatrix<S, LED_COUNT> {
        &self.matrix
    }

    /// The input strategy.
    #[must_use]
    pub const fn input(&self) -> &I {
        &self.input
    }

    async fn draw_cursor(&mut self) {
        let Some(cursor) = self.input.cursor() else {
            return;
        };
        self.matrix.clear();
        self.matrix.set(cursor.led_index(), CURSOR_COLOR);
        self.matrix.flush(&mut self.delay).await;
    }

    async fn fail(&mut self) {
        info!(
            "Simon: wrong selection at step {} of {}",
            self.progress.position(),
            self.progress.length()
        );
        for _ in 0..self.timing.flash_count {
            self.matrix.fill(FAILURE_COLOR);
            self.matrix.flush(&mut self.delay).await;
            hold(&mut self.delay, self.timing.flash_on).await;
            self.matrix.clear();
            self.matrix.flush(&mut self.delay).await;
            hold(&mut self.delay, self.timing.flash_off).await;
        }
        hold(&mut self.delay, self.timing.failure_pause).await;
        self.reset().await;
    }
}

/// Feedback color for a correct selection.
const fn confirm_color(event: InputEvent) -> Rgb {
    match event {
        InputEvent::ButtonSelected(_) => BUTTON_CONFIRM_COLOR,
        InputEvent::NoInput | InputEvent::PositionSelected(_) => POSITION_CONFIRM_COLOR,
    }
}
