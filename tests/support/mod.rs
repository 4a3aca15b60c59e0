//! Test doubles shared by the host tests.
//!
//! Every double is a cheap handle around shared state, so a test can keep a clone
//! after moving the original into the code under test.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use embedded_hal_async::delay::DelayNs;
use simon_matrix::input::{InputEvent, InputSource};
use simon_matrix::joystick::{AnalogAxes, AxisSample};
use simon_matrix::led2d::{Coordinate, LED_COUNT};
use simon_matrix::led_strip::{Grb, WordSink};
use simon_matrix::{Error, Result};

/// Words per full 25-LED frame.
pub const FRAME_WORDS: usize = LED_COUNT * 3;

// ============================================================================
// Output
// ============================================================================

/// Word sink that remembers every word.
#[derive(Clone, Default)]
pub struct RecordingSink(Rc<RefCell<Vec<u8>>>);

impl RecordingSink {
    pub fn words(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }

    /// Every complete frame sent so far, as cells in chain order.
    pub fn frames(&self) -> Vec<Vec<Grb>> {
        self.0
            .borrow()
            .chunks_exact(FRAME_WORDS)
            .map(|frame| {
                frame
                    .chunks_exact(3)
                    .map(|cell| Grb::new(cell[0], cell[1], cell[2]))
                    .collect()
            })
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl WordSink for RecordingSink {
    async fn write_word(&mut self, word: u8) {
        self.0.borrow_mut().push(word);
    }
}

/// Delay that returns at once and remembers each requested hold in microseconds.
#[derive(Clone, Default)]
pub struct RecordingDelay(Rc<RefCell<Vec<u32>>>);

impl RecordingDelay {
    pub fn holds_us(&self) -> Vec<u32> {
        self.0.borrow().clone()
    }

    /// Holds of at least one millisecond, in milliseconds. Skips latch delays.
    pub fn holds_ms(&self) -> Vec<u32> {
        self.0
            .borrow()
            .iter()
            .filter(|&&us| us >= 1000)
            .map(|&us| us / 1000)
            .collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(ns / 1000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().push(us);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(ms.saturating_mul(1000));
    }
}

/// Delay that never finishes while stalled, and returns at once otherwise.
#[derive(Clone, Default)]
pub struct StallingDelay(Rc<Cell<bool>>);

impl StallingDelay {
    pub fn set_stalled(&self, stalled: bool) {
        self.0.set(stalled);
    }

    async fn wait(&self) {
        if self.0.get() {
            core::future::pending::<()>().await;
        }
    }
}

impl DelayNs for StallingDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        self.wait().await;
    }

    async fn delay_us(&mut self, _us: u32) {
        self.wait().await;
    }

    async fn delay_ms(&mut self, _ms: u32) {
        self.wait().await;
    }
}

// ============================================================================
// Digital input
// ============================================================================

struct PinScript {
    queued: VecDeque<bool>,
    rest: bool,
}

/// Input pin that plays back queued levels (`true` = high), then stays at rest.
#[derive(Clone)]
pub struct ScriptedPin(Rc<RefCell<PinScript>>);

impl ScriptedPin {
    /// A pulled-up pin with nothing pressed.
    pub fn released() -> Self {
        Self(Rc::new(RefCell::new(PinScript {
            queued: VecDeque::new(),
            rest: true,
        })))
    }

    /// Queue levels for the next reads.
    pub fn queue(&self, levels: &[bool]) {
        self.0.borrow_mut().queued.extend(levels);
    }

    /// Hold a pulled-up button down for the next `reads` reads.
    pub fn press_for(&self, reads: usize) {
        self.0
            .borrow_mut()
            .queued
            .extend(std::iter::repeat_n(false, reads));
    }

    /// Change the level once the queue runs out.
    pub fn set_rest(&self, high: bool) {
        self.0.borrow_mut().rest = high;
    }

    fn next_level(&self) -> bool {
        let mut script = self.0.borrow_mut();
        let rest = script.rest;
        script.queued.pop_front().unwrap_or(rest)
    }
}

impl ErrorType for ScriptedPin {
    type Error = ErrorKind;
}

impl InputPin for ScriptedPin {
    fn is_high(&mut self) -> core::result::Result<bool, ErrorKind> {
        Ok(self.next_level())
    }

    fn is_low(&mut self) -> core::result::Result<bool, ErrorKind> {
        Ok(!self.next_level())
    }
}

/// Input pin whose every read fails.
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> core::result::Result<bool, ErrorKind> {
        Err(ErrorKind::Other)
    }

    fn is_low(&mut self) -> core::result::Result<bool, ErrorKind> {
        Err(ErrorKind::Other)
    }
}

// ============================================================================
// Analog input
// ============================================================================

/// Joystick axes that play back queued readings, then stay centred.
#[derive(Clone, Default)]
pub struct ScriptedAxes(Rc<RefCell<VecDeque<Result<AxisSample>>>>);

impl ScriptedAxes {
    pub fn queue(&self, x: u16, y: u16) {
        self.0.borrow_mut().push_back(Ok(AxisSample { x, y }));
    }

    pub fn queue_error(&self) {
        self.0.borrow_mut().push_back(Err(Error::AdcConversion));
    }
}

impl AnalogAxes for ScriptedAxes {
    async fn read(&mut self) -> Result<AxisSample> {
        self.0
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(AxisSample::CENTER))
    }
}

// ============================================================================
// Whole input strategy
// ============================================================================

struct InputScript {
    events: VecDeque<InputEvent>,
    leds: Vec<usize>,
    cursor: Option<Coordinate>,
    samples: usize,
}

/// [`InputSource`] that plays back queued events, then reports no input.
#[derive(Clone)]
pub struct ScriptedInput(Rc<RefCell<InputScript>>);

impl ScriptedInput {
    /// Cursor-style input: all 25 LEDs are targets.
    pub fn positions() -> Self {
        Self::with_targets((0..LED_COUNT).collect(), None)
    }

    /// Cursor-style input that also reports a cursor cell.
    pub fn with_cursor(cursor: Coordinate) -> Self {
        Self::with_targets((0..LED_COUNT).collect(), Some(cursor))
    }

    /// Button-style input: target `i` lights `leds[i]`.
    pub fn buttons(leds: &[usize]) -> Self {
        Self::with_targets(leds.to_vec(), None)
    }

    fn with_targets(leds: Vec<usize>, cursor: Option<Coordinate>) -> Self {
        Self(Rc::new(RefCell::new(InputScript {
            events: VecDeque::new(),
            leds,
            cursor,
            samples: 0,
        })))
    }

    /// Queue a positional selection of the cell that drives `led`.
    pub fn select_led(&self, led: usize) {
        let coordinate = Coordinate::from_led_index(led).expect("LED on the matrix");
        self.queue(InputEvent::PositionSelected(coordinate));
    }

    pub fn queue(&self, event: InputEvent) {
        self.0.borrow_mut().events.push_back(event);
    }

    pub fn samples(&self) -> usize {
        self.0.borrow().samples
    }
}

impl InputSource for ScriptedInput {
    fn target_count(&self) -> usize {
        self.0.borrow().leds.len()
    }

    fn target_led(&self, target: usize) -> Option<usize> {
        self.0.borrow().leds.get(target).copied()
    }

    async fn sample<D: DelayNs>(&mut self, _delay: &mut D) -> InputEvent {
        let mut script = self.0.borrow_mut();
        script.samples += 1;
        script.events.pop_front().unwrap_or_default()
    }

    fn cursor(&self) -> Option<Coordinate> {
        self.0.borrow().cursor
    }
}
