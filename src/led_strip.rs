//! A device abstraction for NeoPixel-style (WS2812) LED chains.
//!
//! Three layers, leaf first:
//!
//! - [`FrameBuffer`] holds one [`Grb`] cell per LED. Brightness is applied when a
//!   cell is written, and cells are stored in the green, red, blue order the LEDs
//!   expect on the wire.
//! - [`Transmitter`] pushes every cell to a [`WordSink`] one byte at a time, then
//!   holds the line idle for [`LATCH_DELAY`] so the chain latches the frame.
//! - [`LedMatrix`] bundles the two for callers that just want to draw and flush.
//!
//! # Example
//!
//! ```rust
//! use simon_matrix::led_strip::{Brightness, FrameBuffer, Grb, colors};
//!
//! let mut frame = FrameBuffer::<25>::new(Brightness::new(40));
//! frame.set(0, colors::WHITE);
//! frame.set(99, colors::WHITE); // out of range: ignored
//! assert_eq!(frame.all()[0], Grb::new(40, 40, 40));
//! ```

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`.
#[doc(inline)]
pub use smart_leds::colors;

/// RGB color type re-exported from the `smart_leds` crate.
pub use smart_leds::RGB8;

use core::ops::Deref;

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::config::hold;

#[cfg(not(feature = "host"))]
pub mod pio_word_sink;

/// RGB color representation re-exported from the `smart_leds` crate.
pub type Rgb = RGB8;

/// Idle time after the last word of a frame. Shorter gaps corrupt the next frame.
pub const LATCH_DELAY: Duration = Duration::from_micros(300);

// ============================================================================
// Brightness
// ============================================================================

/// Scale applied to every channel when a cell is written, `0` (off) to `255` (full).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    /// Full brightness; channels pass through unchanged.
    pub const FULL: Self = Self(u8::MAX);

    /// Create a brightness level.
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    /// The raw level.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Scale one channel: `channel * level / 255`, truncating.
    #[must_use]
    pub const fn scale(self, channel: u8) -> u8 {
        #[allow(clippy::cast_possible_truncation, reason = "result is at most 255")]
        let scaled = ((channel as u16 * self.0 as u16) / 255) as u8;
        scaled
    }

    /// Scale a whole color and reorder it for the wire.
    #[must_use]
    pub const fn apply(self, color: Rgb) -> Grb {
        Grb::new(self.scale(color.g), self.scale(color.r), self.scale(color.b))
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::FULL
    }
}

// ============================================================================
// Grb - one LED in wire order
// ============================================================================

/// One LED's channels in the order WS2812 parts shift them in: green, red, blue.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grb {
    /// Green channel, sent first.
    pub g: u8,
    /// Red channel, sent second.
    pub r: u8,
    /// Blue channel, sent last.
    pub b: u8,
}

impl Grb {
    /// All channels off.
    pub const OFF: Self = Self::new(0, 0, 0);

    /// Create a cell from channels already in wire order.
    #[must_use]
    pub const fn new(g: u8, r: u8, b: u8) -> Self {
        Self { g, r, b }
    }

    /// The three words to transmit, in order.
    #[must_use]
    pub const fn words(self) -> [u8; 3] {
        [self.g, self.r, self.b]
    }

    /// The color as RGB, for previews.
    #[must_use]
    pub const fn to_rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

// ============================================================================
// FrameBuffer
// ============================================================================

/// In-memory image of an `N`-LED chain.
///
/// Every cell always holds a valid, already-scaled value. Changing the brightness
/// affects later writes only.
#[derive(Clone, Copy, Debug)]
pub struct FrameBuffer<const N: usize> {
    cells: [Grb; N],
    brightness: Brightness,
}

impl<const N: usize> FrameBuffer<N> {
    /// Number of LEDs in this frame.
    pub const LEN: usize = N;

    /// Create a blank (all off) frame that scales writes by `brightness`.
    #[must_use]
    pub const fn new(brightness: Brightness) -> Self {
        Self {
            cells: [Grb::OFF; N],
            brightness,
        }
    }

    /// Current brightness.
    #[must_use]
    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Change the brightness used by later writes. Existing cells keep their values.
    pub const fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }

    /// Write one LED. Indexes outside `0..N` are ignored.
    pub fn set(&mut self, index: usize, color: Rgb) {
        let scaled = self.brightness.apply(color);
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = scaled;
        }
    }

    /// Write every LED with the same color.
    pub fn fill(&mut self, color: Rgb) {
        let scaled = self.brightness.apply(color);
        self.cells.fill(scaled);
    }

    /// Turn every LED off.
    pub fn clear(&mut self) {
        self.cells.fill(Grb::OFF);
    }

    /// Read-only view of every cell in chain order.
    #[must_use]
    pub const fn all(&self) -> &[Grb; N] {
        &self.cells
    }
}

impl<const N: usize> Deref for FrameBuffer<N> {
    type Target = [Grb; N];

    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new(Brightness::default())
    }
}

// ============================================================================
// Transmitter
// ============================================================================

/// The platform service that turns one 8-bit word into the single-wire waveform.
///
/// `write_word` returns once the encoder has accepted the word; bit timing is the
/// implementor's job.
pub trait WordSink {
    /// Queue one word for transmission, waiting for room if needed.
    async fn write_word(&mut self, word: u8);
}

impl<T: WordSink + ?Sized> WordSink for &mut T {
    async fn write_word(&mut self, word: u8) {
        (**self).write_word(word).await;
    }
}

/// Serializes frames onto a [`WordSink`] in chain order.
pub struct Transmitter<S> {
    sink: S,
}

impl<S: WordSink> Transmitter<S> {
    /// Wrap a word sink.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Send every cell (green, red, blue per cell), then hold for [`LATCH_DELAY`].
    pub async fn flush<D: DelayNs>(&mut self, cells: &[Grb], delay: &mut D) {
        for cell in cells {
            for word in cell.words() {
                self.sink.write_word(word).await;
            }
        }
        hold(delay, LATCH_DELAY).await;
    }

    /// Borrow the underlying sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Recover the underlying sink.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.sink
    }
}

// ============================================================================
// LedMatrix
// ============================================================================

/// A frame buffer wired to its transmitter.
pub struct LedMatrix<S, const N: usize> {
    frame: FrameBuffer<N>,
    transmitter: Transmitter<S>,
}

impl<S: WordSink, const N: usize> LedMatrix<S, N> {
    /// Number of LEDs driven.
    pub const LEN: usize = N;

    /// Create a blank matrix that writes through `sink`.
    #[must_use]
    pub const fn new(sink: S, brightness: Brightness) -> Self {
        Self {
            frame: FrameBuffer::new(brightness),
            transmitter: Transmitter::new(sink),
        }
    }

    /// Write one LED. Indexes outside `0..N` are ignored.
    pub fn set(&mut self, index: usize, color: Rgb) {
        self.frame.set(index, color);
    }

    /// Write every LED with the same color.
    pub fn fill(&mut self, color: Rgb) {
        self.frame.fill(color);
    }

    /// Turn every LED off (in memory; call [`flush`](Self::flush) to show it).
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Send the current frame to the LEDs.
    pub async fn flush<D: DelayNs>(&mut self, delay: &mut D) {
        self.transmitter.flush(self.frame.all(), delay).await;
    }

    /// The in-memory frame.
    #[must_use]
    pub const fn frame(&self) -> &FrameBuffer<N> {
        &self.frame
    }

    /// Mutable access to the in-memory frame, e.g. to change brightness.
    pub const fn frame_mut(&mut self) -> &mut FrameBuffer<N> {
        &mut self.frame
    }

    /// Borrow the underlying sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        self.transmitter.sink()
    }
}
