//! A Simon-style memory game for a 5×5 NeoPixel (WS2812) matrix on the Pico 1 and 2.
//!
//! The game lights a growing random sequence of LEDs; the player repeats it with
//! either a joystick (move a cursor, press to confirm) or a pad of buttons (one per
//! target LED). A wrong selection flashes the matrix red and starts a new game.
//!
//! # Layers
//!
//! - [`led2d`]: the serpentine `(x, y)` to chain-index mapping.
//! - [`led_strip`]: frame buffer with brightness, and the word-at-a-time transmitter.
//! - [`input`], [`joystick`], [`button`]: the two input strategies behind one trait.
//! - [`simon`]: the game engine.
//! - [`config`]: brightness, timings and the sequence cap.
//!
//! Hardware is reached only through small traits ([`led_strip::WordSink`],
//! [`joystick::AnalogAxes`], `embedded-hal` pins and delays), so everything above
//! runs unchanged on the host under the `host` feature.
//!
//! # Glossary
//!
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):** Pico 1 has 2. Pico 2 has 3.
//!   One state machine encodes the LED waveform.
//! - **ADC:** the 12-bit analog converter; the joystick axes read 0–4095.
#![cfg_attr(not(feature = "host"), no_std)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time check: hardware builds need the ARM core (unless testing with host feature)
#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the 'arm' architecture feature");

// Logging macros must come first so every later module can use them.
#[macro_use]
mod fmt;

pub mod button;
pub mod config;
mod error;
pub mod input;
pub mod joystick;
pub mod led2d;
pub mod led_strip;
pub mod simon;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
