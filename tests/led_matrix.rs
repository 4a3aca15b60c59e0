#![allow(missing_docs)]
//! Host-level tests for the frame buffer and transmitter.

mod support;

use embassy_futures::block_on;
use simon_matrix::config::BRIGHTNESS_DEFAULT;
use simon_matrix::led_strip::{
    Brightness, FrameBuffer, Grb, LATCH_DELAY, LedMatrix, Rgb, Transmitter, colors,
};
use support::{FRAME_WORDS, RecordingDelay, RecordingSink};

#[test]
fn white_at_brightness_40_is_stored_green_red_blue() {
    let mut frame = FrameBuffer::<25>::new(BRIGHTNESS_DEFAULT);
    frame.set(7, colors::WHITE);
    assert_eq!(frame[7], Grb::new(40, 40, 40));
    assert_eq!(frame[7].words(), [40, 40, 40]);
}

#[test]
fn channels_are_reordered_for_the_wire() {
    let mut frame = FrameBuffer::<3>::new(Brightness::FULL);
    frame.set(0, Rgb { r: 1, g: 2, b: 3 });
    assert_eq!(frame[0], Grb { g: 2, r: 1, b: 3 });
    assert_eq!(frame[0].words(), [2, 1, 3]);
    assert_eq!(frame[0].to_rgb(), Rgb { r: 1, g: 2, b: 3 });
}

#[test]
fn brightness_scales_and_truncates() {
    let brightness = Brightness::new(40);
    assert_eq!(brightness.scale(255), 40);
    assert_eq!(brightness.scale(50), 7);
    assert_eq!(brightness.scale(0), 0);
    assert_eq!(Brightness::FULL.scale(123), 123);
    assert_eq!(Brightness::new(0).scale(255), 0);
}

#[test]
fn clear_turns_everything_off_at_any_brightness() {
    for level in [0, 40, 255] {
        let mut frame = FrameBuffer::<25>::new(Brightness::new(level));
        frame.fill(colors::WHITE);
        frame.clear();
        assert!(frame.iter().all(|&cell| cell == Grb::OFF));
    }
}

#[test]
fn out_of_range_writes_are_ignored() {
    let mut frame = FrameBuffer::<25>::new(Brightness::FULL);
    frame.set(25, colors::RED);
    frame.set(usize::MAX, colors::RED);
    assert!(frame.iter().all(|&cell| cell == Grb::OFF));
}

#[test]
fn brightness_change_applies_to_later_writes_only() {
    let mut frame = FrameBuffer::<2>::new(Brightness::FULL);
    frame.set(0, colors::WHITE);
    frame.set_brightness(Brightness::new(40));
    frame.set(1, colors::WHITE);
    assert_eq!(frame[0], Grb::new(255, 255, 255));
    assert_eq!(frame[1], Grb::new(40, 40, 40));
}

#[test]
fn flush_sends_every_cell_in_chain_order_then_latches() {
    let sink = RecordingSink::default();
    let delay = RecordingDelay::default();
    let mut transmitter = Transmitter::new(sink.clone());
    let cells = [Grb::new(1, 2, 3), Grb::new(4, 5, 6)];

    block_on(transmitter.flush(&cells, &mut delay.clone()));

    assert_eq!(sink.words(), vec![1, 2, 3, 4, 5, 6]);
    let latch_us = u32::try_from(LATCH_DELAY.as_micros()).expect("fits");
    assert_eq!(delay.holds_us(), vec![latch_us]);
    assert_eq!(latch_us, 300);
}

#[test]
fn matrix_flush_sends_a_full_frame() {
    let sink = RecordingSink::default();
    let mut delay = RecordingDelay::default();
    let mut matrix = LedMatrix::<_, 25>::new(sink.clone(), BRIGHTNESS_DEFAULT);

    matrix.set(9, colors::WHITE);
    block_on(matrix.flush(&mut delay));
    matrix.clear();
    block_on(matrix.flush(&mut delay));

    assert_eq!(sink.words().len(), 2 * FRAME_WORDS);
    let frames = sink.frames();
    assert_eq!(frames[0][9], Grb::new(40, 40, 40));
    assert_eq!(frames[0].iter().filter(|&&cell| cell != Grb::OFF).count(), 1);
    assert!(frames[1].iter().all(|&cell| cell == Grb::OFF));
}
