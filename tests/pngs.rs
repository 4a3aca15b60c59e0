#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for PNG previews of the matrix.

use std::error::Error;
use std::fs::File;

use simon_matrix::config::BRIGHTNESS_DEFAULT;
use simon_matrix::led2d::{LED_COUNT, LED_LAYOUT_5X5, led_index};
use simon_matrix::led_strip::{Brightness, FrameBuffer, Rgb, colors};
use simon_matrix::to_png::{frame_to_grid, write_frame_png, write_frames_apng};

type Frame = FrameBuffer<LED_COUNT>;

fn read_png_info(path: &std::path::Path) -> Result<png::Info<'static>, Box<dyn Error>> {
    let decoder = png::Decoder::new(File::open(path)?);
    let reader = decoder.read_info()?;
    Ok(reader.info().clone())
}

#[test]
fn grid_undoes_the_serpentine() {
    let mut frame = Frame::new(Brightness::FULL);
    frame.set(led_index(0, 1), colors::RED);
    frame.set(led_index(4, 1), colors::BLUE);

    let grid = frame_to_grid(&frame, &LED_LAYOUT_5X5);

    assert_eq!(grid[1][0], colors::RED);
    assert_eq!(grid[1][4], colors::BLUE);
    assert_eq!(grid[0][0], Rgb::default());
}

#[test]
fn grid_shows_scaled_colors() {
    let mut frame = Frame::new(BRIGHTNESS_DEFAULT);
    frame.set(led_index(2, 3), colors::WHITE);

    let grid = frame_to_grid(&frame, &LED_LAYOUT_5X5);

    assert_eq!(grid[3][2], Rgb { r: 40, g: 40, b: 40 });
}

#[test]
fn frame_png_fits_requested_size() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("frame.png");
    let mut frame = Frame::new(Brightness::FULL);
    frame.fill(colors::GREEN);

    write_frame_png(&frame, &LED_LAYOUT_5X5, &path, 200)?;

    let info = read_png_info(&path)?;
    assert!(info.width <= 200 && info.height <= 200);
    assert_eq!(info.width, info.height);
    assert_eq!(info.color_type, png::ColorType::Rgb);
    assert_eq!(info.bit_depth, png::BitDepth::Sixteen);
    Ok(())
}

#[test]
fn playback_apng_has_one_frame_per_step() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("playback.png");
    let frames: Vec<Frame> = [0, 12, 24]
        .into_iter()
        .map(|led| {
            let mut frame = Frame::new(BRIGHTNESS_DEFAULT);
            frame.set(led, colors::LIME);
            frame
        })
        .collect();

    write_frames_apng(&frames, &LED_LAYOUT_5X5, &path, 120, 500)?;

    let info = read_png_info(&path)?;
    let animation = info.animation_control.ok_or("not animated")?;
    assert_eq!(animation.num_frames, 3);
    Ok(())
}

#[test]
fn empty_animation_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let frames: [Frame; 0] = [];
    assert!(write_frames_apng(&frames, &LED_LAYOUT_5X5, dir.path().join("x.png"), 120, 500).is_err());
}
