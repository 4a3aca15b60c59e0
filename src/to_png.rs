//! Host-only PNG previews of the LED matrix.
//!
//! Frames are stored in chain order (and GRB wire order); these helpers run them
//! back through a [`LedLayout`] so the picture shows what the player sees.
#![cfg(feature = "host")]

use crate::led2d::LedLayout;
use crate::led_strip::{FrameBuffer, Rgb};
use png::{BitDepth, ColorType, Encoder, ScaledFloat};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// Rearrange a chain-order frame into rows and columns.
#[must_use]
pub fn frame_to_grid<const N: usize, const W: usize, const H: usize>(
    frame: &FrameBuffer<N>,
    layout: &LedLayout<N, W, H>,
) -> [[Rgb; W]; H] {
    let mut grid = [[Rgb::default(); W]; H];
    for (cell, &(col, row)) in frame.iter().zip(layout.index_to_xy()) {
        if let Some(pixel) = grid
            .get_mut(usize::from(row))
            .and_then(|line| line.get_mut(usize::from(col)))
        {
            *pixel = cell.to_rgb();
        }
    }
    grid
}

/// Render a frame into a PNG file sized to the requested maximum dimension.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the image cannot be encoded.
pub fn write_frame_png<const N: usize, const W: usize, const H: usize>(
    frame: &FrameBuffer<N>,
    layout: &LedLayout<N, W, H>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    write_frame_png_with_gamma(
        frame,
        layout,
        output_path,
        target_max_dimension,
        PREVIEW_INVERSE_GAMMA,
    )
}

/// Render a frame into a PNG file with a custom preview inverse gamma.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the image cannot be encoded.
pub fn write_frame_png_with_gamma<const N: usize, const W: usize, const H: usize>(
    frame: &FrameBuffer<N>,
    layout: &LedLayout<N, W, H>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    preview_inverse_gamma: f32,
) -> Result<(), Box<dyn Error>> {
    assert!(preview_inverse_gamma > 0.0, "preview_inverse_gamma must be positive");
    let output_path = output_path.as_ref();
    let grid = frame_to_grid(frame, layout);
    let cell_size = select_cell_size(W, H, target_max_dimension)?;
    let (width, height, pixels) = grid_pixels(&grid, cell_size, preview_inverse_gamma)?;

    let mut encoder = create_encoder(output_path, width, height)?;
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    Ok(())
}

/// Render several frames (for example one per playback step) into a looping APNG.
///
/// # Errors
///
/// Returns an error if `frames` is empty, the delay does not fit the format, or the
/// file cannot be written.
pub fn write_frames_apng<const N: usize, const W: usize, const H: usize>(
    frames: &[FrameBuffer<N>],
    layout: &LedLayout<N, W, H>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    frame_delay_ms: u32,
) -> Result<(), Box<dyn Error>> {
    if frames.is_empty() {
        return Err("frames must not be empty".into());
    }
    let output_path = output_path.as_ref();
    let cell_size = select_cell_size(W, H, target_max_dimension)?;
    let frame_count = u32::try_from(frames.len())?;
    let delay_num = u16::try_from(frame_delay_ms)?;

    let mut size = None;
    let mut pixels = Vec::with_capacity(frames.len());
    for frame in frames {
        let grid = frame_to_grid(frame, layout);
        let (width, height, frame_pixels) =
            grid_pixels(&grid, cell_size, PREVIEW_INVERSE_GAMMA)?;
        size = Some((width, height));
        pixels.push(frame_pixels);
    }
    let Some((width, height)) = size else {
        return Err("frames must not be empty".into());
    };

    let mut encoder = create_encoder(output_path, width, height)?;
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for frame_pixels in pixels {
        writer.set_frame_delay(delay_num, 1000)?;
        writer.write_image_data(&frame_pixels)?;
    }
    writer.finish()?;
    Ok(())
}

fn create_encoder(
    output_path: &Path,
    width: u32,
    height: u32,
) -> Result<Encoder<'static, BufWriter<File>>, Box<dyn Error>> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    Ok(encoder)
}

/// Largest cell size whose image (plus a border) fits `target_max_dimension`.
fn select_cell_size(
    columns: usize,
    rows: usize,
    target_max_dimension: u32,
) -> Result<u32, Box<dyn Error>> {
    if target_max_dimension == 0 {
        return Err("target_max_dimension must be positive".into());
    }
    let columns = u32::try_from(columns)?;
    let rows = u32::try_from(rows)?;
    let mut cell_size = target_max_dimension;
    while cell_size > 1 {
        let led_radius = led_radius(cell_size);
        let max_dimension = columns.max(rows) * cell_size + led_radius * 2;
        if max_dimension <= target_max_dimension {
            break;
        }
        cell_size -= 1;
    }
    Ok(cell_size)
}

fn led_radius(cell_size: u32) -> u32 {
    let led_margin = (cell_size / 8).max(1);
    cell_size.saturating_sub(led_margin * 2) / 2
}

/// Draw each LED as a soft disc on black; 16-bit big-endian RGB.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "image sizes are small and checked positive"
)]
fn grid_pixels<const W: usize, const H: usize>(
    grid: &[[Rgb; W]; H],
    cell_size: u32,
    preview_inverse_gamma: f32,
) -> Result<(u32, u32, Vec<u8>), Box<dyn Error>> {
    let led_radius = led_radius(cell_size);
    let fade_width = led_radius / 3;
    if led_radius == 0 || fade_width == 0 {
        return Err("target_max_dimension too small to draw LEDs".into());
    }

    let border = led_radius;
    let width = u32::try_from(W)? * cell_size + border * 2;
    let height = u32::try_from(H)? * cell_size + border * 2;
    let mut bytes = vec![0u8; (width * height * 3 * 2) as usize];
    let center = (cell_size - 1) as i32 / 2;
    let led_radius_f = led_radius as f32;
    let inner_radius_f = (led_radius - fade_width) as f32;
    let radius_sq = (led_radius as i32) * (led_radius as i32);

    for (row_index, row) in grid.iter().enumerate() {
        for (column_index, pixel) in row.iter().enumerate() {
            let cell_origin_x = (column_index as u32) * cell_size;
            let cell_origin_y = (row_index as u32) * cell_size;

            for local_y in 0..cell_size {
                let delta_y = local_y as i32 - center;
                for local_x in 0..cell_size {
                    let delta_x = local_x as i32 - center;
                    let distance_sq = delta_x * delta_x + delta_y * delta_y;
                    if distance_sq > radius_sq {
                        continue;
                    }
                    let distance = (distance_sq as f32).sqrt();
                    let intensity = if distance <= inner_radius_f {
                        1.0
                    } else {
                        let fade_span = led_radius_f - inner_radius_f;
                        (1.0 - (distance - inner_radius_f) / fade_span).max(0.0)
                    };
                    let x = border + cell_origin_x + local_x;
                    let y = border + cell_origin_y + local_y;
                    let pixel_index = ((y * width + x) * 3 * 2) as usize;
                    let channels = [pixel.r, pixel.g, pixel.b].map(|channel| {
                        linear_to_u16(
                            inverse_gamma_to_linear(channel, preview_inverse_gamma) * intensity,
                        )
                    });
                    if let Some(out) = bytes.get_mut(pixel_index..pixel_index + 6) {
                        for (pair, channel) in out.chunks_exact_mut(2).zip(channels) {
                            pair.copy_from_slice(&channel.to_be_bytes());
                        }
                    }
                }
            }
        }
    }

    Ok((width, height, bytes))
}

fn inverse_gamma_to_linear(channel: u8, preview_inverse_gamma: f32) -> f32 {
    let normalized = f32::from(channel) / 255.0;
    normalized.powf(preview_inverse_gamma)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0..=65535"
)]
fn linear_to_u16(value: f32) -> u16 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 65535.0).round() as u16
}
