//! Tile raster decoder.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use png::{BitDepth, ColorType, Transformations};

use super::error::RasterError;
use crate::coord::TILE_SIZE;

/// Decodes a dataset tile into `TILE_SIZE²` raw codes in row-major order.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>, RasterError> {
    decode_with_size(bytes, TILE_SIZE)
}

/// Decodes a square single-channel raster of side `size`.
///
/// Palette rasters yield their palette indices, grayscale rasters their
/// luminance values. Anything wider than one 8-bit channel is rejected.
pub fn decode_with_size(bytes: &[u8], size: usize) -> Result<Vec<u8>, RasterError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => decode_png(bytes, size),
        _ => decode_image(bytes, size),
    }
}

fn decode_png(bytes: &[u8], size: usize) -> Result<Vec<u8>, RasterError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let info = reader.info();
    check_dimensions(info.width, info.height, size)?;
    match (info.color_type, info.bit_depth) {
        (ColorType::Indexed, BitDepth::Eight) | (ColorType::Grayscale, BitDepth::Eight) => {}
        (color, depth) => {
            return Err(RasterError::UnsupportedLayout(format!(
                "{:?} at {:?} bits",
                color, depth
            )))
        }
    }

    let mut buffer = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buffer)?;
    buffer.truncate(frame.buffer_size());
    check_length(buffer, size)
}

fn decode_image(bytes: &[u8], size: usize) -> Result<Vec<u8>, RasterError> {
    let image = image::load_from_memory(bytes)?;
    check_dimensions(image.width(), image.height(), size)?;

    match image {
        DynamicImage::ImageLuma8(gray) => check_length(gray.into_raw(), size),
        other => Err(RasterError::UnsupportedLayout(format!("{:?}", other.color()))),
    }
}

fn check_dimensions(width: u32, height: u32, size: usize) -> Result<(), RasterError> {
    if width as usize != size || height as usize != size {
        return Err(RasterError::InvalidDimensions {
            width,
            height,
            expected: size,
        });
    }
    Ok(())
}

fn check_length(buffer: Vec<u8>, size: usize) -> Result<Vec<u8>, RasterError> {
    let expected = size * size;
    if buffer.len() != expected {
        return Err(RasterError::Truncated {
            actual: buffer.len(),
            expected,
        });
    }
    Ok(buffer)
}
