//! Decoding encoded bytes into matrices, and blank allocation.

use std::io::Cursor;

use image::ImageReader;
use log::debug;

use super::DecodeError;
use crate::matrix::{Matrix, PixelType};

/// Decode an encoded image from bytes, keeping its original layout.
///
/// The format is sniffed from the content. No color conversion or EXIF
/// orientation is applied: a 16-bit grayscale PNG stays 16-bit grayscale.
///
/// # Errors
///
/// Returns `DecodeError::Empty` if the bytes are empty, the format is not
/// recognized, or the data is corrupt.
pub fn decode_bytes(bytes: &[u8]) -> Result<Matrix, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Io(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::Empty);
    }

    let img = reader.decode()?;
    let mat = Matrix::from_dynamic_image(img);
    if mat.is_empty() {
        return Err(DecodeError::Empty);
    }

    debug!(
        "decoded {}x{} {} matrix from {} bytes",
        mat.width(),
        mat.height(),
        mat.pixel_type(),
        bytes.len()
    );
    Ok(mat)
}

/// Allocate a blank `width` x `height` matrix with the fallback pixel type.
pub fn allocate(width: u32, height: u32) -> Result<Matrix, DecodeError> {
    let mat = Matrix::zeros(height, width, PixelType::FALLBACK)
        .ok_or(DecodeError::Allocation { width, height })?;
    debug!("allocated blank {}x{} {} matrix", width, height, PixelType::FALLBACK);
    Ok(mat)
}
