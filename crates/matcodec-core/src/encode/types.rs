//! Core types for image encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matrix::PixelType;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The format token names no supported format.
    #[error("Unknown image format: {0:?}")]
    UnknownFormat(String),

    /// The matrix holds no pixels.
    #[error("Cannot encode an empty matrix")]
    EmptyMatrix,

    /// The format cannot store this pixel layout.
    #[error("{format} cannot encode {pixel_type} pixels")]
    UnsupportedPixelType {
        format: &'static str,
        pixel_type: PixelType,
    },

    /// The codec library failed.
    #[error("Fail to encode: {0}")]
    EncodingFailed(String),
}

/// PNG compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

impl PngCompression {
    pub(crate) fn to_image_compression(self) -> image::codecs::png::CompressionType {
        use image::codecs::png::CompressionType;

        match self {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

/// Encoder settings.
///
/// Deserializes from a partial object; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodeOptions {
    /// JPEG quality (1-100), clamped when used.
    pub jpeg_quality: u8,
    pub png_compression: PngCompression,
}

impl EncodeOptions {
    pub const DEFAULT_JPEG_QUALITY: u8 = 95;

    /// JPEG quality clamped into 1..=100.
    pub fn quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: Self::DEFAULT_JPEG_QUALITY,
            png_compression: PngCompression::Default,
        }
    }
}
