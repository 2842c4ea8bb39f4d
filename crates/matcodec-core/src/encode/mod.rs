//! Image encoding pipeline.
//!
//! This module provides functionality for:
//! - Parsing format tokens ("png", ".jpg", ...)
//! - Encoding matrices to PNG, JPEG, BMP, TIFF or lossless WebP
//! - Encoder settings (JPEG quality, PNG compression)
//!
//! # Examples
//!
//! ```ignore
//! use matcodec_core::encode::{encode_matrix, EncodeOptions, ImageFormat};
//!
//! let format = ImageFormat::from_token(".png")?;
//! let bytes = encode_matrix(&matrix, format, &EncodeOptions::default())?;
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod format;
mod types;
mod writer;

pub use format::ImageFormat;
pub use types::{EncodeError, EncodeOptions, PngCompression};
pub use writer::encode_matrix;
