//! matcodec core - matrix image decoding and encoding
//!
//! This crate reads encoded images (or bare dimensions) into a [`Matrix`] and
//! encodes matrices back into compressed bytes. Pixel-format work is done by
//! the `image` crate behind the [`Codec`] trait.
//!
//! # Examples
//!
//! ```ignore
//! use matcodec_core::{encode_image, read_image, EncodeOptions, ReadOptions};
//!
//! let mat = read_image(std::path::Path::new("photo.png"), &ReadOptions::strict())?;
//! let jpeg = encode_image(&mat, ".jpg", &EncodeOptions::default())?;
//! ```

pub mod codec;
pub mod decode;
pub mod encode;
pub mod matrix;

pub use codec::{encode_image, encode_image_with, read_image, read_image_with, Codec, ImageCodec};
pub use decode::{DecodeError, PathPolicy, ReadOptions, Source};
pub use encode::{EncodeError, EncodeOptions, ImageFormat, PngCompression};
pub use matrix::{Depth, Matrix, PixelType};

/// Dotted "major.minor" version of this library.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR")
);

/// Get the "major.minor" version string.
pub fn version() -> &'static str {
    VERSION
}
