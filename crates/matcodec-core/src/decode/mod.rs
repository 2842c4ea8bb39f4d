//! Image reading pipeline.
//!
//! This module provides functionality for:
//! - Decoding encoded images (PNG, JPEG, BMP, TIFF, WebP) into matrices
//! - Allocating blank matrices from bare dimensions
//! - Choosing how failed path reads are reported
//!
//! Decoding keeps the source's channel count and bit depth. All operations
//! are synchronous and single-threaded.

mod reader;
mod types;

pub use reader::{allocate, decode_bytes};
pub use types::{DecodeError, PathPolicy, ReadOptions, Source};
