//! Core types for image reading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image reading operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The decoder produced no image (unrecognized or corrupt data).
    #[error("Error loading file")]
    Empty,

    /// I/O error while reading the source.
    #[error("I/O error: {0}")]
    Io(String),

    /// The image exceeds the decoder's resource limits.
    #[error("Limits exceeded: {0}")]
    Limits(String),

    /// A blank matrix of the requested size cannot be allocated.
    #[error("Cannot allocate {width}x{height} matrix")]
    Allocation { width: u32, height: u32 },

    /// Any other failure reported by the codec library.
    #[error("{0}")]
    Library(String),
}

impl DecodeError {
    /// Whether the (empty) matrix handle is still handed back with this error.
    ///
    /// Only an empty decode result keeps the handle; library failures replace
    /// it with null.
    pub fn yields_matrix(&self) -> bool {
        matches!(self, DecodeError::Empty)
    }
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        use image::ImageError;

        match err {
            ImageError::Decoding(_) | ImageError::Unsupported(_) => DecodeError::Empty,
            ImageError::Limits(e) => DecodeError::Limits(e.to_string()),
            ImageError::IoError(e) => DecodeError::Io(e.to_string()),
            other => DecodeError::Library(other.to_string()),
        }
    }
}

/// What `read_image` reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Allocate a blank matrix of this size.
    Dimensions { width: u32, height: u32 },
    /// Decode a file from disk.
    Path(PathBuf),
    /// Decode an encoded image held in memory.
    Bytes(Vec<u8>),
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&std::path::Path> for Source {
    fn from(path: &std::path::Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl From<&[u8]> for Source {
    fn from(bytes: &[u8]) -> Self {
        Source::Bytes(bytes.to_vec())
    }
}

impl From<(u32, u32)> for Source {
    fn from((width, height): (u32, u32)) -> Self {
        Source::Dimensions { width, height }
    }
}

/// How a failed path read is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathPolicy {
    /// Missing or corrupt files yield an empty matrix and no error.
    #[default]
    Lenient,
    /// Missing or corrupt files are reported as errors.
    Strict,
}

/// Options for `read_image`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    pub path_policy: PathPolicy,
}

impl ReadOptions {
    pub fn lenient() -> Self {
        Self {
            path_policy: PathPolicy::Lenient,
        }
    }

    pub fn strict() -> Self {
        Self {
            path_policy: PathPolicy::Strict,
        }
    }
}
