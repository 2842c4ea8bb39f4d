//! The codec seam and the two top-level operations built on it.
//!
//! `read_image` turns a [`Source`] into a [`Matrix`]; `encode_image` turns a
//! matrix and a format token into compressed bytes. Both go through a
//! [`Codec`], which is [`ImageCodec`] unless the caller supplies another.

use log::warn;

use crate::decode::{self, DecodeError, PathPolicy, ReadOptions, Source};
use crate::encode::{self, EncodeError, EncodeOptions, ImageFormat};
use crate::matrix::Matrix;

/// Capability interface over an image codec library.
pub trait Codec {
    /// Decode encoded bytes, keeping the original channel count and depth.
    fn decode(&self, bytes: &[u8]) -> Result<Matrix, DecodeError>;

    /// Encode a matrix to `format`.
    fn encode(
        &self,
        matrix: &Matrix,
        format: ImageFormat,
        options: &EncodeOptions,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Matrix, DecodeError> {
        decode::decode_bytes(bytes)
    }

    fn encode(
        &self,
        matrix: &Matrix,
        format: ImageFormat,
        options: &EncodeOptions,
    ) -> Result<Vec<u8>, EncodeError> {
        encode::encode_matrix(matrix, format, options)
    }
}

/// Read a matrix from `source` with the default codec.
///
/// # Errors
///
/// * Bytes that decode to nothing give `DecodeError::Empty`
/// * Unreadable or undecodable paths are errors only under `PathPolicy::Strict`;
///   limit and library failures are errors under either policy
/// * Oversized dimensions give `DecodeError::Allocation`
pub fn read_image(source: impl Into<Source>, options: &ReadOptions) -> Result<Matrix, DecodeError> {
    read_image_with(&ImageCodec, source.into(), options)
}

/// Read a matrix from `source` with the given codec.
pub fn read_image_with<C: Codec + ?Sized>(
    codec: &C,
    source: Source,
    options: &ReadOptions,
) -> Result<Matrix, DecodeError> {
    match source {
        Source::Dimensions { width, height } => decode::allocate(width, height),
        Source::Bytes(bytes) => codec.decode(&bytes),
        Source::Path(path) => {
            let result = std::fs::read(&path)
                .map_err(|e| DecodeError::Io(format!("{}: {}", path.display(), e)))
                .and_then(|bytes| codec.decode(&bytes));

            match (result, options.path_policy) {
                (Ok(mat), _) => Ok(mat),
                (Err(err @ (DecodeError::Io(_) | DecodeError::Empty)), PathPolicy::Lenient) => {
                    warn!(
                        "could not read {} ({}), returning empty matrix",
                        path.display(),
                        err
                    );
                    Ok(Matrix::empty())
                }
                (Err(err), _) => Err(err),
            }
        }
    }
}

/// Encode `matrix` to the format named by `token` with the default codec.
///
/// # Errors
///
/// * An unrecognized token gives `EncodeError::UnknownFormat`
/// * Any encoder failure is passed through
pub fn encode_image(
    matrix: &Matrix,
    token: &str,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    encode_image_with(&ImageCodec, matrix, token, options)
}

/// Encode `matrix` to the format named by `token` with the given codec.
pub fn encode_image_with<C: Codec + ?Sized>(
    codec: &C,
    matrix: &Matrix,
    token: &str,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let format = ImageFormat::from_token(token)?;
    codec.encode(matrix, format, options)
}
