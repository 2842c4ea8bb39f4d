//! Encoding matrices into compressed image bytes.
//!
//! Each format accepts a subset of pixel layouts. JPEG is adapted on the way
//! in (alpha dropped, 16-bit scaled down to 8-bit); the other formats receive
//! the matrix as it is and the codec library decides.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::DynamicImage;
use log::debug;

use super::{EncodeError, EncodeOptions, ImageFormat};
use crate::matrix::{Depth, Matrix};

/// Encode a matrix to the given format.
///
/// # Errors
///
/// * `EncodeError::EmptyMatrix` if the matrix holds no pixels
/// * `EncodeError::UnsupportedPixelType` if the format cannot hold the layout
/// * `EncodeError::EncodingFailed` if the codec library fails
pub fn encode_matrix(
    matrix: &Matrix,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    if matrix.is_empty() {
        return Err(EncodeError::EmptyMatrix);
    }

    let unsupported = || EncodeError::UnsupportedPixelType {
        format: format.extension(),
        pixel_type: matrix.pixel_type(),
    };

    let image = matrix.to_dynamic_image().ok_or_else(unsupported)?;
    let image = match format {
        ImageFormat::Jpeg => jpeg_compatible(image, matrix).ok_or_else(unsupported)?,
        ImageFormat::Bmp | ImageFormat::WebP if matrix.depth() != Depth::U8 => {
            return Err(unsupported());
        }
        ImageFormat::Png if matches!(matrix.depth(), Depth::F32 | Depth::F64) => {
            return Err(unsupported());
        }
        _ => image,
    };

    let mut buffer = Cursor::new(Vec::new());
    let result = match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buffer, options.quality());
            image.write_with_encoder(encoder)
        }
        ImageFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut buffer,
                options.png_compression.to_image_compression(),
                FilterType::Adaptive,
            );
            image.write_with_encoder(encoder)
        }
        ImageFormat::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut buffer);
            image.write_with_encoder(encoder)
        }
        ImageFormat::Bmp | ImageFormat::Tiff => image.write_to(&mut buffer, format.to_image_format()),
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    debug!(
        "encoded {}x{} {} matrix as {} ({} bytes)",
        matrix.width(),
        matrix.height(),
        matrix.pixel_type(),
        format,
        bytes.len()
    );
    Ok(bytes)
}

/// Reduce an image to a layout the JPEG encoder accepts (8-bit gray or RGB).
fn jpeg_compatible(image: DynamicImage, matrix: &Matrix) -> Option<DynamicImage> {
    if !matches!(matrix.depth(), Depth::U8 | Depth::U16) {
        return None;
    }
    let image = match (matrix.depth(), matrix.channels()) {
        (Depth::U8, 1) | (Depth::U8, 3) => image,
        (_, 1) | (_, 2) => DynamicImage::ImageLuma8(image.to_luma8()),
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    };
    Some(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_bytes;
    use crate::matrix::PixelType;

    fn gradient(width: u32, height: u32, channels: u8) -> Matrix {
        let mut data = Vec::with_capacity((width * height) as usize * channels as usize);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels as u32 {
                    data.push(((x * 7 + y * 13 + c * 31) % 256) as u8);
                }
            }
        }
        Matrix::from_raw(height, width, PixelType::new(Depth::U8, channels), data).unwrap()
    }

    #[test]
    fn test_png_round_trip_is_lossless() {
        let mat = gradient(16, 9, 3);
        let bytes = encode_matrix(&mat, ImageFormat::Png, &EncodeOptions::default()).unwrap();

        assert_eq!(&bytes[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(decode_bytes(&bytes).unwrap(), mat);
    }

    #[test]
    fn test_png_round_trip_16_bit() {
        let samples: Vec<u16> = (0..12u16).map(|i| i * 5000).collect();
        let data: Vec<u8> = samples.iter().flat_map(|s| s.to_ne_bytes()).collect();
        let mat = Matrix::from_raw(2, 2, PixelType::new(Depth::U16, 3), data).unwrap();

        let bytes = encode_matrix(&mat, ImageFormat::Png, &EncodeOptions::default()).unwrap();
        assert_eq!(decode_bytes(&bytes).unwrap(), mat);
    }

    #[test]
    fn test_jpeg_basic() {
        let mat = gradient(32, 32, 3);
        let bytes = encode_matrix(&mat, ImageFormat::Jpeg, &EncodeOptions::default()).unwrap();

        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        let len = bytes.len();
        assert_eq!(&bytes[len - 2..], &[0xFF, 0xD9]);

        let decoded = decode_bytes(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let mat = gradient(8, 8, 4);
        let bytes = encode_matrix(&mat, ImageFormat::Jpeg, &EncodeOptions::default()).unwrap();
        let decoded = decode_bytes(&bytes).unwrap();
        assert_eq!(decoded.channels(), 3);
    }

    #[test]
    fn test_jpeg_gray_16_bit_scaled() {
        let data: Vec<u8> = vec![40000u16; 16].iter().flat_map(|s| s.to_ne_bytes()).collect();
        let mat = Matrix::from_raw(4, 4, PixelType::new(Depth::U16, 1), data).unwrap();
        let bytes = encode_matrix(&mat, ImageFormat::Jpeg, &EncodeOptions::default()).unwrap();
        let decoded = decode_bytes(&bytes).unwrap();
        assert_eq!(decoded.pixel_type(), PixelType::new(Depth::U8, 1));
    }

    #[test]
    fn test_jpeg_quality_affects_size() {
        let mat = gradient(64, 64, 3);
        let mut opts = EncodeOptions::default();
        opts.jpeg_quality = 10;
        let low = encode_matrix(&mat, ImageFormat::Jpeg, &opts).unwrap();
        opts.jpeg_quality = 100;
        let high = encode_matrix(&mat, ImageFormat::Jpeg, &opts).unwrap();
        assert!(high.len() > low.len());
    }

    #[test]
    fn test_bmp_and_tiff_round_trip() {
        let mat = gradient(5, 3, 3);
        for format in [ImageFormat::Bmp, ImageFormat::Tiff] {
            let bytes = encode_matrix(&mat, format, &EncodeOptions::default()).unwrap();
            assert_eq!(decode_bytes(&bytes).unwrap(), mat, "{format} round trip");
        }
    }

    #[test]
    fn test_webp_lossless_round_trip() {
        let mat = gradient(6, 4, 3);
        let bytes = encode_matrix(&mat, ImageFormat::WebP, &EncodeOptions::default()).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(decode_bytes(&bytes).unwrap(), mat);
    }

    #[test]
    fn test_empty_matrix_fails() {
        let result = encode_matrix(&Matrix::empty(), ImageFormat::Png, &EncodeOptions::default());
        assert!(matches!(result, Err(EncodeError::EmptyMatrix)));
    }

    #[test]
    fn test_f64_matrix_unsupported() {
        let mat = Matrix::zeros(4, 4, PixelType::FALLBACK).unwrap();
        for format in [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Tiff] {
            let result = encode_matrix(&mat, format, &EncodeOptions::default());
            assert!(matches!(
                result,
                Err(EncodeError::UnsupportedPixelType { .. })
            ));
        }
    }

    #[test]
    fn test_bmp_rejects_16_bit() {
        let mat = Matrix::zeros(2, 2, PixelType::new(Depth::U16, 3)).unwrap();
        let result = encode_matrix(&mat, ImageFormat::Bmp, &EncodeOptions::default());
        assert!(matches!(
            result,
            Err(EncodeError::UnsupportedPixelType { format: "bmp", .. })
        ));
    }

    #[test]
    fn test_png_rejects_float() {
        let mat = Matrix::zeros(2, 2, PixelType::new(Depth::F32, 3)).unwrap();
        let result = encode_matrix(&mat, ImageFormat::Png, &EncodeOptions::default());
        assert!(matches!(
            result,
            Err(EncodeError::UnsupportedPixelType { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::decode_bytes;
    use crate::matrix::PixelType;
    use proptest::prelude::*;

    /// Strategy for small matrices with arbitrary 8-bit content.
    fn matrix_strategy() -> impl Strategy<Value = Matrix> {
        (1u32..=24, 1u32..=24, 1u8..=4).prop_flat_map(|(w, h, c)| {
            let size = (w * h) as usize * c as usize;
            prop::collection::vec(any::<u8>(), size..=size).prop_map(move |data| {
                Matrix::from_raw(h, w, PixelType::new(Depth::U8, c), data).unwrap()
            })
        })
    }

    proptest! {
        /// Property: PNG encoding reproduces the exact matrix when decoded.
        #[test]
        fn prop_png_round_trip(mat in matrix_strategy()) {
            let bytes = encode_matrix(&mat, ImageFormat::Png, &EncodeOptions::default()).unwrap();
            prop_assert_eq!(decode_bytes(&bytes).unwrap(), mat);
        }

        /// Property: JPEG always produces SOI/EOI framed output for 8-bit input.
        #[test]
        fn prop_jpeg_is_framed(mat in matrix_strategy(), quality in 0u8..=255) {
            let opts = EncodeOptions { jpeg_quality: quality, ..Default::default() };
            let bytes = encode_matrix(&mat, ImageFormat::Jpeg, &opts).unwrap();
            let len = bytes.len();
            prop_assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&bytes[len - 2..], &[0xFF, 0xD9]);
        }

        /// Property: same input always encodes to the same bytes.
        #[test]
        fn prop_deterministic(mat in matrix_strategy()) {
            let a = encode_matrix(&mat, ImageFormat::Png, &EncodeOptions::default()).unwrap();
            let b = encode_matrix(&mat, ImageFormat::Png, &EncodeOptions::default()).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
