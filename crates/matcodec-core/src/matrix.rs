//! Matrix type: an owned 2D pixel buffer with an explicit pixel type.
//!
//! A `Matrix` stores rows of interleaved channel samples in row-major order.
//! Multi-byte samples (16-bit, float) are kept in native byte order so the
//! buffer can be handed to the host without reinterpretation.

use std::fmt;

use image::{DynamicImage, ImageBuffer};
use serde::{Deserialize, Serialize};

/// Sample depth of a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    /// Unsigned 8-bit samples.
    U8,
    /// Unsigned 16-bit samples.
    U16,
    /// 32-bit float samples.
    F32,
    /// 64-bit float samples.
    F64,
}

impl Depth {
    /// Size of one sample in bytes.
    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            Depth::U8 => 1,
            Depth::U16 => 2,
            Depth::F32 => 4,
            Depth::F64 => 8,
        }
    }

    /// Short lowercase name ("u8", "u16", "f32", "f64").
    pub fn as_str(self) -> &'static str {
        match self {
            Depth::U8 => "u8",
            Depth::U16 => "u16",
            Depth::F32 => "f32",
            Depth::F64 => "f64",
        }
    }
}

/// Pixel layout: sample depth plus channel count (1 to 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelType {
    pub depth: Depth,
    pub channels: u8,
}

impl PixelType {
    /// Format used when a matrix is allocated from bare dimensions.
    pub const FALLBACK: PixelType = PixelType {
        depth: Depth::F64,
        channels: 1,
    };

    pub const fn new(depth: Depth, channels: u8) -> Self {
        Self { depth, channels }
    }

    /// Bytes occupied by one pixel.
    #[inline]
    pub fn pixel_bytes(self) -> usize {
        self.depth.bytes() * self.channels as usize
    }

    /// Whether the channel count is one a matrix can hold.
    pub fn is_valid(self) -> bool {
        (1..=4).contains(&self.channels)
    }
}

impl Default for PixelType {
    fn default() -> Self {
        PixelType::new(Depth::U8, 1)
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.depth.as_str(), self.channels)
    }
}

/// An owned 2D pixel buffer.
///
/// Once populated, `data().len() == rows * cols * pixel_type.pixel_bytes()`.
/// An empty matrix has zero rows or zero columns and no data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: u32,
    cols: u32,
    pixel_type: PixelType,
    data: Vec<u8>,
}

impl Matrix {
    /// Create an empty matrix with no pixels.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Allocate a zero-filled matrix.
    ///
    /// Returns `None` if the pixel type is invalid, the byte size overflows,
    /// or the allocator cannot provide the buffer.
    pub fn zeros(rows: u32, cols: u32, pixel_type: PixelType) -> Option<Self> {
        let len = byte_len(rows, cols, pixel_type)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).ok()?;
        data.resize(len, 0u8);
        Some(Self {
            rows,
            cols,
            pixel_type,
            data,
        })
    }

    /// Wrap existing raw bytes.
    ///
    /// Returns `None` if `data` does not match the declared shape.
    pub fn from_raw(rows: u32, cols: u32, pixel_type: PixelType, data: Vec<u8>) -> Option<Self> {
        let len = byte_len(rows, cols, pixel_type)?;
        if data.len() != len {
            return None;
        }
        Some(Self {
            rows,
            cols,
            pixel_type,
            data,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Width in pixels (same as `cols`).
    pub fn width(&self) -> u32 {
        self.cols
    }

    /// Height in pixels (same as `rows`).
    pub fn height(&self) -> u32 {
        self.rows
    }

    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    pub fn depth(&self) -> Depth {
        self.pixel_type.depth
    }

    pub fn channels(&self) -> u8 {
        self.pixel_type.channels
    }

    /// Check if this matrix holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0 || self.data.is_empty()
    }

    /// Raw sample bytes, row-major, channels interleaved.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the matrix and return its raw bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Bytes per row.
    pub fn row_stride(&self) -> usize {
        self.cols as usize * self.pixel_type.pixel_bytes()
    }

    /// Bytes of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        let size = self.pixel_type.pixel_bytes();
        let start = y as usize * self.row_stride() + x as usize * size;
        self.data.get(start..start + size)
    }

    /// Build a matrix from a decoded image without converting its layout.
    ///
    /// The channel count and bit depth of the source are kept as they are.
    pub fn from_dynamic_image(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (pixel_type, data) = match image {
            DynamicImage::ImageLuma8(buf) => (PixelType::new(Depth::U8, 1), buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (PixelType::new(Depth::U8, 2), buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelType::new(Depth::U8, 3), buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (PixelType::new(Depth::U8, 4), buf.into_raw()),
            DynamicImage::ImageLuma16(buf) => {
                (PixelType::new(Depth::U16, 1), u16_bytes(&buf.into_raw()))
            }
            DynamicImage::ImageLumaA16(buf) => {
                (PixelType::new(Depth::U16, 2), u16_bytes(&buf.into_raw()))
            }
            DynamicImage::ImageRgb16(buf) => {
                (PixelType::new(Depth::U16, 3), u16_bytes(&buf.into_raw()))
            }
            DynamicImage::ImageRgba16(buf) => {
                (PixelType::new(Depth::U16, 4), u16_bytes(&buf.into_raw()))
            }
            DynamicImage::ImageRgb32F(buf) => {
                (PixelType::new(Depth::F32, 3), f32_bytes(&buf.into_raw()))
            }
            DynamicImage::ImageRgba32F(buf) => {
                (PixelType::new(Depth::F32, 4), f32_bytes(&buf.into_raw()))
            }
            // DynamicImage is non-exhaustive; widen anything new to float RGBA.
            other => (
                PixelType::new(Depth::F32, 4),
                f32_bytes(&other.into_rgba32f().into_raw()),
            ),
        };

        Self {
            rows: height,
            cols: width,
            pixel_type,
            data,
        }
    }

    /// Convert to the codec library's image type.
    ///
    /// Returns `None` for layouts the library has no image type for
    /// (64-bit float, single or dual channel 32-bit float) and for empty matrices.
    pub fn to_dynamic_image(&self) -> Option<DynamicImage> {
        if self.is_empty() {
            return None;
        }
        let (w, h) = (self.cols, self.rows);
        let image = match (self.pixel_type.depth, self.pixel_type.channels) {
            (Depth::U8, 1) => DynamicImage::ImageLuma8(ImageBuffer::from_raw(w, h, self.data.clone())?),
            (Depth::U8, 2) => DynamicImage::ImageLumaA8(ImageBuffer::from_raw(w, h, self.data.clone())?),
            (Depth::U8, 3) => DynamicImage::ImageRgb8(ImageBuffer::from_raw(w, h, self.data.clone())?),
            (Depth::U8, 4) => DynamicImage::ImageRgba8(ImageBuffer::from_raw(w, h, self.data.clone())?),
            (Depth::U16, 1) => DynamicImage::ImageLuma16(ImageBuffer::from_raw(w, h, u16_samples(&self.data))?),
            (Depth::U16, 2) => DynamicImage::ImageLumaA16(ImageBuffer::from_raw(w, h, u16_samples(&self.data))?),
            (Depth::U16, 3) => DynamicImage::ImageRgb16(ImageBuffer::from_raw(w, h, u16_samples(&self.data))?),
            (Depth::U16, 4) => DynamicImage::ImageRgba16(ImageBuffer::from_raw(w, h, u16_samples(&self.data))?),
            (Depth::F32, 3) => DynamicImage::ImageRgb32F(ImageBuffer::from_raw(w, h, f32_samples(&self.data))?),
            (Depth::F32, 4) => DynamicImage::ImageRgba32F(ImageBuffer::from_raw(w, h, f32_samples(&self.data))?),
            _ => return None,
        };
        Some(image)
    }
}

fn byte_len(rows: u32, cols: u32, pixel_type: PixelType) -> Option<usize> {
    if !pixel_type.is_valid() {
        return None;
    }
    (rows as usize)
        .checked_mul(cols as usize)?
        .checked_mul(pixel_type.pixel_bytes())
}

fn u16_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
}

fn f32_bytes(samples: &[f32]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_ne_bytes()).collect()
}

fn u16_samples(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|c| u16::from_ne_bytes([c[0], c[1]]))
        .collect()
}

fn f32_samples(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_fallback_size() {
        let mat = Matrix::zeros(48, 64, PixelType::FALLBACK).unwrap();
        assert_eq!(mat.rows(), 48);
        assert_eq!(mat.cols(), 64);
        assert_eq!(mat.width(), 64);
        assert_eq!(mat.height(), 48);
        assert_eq!(mat.depth(), Depth::F64);
        assert_eq!(mat.channels(), 1);
        assert_eq!(mat.data().len(), 64 * 48 * 8);
        assert!(mat.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zeros_rejects_invalid_channels() {
        assert!(Matrix::zeros(2, 2, PixelType::new(Depth::U8, 0)).is_none());
        assert!(Matrix::zeros(2, 2, PixelType::new(Depth::U8, 5)).is_none());
    }

    #[test]
    fn test_zeros_unallocatable_size() {
        // 200000 x 200000 x 8 bytes fits in usize but not in memory
        let mat = Matrix::zeros(200_000, 200_000, PixelType::FALLBACK);
        assert!(mat.is_none());
    }

    #[test]
    fn test_zeros_zero_sized_is_empty() {
        let mat = Matrix::zeros(0, 10, PixelType::FALLBACK).unwrap();
        assert!(mat.is_empty());
    }

    #[test]
    fn test_empty_matrix() {
        let mat = Matrix::empty();
        assert!(mat.is_empty());
        assert_eq!(mat.rows(), 0);
        assert_eq!(mat.cols(), 0);
        assert!(mat.data().is_empty());
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        let pt = PixelType::new(Depth::U8, 3);
        assert!(Matrix::from_raw(2, 2, pt, vec![0u8; 12]).is_some());
        assert!(Matrix::from_raw(2, 2, pt, vec![0u8; 11]).is_none());
    }

    #[test]
    fn test_pixel_access() {
        let pt = PixelType::new(Depth::U8, 3);
        let data = vec![
            1, 2, 3, 4, 5, 6, // row 0
            7, 8, 9, 10, 11, 12, // row 1
        ];
        let mat = Matrix::from_raw(2, 2, pt, data).unwrap();
        assert_eq!(mat.row_stride(), 6);
        assert_eq!(mat.pixel(0, 0), Some(&[1u8, 2, 3][..]));
        assert_eq!(mat.pixel(1, 1), Some(&[10u8, 11, 12][..]));
        assert_eq!(mat.pixel(2, 0), None);
        assert_eq!(mat.pixel(0, 2), None);
    }

    #[test]
    fn test_from_dynamic_image_preserves_layout() {
        let gray16 = image::ImageBuffer::<image::Luma<u16>, _>::from_raw(2, 1, vec![1000u16, 65535])
            .unwrap();
        let mat = Matrix::from_dynamic_image(DynamicImage::ImageLuma16(gray16));
        assert_eq!(mat.pixel_type(), PixelType::new(Depth::U16, 1));
        assert_eq!(mat.data().len(), 4);
        assert_eq!(mat.pixel(0, 0), Some(&1000u16.to_ne_bytes()[..]));

        let rgba = image::RgbaImage::from_raw(1, 1, vec![10, 20, 30, 40]).unwrap();
        let mat = Matrix::from_dynamic_image(DynamicImage::ImageRgba8(rgba));
        assert_eq!(mat.pixel_type(), PixelType::new(Depth::U8, 4));
        assert_eq!(mat.data(), &[10, 20, 30, 40]);
    }

    #[test]
    fn test_dynamic_image_conversion_u16() {
        let pt = PixelType::new(Depth::U16, 3);
        let samples: Vec<u16> = vec![0, 256, 65535, 1, 2, 3];
        let mat = Matrix::from_raw(1, 2, pt, u16_bytes(&samples)).unwrap();

        let dynamic = mat.to_dynamic_image().unwrap();
        assert!(matches!(dynamic, DynamicImage::ImageRgb16(_)));
        assert_eq!(Matrix::from_dynamic_image(dynamic), mat);
    }

    #[test]
    fn test_to_dynamic_image_unsupported() {
        let f64_mat = Matrix::zeros(2, 2, PixelType::FALLBACK).unwrap();
        assert!(f64_mat.to_dynamic_image().is_none());

        let f32_gray = Matrix::zeros(2, 2, PixelType::new(Depth::F32, 1)).unwrap();
        assert!(f32_gray.to_dynamic_image().is_none());

        assert!(Matrix::empty().to_dynamic_image().is_none());
    }

    #[test]
    fn test_pixel_type_display() {
        assert_eq!(PixelType::FALLBACK.to_string(), "f64x1");
        assert_eq!(PixelType::new(Depth::U8, 3).to_string(), "u8x3");
    }
}
