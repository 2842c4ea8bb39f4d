//! Format tokens ("png", ".jpg", ...) and the formats they name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::EncodeError;

/// Compressed formats a matrix can be encoded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Tiff,
    WebP,
}

impl ImageFormat {
    /// Parse a file-extension-like token.
    ///
    /// Matching is case-insensitive and a single leading dot is ignored,
    /// so "png", ".PNG" and "Png" are equivalent.
    pub fn from_token(token: &str) -> Result<Self, EncodeError> {
        let ext = token.trim();
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" | "jpe" => Ok(ImageFormat::Jpeg),
            "bmp" | "dib" => Ok(ImageFormat::Bmp),
            "tif" | "tiff" => Ok(ImageFormat::Tiff),
            "webp" => Ok(ImageFormat::WebP),
            _ => Err(EncodeError::UnknownFormat(token.to_string())),
        }
    }

    /// Canonical extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::WebP => "webp",
        }
    }

    /// The codec library's matching format.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageFormat::from_token(s)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_variants() {
        assert_eq!(ImageFormat::from_token("png").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_token(".png").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_token(".JPG").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_token("jpeg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_token("tif").unwrap(), ImageFormat::Tiff);
        assert_eq!(ImageFormat::from_token("WebP").unwrap(), ImageFormat::WebP);
        assert_eq!(ImageFormat::from_token("dib").unwrap(), ImageFormat::Bmp);
    }

    #[test]
    fn test_from_token_unknown() {
        let err = ImageFormat::from_token(".gifx").unwrap_err();
        assert!(matches!(err, EncodeError::UnknownFormat(ref t) if t == ".gifx"));

        assert!(ImageFormat::from_token("").is_err());
        assert!(ImageFormat::from_token("..png").is_err());
    }

    #[test]
    fn test_parse_via_from_str() {
        let fmt: ImageFormat = "bmp".parse().unwrap();
        assert_eq!(fmt, ImageFormat::Bmp);
        assert_eq!(fmt.to_string(), "bmp");
    }
}
