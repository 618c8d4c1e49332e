//! Immutable decoded raster buffers

use std::fmt;
use std::io::Cursor;

use image::DynamicImage;

use crate::error::{OpsError, OpsResult};

/// Pixel layout of a decoded raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// 8-bit grayscale
    Luma8,
    /// 8-bit grayscale with alpha
    LumaAlpha8,
    /// 8-bit RGB
    Rgb8,
    /// 8-bit RGB with alpha
    Rgba8,
    /// Any other layout (16-bit or float channels)
    Other,
}

impl ColorMode {
    /// Short lowercase name of the layout
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Luma8 => "luma8",
            ColorMode::LumaAlpha8 => "luma-alpha8",
            ColorMode::Rgb8 => "rgb8",
            ColorMode::Rgba8 => "rgba8",
            ColorMode::Other => "other",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An in-memory decoded raster image.
///
/// Buffers are immutable once created: executors produce a new buffer rather than
/// mutating the base, so a buffer stored in a history stack never changes.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    image: DynamicImage,
}

impl ImageBuffer {
    /// Wrap a decoded raster
    pub fn new(image: DynamicImage) -> Self {
        ImageBuffer { image }
    }

    /// Decode a buffer from encoded bytes (format sniffed from the header)
    pub fn from_bytes(bytes: &[u8]) -> OpsResult<Self> {
        let image =
            image::load_from_memory(bytes).map_err(|e| OpsError::Decode(e.to_string()))?;
        Ok(ImageBuffer { image })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width and height in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Pixel layout of this buffer
    pub fn color_mode(&self) -> ColorMode {
        match &self.image {
            DynamicImage::ImageLuma8(_) => ColorMode::Luma8,
            DynamicImage::ImageLumaA8(_) => ColorMode::LumaAlpha8,
            DynamicImage::ImageRgb8(_) => ColorMode::Rgb8,
            DynamicImage::ImageRgba8(_) => ColorMode::Rgba8,
            _ => ColorMode::Other,
        }
    }

    /// Whether this buffer carries no color channels
    pub fn is_grayscale(&self) -> bool {
        matches!(
            &self.image,
            DynamicImage::ImageLuma8(_)
                | DynamicImage::ImageLumaA8(_)
                | DynamicImage::ImageLuma16(_)
                | DynamicImage::ImageLumaA16(_)
        )
    }

    /// Borrow the underlying raster
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the buffer, yielding the underlying raster
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    /// Encode the buffer as PNG bytes
    pub fn encode_png(&self) -> OpsResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.image
            .write_to(&mut cursor, image::ImageFormat::Png)
            .map_err(|e| OpsError::Encode(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

impl From<DynamicImage> for ImageBuffer {
    fn from(image: DynamicImage) -> Self {
        ImageBuffer::new(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn rgb_buffer(width: u32, height: u32) -> ImageBuffer {
        let img = RgbImage::from_pixel(width, height, Rgb([10, 20, 30]));
        ImageBuffer::new(DynamicImage::ImageRgb8(img))
    }

    #[test]
    fn test_dimensions_and_mode() {
        let buffer = rgb_buffer(4, 3);
        assert_eq!(buffer.dimensions(), (4, 3));
        assert_eq!(buffer.color_mode(), ColorMode::Rgb8);
        assert!(!buffer.is_grayscale());
    }

    #[test]
    fn test_grayscale_detection() {
        let gray = image::GrayImage::from_pixel(2, 2, image::Luma([128]));
        let buffer = ImageBuffer::new(DynamicImage::ImageLuma8(gray));
        assert!(buffer.is_grayscale());
        assert_eq!(buffer.color_mode(), ColorMode::Luma8);
    }

    #[test]
    fn test_png_round_trip_preserves_dimensions() {
        let buffer = rgb_buffer(5, 7);
        let bytes = buffer.encode_png().unwrap();
        let decoded = ImageBuffer::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (5, 7));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = ImageBuffer::from_bytes(b"definitely not an image");
        assert!(matches!(result, Err(OpsError::Decode(_))));
    }
}
