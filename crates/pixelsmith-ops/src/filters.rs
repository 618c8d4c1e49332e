//! Tonal and convolution filters
//!
//! Each filter produces a new raster; the base image is never touched.

use image::{DynamicImage, Luma, Rgb};

use crate::buffer::ImageBuffer;
use crate::error::{OpsError, OpsResult};

/// Drop the color channels
pub fn grayscale(image: &DynamicImage) -> DynamicImage {
    image.grayscale()
}

/// Apply the sepia tone matrix
pub fn sepia(base: &ImageBuffer) -> OpsResult<DynamicImage> {
    ensure_color(base, "sepia")?;
    let mut rgb = base.as_dynamic().to_rgb8();
    for pixel in rgb.pixels_mut() {
        let [r, g, b] = pixel.0;
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let tr = (0.393 * r + 0.769 * g + 0.189 * b).min(255.0) as u8;
        let tg = (0.349 * r + 0.686 * g + 0.168 * b).min(255.0) as u8;
        let tb = (0.272 * r + 0.534 * g + 0.131 * b).min(255.0) as u8;
        *pixel = Rgb([tr, tg, tb]);
    }
    Ok(DynamicImage::ImageRgb8(rgb))
}

/// Boost the red and green channels for a warm tone
pub fn warm(base: &ImageBuffer) -> OpsResult<DynamicImage> {
    ensure_color(base, "warm")?;
    let mut rgb = base.as_dynamic().to_rgb8();
    for pixel in rgb.pixels_mut() {
        let [r, g, b] = pixel.0;
        let tr = (r as f32 * 1.2).min(255.0) as u8;
        let tg = (g as f32 * 1.1).min(255.0) as u8;
        *pixel = Rgb([tr, tg, b]);
    }
    Ok(DynamicImage::ImageRgb8(rgb))
}

/// Sharpen with an unsharp mask scaled by `factor`
pub fn sharpen(image: &DynamicImage, factor: f32) -> DynamicImage {
    if factor == 0.0 {
        return image.clone();
    }
    image.unsharpen(factor, 0)
}

/// Gaussian blur by `radius`
pub fn blur(image: &DynamicImage, radius: f32) -> DynamicImage {
    if radius == 0.0 {
        return image.clone();
    }
    image.blur(radius)
}

/// Sobel gradient magnitude on the luma plane
pub fn edge(image: &DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    let mut out = image::GrayImage::new(width, height);
    if width < 3 || height < 3 {
        return DynamicImage::ImageLuma8(out);
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let sample = |dx: i32, dy: i32| -> i32 {
                let px = (x as i32 + dx) as u32;
                let py = (y as i32 + dy) as u32;
                gray.get_pixel(px, py).0[0] as i32
            };
            let gx = sample(1, -1) + 2 * sample(1, 0) + sample(1, 1)
                - sample(-1, -1)
                - 2 * sample(-1, 0)
                - sample(-1, 1);
            let gy = sample(-1, 1) + 2 * sample(0, 1) + sample(1, 1)
                - sample(-1, -1)
                - 2 * sample(0, -1)
                - sample(1, -1);
            let magnitude = (((gx * gx + gy * gy) as f64).sqrt()).min(255.0) as u8;
            out.put_pixel(x, y, Luma([magnitude]));
        }
    }
    DynamicImage::ImageLuma8(out)
}

fn ensure_color(base: &ImageBuffer, operation: &'static str) -> OpsResult<()> {
    if base.is_grayscale() {
        return Err(OpsError::UnsupportedColorMode {
            operation,
            mode: base.color_mode().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;
    use image::RgbImage;

    fn rgb_buffer(r: u8, g: u8, b: u8) -> ImageBuffer {
        let img = RgbImage::from_pixel(8, 8, Rgb([r, g, b]));
        ImageBuffer::new(DynamicImage::ImageRgb8(img))
    }

    fn gray_buffer() -> ImageBuffer {
        let img = image::GrayImage::from_pixel(8, 8, Luma([128]));
        ImageBuffer::new(DynamicImage::ImageLuma8(img))
    }

    #[test]
    fn test_grayscale_output_is_luma() {
        let base = rgb_buffer(200, 40, 90);
        let out = ImageBuffer::new(grayscale(base.as_dynamic()));
        assert_eq!(out.color_mode(), ColorMode::Luma8);
        assert_eq!(out.dimensions(), base.dimensions());
    }

    #[test]
    fn test_sepia_orders_channels_warm_to_cool() {
        let base = rgb_buffer(128, 128, 128);
        let out = sepia(&base).unwrap().to_rgb8();
        let [r, g, b] = out.get_pixel(0, 0).0;
        assert!(r > g && g > b, "sepia of gray should be {} > {} > {}", r, g, b);
    }

    #[test]
    fn test_sepia_rejects_grayscale_input() {
        let err = sepia(&gray_buffer()).unwrap_err();
        assert!(matches!(
            err,
            OpsError::UnsupportedColorMode {
                operation: "sepia",
                ..
            }
        ));
    }

    #[test]
    fn test_warm_boosts_red_and_green_only() {
        let base = rgb_buffer(100, 100, 100);
        let out = warm(&base).unwrap().to_rgb8();
        let [r, g, b] = out.get_pixel(3, 3).0;
        assert_eq!(r, 120);
        assert_eq!(g, 110);
        assert_eq!(b, 100);
    }

    #[test]
    fn test_warm_clamps_at_white() {
        let base = rgb_buffer(250, 250, 250);
        let out = warm(&base).unwrap().to_rgb8();
        let [r, g, _] = out.get_pixel(0, 0).0;
        assert_eq!(r, 255);
        assert_eq!(g, 255);
    }

    #[test]
    fn test_blur_and_sharpen_preserve_dimensions() {
        let base = rgb_buffer(10, 200, 60);
        assert_eq!(blur(base.as_dynamic(), 2.0).width(), 8);
        assert_eq!(sharpen(base.as_dynamic(), 1.5).height(), 8);
    }

    #[test]
    fn test_zero_strength_filters_are_identity() {
        let base = rgb_buffer(10, 200, 60);
        let blurred = blur(base.as_dynamic(), 0.0).to_rgb8();
        assert_eq!(blurred.get_pixel(4, 4).0, [10, 200, 60]);
    }

    #[test]
    fn test_edge_of_uniform_image_is_black_interior() {
        let base = rgb_buffer(77, 77, 77);
        let out = edge(base.as_dynamic()).to_luma8();
        assert_eq!(out.get_pixel(4, 4).0, [0]);
        assert_eq!(out.dimensions(), (8, 8));
    }

    #[test]
    fn test_edge_detects_vertical_boundary() {
        let mut img = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));
        for y in 0..8 {
            for x in 4..8 {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let out = edge(&DynamicImage::ImageRgb8(img)).to_luma8();
        assert!(out.get_pixel(4, 4).0[0] > 0);
        assert_eq!(out.get_pixel(1, 4).0[0], 0);
    }
}
