//! Geometric transforms

use image::imageops::FilterType;
use image::DynamicImage;

use crate::operation::FlipDirection;

/// Rotate counter-clockwise by any angle, expanding the canvas to fit.
///
/// Multiples of 90 degrees are lossless; other angles resample into an RGBA
/// canvas with transparent fill outside the source frame.
pub fn rotate(image: &DynamicImage, degrees: i32) -> DynamicImage {
    match degrees.rem_euclid(360) {
        0 => image.clone(),
        90 => image.rotate270(),
        180 => image.rotate180(),
        270 => image.rotate90(),
        deg => rotate_arbitrary(image, deg as f32),
    }
}

fn rotate_arbitrary(image: &DynamicImage, degrees: f32) -> DynamicImage {
    let theta = degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let src = image.to_rgba8();
    let (src_w, src_h) = src.dimensions();
    let (w, h) = (src_w as f32, src_h as f32);

    let out_w = (w * cos.abs() + h * sin.abs()).ceil().max(1.0) as u32;
    let out_h = (w * sin.abs() + h * cos.abs()).ceil().max(1.0) as u32;
    let (src_cx, src_cy) = ((w - 1.0) / 2.0, (h - 1.0) / 2.0);
    let (dst_cx, dst_cy) = ((out_w as f32 - 1.0) / 2.0, (out_h as f32 - 1.0) / 2.0);

    let mut out = image::RgbaImage::new(out_w, out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            let dx = x as f32 - dst_cx;
            let dy = y as f32 - dst_cy;
            // Inverse mapping back into the source frame
            let sx = (dx * cos - dy * sin + src_cx).round();
            let sy = (dx * sin + dy * cos + src_cy).round();
            if sx >= 0.0 && sy >= 0.0 && (sx as u32) < src_w && (sy as u32) < src_h {
                out.put_pixel(x, y, *src.get_pixel(sx as u32, sy as u32));
            }
        }
    }
    DynamicImage::ImageRgba8(out)
}

/// Mirror across the requested axis
pub fn flip(image: &DynamicImage, direction: FlipDirection) -> DynamicImage {
    match direction {
        FlipDirection::Horizontal => image.fliph(),
        FlipDirection::Vertical => image.flipv(),
    }
}

/// Crop to the validated rectangle; edges beyond the frame are clamped
pub fn crop(image: &DynamicImage, left: u32, top: u32, right: u32, bottom: u32) -> DynamicImage {
    image.crop_imm(left, top, right - left, bottom - top)
}

/// Resize to exactly the requested dimensions with Lanczos resampling
pub fn resize(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    image.resize_exact(width, height, FilterType::Lanczos3)
}
