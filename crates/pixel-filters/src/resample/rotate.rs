use crate::api::error::require_finite;
use crate::api::FilterError;
use crate::buffer::{check_dims, PixelBuffer};
use crate::color::Rgba;

use super::Sampler;

/// Slack for floating-point error at the source edge.
const EDGE_EPSILON: f64 = 1e-6;

/// Size of the canvas holding a `width x height` image rotated by `degrees`.
///
/// Fails when the bounding box would exceed
/// [`MAX_PIXELS`](crate::buffer::MAX_PIXELS).
pub fn rotated_dims(width: u32, height: u32, degrees: f32) -> Result<(u32, u32), FilterError> {
    let theta = (degrees as f64).to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (w, h) = (width as f64, height as f64);
    let out_w = (w * cos + h * sin).round().clamp(1.0, u32::MAX as f64) as u32;
    let out_h = (w * sin + h * cos).round().clamp(1.0, u32::MAX as f64) as u32;
    check_dims("rotate", out_w, out_h)?;
    Ok((out_w, out_h))
}

/// Rotate about the image center by `degrees`, counter-clockwise on screen.
///
/// The canvas grows to the rotated bounding box (see [`rotated_dims`]).
/// Destination pixels whose source position falls outside the image are
/// transparent black. A whole multiple of 360 returns an exact copy.
///
/// # Example
///
/// ```
/// use pixel_filters::resample::{rotate, Sampler};
/// use pixel_filters::{PixelBuffer, Rgba};
///
/// let image = PixelBuffer::filled(30, 10, Rgba::WHITE).unwrap();
/// let turned = rotate(&image, 90.0, Sampler::default()).unwrap();
/// assert_eq!(turned.dims(), (10, 30));
/// ```
pub fn rotate(
    image: &PixelBuffer,
    degrees: f32,
    sampler: Sampler,
) -> Result<PixelBuffer, FilterError> {
    require_finite("rotate", "angle", degrees)?;
    if degrees % 360.0 == 0.0 {
        return Ok(image.clone());
    }

    let (width, height) = image.dims();
    let (out_w, out_h) = rotated_dims(width, height, degrees)?;
    let theta = (degrees as f64).to_radians();
    let (sin, cos) = theta.sin_cos();
    let (src_cx, src_cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let (dst_cx, dst_cy) = (out_w as f64 / 2.0, out_h as f64 / 2.0);
    let (max_x, max_y) = (width as f64 + EDGE_EPSILON, height as f64 + EDGE_EPSILON);

    PixelBuffer::from_fn(out_w, out_h, |x, y| {
        let dx = x as f64 + 0.5 - dst_cx;
        let dy = y as f64 + 0.5 - dst_cy;
        // Inverse of the on-screen counter-clockwise turn (y points down)
        let sx = cos * dx - sin * dy + src_cx;
        let sy = sin * dx + cos * dy + src_cy;
        if sx < -EDGE_EPSILON || sy < -EDGE_EPSILON || sx > max_x || sy > max_y {
            return Rgba::TRANSPARENT;
        }
        sampler.sample(image, (sx - 0.5) as f32, (sy - 0.5) as f32)
    })
}
