use crate::api::error::require_positive;
use crate::api::FilterError;
use crate::buffer::{check_dims, PixelBuffer};

use super::Sampler;

/// Output size for scaling `width x height` by `(fx, fy)`, rounded.
///
/// Fails when either side rounds to zero, or when the result would exceed
/// [`MAX_PIXELS`](crate::buffer::MAX_PIXELS).
pub fn scaled_dims(
    width: u32,
    height: u32,
    fx: f32,
    fy: f32,
) -> Result<(u32, u32), FilterError> {
    require_positive("scale", "x factor", fx)?;
    require_positive("scale", "y factor", fy)?;
    let out_w = (width as f64 * fx as f64).round();
    let out_h = (height as f64 * fy as f64).round();
    if out_w < 1.0 || out_h < 1.0 || out_w > u32::MAX as f64 || out_h > u32::MAX as f64 {
        return Err(FilterError::out_of_bounds(
            "scale",
            format!("{width}x{height} scaled by ({fx}, {fy}) gives a {out_w}x{out_h} image"),
        ));
    }
    let (out_w, out_h) = (out_w as u32, out_h as u32);
    check_dims("scale", out_w, out_h)?;
    Ok((out_w, out_h))
}

/// Resize by independent horizontal and vertical factors.
///
/// Destination pixel `x` samples the source at fractional index
/// `(x + 0.5) / fx - 0.5`, and likewise for `y`. The Gaussian window is
/// widened separately on each axis that shrinks.
pub fn scale(
    image: &PixelBuffer,
    fx: f32,
    fy: f32,
    sampler: Sampler,
) -> Result<PixelBuffer, FilterError> {
    let (width, height) = image.dims();
    let (out_w, out_h) = scaled_dims(width, height, fx, fy)?;
    let sampler = sampler.for_factors(fx, fy);
    PixelBuffer::from_fn(out_w, out_h, |x, y| {
        let sx = (x as f32 + 0.5) / fx - 0.5;
        let sy = (y as f32 + 0.5) / fy - 0.5;
        sampler.sample(image, sx, sy)
    })
}
