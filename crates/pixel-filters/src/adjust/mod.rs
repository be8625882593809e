//! Per-pixel color adjustments.
//!
//! Every function here is a pure pixel-wise map applied in place: no pixel
//! depends on its neighbours, dimensions never change, alpha is carried
//! through, and results are clamped to 0.0..=1.0.
//!
//! | Operation | Formula |
//! |-----------|---------|
//! | [`brighten`] | `v * factor` |
//! | [`contrast`] | `0.5 + (v - 0.5) * factor` |
//! | [`saturation`] | `luma + (v - luma) * factor` |
//! | [`channel`] | keep one channel, zero the other two |
//! | [`grayscale`] | `r = g = b = luma` |
//! | [`quantize`] | round to `2^bits` levels |
//! | [`threshold`] | `luma > cutoff` → white, else black |
//!
//! Luma uses the BT.601 weights from [`crate::color`], so `saturation(0)`
//! and `grayscale` produce identical buffers.

use crate::api::error::{require_bits, require_finite, require_non_negative, require_positive};
use crate::api::FilterError;
use crate::buffer::PixelBuffer;
use crate::color::{Channel, Rgba};

/// Contrast pivots around this value.
pub const CONTRAST_MIDPOINT: f32 = 0.5;

/// Multiply r, g and b by `factor`.
///
/// `factor` in (0, 1) darkens, above 1 brightens.
///
/// # Example
///
/// ```
/// use pixel_filters::{adjust, PixelBuffer, Rgba};
///
/// let mut image = PixelBuffer::filled(1, 1, Rgba::from_u8(100, 200, 0, 255)).unwrap();
/// adjust::brighten(&mut image, 2.0).unwrap();
/// assert_eq!(image.pixel(0, 0).to_u8(), [200, 255, 0, 255]);
/// ```
pub fn brighten(image: &mut PixelBuffer, factor: f32) -> Result<(), FilterError> {
    require_positive("brighten", "factor", factor)?;
    image.map_pixels(|px| px.map_rgb(|v| v * factor).clamp());
    Ok(())
}

/// Scale each sample's distance from the midpoint by `factor`.
///
/// `0` collapses the image to mid-gray, `1` leaves it untouched (bit-exact),
/// values above 1 expand contrast.
pub fn contrast(image: &mut PixelBuffer, factor: f32) -> Result<(), FilterError> {
    require_non_negative("contrast", "factor", factor)?;
    if (factor - 1.0).abs() <= f32::EPSILON {
        return Ok(());
    }
    image.map_pixels(|px| {
        px.map_rgb(|v| CONTRAST_MIDPOINT + (v - CONTRAST_MIDPOINT) * factor)
            .clamp()
    });
    Ok(())
}

/// Interpolate between each pixel's luma and its color.
///
/// `0` yields grayscale, `1` is the identity, values above 1 extrapolate
/// away from gray.
pub fn saturation(image: &mut PixelBuffer, factor: f32) -> Result<(), FilterError> {
    require_non_negative("saturation", "factor", factor)?;
    if (factor - 1.0).abs() <= f32::EPSILON {
        return Ok(());
    }
    if factor == 0.0 {
        grayscale(image);
        return Ok(());
    }
    image.map_pixels(|px| {
        let l = px.luma();
        px.map_rgb(|v| l + (v - l) * factor).clamp()
    });
    Ok(())
}

/// Keep only `which`; the other two color channels become zero.
pub fn channel(image: &mut PixelBuffer, which: Channel) {
    image.map_pixels(|px| isolate(px, which));
}

#[inline]
fn isolate(px: Rgba, which: Channel) -> Rgba {
    let mut out = Rgba::new(0.0, 0.0, 0.0, px.a);
    match which {
        Channel::Red => out.r = px.r,
        Channel::Green => out.g = px.g,
        Channel::Blue => out.b = px.b,
    }
    out
}

/// Replace r, g and b with the pixel's luma.
pub fn grayscale(image: &mut PixelBuffer) {
    image.map_pixels(to_gray);
}

#[inline]
pub(crate) fn to_gray(px: Rgba) -> Rgba {
    let l = px.luma().clamp(0.0, 1.0);
    Rgba::new(l, l, l, px.a)
}

/// Round each color sample to one of `2^bits` evenly spaced levels.
pub fn quantize(image: &mut PixelBuffer, bits: u8) -> Result<(), FilterError> {
    require_bits("quantize", bits)?;
    let max = levels_max(bits);
    image.map_pixels(|px| px.clamp().map_rgb(|v| quantize_sample(v, max)));
    Ok(())
}

/// Highest level index for `bits` bits per channel (`2^bits - 1`).
#[inline]
pub(crate) fn levels_max(bits: u8) -> f32 {
    ((1u32 << bits) - 1) as f32
}

/// Round `v` to the nearest of `max + 1` levels in 0.0..=1.0.
#[inline]
pub(crate) fn quantize_sample(v: f32, max: f32) -> f32 {
    ((v * max).round() / max).clamp(0.0, 1.0)
}

/// Map pixels brighter than `cutoff` to white and the rest to black.
pub fn threshold(image: &mut PixelBuffer, cutoff: f32) -> Result<(), FilterError> {
    require_finite("black-white", "cutoff", cutoff)?;
    image.map_pixels(|px| {
        let n = if px.luma() > cutoff { 1.0 } else { 0.0 };
        Rgba::new(n, n, n, px.a)
    });
    Ok(())
}
