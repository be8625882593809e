//! Floyd-Steinberg error diffusion dithering.
//!
//! The classic algorithm: distributes 100% of the quantization error to 4
//! neighbours, producing smooth gradients at low bit depths.

use crate::api::error::require_bits;
use crate::api::FilterError;
use crate::buffer::PixelBuffer;

use super::{diffuse_with_kernel, FLOYD_STEINBERG};

/// Quantize to `bits` bits per channel with Floyd-Steinberg error diffusion.
///
/// # Algorithm
///
/// Pixels are visited in row-major order. Each pixel's value plus the error
/// accumulated from earlier pixels is rounded to the nearest level, and the
/// rounding error is spread over the unvisited neighbours:
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
/// Error that would land outside the image is dropped.
///
/// The output is a deterministic function of the input and `bits`.
pub fn floyd_steinberg_dither(image: &mut PixelBuffer, bits: u8) -> Result<(), FilterError> {
    require_bits("floyd-steinberg-dither", bits)?;
    diffuse_with_kernel(image, bits, &FLOYD_STEINBERG);
    Ok(())
}
