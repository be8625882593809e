//! Additive uniform noise.

use rand::Rng;

use crate::api::error::require_non_negative;
use crate::api::FilterError;
use crate::buffer::PixelBuffer;
use crate::color::Rgba;

/// Amplitude used by the `-random-noise` flag unless configured otherwise.
pub const DEFAULT_NOISE_AMPLITUDE: f32 = 0.1;

/// Largest accepted amplitude; samples live in `0.0..=1.0`.
pub const MAX_NOISE_AMPLITUDE: f32 = 1.0;

/// Perturb every color sample by an independent draw from
/// `[-amplitude, amplitude]`, then clamp.
///
/// Draws happen in row-major order, three per pixel (r, g, b); alpha is
/// untouched. An amplitude of zero leaves the image unchanged; amplitudes
/// above [`MAX_NOISE_AMPLITUDE`] are rejected.
pub fn add_noise<R: Rng>(
    image: &mut PixelBuffer,
    amplitude: f32,
    rng: &mut R,
) -> Result<(), FilterError> {
    require_non_negative("random-noise", "amplitude", amplitude)?;
    if amplitude > MAX_NOISE_AMPLITUDE {
        return Err(FilterError::invalid(
            "random-noise",
            format!("amplitude must be at most {MAX_NOISE_AMPLITUDE}, got {amplitude}"),
        ));
    }
    if amplitude == 0.0 {
        return Ok(());
    }

    let (width, height) = image.dims();
    for y in 0..height {
        for x in 0..width {
            let px = image.pixel(x, y);
            let mut offset = || rng.gen_range(-amplitude..=amplitude);
            let noisy = Rgba::new(px.r + offset(), px.g + offset(), px.b + offset(), px.a);
            image.set(x, y, noisy.clamp());
        }
    }
    Ok(())
}
