//! Random (noise threshold) dithering.

use rand::Rng;

use crate::adjust::{levels_max, quantize_sample};
use crate::api::error::require_bits;
use crate::api::FilterError;
use crate::buffer::PixelBuffer;
use crate::color::Rgba;

/// Quantize to `bits` bits per channel after adding uniform noise.
///
/// Each color sample receives an independent offset drawn from
/// `[-step/2, step/2)`, where `step = 1 / (2^bits - 1)` is the distance
/// between two output levels, and is then rounded to the nearest level.
/// A sample that sits exactly on a level therefore never moves, and a sample
/// between two levels lands on the upper one with probability proportional
/// to its distance from the lower one.
///
/// Pixels are visited in row-major order and every draw comes from `rng`,
/// so a seeded generator reproduces the same output.
pub fn random_dither<R: Rng>(
    image: &mut PixelBuffer,
    bits: u8,
    rng: &mut R,
) -> Result<(), FilterError> {
    require_bits("random-dither", bits)?;
    let max = levels_max(bits);
    let half_step = 0.5 / max;

    let (width, height) = image.dims();
    for y in 0..height {
        for x in 0..width {
            let px = image.pixel(x, y);
            let mut jitter = || rng.gen_range(-half_step..half_step);
            let (dr, dg, db) = (jitter(), jitter(), jitter());
            image.set(
                x,
                y,
                Rgba::new(
                    quantize_sample(px.r + dr, max),
                    quantize_sample(px.g + dg, max),
                    quantize_sample(px.b + db, max),
                    px.a,
                ),
            );
        }
    }
    Ok(())
}
