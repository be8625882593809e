//! Dithering: quantization to `2^bits` levels per channel.
//!
//! Two strategies are provided:
//!
//! - [`random_dither`]: uniform noise of one quantization step is added to
//!   each sample before rounding. Pixels are independent, but the RNG is
//!   drawn sequentially so a seeded generator gives reproducible output.
//! - [`floyd_steinberg_dither`]: error diffusion in strict raster order.
//!   Each pixel's quantization error is pushed onto its unvisited
//!   neighbours, so the scan must never be reordered or parallelized.
//!
//! The `bits` parameter is the output bit depth per channel (1..=8).

mod floyd_steinberg;
mod kernel;
mod random;

pub use floyd_steinberg::floyd_steinberg_dither;
pub use kernel::{DiffusionKernel, FLOYD_STEINBERG};
pub use random::random_dither;

use crate::adjust::{levels_max, quantize_sample};
use crate::buffer::PixelBuffer;
use crate::color::Rgba;

/// Error buffer for error diffusion.
///
/// Keeps a sliding window of error rows, storing only the rows that the
/// diffusion kernel can reach (`max_dy + 1`). This avoids allocating a
/// full-image error buffer.
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After processing pixel, distribute error with `add_error(x, dy, error)`
///    c. After row complete, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    /// Error rows: rows[0] is current row, rows[1] is next, etc.
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a new error buffer `row_depth` rows deep.
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Accumulated RGB error for a pixel in the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add error to a pixel `row_offset` rows below the current one.
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    /// Advance to the next row.
    ///
    /// The first row is discarded, later rows shift forward and a zeroed row
    /// is appended.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Error diffusion loop shared by every kernel.
///
/// Scans rows top to bottom and pixels left to right. Alpha is copied.
pub(crate) fn diffuse_with_kernel(image: &mut PixelBuffer, bits: u8, kernel: &DiffusionKernel) {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let max = levels_max(bits);
    let divisor = kernel.divisor as f32;
    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);

    for y in 0..height {
        for x in 0..width {
            let src = image.pixel(x as u32, y as u32);
            let accumulated = error_buf.get_accumulated(x);
            let wanted = [
                src.r + accumulated[0],
                src.g + accumulated[1],
                src.b + accumulated[2],
            ];
            let chosen = wanted.map(|v| quantize_sample(v, max));
            image.set(
                x as u32,
                y as u32,
                Rgba::new(chosen[0], chosen[1], chosen[2], src.a),
            );

            let error = [
                wanted[0] - chosen[0],
                wanted[1] - chosen[1],
                wanted[2] - chosen[2],
            ];
            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                if nx < 0 || nx as usize >= width || y + dy as usize >= height {
                    continue;
                }
                let share = weight as f32 / divisor;
                error_buf.add_error(
                    nx as usize,
                    dy as usize,
                    [error[0] * share, error[1] * share, error[2] * share],
                );
            }
        }
        error_buf.advance_row();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_buffer_accumulates() {
        let mut buf = ErrorBuffer::new(3, 2);
        buf.add_error(1, 0, [0.1, 0.2, 0.3]);
        buf.add_error(1, 0, [0.1, 0.0, 0.0]);
        let acc = buf.get_accumulated(1);
        assert!((acc[0] - 0.2).abs() < 1e-6);
        assert!((acc[2] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_error_buffer_advance_row_shifts() {
        let mut buf = ErrorBuffer::new(2, 2);
        buf.add_error(0, 1, [0.5, 0.5, 0.5]);
        assert_eq!(buf.get_accumulated(0), [0.0; 3]);
        buf.advance_row();
        assert_eq!(buf.get_accumulated(0), [0.5; 3]);
        buf.advance_row();
        assert_eq!(buf.get_accumulated(0), [0.0; 3]);
    }

    #[test]
    fn test_error_buffer_ignores_out_of_bounds() {
        let mut buf = ErrorBuffer::new(2, 2);
        buf.add_error(5, 0, [1.0; 3]);
        buf.add_error(0, 7, [1.0; 3]);
        assert_eq!(buf.get_accumulated(0), [0.0; 3]);
        assert_eq!(buf.get_accumulated(1), [0.0; 3]);
    }
}
