//! Convolution primitive and the filters built on it.
//!
//! [`convolve`] is the shared building block of blur, sharpen and both edge
//! detectors. Reads that fall outside the image are answered by a
//! [`BoundaryPolicy`], so the output always has the input's dimensions.
//!
//! Kernels are applied in correlation form: the weight at row `j`, column
//! `i` multiplies the source pixel at `(x + i - ax, y + j - ay)` where
//! `(ax, ay)` is the anchor. For the symmetric kernels used here this is
//! indistinguishable from true convolution; for Sobel it fixes the sign
//! convention, which the gradient magnitude discards anyway.

mod edge;
mod kernels;

pub use edge::{edge_detect, edge_detect_base, edge_prefilter};
pub use kernels::{GAUSSIAN_3X3, SHARPEN_3X3, SOBEL_X, SOBEL_Y};

use crate::api::FilterError;
use crate::buffer::{BoundaryPolicy, PixelBuffer};
use crate::color::Rgba;

/// Immutable 2D weight grid plus an anchor offset.
///
/// # Example
///
/// ```
/// use pixel_filters::convolve::{Kernel, GAUSSIAN_3X3};
///
/// let blur = Kernel::from_3x3(GAUSSIAN_3X3);
/// assert_eq!(blur.dims(), (3, 3));
/// assert_eq!(blur.anchor(), (1, 1));
/// assert!((blur.sum() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    width: usize,
    height: usize,
    anchor: (usize, usize),
    weights: Vec<f32>,
}

impl Kernel {
    /// Build a kernel anchored at its center (`(width / 2, height / 2)`).
    pub fn new(width: usize, height: usize, weights: Vec<f32>) -> Result<Self, FilterError> {
        Self::with_anchor(width, height, (width / 2, height / 2), weights)
    }

    /// Build a kernel with an explicit anchor.
    pub fn with_anchor(
        width: usize,
        height: usize,
        anchor: (usize, usize),
        weights: Vec<f32>,
    ) -> Result<Self, FilterError> {
        if width == 0 || height == 0 || weights.len() != width * height {
            return Err(FilterError::invalid(
                "kernel",
                format!("{} weights do not form a {}x{} kernel", weights.len(), width, height),
            ));
        }
        if anchor.0 >= width || anchor.1 >= height {
            return Err(FilterError::invalid(
                "kernel",
                format!("anchor {:?} lies outside a {}x{} kernel", anchor, width, height),
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(FilterError::invalid("kernel", "weights must be finite"));
        }
        Ok(Self {
            width,
            height,
            anchor,
            weights,
        })
    }

    /// A centered 3x3 kernel from rows of weights.
    pub fn from_3x3(rows: [[f32; 3]; 3]) -> Self {
        Self {
            width: 3,
            height: 3,
            anchor: (1, 1),
            weights: rows.iter().flatten().copied().collect(),
        }
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Anchor `(ax, ay)`: the kernel cell aligned with the output pixel.
    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }

    /// Weight at column `i`, row `j`.
    pub fn weight(&self, i: usize, j: usize) -> f32 {
        self.weights[j * self.width + i]
    }

    /// Sum of all weights (1.0 for brightness-preserving kernels).
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Weighted sum of the neighbourhood of `(x, y)`.
    ///
    /// Color channels are accumulated; alpha is taken from the source pixel
    /// at `(x, y)`. The result is not clamped.
    pub fn apply_at(&self, image: &PixelBuffer, x: u32, y: u32, boundary: BoundaryPolicy) -> Rgba {
        let (ax, ay) = (self.anchor.0 as i64, self.anchor.1 as i64);
        let mut acc = Rgba::new(0.0, 0.0, 0.0, 0.0);
        for j in 0..self.height {
            let sy = y as i64 + j as i64 - ay;
            for i in 0..self.width {
                let w = self.weight(i, j);
                if w == 0.0 {
                    continue;
                }
                let sx = x as i64 + i as i64 - ax;
                let src = image.get_or(sx, sy, boundary);
                acc.r += src.r * w;
                acc.g += src.g * w;
                acc.b += src.b * w;
            }
        }
        acc.a = image.pixel(x, y).a;
        acc
    }
}

/// Convolve every pixel of `image` with `kernel`.
///
/// The output has the same dimensions as the input and is **not** clamped,
/// so gradient kernels keep their sign and magnitude. Rows are computed in
/// parallel.
pub fn convolve(image: &PixelBuffer, kernel: &Kernel, boundary: BoundaryPolicy) -> PixelBuffer {
    image.map_coords(|x, y| kernel.apply_at(image, x, y, boundary))
}

/// 3x3 Gaussian blur, clamped.
pub fn blur(image: &PixelBuffer, boundary: BoundaryPolicy) -> PixelBuffer {
    clamped(convolve(image, &Kernel::from_3x3(GAUSSIAN_3X3), boundary))
}

/// Unsharp-mask sharpen (`2 * identity - blur`), clamped.
pub fn sharpen(image: &PixelBuffer, boundary: BoundaryPolicy) -> PixelBuffer {
    clamped(convolve(image, &Kernel::from_3x3(SHARPEN_3X3), boundary))
}

fn clamped(mut image: PixelBuffer) -> PixelBuffer {
    image.map_pixels(Rgba::clamp);
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_fn(w, h, |x, y| Rgba::gray(((x + y) % 2) as f32)).unwrap()
    }

    #[test]
    fn test_kernel_rejects_bad_shape() {
        assert!(Kernel::new(3, 3, vec![0.0; 8]).is_err());
        assert!(Kernel::new(0, 3, Vec::new()).is_err());
        assert!(Kernel::with_anchor(3, 3, (3, 0), vec![0.0; 9]).is_err());
        assert!(Kernel::new(1, 1, vec![f32::NAN]).is_err());
    }

    #[test]
    fn test_identity_kernel_is_identity() {
        let image = checker(5, 4);
        let identity = Kernel::new(1, 1, vec![1.0]).unwrap();
        assert_eq!(convolve(&image, &identity, BoundaryPolicy::Clamp), image);
    }

    #[test]
    fn test_off_center_anchor_shifts() {
        // A 2x1 kernel [0, 1] anchored at column 0 reads the right neighbour
        let image = PixelBuffer::from_fn(3, 1, |x, _| Rgba::gray(x as f32 / 2.0)).unwrap();
        let kernel = Kernel::with_anchor(2, 1, (0, 0), vec![0.0, 1.0]).unwrap();
        let out = convolve(&image, &kernel, BoundaryPolicy::Clamp);
        assert_eq!(out.pixel(0, 0).r, 0.5);
        assert_eq!(out.pixel(1, 0).r, 1.0);
        // Clamp repeats the last column
        assert_eq!(out.pixel(2, 0).r, 1.0);
    }

    #[test]
    fn test_blur_keeps_flat_regions() {
        let image = PixelBuffer::filled(6, 6, Rgba::gray(0.4)).unwrap();
        let out = blur(&image, BoundaryPolicy::Clamp);
        for px in out.pixels() {
            assert!((px.r - 0.4).abs() < 1e-6);
        }
    }

    #[test]
    fn test_blur_smooths_checkerboard() {
        let out = blur(&checker(6, 6), BoundaryPolicy::Clamp);
        let center = out.pixel(3, 3).r;
        assert!(center > 0.3 && center < 0.7, "center = {center}");
    }

    #[test]
    fn test_blur_zero_boundary_darkens_corner() {
        let image = PixelBuffer::filled(4, 4, Rgba::WHITE).unwrap();
        let out = blur(&image, BoundaryPolicy::Zero);
        // Corner sees 4 of the 16 weight units outside: 9/16 stays inside
        assert!((out.pixel(0, 0).r - 9.0 / 16.0).abs() < 1e-6);
        assert!((out.pixel(1, 1).r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sharpen_keeps_flat_regions() {
        let image = PixelBuffer::filled(5, 5, Rgba::gray(0.6)).unwrap();
        let out = sharpen(&image, BoundaryPolicy::Clamp);
        for px in out.pixels() {
            assert!((px.r - 0.6).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sharpen_amplifies_step() {
        let image =
            PixelBuffer::from_fn(6, 1, |x, _| Rgba::gray(if x < 3 { 0.4 } else { 0.6 })).unwrap();
        let out = sharpen(&image, BoundaryPolicy::Clamp);
        assert!(out.pixel(2, 0).r < 0.4);
        assert!(out.pixel(3, 0).r > 0.6);
    }

    #[test]
    fn test_convolve_keeps_alpha() {
        let image = PixelBuffer::filled(3, 3, Rgba::new(0.5, 0.5, 0.5, 0.3)).unwrap();
        let out = blur(&image, BoundaryPolicy::Zero);
        assert!(out.pixels().all(|px| px.a == 0.3));
    }
}
