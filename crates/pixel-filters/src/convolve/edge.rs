//! Sobel edge detection.
//!
//! Both detectors share [`edge_prefilter`] (grayscale, then the 3x3
//! Gaussian) so they see identical denoised input. [`edge_detect_base`] stops
//! after that stage; [`edge_detect`] continues with the gradient magnitude.

use crate::adjust::grayscale;
use crate::buffer::{BoundaryPolicy, PixelBuffer};
use crate::color::Rgba;

use super::{blur, Kernel, SOBEL_X, SOBEL_Y};

/// Grayscale followed by a 3x3 Gaussian blur.
pub fn edge_prefilter(image: &PixelBuffer, boundary: BoundaryPolicy) -> PixelBuffer {
    let mut gray = image.clone();
    grayscale(&mut gray);
    blur(&gray, boundary)
}

/// The pre-filter stage of [`edge_detect`] on its own.
pub fn edge_detect_base(image: &PixelBuffer, boundary: BoundaryPolicy) -> PixelBuffer {
    edge_prefilter(image, boundary)
}

/// Gradient magnitude `sqrt(gx² + gy²)` of the pre-filtered image.
///
/// Output is gray, clamped to 0.0..=1.0, with alpha from the source.
/// Flat regions map to black; a hard black/white step saturates to white.
pub fn edge_detect(image: &PixelBuffer, boundary: BoundaryPolicy) -> PixelBuffer {
    let smoothed = edge_prefilter(image, boundary);
    let kx = Kernel::from_3x3(SOBEL_X);
    let ky = Kernel::from_3x3(SOBEL_Y);
    smoothed.map_coords(|x, y| {
        // Gray input: the red channel carries the intensity
        let gx = kx.apply_at(&smoothed, x, y, boundary).r;
        let gy = ky.apply_at(&smoothed, x, y, boundary).r;
        let magnitude = (gx * gx + gy * gy).sqrt().clamp(0.0, 1.0);
        Rgba::new(magnitude, magnitude, magnitude, image.pixel(x, y).a)
    })
}
