#![allow(clippy::needless_range_loop, clippy::manual_range_contains)]

//! pixel-filters: the pixel engine behind `imgfx`
//!
//! Images live in a [`PixelBuffer`] of `f32` RGBA samples in `0.0..=1.0`.
//! Every transform is a plain function over that buffer, and [`Operation`]
//! ties them together as flag-selected pipeline steps.
//!
//! # Quick Start
//!
//! ```
//! use pixel_filters::{FilterContext, Operation, PixelBuffer, Rgba};
//!
//! let image = PixelBuffer::filled(4, 4, Rgba::from_u8(100, 100, 100, 255)).unwrap();
//! let mut ctx = FilterContext::default();
//!
//! let mut current = image;
//! for step in [Operation::Brighten(2.0), Operation::Grayscale, Operation::Blur] {
//!     current = step.apply(current, &mut ctx).unwrap();
//! }
//! assert_eq!(current.pixel(0, 0).to_u8()[0], 200);
//! ```
//!
//! # Modules
//!
//! - [`adjust`]: brighten, contrast, saturation, channel, grayscale,
//!   quantize, black/white threshold
//! - [`dither`]: random and Floyd-Steinberg dithering
//! - [`convolve`]: the convolution primitive, blur, sharpen, edge detection
//! - [`noise`]: uniform noise injection
//! - [`resample`]: crop, rotate, scale with nearest, bilinear or Gaussian
//!   sampling
//!
//! # Concurrency
//!
//! Buffer construction, per-pixel maps and convolution rows run on the rayon
//! pool. Error diffusion and every operation that draws random numbers scan
//! sequentially, so results never depend on thread scheduling.

pub mod adjust;
pub mod api;
pub mod buffer;
pub mod color;
pub mod convolve;
pub mod dither;
pub mod noise;
pub mod resample;

#[cfg(test)]
mod domain_tests;

pub use api::{FilterContext, FilterError, Operation, Tuning};
pub use buffer::{BoundaryPolicy, PixelBuffer};
pub use color::{Channel, Rgba};
pub use resample::InterpolationMode;
