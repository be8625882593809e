//! Geometric resampling: crop, rotate and scale.
//!
//! Rotate and scale use inverse mapping: every destination pixel center is
//! mapped back into source space and the source is sampled there with a
//! [`Sampler`]. Pixel centers sit at `i + 0.5` in continuous coordinates, so
//! a source position `s` corresponds to the fractional index `s - 0.5`.
//!
//! Crop copies pixels verbatim and never interpolates.

mod crop;
mod rotate;
mod sampler;
mod scale;

pub use crop::crop;
pub use rotate::{rotated_dims, rotate};
pub use sampler::{GaussianParams, InterpolationMode, Sampler};
pub use scale::{scale, scaled_dims};
