//! One pipeline step and its dispatch.

use std::fmt;

use crate::adjust;
use crate::buffer::PixelBuffer;
use crate::color::Channel;
use crate::convolve;
use crate::dither;
use crate::noise;
use crate::resample::{self, InterpolationMode};

use super::error::{require_bits, require_finite, require_non_negative, require_positive};
use super::{FilterContext, FilterError};

/// A transform selected by one command-line flag, with its parameters.
///
/// Steps run in the order they were given; each one consumes the current
/// buffer and returns its successor.
///
/// # Example
///
/// ```
/// use pixel_filters::{FilterContext, Operation, PixelBuffer, Rgba};
///
/// let mut ctx = FilterContext::default();
/// let image = PixelBuffer::filled(100, 50, Rgba::gray(0.5)).unwrap();
/// let image = Operation::Scale(2.0, 1.0).apply(image, &mut ctx).unwrap();
/// assert_eq!(image.dims(), (200, 50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Brighten(f32),
    Contrast(f32),
    Saturation(f32),
    Channel(Channel),
    Grayscale,
    /// Round to `2^bits` levels per channel.
    Quantize(u8),
    /// Luma threshold to pure black and white.
    BlackWhite(f32),
    /// Parameter is the output bit depth.
    RandomDither(u8),
    /// Parameter is the output bit depth.
    FloydSteinbergDither(u8),
    EdgeDetect,
    EdgeDetectBase,
    RandomNoise,
    Sharpen,
    Blur,
    /// Change the interpolation used by later rotate and scale steps.
    Sample(InterpolationMode),
    Crop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Degrees, counter-clockwise.
    Rotate(f32),
    /// Horizontal and vertical factors.
    Scale(f32, f32),
}

impl Operation {
    /// Flag name without the leading dash.
    pub fn flag(&self) -> &'static str {
        match self {
            Operation::Brighten(_) => "brighten",
            Operation::Contrast(_) => "contrast",
            Operation::Saturation(_) => "saturation",
            Operation::Channel(_) => "channel",
            Operation::Grayscale => "grayscale",
            Operation::Quantize(_) => "quantize",
            Operation::BlackWhite(_) => "black-white",
            Operation::RandomDither(_) => "random-dither",
            Operation::FloydSteinbergDither(_) => "floyd-steinberg-dither",
            Operation::EdgeDetect => "edge-detect",
            Operation::EdgeDetectBase => "edge-detect-base",
            Operation::RandomNoise => "random-noise",
            Operation::Sharpen => "sharpen",
            Operation::Blur => "blur",
            Operation::Sample(_) => "sample",
            Operation::Crop { .. } => "crop",
            Operation::Rotate(_) => "rotate",
            Operation::Scale(..) => "scale",
        }
    }

    /// Check parameters that can be judged without an image.
    ///
    /// Geometry that depends on the source size (crop rectangles, scaled
    /// dimensions) is checked again by [`apply`](Self::apply).
    pub fn validate(&self) -> Result<(), FilterError> {
        match *self {
            Operation::Brighten(f) => require_positive("brighten", "factor", f),
            Operation::Contrast(f) => require_non_negative("contrast", "factor", f),
            Operation::Saturation(f) => require_non_negative("saturation", "factor", f),
            Operation::Quantize(bits) => require_bits("quantize", bits),
            Operation::BlackWhite(cutoff) => require_finite("black-white", "cutoff", cutoff),
            Operation::RandomDither(bits) => require_bits("random-dither", bits),
            Operation::FloydSteinbergDither(bits) => require_bits("floyd-steinberg-dither", bits),
            Operation::Crop { width, height, .. } if width == 0 || height == 0 => Err(
                FilterError::out_of_bounds("crop", format!("empty {width}x{height} rectangle")),
            ),
            Operation::Rotate(degrees) => require_finite("rotate", "angle", degrees),
            Operation::Scale(fx, fy) => {
                require_positive("scale", "x factor", fx)?;
                require_positive("scale", "y factor", fy)
            }
            _ => Ok(()),
        }
    }

    /// Run this step on `image`.
    ///
    /// In-place operations hand back the same allocation; geometric ones
    /// return a new buffer. `Sample` only updates `ctx`.
    pub fn apply(
        self,
        mut image: PixelBuffer,
        ctx: &mut FilterContext,
    ) -> Result<PixelBuffer, FilterError> {
        let boundary = ctx.tuning.boundary;
        match self {
            Operation::Brighten(f) => adjust::brighten(&mut image, f)?,
            Operation::Contrast(f) => adjust::contrast(&mut image, f)?,
            Operation::Saturation(f) => adjust::saturation(&mut image, f)?,
            Operation::Channel(which) => adjust::channel(&mut image, which),
            Operation::Grayscale => adjust::grayscale(&mut image),
            Operation::Quantize(bits) => adjust::quantize(&mut image, bits)?,
            Operation::BlackWhite(cutoff) => adjust::threshold(&mut image, cutoff)?,
            Operation::RandomDither(bits) => dither::random_dither(&mut image, bits, ctx.rng())?,
            Operation::FloydSteinbergDither(bits) => {
                dither::floyd_steinberg_dither(&mut image, bits)?
            }
            Operation::EdgeDetect => return Ok(convolve::edge_detect(&image, boundary)),
            Operation::EdgeDetectBase => return Ok(convolve::edge_detect_base(&image, boundary)),
            Operation::RandomNoise => {
                let amplitude = ctx.tuning.noise_amplitude;
                noise::add_noise(&mut image, amplitude, ctx.rng())?
            }
            Operation::Sharpen => return Ok(convolve::sharpen(&image, boundary)),
            Operation::Blur => return Ok(convolve::blur(&image, boundary)),
            Operation::Sample(mode) => ctx.sample_mode = mode,
            Operation::Crop {
                x,
                y,
                width,
                height,
            } => return resample::crop(&image, x, y, width, height),
            Operation::Rotate(degrees) => return resample::rotate(&image, degrees, ctx.sampler()),
            Operation::Scale(fx, fy) => return resample::scale(&image, fx, fy, ctx.sampler()),
        }
        Ok(image)
    }
}

impl fmt::Display for Operation {
    /// The flag as it would appear on the command line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}", self.flag())?;
        match self {
            Operation::Brighten(v)
            | Operation::Contrast(v)
            | Operation::Saturation(v)
            | Operation::BlackWhite(v)
            | Operation::Rotate(v) => write!(f, " {v}"),
            Operation::Quantize(bits)
            | Operation::RandomDither(bits)
            | Operation::FloydSteinbergDither(bits) => write!(f, " {bits}"),
            Operation::Channel(which) => write!(f, " {which}"),
            Operation::Sample(mode) => write!(f, " {mode}"),
            Operation::Crop {
                x,
                y,
                width,
                height,
            } => write!(f, " {x} {y} {width} {height}"),
            Operation::Scale(fx, fy) => write!(f, " {fx} {fy}"),
            _ => Ok(()),
        }
    }
}
