//! Interpolation kernels used by rotate and scale.

use std::fmt;
use std::str::FromStr;

use crate::api::FilterError;
use crate::buffer::{BoundaryPolicy, PixelBuffer};
use crate::color::Rgba;

/// How a continuous source position is turned into a pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Closest source pixel (`-sample point`).
    #[default]
    Nearest,
    /// Weighted average of the four surrounding pixels.
    Bilinear,
    /// Normalized Gaussian-weighted average over a square neighbourhood.
    Gaussian,
}

impl InterpolationMode {
    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            InterpolationMode::Nearest => "point",
            InterpolationMode::Bilinear => "bilinear",
            InterpolationMode::Gaussian => "gaussian",
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "point" | "nearest" => Ok(InterpolationMode::Nearest),
            "bilinear" => Ok(InterpolationMode::Bilinear),
            "gaussian" => Ok(InterpolationMode::Gaussian),
            _ => Err(FilterError::invalid(
                "sample",
                format!("unknown sample mode '{s}' (expected point, bilinear or gaussian)"),
            )),
        }
    }
}

/// Neighbourhood radius and spread of the Gaussian sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianParams {
    /// Half-width of the `(2r+1) x (2r+1)` window.
    pub radius: u32,
    /// Standard deviation in source pixels.
    pub sigma: f32,
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self {
            radius: 2,
            sigma: 0.8,
        }
    }
}

impl GaussianParams {
    /// Widen the window for a downscale by `factor` (< 1) so every source
    /// pixel still contributes. Upscaling leaves the parameters unchanged.
    pub fn widened(self, factor: f32) -> Self {
        if !(factor > 0.0 && factor < 1.0) {
            return self;
        }
        Self {
            radius: (self.radius as f32 / factor).ceil() as u32,
            sigma: self.sigma / factor,
        }
    }
}

/// Samples a buffer at fractional pixel indices.
///
/// Neighbours outside the image are clamped to the nearest edge pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    pub mode: InterpolationMode,
    /// Configured Gaussian window, before any widening.
    pub gaussian: GaussianParams,
    /// Horizontal and vertical windows actually used.
    window: (GaussianParams, GaussianParams),
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(InterpolationMode::default(), GaussianParams::default())
    }
}

impl Sampler {
    pub fn new(mode: InterpolationMode, gaussian: GaussianParams) -> Self {
        Self {
            mode,
            gaussian,
            window: (gaussian, gaussian),
        }
    }

    /// Same mode with the Gaussian window widened per axis for a resize by
    /// `(fx, fy)`. An axis that is enlarged keeps the configured window.
    pub fn for_factors(self, fx: f32, fy: f32) -> Self {
        Self {
            window: (self.gaussian.widened(fx), self.gaussian.widened(fy)),
            ..self
        }
    }

    /// Value at fractional index `(sx, sy)`; `(0.0, 0.0)` is the center of
    /// the top-left pixel.
    pub fn sample(&self, image: &PixelBuffer, sx: f32, sy: f32) -> Rgba {
        match self.mode {
            InterpolationMode::Nearest => nearest(image, sx, sy),
            InterpolationMode::Bilinear => bilinear(image, sx, sy),
            InterpolationMode::Gaussian => gaussian(image, sx, sy, self.window),
        }
    }
}

#[inline]
fn at(image: &PixelBuffer, x: i64, y: i64) -> Rgba {
    image.get_or(x, y, BoundaryPolicy::Clamp)
}

fn nearest(image: &PixelBuffer, sx: f32, sy: f32) -> Rgba {
    at(image, (sx + 0.5).floor() as i64, (sy + 0.5).floor() as i64)
}

fn bilinear(image: &PixelBuffer, sx: f32, sy: f32) -> Rgba {
    let (x0, y0) = (sx.floor(), sy.floor());
    let (tx, ty) = (sx - x0, sy - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let top = at(image, x0, y0) * (1.0 - tx) + at(image, x0 + 1, y0) * tx;
    let bottom = at(image, x0, y0 + 1) * (1.0 - tx) + at(image, x0 + 1, y0 + 1) * tx;
    top * (1.0 - ty) + bottom * ty
}

fn gaussian(
    image: &PixelBuffer,
    sx: f32,
    sy: f32,
    (px, py): (GaussianParams, GaussianParams),
) -> Rgba {
    let (cx, cy) = ((sx + 0.5).floor() as i64, (sy + 0.5).floor() as i64);
    let (rx, ry) = (px.radius as i64, py.radius as i64);
    let (denom_x, denom_y) = (2.0 * px.sigma * px.sigma, 2.0 * py.sigma * py.sigma);

    let mut acc = Rgba::TRANSPARENT;
    let mut total = 0.0;
    for y in cy - ry..=cy + ry {
        let ddy = y as f32 - sy;
        let wy = -(ddy * ddy) / denom_y;
        for x in cx - rx..=cx + rx {
            let ddx = x as f32 - sx;
            let w = (wy - (ddx * ddx) / denom_x).exp();
            acc += at(image, x, y) * w;
            total += w;
        }
    }
    if total > 0.0 {
        acc * (1.0 / total)
    } else {
        at(image, cx, cy)
    }
}
