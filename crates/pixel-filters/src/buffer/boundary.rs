//! Boundary policy for reads outside the image.

use std::fmt;
use std::str::FromStr;

use crate::api::FilterError;

/// How a read at a coordinate outside `(0..width, 0..height)` is answered.
///
/// Convolution uses the configured policy (default [`Clamp`](Self::Clamp))
/// so that borders keep their dimensions. Rotation always samples with
/// [`Zero`](Self::Zero) outside the source so the uncovered corners of the
/// expanded canvas come out transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Repeat the nearest edge pixel.
    #[default]
    Clamp,
    /// Treat everything outside the image as transparent black.
    Zero,
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryPolicy::Clamp => f.write_str("clamp"),
            BoundaryPolicy::Zero => f.write_str("zero"),
        }
    }
}

impl FromStr for BoundaryPolicy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clamp" | "edge" => Ok(BoundaryPolicy::Clamp),
            "zero" | "pad" => Ok(BoundaryPolicy::Zero),
            _ => Err(FilterError::invalid(
                "boundary",
                format!("unknown boundary policy {s:?} (expected clamp or zero)"),
            )),
        }
    }
}
