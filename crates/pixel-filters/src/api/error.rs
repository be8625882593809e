//! Error type for the pixel-filters public API.
//!
//! Every fallible operation in the crate returns [`FilterError`]. Decode and
//! encode failures live in the application that owns the codec.

use std::fmt;

/// Error returned by buffer construction and pipeline operations.
///
/// # Example
///
/// ```
/// use pixel_filters::{FilterError, PixelBuffer, Rgba};
///
/// let image = PixelBuffer::filled(4, 4, Rgba::BLACK).unwrap();
/// let err = pixel_filters::resample::crop(&image, 2, 2, 4, 4).unwrap_err();
/// assert!(matches!(err, FilterError::OutOfBounds { .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A parameter is outside the range the operation accepts
    /// (non-positive scale factor, unknown channel name, bit depth of 0, ...).
    InvalidParameter {
        /// Operation that rejected the parameter.
        operation: &'static str,
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The requested geometry does not fit the source or is degenerate
    /// (crop outside the image, zero-sized output).
    OutOfBounds {
        /// Operation that produced the geometry.
        operation: &'static str,
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl FilterError {
    /// Shorthand for [`FilterError::InvalidParameter`].
    pub fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            operation,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`FilterError::OutOfBounds`].
    pub fn out_of_bounds(operation: &'static str, reason: impl Into<String>) -> Self {
        FilterError::OutOfBounds {
            operation,
            reason: reason.into(),
        }
    }

    /// Name of the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            FilterError::InvalidParameter { operation, .. } => operation,
            FilterError::OutOfBounds { operation, .. } => operation,
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidParameter { operation, reason } => {
                write!(f, "invalid parameter for {}: {}", operation, reason)
            }
            FilterError::OutOfBounds { operation, reason } => {
                write!(f, "out of bounds in {}: {}", operation, reason)
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Reject NaN and infinite parameters.
pub(crate) fn require_finite(
    operation: &'static str,
    name: &str,
    value: f32,
) -> Result<(), FilterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FilterError::invalid(
            operation,
            format!("{name} must be a finite number, got {value}"),
        ))
    }
}

/// Reject factors that are not strictly positive.
pub(crate) fn require_positive(
    operation: &'static str,
    name: &str,
    value: f32,
) -> Result<(), FilterError> {
    require_finite(operation, name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(FilterError::invalid(
            operation,
            format!("{name} must be greater than 0, got {value}"),
        ))
    }
}

/// Reject negative factors (0 is allowed).
pub(crate) fn require_non_negative(
    operation: &'static str,
    name: &str,
    value: f32,
) -> Result<(), FilterError> {
    require_finite(operation, name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(FilterError::invalid(
            operation,
            format!("{name} must not be negative, got {value}"),
        ))
    }
}

/// Bit depth accepted by quantize and both ditherers.
pub(crate) fn require_bits(operation: &'static str, bits: u8) -> Result<(), FilterError> {
    if (1..=8).contains(&bits) {
        Ok(())
    } else {
        Err(FilterError::invalid(
            operation,
            format!("bit depth must be between 1 and 8, got {bits}"),
        ))
    }
}
