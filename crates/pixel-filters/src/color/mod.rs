//! Pixel value type and luma weights
//!
//! All transforms work on [`Rgba`] values with `f32` channels in the nominal
//! range 0.0..=1.0. Conversion to and from 8-bit samples happens only at the
//! codec boundary.
//!
//! # Example
//!
//! ```
//! use pixel_filters::Rgba;
//!
//! let px = Rgba::from_u8(255, 128, 0, 255);
//! let doubled = (px * 2.0).clamp();
//! assert_eq!(doubled.to_u8(), [255, 255, 0, 255]);
//! ```

mod luma;
mod rgba;

pub use luma::{luma, LUMA_B, LUMA_G, LUMA_R};
pub use rgba::{Channel, Rgba};
