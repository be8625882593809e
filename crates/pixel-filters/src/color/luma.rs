//! Luma weights (ITU-R BT.601)
//!
//! Grayscale, saturation, thresholding and the edge pre-filter all derive
//! brightness from the same three weights, so `saturation(0)` and
//! `grayscale` agree exactly.

/// Red weight of the luma sum.
pub const LUMA_R: f32 = 0.299;
/// Green weight of the luma sum.
pub const LUMA_G: f32 = 0.587;
/// Blue weight of the luma sum.
pub const LUMA_B: f32 = 0.114;

/// Weighted brightness of an RGB triple.
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}
