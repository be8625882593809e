//! Error diffusion kernel definitions.
//!
//! A kernel specifies how quantization error is distributed to neighboring
//! pixels that haven't been processed yet.

/// An error diffusion kernel.
///
/// Each entry is an offset `(dx, dy)` from the current pixel and a weight.
/// A neighbour receives `error * weight / divisor`.
///
/// The `max_dy` field says how many rows ahead the kernel reaches, which
/// determines the error buffer depth: `max_dy + 1` rows.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionKernel {
    /// (dx, dy, weight) entries.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (always >= 0, 0 = current row)
    /// - `weight`: numerator of the fraction of error to diffuse
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    pub divisor: u8,

    /// Maximum dy value in entries.
    pub max_dy: usize,
}

impl DiffusionKernel {
    /// Fraction of the error this kernel propagates (1.0 = all of it).
    pub fn propagation(&self) -> f32 {
        let total: u32 = self.entries.iter().map(|&(_, _, w)| w as u32).sum();
        total as f32 / self.divisor as f32
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: DiffusionKernel = DiffusionKernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};
