//! In-memory image representation.
//!
//! [`PixelBuffer`] owns a flat `Vec<f32>` of RGBA samples in row-major order.
//! The length invariant `width * height * CHANNELS == data.len()` is checked
//! at every constructor, and both dimensions are non-zero.
//!
//! Pixel reads come in three flavours:
//!
//! - [`PixelBuffer::get`]: bounds-checked, returns `None` outside the image
//! - [`PixelBuffer::pixel`]: bounds-checked, panics outside the image
//! - [`PixelBuffer::get_or`]: signed coordinates resolved by a
//!   [`BoundaryPolicy`]

mod boundary;

pub use boundary::BoundaryPolicy;

use rayon::prelude::*;

use crate::api::FilterError;
use crate::color::Rgba;

/// Samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Largest image any operation may produce (64 Mpx, 1 GiB of samples).
pub const MAX_PIXELS: u64 = 1 << 26;

/// Owned RGBA image with `f32` samples.
///
/// # Example
///
/// ```
/// use pixel_filters::{PixelBuffer, Rgba};
///
/// let image = PixelBuffer::from_fn(3, 2, |x, y| Rgba::gray((x + y) as f32 / 3.0)).unwrap();
/// assert_eq!(image.dims(), (3, 2));
/// assert_eq!(image.get(2, 1), Some(Rgba::gray(1.0)));
/// assert_eq!(image.get(3, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Wrap raw samples, validating the length invariant.
    pub fn from_raw(width: u32, height: u32, data: Vec<f32>) -> Result<Self, FilterError> {
        check_dims("buffer", width, height)?;
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(FilterError::invalid(
                "buffer",
                format!(
                    "{} samples do not match {}x{}x{} = {}",
                    data.len(),
                    width,
                    height,
                    CHANNELS,
                    expected
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer from interleaved 8-bit RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, FilterError> {
        let data = bytes.iter().map(|&b| b as f32 / 255.0).collect();
        Self::from_raw(width, height, data)
    }

    /// A buffer with every pixel set to `fill`.
    pub fn filled(width: u32, height: u32, fill: Rgba) -> Result<Self, FilterError> {
        Self::from_fn(width, height, |_, _| fill)
    }

    /// Build a buffer by evaluating `f` at every coordinate.
    ///
    /// Rows are evaluated in parallel, so `f` must not rely on call order.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Result<Self, FilterError>
    where
        F: Fn(u32, u32) -> Rgba + Sync,
    {
        check_dims("buffer", width, height)?;
        Ok(Self::build(width, height, f))
    }

    /// A new buffer of the same size, with each pixel computed by `f`.
    ///
    /// Like [`from_fn`](Self::from_fn) but infallible, since the dimensions
    /// are already known to be valid.
    pub fn map_coords<F>(&self, f: F) -> PixelBuffer
    where
        F: Fn(u32, u32) -> Rgba + Sync,
    {
        Self::build(self.width, self.height, f)
    }

    fn build<F>(width: u32, height: u32, f: F) -> PixelBuffer
    where
        F: Fn(u32, u32) -> Rgba + Sync,
    {
        let row_len = width as usize * CHANNELS;
        let mut data = vec![0.0; row_len * height as usize];
        data.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, slot) in row.chunks_exact_mut(CHANNELS).enumerate() {
                    write_pixel(slot, f(x as u32, y as u32));
                }
            });
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dims(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn as_raw(&self) -> &[f32] {
        &self.data
    }

    /// Read a pixel, or `None` outside the image.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.offset(x, y).map(|i| read_pixel(&self.data[i..i + CHANNELS]))
    }

    /// Read a pixel.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        match self.get(x, y) {
            Some(px) => px,
            None => panic!(
                "pixel ({}, {}) out of bounds for {}x{} buffer",
                x, y, self.width, self.height
            ),
        }
    }

    /// Read a pixel at signed coordinates, resolving reads outside the image
    /// with `policy`.
    #[inline]
    pub fn get_or(&self, x: i64, y: i64, policy: BoundaryPolicy) -> Rgba {
        let inside = x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64;
        if inside {
            return self.pixel(x as u32, y as u32);
        }
        match policy {
            BoundaryPolicy::Clamp => self.pixel(
                x.clamp(0, self.width as i64 - 1) as u32,
                y.clamp(0, self.height as i64 - 1) as u32,
            ),
            BoundaryPolicy::Zero => Rgba::TRANSPARENT,
        }
    }

    /// Overwrite a pixel.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, px: Rgba) {
        match self.offset(x, y) {
            Some(i) => write_pixel(&mut self.data[i..i + CHANNELS], px),
            None => panic!(
                "pixel ({}, {}) out of bounds for {}x{} buffer",
                x, y, self.width, self.height
            ),
        }
    }

    /// Replace every pixel with `f(pixel)`, in place and in parallel.
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn(Rgba) -> Rgba + Sync,
    {
        self.data.par_chunks_mut(CHANNELS).for_each(|slot| {
            let px = read_pixel(slot);
            write_pixel(slot, f(px));
        });
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data.chunks_exact(CHANNELS).map(read_pixel)
    }

    /// Convert to interleaved 8-bit RGBA bytes (rounded and clamped).
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels().flat_map(Rgba::to_u8).collect()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * CHANNELS)
        } else {
            None
        }
    }
}

/// Both dimensions must be non-zero and the pixel count at most
/// [`MAX_PIXELS`].
pub(crate) fn check_dims(
    operation: &'static str,
    width: u32,
    height: u32,
) -> Result<(), FilterError> {
    if width == 0 || height == 0 {
        return Err(FilterError::out_of_bounds(
            operation,
            format!("degenerate {width}x{height} image"),
        ));
    }
    match (width as u64).checked_mul(height as u64) {
        Some(pixels) if pixels <= MAX_PIXELS => Ok(()),
        _ => Err(FilterError::out_of_bounds(
            operation,
            format!("{width}x{height} image exceeds the {MAX_PIXELS} pixel limit"),
        )),
    }
}

#[inline]
fn read_pixel(slot: &[f32]) -> Rgba {
    Rgba::new(slot[0], slot[1], slot[2], slot[3])
}

#[inline]
fn write_pixel(slot: &mut [f32], px: Rgba) {
    slot[0] = px.r;
    slot[1] = px.g;
    slot[2] = px.b;
    slot[3] = px.a;
}
