use crate::api::FilterError;
use crate::buffer::PixelBuffer;

/// Copy the `w x h` rectangle whose top-left corner is `(x, y)`.
///
/// Fails with [`FilterError::OutOfBounds`] when the rectangle is empty or
/// does not fit inside the source.
pub fn crop(
    image: &PixelBuffer,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
) -> Result<PixelBuffer, FilterError> {
    if w == 0 || h == 0 {
        return Err(FilterError::out_of_bounds("crop", format!("empty {w}x{h} rectangle")));
    }
    let (width, height) = image.dims();
    if x as u64 + w as u64 > width as u64 || y as u64 + h as u64 > height as u64 {
        return Err(FilterError::out_of_bounds(
            "crop",
            format!("{w}x{h} at ({x}, {y}) exceeds {width}x{height} image"),
        ));
    }
    PixelBuffer::from_fn(w, h, |dx, dy| image.pixel(x + dx, y + dy))
}
