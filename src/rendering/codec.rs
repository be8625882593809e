//! Conversion between encoded image files and [`PixelBuffer`].
//!
//! Decoding accepts anything the `image` crate recognises. PNG output goes
//! through the `png` encoder directly (optionally re-compressed with
//! oxipng); every other format is written by `image`.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use pixel_filters::PixelBuffer;

use crate::error::ProcessError;

/// JPEG quality for `-pipe` and `.jpg` outputs.
pub const JPEG_QUALITY: u8 = 90;

/// Encoded output format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    /// Any other format `image` can encode (BMP, GIF, TIFF, PPM, ...).
    Other(ImageFormat),
}

impl OutputFormat {
    /// Format for `path`'s extension, or a usage error if there is none.
    pub fn from_path(path: &Path) -> Result<Self, ProcessError> {
        let format = ImageFormat::from_path(path).map_err(|_| {
            ProcessError::Usage(format!(
                "cannot tell the output format of '{}' from its extension",
                path.display()
            ))
        })?;
        Ok(match format {
            ImageFormat::Png => OutputFormat::Png,
            ImageFormat::Jpeg => OutputFormat::Jpeg,
            other if other.writing_enabled() => OutputFormat::Other(other),
            other => {
                return Err(ProcessError::Usage(format!(
                    "writing {other:?} images is not supported"
                )))
            }
        })
    }
}

/// Read and decode an image file.
pub fn read_image(path: &Path) -> Result<PixelBuffer, ProcessError> {
    let bytes = std::fs::read(path).map_err(|e| ProcessError::io(path, e))?;
    decode(&bytes).map_err(|e| match e {
        ProcessError::Decode(reason) => {
            ProcessError::Decode(format!("{}: {reason}", path.display()))
        }
        other => other,
    })
}

/// Decode encoded bytes of any supported format to RGBA.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, ProcessError> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| ProcessError::Decode(e.to_string()))?
        .into_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_rgba8(width, height, rgba.as_raw())
        .map_err(|e| ProcessError::Decode(e.to_string()))
}

/// Encode `image` in `format`.
pub fn encode(
    image: &PixelBuffer,
    format: OutputFormat,
    optimize_png: bool,
) -> Result<Vec<u8>, ProcessError> {
    match format {
        OutputFormat::Png => {
            let png_bytes = encode_png(image)?;
            if !optimize_png {
                return Ok(png_bytes);
            }
            // Keep the plain encoding if oxipng cannot improve it
            Ok(oxipng::optimize_from_memory(
                &png_bytes,
                &oxipng::Options {
                    strip: oxipng::StripChunks::Safe,
                    optimize_alpha: false,
                    ..Default::default()
                },
            )
            .unwrap_or(png_bytes))
        }
        OutputFormat::Jpeg => encode_jpeg(image),
        OutputFormat::Other(format) => {
            let mut buf = Cursor::new(Vec::new());
            to_dynamic(image)?
                .write_to(&mut buf, format)
                .map_err(|e| ProcessError::Encode(e.to_string()))?;
            Ok(buf.into_inner())
        }
    }
}

/// 8-bit RGBA PNG.
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, ProcessError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
        writer
            .write_image_data(&image.to_rgba8())
            .map_err(|e| ProcessError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Baseline JPEG at [`JPEG_QUALITY`]. Alpha is dropped.
pub fn encode_jpeg(image: &PixelBuffer) -> Result<Vec<u8>, ProcessError> {
    let rgb = to_dynamic(image)?.to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    encoder
        .encode(&rgb, rgb.width(), rgb.height(), image::ExtendedColorType::Rgb8)
        .map_err(|e| ProcessError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

fn to_dynamic(image: &PixelBuffer) -> Result<DynamicImage, ProcessError> {
    let rgba = RgbaImage::from_raw(image.width(), image.height(), image.to_rgba8())
        .ok_or_else(|| ProcessError::Encode("pixel data does not match image size".to_string()))?;
    Ok(DynamicImage::ImageRgba8(rgba))
}
