//! Assertion helpers for tests.

use std::path::Path;
use std::process::Output;

use imgfx::rendering;
use pixel_filters::PixelBuffer;
use pretty_assertions::assert_eq;

/// Assert the process exited successfully
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Expected success, got {}. Stderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Assert the process failed and its stderr mentions `needle`
pub fn assert_failure_mentions(output: &Output, needle: &str) {
    assert!(!output.status.success(), "Expected failure, process succeeded");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(needle),
        "Expected stderr to mention {needle:?}, got: {stderr}"
    );
}

/// Decode the image at `path`, panicking with context on failure
pub fn load(path: &Path) -> PixelBuffer {
    rendering::read_image(path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

/// Assert the image at `path` has the given dimensions
pub fn assert_dims(path: &Path, expected: (u32, u32)) {
    assert_eq!(load(path).dims(), expected, "dimensions of {}", path.display());
}

/// Assert `path` starts with the PNG signature
pub fn assert_png_file(path: &Path) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "{} is not a PNG", path.display());
}
