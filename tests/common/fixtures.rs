//! Test fixtures: temporary directories with generated input images.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use imgfx::rendering;
use pixel_filters::{PixelBuffer, Rgba};
use tempfile::TempDir;

/// A temporary directory that holds inputs and receives outputs.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Absolute path of `name` inside the workspace.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `image` as PNG and return its path.
    pub fn write_png(&self, name: &str, image: &PixelBuffer) -> PathBuf {
        let path = self.path(name);
        let bytes = rendering::encode_png(image).expect("Failed to encode fixture");
        std::fs::write(&path, bytes).expect("Failed to write fixture");
        path
    }

    /// A 100x50 gradient PNG named `input.png`.
    pub fn gradient_input(&self) -> PathBuf {
        self.write_png("input.png", &gradient(100, 50))
    }

    /// Files currently in the workspace, sorted.
    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .expect("Failed to list temp dir")
            .map(|e| e.expect("Bad dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Horizontal red ramp, vertical green ramp, constant blue.
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        Rgba::new(
            x as f32 / (width - 1).max(1) as f32,
            y as f32 / (height - 1).max(1) as f32,
            0.4,
            1.0,
        )
    })
    .expect("Failed to build gradient")
}

/// Solid color image.
pub fn solid(width: u32, height: u32, r: u8, g: u8, b: u8) -> PixelBuffer {
    PixelBuffer::filled(width, height, Rgba::from_u8(r, g, b, 255))
        .expect("Failed to build solid image")
}

/// Run the `imgfx` binary with `args` and no config from the environment.
pub fn run_imgfx<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_imgfx"))
        .args(args)
        .env_remove("IMGFX_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run imgfx")
}

/// `path` as an owned string argument.
pub fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
