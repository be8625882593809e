use std::path::PathBuf;

use pixel_filters::FilterError;
use thiserror::Error;

/// Everything that can abort an `imgfx` run.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("IO error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Pipe error: {0}")]
    Pipe(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ProcessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProcessError::Io {
            path: path.into(),
            source,
        }
    }
}
