//! Destinations for encoded images.
//!
//! Sinks are staged during a run and delivered only after every step has
//! succeeded. Delivery itself is two-phase: files are first written to
//! temporaries beside their targets and renamed into place only once every
//! write and every pipe command has succeeded.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

use crate::error::ProcessError;

/// Where an encoded image goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Sink {
    File(PathBuf),
    /// Shell command; the image is written to its stdin.
    Command(String),
}

impl std::fmt::Display for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sink::File(path) => write!(f, "{}", path.display()),
            Sink::Command(cmd) => write!(f, "| {cmd}"),
        }
    }
}

/// Encoded bytes waiting to be delivered.
#[derive(Debug, Clone)]
pub struct StagedOutput {
    pub sink: Sink,
    pub bytes: Vec<u8>,
}

/// Deliver every staged output.
///
/// Order of effects:
///
/// 1. each file is written to a temporary in its target directory
/// 2. pipe commands run in staging order
/// 3. the temporaries are renamed over their targets in staging order
///
/// A failure in step 1 or 2 leaves no output file behind. Later outputs to
/// the same path win, as they would with sequential writes.
pub fn deliver(outputs: &[StagedOutput]) -> Result<(), ProcessError> {
    let mut pending = Vec::new();
    for output in outputs {
        if let Sink::File(path) = &output.sink {
            pending.push((path, write_temporary(path, &output.bytes)?));
        }
    }

    for output in outputs {
        if let Sink::Command(cmd) = &output.sink {
            pipe_to_command(cmd, &output.bytes)?;
        }
    }

    for (path, temp) in pending {
        temp.persist(path).map_err(|e| ProcessError::io(path, e.error))?;
    }
    Ok(())
}

/// Write `bytes` to an anonymous temporary next to `path`.
///
/// The temporary is deleted on drop unless it is persisted.
fn write_temporary(path: &Path, bytes: &[u8]) -> Result<NamedTempFile, ProcessError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".imgfx-")
        .tempfile_in(dir)
        .map_err(|e| ProcessError::io(path, e))?;
    temp.write_all(bytes).map_err(|e| ProcessError::io(path, e))?;
    // Temporaries are created owner-only; outputs get regular file modes
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|e| ProcessError::io(path, e))?;
    }
    Ok(temp)
}

fn pipe_to_command(cmd: &str, bytes: &[u8]) -> Result<(), ProcessError> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| ProcessError::Pipe(format!("failed to start '{cmd}': {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        // A command that exits without reading everything closes the pipe early
        if let Err(e) = stdin.write_all(bytes) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(ProcessError::Pipe(format!("writing to '{cmd}': {e}")));
            }
            tracing::debug!(%cmd, "Command closed stdin early");
        }
    }

    let status = child
        .wait()
        .map_err(|e| ProcessError::Pipe(format!("waiting for '{cmd}': {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(ProcessError::Pipe(format!("'{cmd}' exited with {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(path: &Path, bytes: &[u8]) -> StagedOutput {
        StagedOutput {
            sink: Sink::File(path.to_path_buf()),
            bytes: bytes.to_vec(),
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_file_sink_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        deliver(&[file(&path, &[1, 2, 3])]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
        assert_eq!(entries(dir.path()), vec!["out.bin".to_string()]);
    }

    #[test]
    fn test_file_sink_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.bin");
        let err = deliver(&[file(&path, &[0])]).unwrap_err();
        assert!(matches!(err, ProcessError::Io { .. }));
        assert!(err.to_string().contains("missing-dir"));
    }

    #[test]
    fn test_failed_write_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        let bad = dir.path().join("missing-dir").join("bad.png");
        assert!(deliver(&[file(&good, b"first"), file(&bad, b"second")]).is_err());
        assert!(!good.exists());
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn test_later_output_to_same_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        deliver(&[file(&path, b"old"), file(&path, b"new")]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_sink_receives_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("piped.bin");
        let staged = StagedOutput {
            sink: Sink::Command(format!("cat > '{}'", path.display())),
            bytes: b"hello".to_vec(),
        };
        deliver(&[staged]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_sink_failure_status() {
        let staged = StagedOutput {
            sink: Sink::Command("cat > /dev/null; exit 3".to_string()),
            bytes: vec![0; 16],
        };
        let err = deliver(&[staged]).unwrap_err();
        assert!(matches!(err, ProcessError::Pipe(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_command_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let failing = StagedOutput {
            sink: Sink::Command("cat > /dev/null; exit 1".to_string()),
            bytes: vec![0; 4],
        };
        assert!(deliver(&[file(&path, b"data"), failing]).is_err());
        assert!(entries(dir.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_output_file_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        deliver(&[file(&path, b"x")]).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_sink_display() {
        assert_eq!(Sink::File(PathBuf::from("a.png")).to_string(), "a.png");
        assert_eq!(Sink::Command("display".to_string()).to_string(), "| display");
    }
}
