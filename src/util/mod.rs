//! Utility functions for common operations.
//!
//! - Atomic file writes for configuration and rendered output
//! - Reading input text from a file or stdin

use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, ViewerError};

/// Display name used for stdin in messages.
pub const STDIN_NAME: &str = "<stdin>";

/// Atomically write content to a file.
///
/// Content goes to a temporary file in the target directory, is flushed,
/// then renamed over the target. If any step fails the original file (if
/// any) is left untouched. Missing parent directories are created.
///
/// ```rust,no_run
/// use claude_history::util::atomic_write;
///
/// atomic_write("config.toml", b"[highlight]\nauto_detect = true\n").unwrap();
/// ```
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ViewerError::io(
                format!("Failed to create directory: {}", parent.display()),
                e,
            )
        })?;
    }

    // Same directory keeps the final rename on one filesystem.
    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
        ViewerError::io(
            format!("Failed to create temporary file in: {}", parent.display()),
            e,
        )
    })?;

    temp_file.write_all(content).map_err(|e| {
        ViewerError::io(
            format!("Failed to write to temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.flush().map_err(|e| {
        ViewerError::io(
            format!("Failed to flush temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.persist(path).map_err(|e| {
        ViewerError::io(
            format!("Failed to atomically write file: {}", path.display()),
            e.error,
        )
    })?;

    Ok(())
}

/// Read UTF-8 text from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).map_err(|e| ViewerError::from_io_at(p, e))
        }
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(|e| {
                if e.kind() == io::ErrorKind::InvalidData {
                    ViewerError::InvalidEncoding {
                        source_name: STDIN_NAME.to_string(),
                    }
                } else {
                    ViewerError::io("Failed to read stdin", e)
                }
            })?;
            Ok(buffer)
        }
    }
}

/// Display name for an optional input path.
pub fn input_name(path: Option<&Path>) -> String {
    match path {
        Some(p) if p != Path::new("-") => p.display().to_string(),
        _ => STDIN_NAME.to_string(),
    }
}

/// Write `content` to `path` atomically, or to stdout when `path` is `None`.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(p) => atomic_write(p, content.as_bytes()),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_creates_parents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("a").join("b").join("out.html");

        atomic_write(&path, b"<p>hi</p>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>hi</p>");

        atomic_write(&path, b"replaced").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "replaced");
    }

    #[test]
    fn test_read_input_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("snippet.py");
        std::fs::write(&path, "print('hi')\n").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "print('hi')\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/definitely/not/here.rs"))).unwrap_err();
        assert!(matches!(err, ViewerError::FileNotFound { .. }));
    }

    #[test]
    fn test_input_name() {
        assert_eq!(input_name(None), "<stdin>");
        assert_eq!(input_name(Some(Path::new("-"))), "<stdin>");
        assert_eq!(input_name(Some(Path::new("a.rs"))), "a.rs");
    }
}
