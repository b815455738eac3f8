//! # File I/O Module
//!
//! This module provides file reading and writing operations for license processing.

use std::fs::{self, File, Permissions};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::license_detection::DETECTION_WINDOW;

/// File I/O utilities for license processing.
///
/// Content is handled as raw bytes. Files are never decoded, so non-UTF-8
/// files pass through unchanged apart from the inserted header.
pub struct FileIO;

impl FileIO {
  /// Read the leading bytes examined by the license detector.
  ///
  /// Returns at most [`DETECTION_WINDOW`] bytes; shorter files are returned
  /// whole.
  pub fn read_license_check_prefix(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).context("Failed to open file")?;

    let mut buf = Vec::with_capacity(DETECTION_WINDOW);
    file
      .take(DETECTION_WINDOW as u64)
      .read_to_end(&mut buf)
      .context("Failed to read file")?;

    Ok(buf)
  }

  /// Read full file content.
  pub fn read_full_content(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).context("Failed to read file")
  }

  /// Write file content as a single whole-buffer write, then restore the
  /// given permissions.
  pub fn write_file(path: &Path, content: &[u8], permissions: &Permissions) -> Result<()> {
    fs::write(path, content).context("Failed to write file")?;

    let current = fs::metadata(path)
      .context("Failed to stat file")?
      .permissions();
    if current != *permissions {
      fs::set_permissions(path, permissions.clone())
        .context("Failed to restore permissions")?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_read_prefix_is_bounded() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("big.go");
    fs::write(&path, vec![b'a'; DETECTION_WINDOW * 3]).expect("write");

    let prefix = FileIO::read_license_check_prefix(&path).expect("read");
    assert_eq!(prefix.len(), DETECTION_WINDOW);
  }

  #[test]
  fn test_read_prefix_short_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("small.go");
    fs::write(&path, b"package main\n").expect("write");

    assert_eq!(
      FileIO::read_license_check_prefix(&path).expect("read"),
      b"package main\n"
    );
  }

  #[test]
  fn test_read_missing_file_is_error() {
    let dir = tempdir().expect("create temp dir");
    assert!(FileIO::read_full_content(&dir.path().join("nope.rs")).is_err());
  }

  #[cfg(unix)]
  #[test]
  fn test_write_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("run.sh");
    fs::write(&path, b"echo hi\n").expect("write");
    fs::set_permissions(&path, Permissions::from_mode(0o755)).expect("chmod");
    let original = fs::metadata(&path).expect("stat").permissions();

    FileIO::write_file(&path, b"# header\necho hi\n", &original).expect("write");

    let mode = fs::metadata(&path).expect("stat").permissions().mode() & 0o777;
    assert_eq!(mode, 0o755);
    assert_eq!(fs::read(&path).expect("read"), b"# header\necho hi\n");
  }
}
