//! # Report Module
//!
//! Per-file outcomes and their aggregation into a run-level result.
//!
//! Every file handed to the processor yields exactly one [`Outcome`]. The
//! [`ProcessingSummary`] folds them together and decides whether the run as a
//! whole succeeded.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Why a file was left alone without being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// The path matched an ignore pattern
  Ignored,
  /// No comment style is known for the file's extension
  Unsupported,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::Ignored => f.write_str("ignored"),
      SkipReason::Unsupported => f.write_str("file extension not supported"),
    }
  }
}

/// Result of processing a single file.
#[derive(Debug)]
pub enum Outcome {
  /// The file was not examined
  Skipped(SkipReason),
  /// A header was inserted
  Modified,
  /// The file already carries a header
  AlreadyLicensed,
  /// Check-only mode found no header
  MissingLicense,
  /// Reading, rendering or writing failed
  Error(anyhow::Error),
}

/// A file whose processing failed with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
  /// Path of the file, if the failing task could be identified
  pub path: Option<PathBuf>,
  /// Rendered error chain
  pub message: String,
}

/// Aggregate of every outcome of a run.
#[derive(Debug, Default, Clone)]
pub struct ProcessingSummary {
  pub files_modified: usize,
  pub files_with_license: usize,
  pub files_ignored: usize,
  pub files_unsupported: usize,
  /// Files found without a header in check-only mode
  pub missing: Vec<PathBuf>,
  /// Files whose processing failed
  pub failures: Vec<FileFailure>,
  pub processing_time: Duration,
}

impl ProcessingSummary {
  /// Folds one file's outcome into the summary.
  pub fn record(&mut self, path: &Path, outcome: Outcome) {
    match outcome {
      Outcome::Skipped(SkipReason::Ignored) => self.files_ignored += 1,
      Outcome::Skipped(SkipReason::Unsupported) => self.files_unsupported += 1,
      Outcome::Modified => self.files_modified += 1,
      Outcome::AlreadyLicensed => self.files_with_license += 1,
      Outcome::MissingLicense => self.missing.push(path.to_path_buf()),
      Outcome::Error(e) => self.failures.push(FileFailure {
        path: Some(path.to_path_buf()),
        message: format!("{:#}", e),
      }),
    }
  }

  /// Records a worker that failed without producing an outcome.
  pub fn record_worker_failure(&mut self, message: impl Into<String>) {
    self.failures.push(FileFailure {
      path: None,
      message: message.into(),
    });
  }

  /// Number of files that produced an outcome.
  pub fn total(&self) -> usize {
    self.files_modified
      + self.files_with_license
      + self.files_ignored
      + self.files_unsupported
      + self.missing.len()
      + self.failures.len()
  }

  /// The run succeeds iff no file errored and none was missing a header.
  pub fn is_success(&self) -> bool {
    self.missing.is_empty() && self.failures.is_empty()
  }
}
