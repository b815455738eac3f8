//! # Output Module
//!
//! This module centralizes user-facing output that is not a log line.
//!
//! - stdout carries only the paths of files missing a header (check-only mode), one per line, so it can be piped
//!   into other tools.
//! - The end-of-run summary goes to stderr and only in verbose mode.

use std::io::Write;
use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::is_verbose;
use crate::report::ProcessingSummary;

/// Print the path of a file missing a header to stdout.
///
/// The line is written under the stdout lock so that concurrent workers never
/// interleave partial lines.
pub fn print_missing_path(path: &Path) {
  let mut stdout = std::io::stdout().lock();
  let _ = writeln!(stdout, "{}", path.display());
}

/// Print the end-of-run summary line to stderr in verbose mode.
pub fn print_summary(summary: &ProcessingSummary, check_only: bool) {
  if !is_verbose() {
    return;
  }

  let failed = summary.failures.len();
  let failed_str = if failed > 0 {
    failed.if_supports_color(Stream::Stderr, |s| s.red()).to_string()
  } else {
    failed.if_supports_color(Stream::Stderr, |s| s.cyan()).to_string()
  };

  let line = if check_only {
    let missing = summary.missing.len();
    let missing_str = if missing > 0 {
      missing.if_supports_color(Stream::Stderr, |s| s.red()).to_string()
    } else {
      missing.if_supports_color(Stream::Stderr, |s| s.cyan()).to_string()
    };
    format!(
      "Summary: {} OK, {} missing, {} ignored, {} unsupported, {} failed",
      summary.files_with_license.if_supports_color(Stream::Stderr, |s| s.cyan()),
      missing_str,
      summary.files_ignored.if_supports_color(Stream::Stderr, |s| s.dimmed()),
      summary.files_unsupported.if_supports_color(Stream::Stderr, |s| s.dimmed()),
      failed_str
    )
  } else {
    format!(
      "Summary: {} modified, {} already licensed, {} ignored, {} unsupported, {} failed",
      summary.files_modified.if_supports_color(Stream::Stderr, |s| s.yellow()),
      summary.files_with_license.if_supports_color(Stream::Stderr, |s| s.cyan()),
      summary.files_ignored.if_supports_color(Stream::Stderr, |s| s.dimmed()),
      summary.files_unsupported.if_supports_color(Stream::Stderr, |s| s.dimmed()),
      failed_str
    )
  };

  eprintln!("{} ({:.2}s)", line, summary.processing_time.as_secs_f64());
}
