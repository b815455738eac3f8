//! # Logging Module
//!
//! This module provides logging utilities for the addheader tool, including:
//! - Verbose logging that can be enabled/disabled
//! - Per-file error reporting with color support
//! - `tracing` subscriber setup for diagnostics
//!
//! All log output goes to stderr so that stdout stays reserved for the list of
//! files missing a header in check-only mode.
//!
//! ## Example
//!
//! ```rust
//! use addheader::logging::{ColorMode, set_verbose};
//! use addheader::verbose_log;
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Set color mode to Auto (uses owo-colors' automatic TTY detection)
//! ColorMode::Auto.apply();
//!
//! // Log a verbose message (goes to stderr)
//! verbose_log!("{} modified", "example.rs");
//! ```

mod modes;

use std::fmt::Display;
use std::path::Path;

pub use modes::{ColorMode, init_tracing, is_verbose, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose mode
/// is enabled via [`set_verbose`]. It uses the same format string syntax as
/// the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Prints a per-file error to stderr as `<path>: <error>`.
///
/// Shown regardless of verbose mode.
pub fn print_file_error(path: &Path, error: impl Display) {
  eprintln!(
    "{}: {}",
    path.display().if_supports_color(Stream::Stderr, |p| p.red()),
    error
  );
}
