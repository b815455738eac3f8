//! # License Detection Module
//!
//! This module contains the interfaces and implementations for license detection algorithms.
//! It allows for easily replacing the license detection algorithm without modifying the processor.

/// Number of leading bytes examined when looking for an existing header.
pub const DETECTION_WINDOW: usize = 1000;

/// Substrings that indicate a header when no custom patterns are configured.
const DEFAULT_PATTERNS: &[&str] = &["copyright", "mozilla public"];

/// Trait for license detectors.
///
/// Implementations of this trait are responsible for determining whether a file
/// already contains a license header based on its content.
pub trait LicenseDetector: Send + Sync {
  /// Checks if the content already has a license header.
  ///
  /// # Parameters
  ///
  /// * `content` - The raw file content (or a prefix of it)
  ///
  /// # Returns
  ///
  /// `true` if the content appears to have a license header, `false` otherwise.
  fn has_license(&self, content: &[u8]) -> bool;
}

/// Substring-based license detection over a bounded prefix.
///
/// Only the first [`DETECTION_WINDOW`] bytes are examined, case-insensitively.
/// A header starting beyond that window is not seen.
#[derive(Debug, Clone)]
pub struct PatternLicenseDetector {
  /// Case-folded patterns, any of which marks the content as licensed
  patterns: Vec<String>,
}

impl PatternLicenseDetector {
  /// Creates a detector for the given patterns.
  ///
  /// An empty pattern list selects the default patterns ("copyright" and
  /// "mozilla public").
  pub fn new(patterns: &[String]) -> Self {
    let patterns = if patterns.is_empty() {
      DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
    } else {
      patterns.iter().map(|p| p.to_lowercase()).collect()
    };

    Self { patterns }
  }
}

impl Default for PatternLicenseDetector {
  fn default() -> Self {
    Self::new(&[])
  }
}

impl LicenseDetector for PatternLicenseDetector {
  fn has_license(&self, content: &[u8]) -> bool {
    let window = &content[..content.len().min(DETECTION_WINDOW)];
    // Invalid UTF-8 bytes become U+FFFD
    let folded = String::from_utf8_lossy(window).to_lowercase();

    self.patterns.iter().any(|pattern| folded.contains(pattern.as_str()))
  }
}
