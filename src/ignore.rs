//! # Ignore Module
//!
//! This module decides which paths are skipped entirely.
//!
//! It supports:
//! - Built-in patterns pruning version-control, dependency and build-cache directories during traversal
//! - Caller-supplied glob patterns from the run configuration
//!
//! A path is ignored when any pattern matches it.

use std::path::Path;

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Patterns applied during traversal regardless of configuration.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[".git/", "node_modules/", ".gradle/"];

/// Compiled set of ignore patterns.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
///
/// use addheader::ignore::IgnoreManager;
///
/// # fn main() -> anyhow::Result<()> {
/// let manager = IgnoreManager::new(&["**/*.json".to_string(), "vendor".to_string()])?;
///
/// assert!(manager.is_ignored(Path::new("src/config.json")));
/// assert!(manager.is_ignored(Path::new("third_party/vendor/lib.go")));
/// assert!(!manager.is_ignored(Path::new("src/main.go")));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct IgnoreManager {
  glob_set: GlobSet,
}

impl IgnoreManager {
  /// Compiles the given patterns.
  ///
  /// `*` matches across path separators and `**` is a recursive wildcard.
  /// Plain names and patterns ending in `/` match that directory anywhere in
  /// the tree, along with everything beneath it. Wildcard patterns also match
  /// anywhere in the tree.
  ///
  /// # Errors
  ///
  /// Returns an error if any pattern is not a valid glob.
  pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
      let pattern = normalize_pattern(pattern.as_ref());

      let mut add_pattern = |p: &str| -> Result<()> {
        let glob = GlobBuilder::new(p)
          .literal_separator(false)
          .build()
          .with_context(|| format!("Invalid glob pattern: {}", p))?;
        builder.add(glob);
        Ok(())
      };

      if let Some(dir_pattern) = pattern.strip_suffix('/') {
        add_pattern(dir_pattern)?;
        add_pattern(&format!("{}/**", dir_pattern))?;
        add_pattern(&format!("**/{}/**", dir_pattern))?;
        add_pattern(&format!("**/{}", dir_pattern))?;
      } else if !pattern.contains('*') && !pattern.contains('?') {
        add_pattern(&pattern)?;
        add_pattern(&format!("**/{}", pattern))?;
        add_pattern(&format!("{}/**", pattern))?;
        add_pattern(&format!("**/{}/**", pattern))?;
      } else {
        add_pattern(&pattern)?;
        if !pattern.starts_with("**/") {
          add_pattern(&format!("**/{}", pattern))?;
        }
      }
    }

    let glob_set = builder.build().with_context(|| "Failed to build glob set")?;

    Ok(Self { glob_set })
  }

  /// Compiles [`DEFAULT_IGNORE_PATTERNS`].
  pub fn defaults() -> Result<Self> {
    Self::new(DEFAULT_IGNORE_PATTERNS)
  }

  /// Whether any pattern matches `path`, which is expected to be relative to
  /// the traversal root.
  pub fn is_ignored(&self, path: &Path) -> bool {
    self.glob_set.is_match(path)
  }
}

/// Converts backslashes to forward slashes and collapses any `**` that is
/// not a whole path component into `*`.
///
/// With separators not treated literally a single `*` already spans
/// directories, so patterns such as `**.git/**` keep their meaning.
fn normalize_pattern(pattern: &str) -> String {
  let pattern = pattern.replace('\\', "/");
  let chars: Vec<char> = pattern.chars().collect();
  let mut out = String::with_capacity(pattern.len());
  let mut i = 0;

  while i < chars.len() {
    if chars[i] == '*' {
      let start = i;
      while i < chars.len() && chars[i] == '*' {
        i += 1;
      }
      let run = i - start;
      let before_ok = start == 0 || chars[start - 1] == '/';
      let after_ok = i == chars.len() || chars[i] == '/';
      if run == 2 && before_ok && after_ok {
        out.push_str("**");
      } else {
        out.push('*');
      }
    } else {
      out.push(chars[i]);
      i += 1;
    }
  }

  out
}
