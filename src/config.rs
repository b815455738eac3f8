//! # Configuration Module
//!
//! This module loads the run configuration: extra ignore patterns, a custom
//! extension-to-comment-style table and custom header detection patterns.
//!
//! Configuration is read from the file passed with `--config`, or from the
//! file named by the `ADDHEADER_CONFIG` environment variable. YAML files
//! (`.yml`, `.yaml`) and TOML files are both accepted.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::comment_style::{CommentStyle, ExtensionRule};
use crate::ignore::IgnoreManager;
use crate::verbose_log;

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "ADDHEADER_CONFIG";

/// One entry of the `fileExtensions` table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtensionRuleConfig {
  /// Extension keys such as ".go", or bare file names such as "dockerfile".
  pub extensions: Vec<String>,

  #[serde(default)]
  pub top: String,

  #[serde(default, alias = "middle")]
  pub mid: String,

  #[serde(default, alias = "bottom")]
  pub bot: String,
}

impl From<ExtensionRuleConfig> for ExtensionRule {
  fn from(config: ExtensionRuleConfig) -> Self {
    ExtensionRule {
      extensions: config.extensions,
      style: CommentStyle {
        top: config.top,
        middle: config.mid,
        bottom: config.bot,
      },
    }
  }
}

/// Run configuration.
///
/// Loaded once before any file is dispatched and shared read-only with every
/// worker for the rest of the run.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
  /// Glob patterns of paths to skip.
  #[serde(default, rename = "ignorePaths", alias = "ignore-paths")]
  pub ignore_paths: Vec<String>,

  /// Ordered extension table. When non-empty it replaces the built-in table.
  #[serde(default, rename = "fileExtensions", alias = "file-extensions")]
  pub file_extensions: Vec<ExtensionRuleConfig>,

  /// Substrings marking an existing header. When non-empty they replace the
  /// built-in "copyright" / "mozilla public" check.
  #[serde(default, rename = "hasLicensePatterns", alias = "has-license-patterns")]
  pub has_license_patterns: Vec<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  TomlError { path: PathBuf, source: toml::de::Error },

  /// The config file contains invalid YAML.
  #[error("Failed to parse config file '{path}': {source}")]
  YamlError { path: PathBuf, source: serde_yaml_ng::Error },

  /// An extension rule is invalid.
  #[error("Invalid extension rule #{index}: {message}")]
  InvalidExtensionRule { index: usize, message: String },

  /// A detection pattern is invalid.
  #[error("Invalid license detection pattern #{index}: {message}")]
  InvalidPattern { index: usize, message: String },

  /// An ignore pattern is not a valid glob.
  #[error("Invalid ignore pattern '{pattern}': {message}")]
  InvalidIgnorePattern { pattern: String, message: String },
}

impl RunConfig {
  /// Load configuration from a file.
  ///
  /// The parser is chosen by extension: `.yml`/`.yaml` files are YAML, any
  /// other file is TOML.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config = if is_yaml(path) {
      Self::from_yaml(&content).map_err(|e| ConfigError::YamlError {
        path: path.to_path_buf(),
        source: e,
      })?
    } else {
      toml::from_str::<RunConfig>(&content).map_err(|e| ConfigError::TomlError {
        path: path.to_path_buf(),
        source: e,
      })?
    };

    config.validate()?;
    let config = config.normalize();

    verbose_log!(
      "Loaded {} ignore patterns, {} extension rules, {} detection patterns",
      config.ignore_paths.len(),
      config.file_extensions.len(),
      config.has_license_patterns.len()
    );

    Ok(config)
  }

  /// An empty YAML document deserializes to nothing, so treat it as the
  /// default configuration.
  fn from_yaml(content: &str) -> Result<Self, serde_yaml_ng::Error> {
    if content.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml_ng::from_str(content)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Every extension rule lists at least one non-empty extension
  /// - Every detection pattern is non-empty
  /// - Every ignore pattern compiles
  fn validate(&self) -> Result<(), ConfigError> {
    for (index, rule) in self.file_extensions.iter().enumerate() {
      if rule.extensions.is_empty() {
        return Err(ConfigError::InvalidExtensionRule {
          index,
          message: "extensions list cannot be empty".to_string(),
        });
      }
      if rule.extensions.iter().any(|ext| ext.is_empty()) {
        return Err(ConfigError::InvalidExtensionRule {
          index,
          message: "extension cannot be an empty string".to_string(),
        });
      }
    }

    for (index, pattern) in self.has_license_patterns.iter().enumerate() {
      if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern {
          index,
          message: "pattern cannot be empty".to_string(),
        });
      }
    }

    for pattern in &self.ignore_paths {
      if let Err(e) = IgnoreManager::new(std::slice::from_ref(pattern)) {
        return Err(ConfigError::InvalidIgnorePattern {
          pattern: pattern.clone(),
          message: format!("{:#}", e),
        });
      }
    }

    Ok(())
  }

  /// Case-fold extension keys and detection patterns, since lookups happen
  /// against case-folded file names and content.
  fn normalize(self) -> Self {
    let file_extensions = self
      .file_extensions
      .into_iter()
      .map(|rule| ExtensionRuleConfig {
        extensions: rule.extensions.iter().map(|ext| ext.to_lowercase()).collect(),
        ..rule
      })
      .collect();

    let has_license_patterns = self.has_license_patterns.iter().map(|p| p.to_lowercase()).collect();

    Self {
      ignore_paths: self.ignore_paths,
      file_extensions,
      has_license_patterns,
    }
  }

  /// The extension table as resolver rules, in file order.
  pub fn extension_rules(&self) -> Vec<ExtensionRule> {
    self.file_extensions.iter().cloned().map(ExtensionRule::from).collect()
  }
}

fn is_yaml(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `ADDHEADER_CONFIG` environment variable
///
/// An explicit path that does not exist is an error; an environment path that
/// does not exist is skipped.
pub fn discover_config_path(explicit_path: Option<&Path>) -> Result<Option<PathBuf>> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Ok(Some(path.to_path_buf()));
    }
    anyhow::bail!("Config file does not exist: {}", path.display());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Ok(Some(path));
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  verbose_log!("No config file found");
  Ok(None)
}

/// Load configuration from the discovered path, or return an empty
/// configuration if there is none.
pub fn load_config(explicit_path: Option<&Path>) -> Result<RunConfig> {
  match discover_config_path(explicit_path)? {
    Some(path) => RunConfig::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(RunConfig::default()),
  }
}
