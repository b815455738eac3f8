//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod run;

use std::path::PathBuf;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use run::run;

use crate::logging::ColorMode;
use crate::templates::LicenseKind;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add Apache 2.0 headers to every supported file under src/
  addheader -c \"Acme Inc.\" src/

  # List files missing a header without modifying anything
  addheader --check .

  # Use a custom template and a fixed year
  addheader -f LICENSE.tmpl -y 2019-2024 src/ include/

  # Read ignore globs and comment styles from a config file
  addheader --config addheader.yml -v .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  /// Files, directories or glob patterns to process. Directories are
  /// processed recursively.
  #[arg(required = true, value_name = "PATTERN")]
  pub patterns: Vec<String>,

  /// Copyright holder
  #[arg(long, short = 'c', default_value = "Google LLC")]
  pub holder: String,

  /// Built-in license type
  #[arg(long, short = 'l', value_enum, default_value_t = LicenseKind::Apache)]
  pub license: LicenseKind,

  /// Custom license template file
  #[arg(long, short = 'f', value_name = "FILE", conflicts_with = "license")]
  pub license_file: Option<PathBuf>,

  /// Copyright year(s) [default: current year]
  #[arg(long, short = 'y')]
  pub year: Option<String>,

  /// Increase verbosity (-v lists modified and skipped files, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Check only: print files missing a header and exit non-zero if any are
  /// found. Never modifies files.
  #[arg(long)]
  pub check: bool,

  /// Path to a YAML or TOML config file
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Number of files processed concurrently [default: number of CPUs]
  #[arg(long, short = 'j', value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
  pub jobs: Option<u64>,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
