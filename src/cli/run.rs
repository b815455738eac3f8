//! # Run Command
//!
//! Wires parsed arguments to the processor: sets up logging, loads the
//! template and run configuration, processes every root and reports.

use anyhow::Result;
use chrono::Datelike;
use tracing::debug;

use super::Cli;
use crate::config::load_config;
use crate::logging::{init_tracing, set_verbose};
use crate::output::print_summary;
use crate::processor::{Processor, ProcessorConfig, default_workers};
use crate::templates::{CopyrightData, TemplateManager};

/// Runs the tool with the given arguments.
///
/// # Returns
///
/// `Ok(true)` if every file was processed without error (and, in check-only
/// mode, none was missing a header). Startup failures such as an unreadable
/// template or an invalid config are returned as errors.
pub async fn run(args: Cli) -> Result<bool> {
  init_tracing(args.verbose);
  if args.verbose > 0 {
    set_verbose();
  }
  args.colors.apply();

  let template_manager = match &args.license_file {
    Some(path) => TemplateManager::load_template(path)?,
    None => TemplateManager::from_kind(args.license),
  };

  let year = args
    .year
    .clone()
    .unwrap_or_else(|| chrono::Local::now().year().to_string());
  let copyright = CopyrightData {
    holder: args.holder.clone(),
    year,
  };

  let run_config = load_config(args.config.as_deref())?;

  let workers = args
    .jobs
    .and_then(|jobs| usize::try_from(jobs).ok())
    .unwrap_or_else(default_workers);
  debug!("Using {} workers", workers);

  let processor = Processor::new(ProcessorConfig {
    run_config,
    check_only: args.check,
    workers,
    ..ProcessorConfig::new(template_manager, copyright)
  })?;

  let summary = processor.process(&args.patterns).await?;
  print_summary(&summary, processor.is_check_only());

  Ok(summary.is_success())
}
