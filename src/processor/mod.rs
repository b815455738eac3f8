//! # Processor Module
//!
//! This module contains the core functionality for checking files for license
//! headers and inserting them where missing.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`content_transformer`] - Preamble detection and header placement
//! - [`file_collector`] - Directory traversal feeding the work queue
//!
//! The [`Processor`] struct is the main entry point. It overlaps traversal with
//! a bounded pool of blocking workers and reduces every file's [`Outcome`] into
//! a [`ProcessingSummary`].

mod content_transformer;
mod file_collector;
mod file_io;

use std::fs::Permissions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
pub use content_transformer::ContentTransformer;
pub use file_collector::{FileCollector, FileTask};
pub use file_io::FileIO;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error};

use crate::comment_style::{CommentStyleResolver, create_resolver};
use crate::config::RunConfig;
use crate::ignore::IgnoreManager;
use crate::license_detection::{LicenseDetector, PatternLicenseDetector};
use crate::logging::print_file_error;
use crate::output::print_missing_path;
use crate::report::{Outcome, ProcessingSummary, SkipReason};
use crate::templates::{CopyrightData, TemplateManager};
use crate::verbose_log;

/// Capacity of the queue between traversal and the worker pool.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Default worker-pool size: one worker per logical CPU.
pub fn default_workers() -> usize {
  num_cpus::get().max(1)
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub template_manager: TemplateManager,
  pub copyright: CopyrightData,
  pub run_config: RunConfig,

  /// Only report files missing a header, never write
  pub check_only: bool,

  /// Upper bound on files processed concurrently
  pub workers: usize,
  /// Files discovered ahead of the workers before traversal blocks
  pub queue_capacity: usize,

  /// Replaces the pattern detector built from `run_config`
  pub license_detector: Option<Box<dyn LicenseDetector>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(template_manager, copyright)
  /// }
  /// ```
  pub fn new(template_manager: TemplateManager, copyright: CopyrightData) -> Self {
    Self {
      template_manager,
      copyright,
      run_config: RunConfig::default(),
      check_only: false,
      workers: default_workers(),
      queue_capacity: DEFAULT_QUEUE_CAPACITY,
      license_detector: None,
    }
  }
}

/// Per-file pipeline shared read-only by every worker.
struct FilePipeline {
  template_manager: TemplateManager,
  copyright: CopyrightData,
  resolver: Box<dyn CommentStyleResolver>,
  ignore: IgnoreManager,
  detector: Box<dyn LicenseDetector>,
  check_only: bool,
}

impl FilePipeline {
  fn run(&self, task: &FileTask) -> Outcome {
    let result = if self.check_only {
      self.check(task)
    } else {
      self.apply(task)
    };
    let outcome = result.unwrap_or_else(Outcome::Error);

    match &outcome {
      Outcome::Skipped(reason) => verbose_log!("{}: {}", task.path.display(), reason),
      Outcome::Modified => verbose_log!("{} modified", task.path.display()),
      Outcome::AlreadyLicensed => {}
      Outcome::MissingLicense => print_missing_path(&task.path),
      Outcome::Error(e) => print_file_error(&task.path, format!("{:#}", e)),
    }

    outcome
  }

  /// Apply mode: ignore filter, classify, then insert unless already licensed.
  fn apply(&self, task: &FileTask) -> Result<Outcome> {
    if self.ignore.is_ignored(&task.rel_path) {
      return Ok(Outcome::Skipped(SkipReason::Ignored));
    }

    let Some(style) = self.resolver.resolve(&task.path) else {
      return Ok(Outcome::Skipped(SkipReason::Unsupported));
    };

    let header = self
      .template_manager
      .synthesize(&self.copyright, &style)
      .context("Failed to render license template")?;

    let modified = insert_header(&task.path, &task.permissions, header.as_bytes(), self.detector.as_ref())?;

    Ok(if modified {
      Outcome::Modified
    } else {
      Outcome::AlreadyLicensed
    })
  }

  /// Check-only mode: classify, ignore filter, then detect. Never writes.
  fn check(&self, task: &FileTask) -> Result<Outcome> {
    if self.resolver.resolve(&task.path).is_none() {
      return Ok(Outcome::Skipped(SkipReason::Unsupported));
    }

    if self.ignore.is_ignored(&task.rel_path) {
      return Ok(Outcome::Skipped(SkipReason::Ignored));
    }

    let prefix = FileIO::read_license_check_prefix(&task.path)?;

    Ok(if self.detector.has_license(&prefix) {
      Outcome::AlreadyLicensed
    } else {
      Outcome::MissingLicense
    })
  }
}

/// Inserts `header` into the file at `path` unless it already has one.
///
/// The header goes after a leading interpreter or declaration line if there
/// is one, otherwise at the very top. The file is rewritten with a single
/// whole-buffer write and keeps `permissions`.
///
/// # Returns
///
/// `true` if the file was rewritten, `false` if a header was already present.
pub fn insert_header(
  path: &Path,
  permissions: &Permissions,
  header: &[u8],
  detector: &dyn LicenseDetector,
) -> Result<bool> {
  let content = FileIO::read_full_content(path)?;
  if detector.has_license(&content) {
    return Ok(false);
  }

  let new_content = ContentTransformer::insert_header(&content, header);
  FileIO::write_file(path, &new_content, permissions)?;

  Ok(true)
}

/// Processor for handling license operations on files.
///
/// The `Processor` is responsible for:
/// - Traversing the requested roots on a blocking producer task
/// - Running each file through the pipeline on a bounded pool of blocking workers
/// - Collecting every outcome, without stopping at the first failure
pub struct Processor {
  pipeline: Arc<FilePipeline>,
  collector: Arc<FileCollector>,
  workers: usize,
  queue_capacity: usize,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  /// - Any of the ignore patterns are invalid
  /// - The worker count or queue capacity is zero
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    if config.workers == 0 {
      anyhow::bail!("Worker count must be at least 1");
    }
    if config.queue_capacity == 0 {
      anyhow::bail!("Queue capacity must be at least 1");
    }

    let ignore = IgnoreManager::new(&config.run_config.ignore_paths)?;
    let resolver = create_resolver(config.run_config.extension_rules());
    let detector = config
      .license_detector
      .unwrap_or_else(|| Box::new(PatternLicenseDetector::new(&config.run_config.has_license_patterns)));

    let collector = FileCollector::new(IgnoreManager::defaults()?);

    Ok(Self {
      pipeline: Arc::new(FilePipeline {
        template_manager: config.template_manager,
        copyright: config.copyright,
        resolver,
        ignore,
        detector,
        check_only: config.check_only,
      }),
      collector: Arc::new(collector),
      workers: config.workers,
      queue_capacity: config.queue_capacity,
    })
  }

  pub fn is_check_only(&self) -> bool {
    self.pipeline.check_only
  }

  /// Runs a single file through the pipeline on the calling thread.
  pub fn process_file(&self, task: &FileTask) -> Outcome {
    self.pipeline.run(task)
  }

  /// Processes every file under the given roots.
  ///
  /// Roots may be files, directories (walked recursively) or glob patterns.
  /// Traversal runs concurrently with the workers and blocks while the queue
  /// is full. At most `workers` files are processed at once. Every dispatched
  /// file runs to completion; failures are collected into the summary rather
  /// than aborting the run.
  ///
  /// # Errors
  ///
  /// Returns an error only if the traversal task itself fails. Per-file
  /// problems are reported through the returned summary.
  pub async fn process(&self, patterns: &[String]) -> Result<ProcessingSummary> {
    let start_time = Instant::now();

    let (tx, mut rx) = mpsc::channel::<FileTask>(self.queue_capacity);
    let collector = Arc::clone(&self.collector);
    let roots = patterns.to_vec();
    let producer = tokio::task::spawn_blocking(move || collector.collect_into(&roots, &tx));

    let semaphore = Arc::new(Semaphore::new(self.workers));
    let mut workers: JoinSet<(PathBuf, Outcome)> = JoinSet::new();
    let mut summary = ProcessingSummary::default();

    debug!("Processing with {} workers", self.workers);

    while let Some(task) = rx.recv().await {
      let permit = Arc::clone(&semaphore)
        .acquire_owned()
        .await
        .context("Worker pool closed unexpectedly")?;
      let pipeline = Arc::clone(&self.pipeline);

      workers.spawn_blocking(move || {
        let _permit = permit;
        let outcome = pipeline.run(&task);
        (task.path, outcome)
      });

      while let Some(joined) = workers.try_join_next() {
        record_joined(&mut summary, joined);
      }
    }

    let discovered = producer.await.context("File traversal task failed")?;

    while let Some(joined) = workers.join_next().await {
      record_joined(&mut summary, joined);
    }

    summary.processing_time = start_time.elapsed();
    debug!(
      "Processed {} of {} discovered files in {}ms",
      summary.total(),
      discovered,
      summary.processing_time.as_millis()
    );

    Ok(summary)
  }
}

fn record_joined(summary: &mut ProcessingSummary, joined: Result<(PathBuf, Outcome), JoinError>) {
  match joined {
    Ok((path, outcome)) => summary.record(&path, outcome),
    Err(e) => {
      error!("Worker failed: {}", e);
      summary.record_worker_failure(format!("worker failed: {}", e));
    }
  }
}
