//! # addheader
//!
//! A tool that ensures source code files have copyright license headers by scanning directory patterns recursively.
//!
//! `addheader` modifies source files in place and never adds a header to a file that already has one. Headers are
//! wrapped in the comment syntax of each file's language and inserted after any leading shebang or declaration line.
//!
//! ## Features
//!
//! * Recursively scan directories, files and glob patterns
//! * Comment syntax chosen from the file extension (or a user-supplied table)
//! * Check-only mode listing files without a header on stdout
//! * Ignore patterns to exclude specific files or directories
//! * Bounded concurrency across a pool of blocking workers
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use addheader::processor::{Processor, ProcessorConfig};
//! use addheader::templates::{CopyrightData, LicenseKind, TemplateManager};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let copyright = CopyrightData {
//!         holder: "Acme Inc.".to_string(),
//!         year: "2025".to_string(),
//!     };
//!     let template_manager = TemplateManager::from_kind(LicenseKind::Apache);
//!
//!     let processor = Processor::new(ProcessorConfig::new(template_manager, copyright))?;
//!     let summary = processor.process(&["src".to_string()]).await?;
//!
//!     println!("{} files modified", summary.files_modified);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Traversal, header insertion and the worker pool
//! * [`templates`] - License templates and header synthesis
//! * [`comment_style`] - Mapping from file names to comment syntax
//! * [`license_detection`] - Detection of existing headers
//! * [`ignore`] - Ignore-path matching
//! * [`config`] - Run configuration files
//! * [`logging`] - Logging utilities for verbose output

pub mod cli;
pub mod comment_style;
pub mod config;
pub mod ignore;
pub mod license_detection;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
