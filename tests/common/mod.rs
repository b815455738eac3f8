#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use addheader::config::RunConfig;
use addheader::processor::{Processor, ProcessorConfig};
use addheader::templates::{CopyrightData, LicenseKind, TemplateManager};
use anyhow::Result;

/// Holder and year used by every test.
pub fn copyright() -> CopyrightData {
  CopyrightData {
    holder: "Acme".to_string(),
    year: "2024".to_string(),
  }
}

/// Writes `content` to `dir/rel`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
  let path = dir.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

/// Builds a processor with the given license, mode and run configuration.
pub fn processor(kind: LicenseKind, check_only: bool, run_config: RunConfig) -> Result<Processor> {
  Processor::new(ProcessorConfig {
    run_config,
    check_only,
    workers: 4,
    ..ProcessorConfig::new(TemplateManager::from_kind(kind), copyright())
  })
}

/// The root argument for a directory.
pub fn root(dir: &Path) -> Vec<String> {
  vec![dir.display().to_string()]
}
