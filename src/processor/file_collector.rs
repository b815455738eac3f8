//! # File Collector Module
//!
//! This module walks the requested roots and feeds every candidate file into
//! the processor's bounded queue.

use std::fs::Permissions;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc::Sender;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::ignore::IgnoreManager;

/// One file discovered by traversal.
#[derive(Debug, Clone)]
pub struct FileTask {
  pub path: PathBuf,
  /// Path below the walk start, matched against ignore patterns
  pub rel_path: PathBuf,
  /// Permission bits at discovery time, restored after a rewrite
  pub permissions: Permissions,
}

impl FileTask {
  /// Builds a task for `path` from its current metadata, as if `path` itself
  /// had been given as a root.
  pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
    let path = path.into();
    let permissions = std::fs::metadata(&path)?.permissions();
    let rel_path = relative_to(&path, &path);
    Ok(Self {
      path,
      rel_path,
      permissions,
    })
  }
}

/// The part of `path` below `start`. A file given directly as a root is
/// represented by its file name.
fn relative_to(path: &Path, start: &Path) -> PathBuf {
  match path.strip_prefix(start) {
    Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
    _ => path.file_name().map(PathBuf::from).unwrap_or_else(|| path.to_path_buf()),
  }
}

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Walking file and directory roots recursively
/// - Expanding glob roots that do not name an existing path
/// - Pruning directories matched by the built-in ignore patterns
pub struct FileCollector {
  default_ignore: IgnoreManager,
}

impl FileCollector {
  /// Creates a collector pruning paths matched by `default_ignore`.
  pub const fn new(default_ignore: IgnoreManager) -> Self {
    Self { default_ignore }
  }

  /// Walks every root and sends the files found into `tx`.
  ///
  /// This blocks whenever the queue is full. Traversal errors are logged and
  /// skipped. Returns the number of files sent; stops early if the receiving
  /// side has been closed.
  pub fn collect_into(&self, roots: &[String], tx: &Sender<FileTask>) -> usize {
    let start_time = std::time::Instant::now();
    let mut sent = 0;

    for root in roots {
      for start in expand_root(root) {
        match self.walk(&start, tx) {
          Some(count) => sent += count,
          None => {
            debug!("Receiver closed, stopping traversal after {} files", sent);
            return sent;
          }
        }
      }
    }

    debug!(
      "Discovered {} files in {}ms",
      sent,
      start_time.elapsed().as_millis()
    );

    sent
  }

  /// Walks a single start path. Returns `None` once the receiver is gone.
  fn walk(&self, start: &Path, tx: &Sender<FileTask>) -> Option<usize> {
    let mut sent = 0;

    // Defaults apply below the start only, never to the directories above it
    let walker = WalkDir::new(start).into_iter().filter_entry(|entry| {
      entry.depth() == 0 || !self.default_ignore.is_ignored(&relative_to(entry.path(), start))
    });

    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          let path = e.path().unwrap_or(start).display().to_string();
          warn!("{} error: {}", path, e);
          continue;
        }
      };

      let file_type = entry.file_type();
      if file_type.is_dir() {
        continue;
      }
      if file_type.is_symlink() {
        trace!("Skipping: {} (symlink)", entry.path().display());
        continue;
      }

      let permissions = match entry.metadata() {
        Ok(metadata) => metadata.permissions(),
        Err(e) => {
          warn!("{} error: {}", entry.path().display(), e);
          continue;
        }
      };

      let rel_path = relative_to(entry.path(), start);
      let task = FileTask {
        path: entry.into_path(),
        rel_path,
        permissions,
      };
      tx.blocking_send(task).ok()?;
      sent += 1;
    }

    Some(sent)
  }
}

/// Resolves a root argument to the paths to walk.
///
/// An existing path is walked as is. Anything else is tried as a glob
/// pattern; a pattern matching nothing is logged and yields no paths.
fn expand_root(root: &str) -> Vec<PathBuf> {
  let path = PathBuf::from(root);
  if path.exists() || path.symlink_metadata().is_ok() {
    return vec![path];
  }

  match glob::glob(root) {
    Ok(entries) => {
      let mut paths = Vec::new();
      for entry in entries {
        match entry {
          Ok(p) => paths.push(p),
          Err(e) => warn!("Error with glob pattern {}: {}", root, e),
        }
      }
      if paths.is_empty() {
        warn!("{} error: no such file or directory", root);
      }
      paths
    }
    Err(e) => {
      warn!("{} error: {}", root, e);
      Vec::new()
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;
  use tokio::sync::mpsc;

  use super::*;

  fn collect_all(roots: &[String]) -> Vec<PathBuf> {
    let collector = FileCollector::new(IgnoreManager::defaults().expect("defaults compile"));
    let (tx, mut rx) = mpsc::channel(1024);
    collector.collect_into(roots, &tx);
    drop(tx);

    let mut paths = Vec::new();
    while let Ok(task) = rx.try_recv() {
      paths.push(task.path);
    }
    paths.sort();
    paths
  }

  #[test]
  fn test_collects_files_recursively_and_prunes_defaults() {
    let dir = tempdir().expect("create temp dir");
    let root = dir.path();
    fs::create_dir_all(root.join("src/nested")).expect("mkdir");
    fs::create_dir_all(root.join(".git/objects")).expect("mkdir");
    fs::create_dir_all(root.join("web/node_modules/pkg")).expect("mkdir");
    fs::write(root.join("src/main.go"), "package main\n").expect("write");
    fs::write(root.join("src/nested/lib.rs"), "fn x() {}\n").expect("write");
    fs::write(root.join(".git/objects/abc"), "blob").expect("write");
    fs::write(root.join("web/node_modules/pkg/index.js"), "x").expect("write");

    let paths = collect_all(&[root.display().to_string()]);

    assert_eq!(
      paths,
      vec![root.join("src/main.go"), root.join("src/nested/lib.rs")]
    );
  }

  #[test]
  fn test_root_inside_default_ignored_directory() {
    let dir = tempdir().expect("create temp dir");
    let root = dir.path().join("node_modules/pkg");
    fs::create_dir_all(root.join("lib")).expect("mkdir");
    fs::create_dir_all(root.join("node_modules/dep")).expect("mkdir");
    fs::write(root.join("lib/index.js"), "x").expect("write");
    fs::write(root.join("node_modules/dep/index.js"), "x").expect("write");

    assert_eq!(
      collect_all(&[root.display().to_string()]),
      vec![root.join("lib/index.js")]
    );
  }

  #[test]
  fn test_relative_paths() {
    let dir = tempdir().expect("create temp dir");
    fs::create_dir_all(dir.path().join("src")).expect("mkdir");
    let file = dir.path().join("src/main.go");
    fs::write(&file, "package main\n").expect("write");

    let collector = FileCollector::new(IgnoreManager::defaults().expect("defaults compile"));
    let (tx, mut rx) = mpsc::channel(16);
    collector.collect_into(&[dir.path().display().to_string()], &tx);
    drop(tx);

    let task = rx.try_recv().expect("one task");
    assert_eq!(task.rel_path, PathBuf::from("src/main.go"));

    let single = FileTask::from_path(&file).expect("stat");
    assert_eq!(single.rel_path, PathBuf::from("main.go"));
  }

  #[test]
  fn test_single_file_root() {
    let dir = tempdir().expect("create temp dir");
    let file = dir.path().join("a.py");
    fs::write(&file, "print(1)\n").expect("write");

    assert_eq!(collect_all(&[file.display().to_string()]), vec![file]);
  }

  #[test]
  fn test_glob_root() {
    let dir = tempdir().expect("create temp dir");
    fs::write(dir.path().join("a.go"), "").expect("write");
    fs::write(dir.path().join("b.go"), "").expect("write");
    fs::write(dir.path().join("c.rs"), "").expect("write");

    let pattern = format!("{}/*.go", dir.path().display());
    assert_eq!(
      collect_all(&[pattern]),
      vec![dir.path().join("a.go"), dir.path().join("b.go")]
    );
  }

  #[test]
  fn test_missing_root_yields_nothing() {
    let dir = tempdir().expect("create temp dir");
    let missing = dir.path().join("missing");
    assert!(collect_all(&[missing.display().to_string()]).is_empty());
  }

  #[cfg(unix)]
  #[test]
  fn test_symlinks_are_skipped() {
    let dir = tempdir().expect("create temp dir");
    let target = dir.path().join("real.go");
    fs::write(&target, "package x\n").expect("write");
    std::os::unix::fs::symlink(&target, dir.path().join("link.go")).expect("symlink");

    assert_eq!(collect_all(&[dir.path().display().to_string()]), vec![target]);
  }
}
