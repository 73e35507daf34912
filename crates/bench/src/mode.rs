//! Runtime mode detection.
//!
//! The mode is a pure function of the filesystem around the working
//! directory: marker files inside a `.bench/` (or `bench/`) directory decide
//! whether we are at a project root, inside a workbench, somewhere below a
//! root, or outside any project.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{BenchPaths, CONFIG_DIR_NAMES, WorkbenchPaths};
use crate::errors::BenchError;
use crate::store::{BASE_CONFIG_FILE, BaseConfig, WORKBENCH_CONFIG_FILE, WorkbenchConfig, load_yaml};
use crate::utils::error_messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Root,
  Workbench,
  WithinRoot,
  Uninitialized,
}

impl Mode {
  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      Self::Root => "root",
      Self::Workbench => "workbench",
      Self::WithinRoot => "within_root",
      Self::Uninitialized => "uninitialized",
    }
  }
}

/// Everything a command needs to know about where it runs.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
  pub mode: Mode,
  pub cwd: PathBuf,
  pub root_path: Option<PathBuf>,
  pub config_dir_name: Option<String>,
  pub base_config: Option<BaseConfig>,
  pub workbench_config: Option<WorkbenchConfig>,
}

/// Walk upward from `start` (inclusive) looking for a project root marker.
///
/// Returns the root directory and the config dir name that holds the marker.
pub fn find_bench_root(start: &Path) -> Option<(PathBuf, String)> {
  start.ancestors().find_map(|dir| {
    CONFIG_DIR_NAMES
      .iter()
      .find(|name| dir.join(name).join(BASE_CONFIG_FILE).is_file())
      .map(|name| (dir.to_path_buf(), (*name).to_string()))
  })
}

fn find_workbench_marker(dir: &Path) -> Option<(PathBuf, String)> {
  CONFIG_DIR_NAMES.iter().find_map(|name| {
    let marker = dir.join(name).join(WORKBENCH_CONFIG_FILE);
    marker.is_file().then(|| (marker, (*name).to_string()))
  })
}

pub fn detect_mode(cwd: &Path) -> Result<RuntimeContext> {
  let cwd = cwd
    .canonicalize()
    .with_context(|| format!("failed to resolve {}", cwd.display()))?;

  if let Some((marker, dir_name)) = find_workbench_marker(&cwd) {
    let workbench_config: WorkbenchConfig = load_yaml(&marker)?;
    let (root_path, base_config) = match cwd.parent().and_then(find_bench_root) {
      Some((root, root_dir_name)) => {
        let base: BaseConfig = load_yaml(&BenchPaths::new(&root, root_dir_name).base_config_path())?;
        (Some(root), Some(base))
      }
      None => (None, None),
    };
    log::debug!("detected workbench mode at {}", cwd.display());
    return Ok(RuntimeContext {
      mode: Mode::Workbench,
      cwd,
      root_path,
      config_dir_name: Some(dir_name),
      base_config,
      workbench_config: Some(workbench_config),
    });
  }

  if let Some((root, dir_name)) = find_bench_root(&cwd) {
    let base_config: BaseConfig = load_yaml(&BenchPaths::new(&root, &dir_name).base_config_path())?;
    let mode = if root == cwd {
      Mode::Root
    } else {
      Mode::WithinRoot
    };
    log::debug!("detected {} mode, root {}", mode.label(), root.display());
    return Ok(RuntimeContext {
      mode,
      cwd,
      root_path: Some(root),
      config_dir_name: Some(dir_name),
      base_config: Some(base_config),
      workbench_config: None,
    });
  }

  Ok(RuntimeContext {
    mode: Mode::Uninitialized,
    cwd,
    root_path: None,
    config_dir_name: None,
    base_config: None,
    workbench_config: None,
  })
}

impl RuntimeContext {
  /// Project paths; only meaningful once a root was found.
  pub fn paths(&self) -> Result<BenchPaths> {
    match (&self.root_path, &self.base_config) {
      (Some(root), Some(_)) => {
        let name = match self.mode {
          // In a workbench the marker dir is the workspace's data dir, not the root's.
          Mode::Workbench => find_bench_root(root)
            .map(|(_, name)| name)
            .unwrap_or_else(|| CONFIG_DIR_NAMES[0].to_string()),
          _ => self
            .config_dir_name
            .clone()
            .unwrap_or_else(|| CONFIG_DIR_NAMES[0].to_string()),
        };
        Ok(BenchPaths::new(root, name))
      }
      _ => Err(BenchError::wrong_mode(error_messages::UNINITIALIZED).into()),
    }
  }

  /// Workspace paths; only meaningful in WORKBENCH mode.
  #[must_use]
  pub fn workbench_paths(&self) -> WorkbenchPaths {
    let data_dir = self
      .config_dir_name
      .clone()
      .unwrap_or_else(|| crate::config::WORKBENCH_DATA_DIR.to_string());
    WorkbenchPaths::new(&self.cwd, data_dir)
  }

  /// The project config dir (`<root>/<config-dir>`), when a root is known.
  #[must_use]
  pub fn project_config_dir(&self) -> Option<PathBuf> {
    self.paths().ok().map(|p| p.config_dir())
  }

  pub fn base_config(&self) -> Result<&BaseConfig> {
    self
      .base_config
      .as_ref()
      .ok_or_else(|| BenchError::wrong_mode(error_messages::UNINITIALIZED).into())
  }

  pub fn workbench_config(&self) -> Result<&WorkbenchConfig> {
    self
      .workbench_config
      .as_ref()
      .ok_or_else(|| BenchError::wrong_mode(error_messages::UNINITIALIZED).into())
  }

  /// Name of the workbench the cwd belongs to (WORKBENCH mode).
  #[must_use]
  pub fn workbench_name(&self) -> String {
    self
      .cwd
      .file_name()
      .map(|n| n.to_string_lossy().to_string())
      .unwrap_or_default()
  }

  fn reject_uninitialized(&self) -> Result<()> {
    if self.mode == Mode::Uninitialized {
      return Err(BenchError::wrong_mode(error_messages::UNINITIALIZED).into());
    }
    Ok(())
  }

  pub fn require_initialized(&self) -> Result<()> {
    self.reject_uninitialized()
  }

  pub fn require_root(&self, command: &str) -> Result<()> {
    self.reject_uninitialized()?;
    if self.mode != Mode::Root {
      return Err(BenchError::wrong_mode(error_messages::root_only(command)).into());
    }
    Ok(())
  }

  pub fn require_workbench(&self, command: &str) -> Result<()> {
    self.reject_uninitialized()?;
    if self.mode != Mode::Workbench {
      return Err(BenchError::wrong_mode(error_messages::workbench_only(command)).into());
    }
    Ok(())
  }

  pub fn require_root_or_workbench(&self, command: &str) -> Result<()> {
    self.reject_uninitialized()?;
    if !matches!(self.mode, Mode::Root | Mode::Workbench) {
      return Err(BenchError::wrong_mode(error_messages::root_or_workbench(command)).into());
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::save_yaml;
  use std::fs;

  fn make_root(dir: &Path, config_dir: &str) {
    save_yaml(&dir.join(config_dir).join(BASE_CONFIG_FILE), &BaseConfig::initial()).unwrap();
  }

  fn workbench_config(name: &str) -> WorkbenchConfig {
    WorkbenchConfig {
      name: name.to_string(),
      source: "core".to_string(),
      git_branch: name.to_string(),
      repos: vec![],
      implementation_flow: vec![],
    }
  }

  #[test]
  fn no_marker_is_uninitialized() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = detect_mode(dir.path()).unwrap();
    assert_eq!(ctx.mode, Mode::Uninitialized);
    assert!(ctx.root_path.is_none());
    assert!(ctx.base_config.is_none());
  }

  #[test]
  fn root_and_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    make_root(&root, ".bench");
    let nested = root.join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let at_root = detect_mode(&root).unwrap();
    assert_eq!(at_root.mode, Mode::Root);
    assert_eq!(at_root.config_dir_name.as_deref(), Some(".bench"));

    let below = detect_mode(&nested).unwrap();
    assert_eq!(below.mode, Mode::WithinRoot);
    assert_eq!(below.root_path.as_deref(), Some(root.as_path()));
    assert!(below.base_config.is_some());
  }

  #[test]
  fn fallback_config_dir_name_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    make_root(dir.path(), "bench");
    let ctx = detect_mode(dir.path()).unwrap();
    assert_eq!(ctx.mode, Mode::Root);
    assert_eq!(ctx.config_dir_name.as_deref(), Some("bench"));
  }

  #[test]
  fn canonical_dir_wins_over_fallback() {
    let dir = tempfile::tempdir().unwrap();
    make_root(dir.path(), "bench");
    make_root(dir.path(), ".bench");
    let ctx = detect_mode(dir.path()).unwrap();
    assert_eq!(ctx.config_dir_name.as_deref(), Some(".bench"));
  }

  #[test]
  fn workbench_marker_attaches_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    make_root(&root, ".bench");
    let ws = root.join("workbench").join("wb");
    save_yaml(
      &ws.join("bench").join(WORKBENCH_CONFIG_FILE),
      &workbench_config("wb"),
    )
    .unwrap();

    let ctx = detect_mode(&ws).unwrap();
    assert_eq!(ctx.mode, Mode::Workbench);
    assert_eq!(ctx.root_path.as_deref(), Some(root.as_path()));
    assert_eq!(ctx.config_dir_name.as_deref(), Some("bench"));
    assert_eq!(ctx.workbench_name(), "wb");
    assert_eq!(ctx.workbench_config().unwrap().name, "wb");
    assert_eq!(ctx.paths().unwrap().config_dir_name(), ".bench");
  }

  #[test]
  fn orphan_workbench_has_no_root() {
    let dir = tempfile::tempdir().unwrap();
    save_yaml(
      &dir.path().join("bench").join(WORKBENCH_CONFIG_FILE),
      &workbench_config("solo"),
    )
    .unwrap();
    let ctx = detect_mode(dir.path()).unwrap();
    assert_eq!(ctx.mode, Mode::Workbench);
    assert!(ctx.root_path.is_none());
    assert!(ctx.base_config.is_none());
  }

  #[test]
  fn corrupt_marker_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join(".bench").join(BASE_CONFIG_FILE);
    fs::create_dir_all(marker.parent().unwrap()).unwrap();
    fs::write(&marker, "").unwrap();
    let err = detect_mode(dir.path()).unwrap_err();
    assert!(matches!(
      err.downcast_ref::<BenchError>(),
      Some(BenchError::EmptyConfig { .. })
    ));
  }

  #[test]
  fn detection_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    make_root(dir.path(), ".bench");
    let first = detect_mode(dir.path()).unwrap();
    let second = detect_mode(dir.path()).unwrap();
    assert_eq!(first.mode, second.mode);
    assert_eq!(first.root_path, second.root_path);
    assert_eq!(first.base_config, second.base_config);
  }

  #[test]
  fn gates_report_mode_errors() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = detect_mode(dir.path()).unwrap();
    let err = ctx.require_root("workbench create").unwrap_err();
    assert_eq!(
      err.to_string(),
      "This folder is uninitialized. Run 'bench init' to create a bench project first."
    );

    make_root(dir.path(), ".bench");
    let ctx = detect_mode(dir.path()).unwrap();
    assert!(ctx.require_root("workbench create").is_ok());
    let err = ctx.require_workbench("task create").unwrap_err();
    assert_eq!(
      err.to_string(),
      "The 'task create' command can only be run from a workbench directory."
    );
  }
}
