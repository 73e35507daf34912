//! Typed records for the YAML files bench keeps on disk, plus load/save.
//!
//! Keys are hyphenated on disk (`git-branch`, `implementation-flow`) and
//! snake_case in Rust. Unknown keys are ignored so hand-edited files keep
//! loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::BenchError;

pub const DEFAULT_MODEL: &str = "anthropic/claude-opus-4-6";

pub const BASE_CONFIG_FILE: &str = "base-config.yaml";
pub const WORKBENCH_CONFIG_FILE: &str = "workbench-config.yaml";
pub const TASK_CONFIG_FILE: &str = "task.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceRepo {
  pub dir: String,
  pub source_branch: String,
}

impl SourceRepo {
  pub fn new(dir: impl Into<String>, source_branch: impl Into<String>) -> Self {
    Self {
      dir: dir.into(),
      source_branch: source_branch.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
  pub name: String,
  #[serde(default)]
  pub repos: Vec<SourceRepo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkbenchStatus {
  #[default]
  Active,
  Inactive,
}

impl std::fmt::Display for WorkbenchStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Active => write!(f, "active"),
      Self::Inactive => write!(f, "inactive"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkbenchEntry {
  pub name: String,
  pub source: String,
  pub git_branch: String,
  #[serde(default)]
  pub status: WorkbenchStatus,
}

fn default_model() -> String {
  DEFAULT_MODEL.to_string()
}

/// Agent model per activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Models {
  #[serde(default = "default_model")]
  pub task: String,
  #[serde(default = "default_model")]
  pub discuss: String,
  #[serde(default = "default_model")]
  pub map: String,
}

impl Default for Models {
  fn default() -> Self {
    Self {
      task: default_model(),
      discuss: default_model(),
      map: default_model(),
    }
  }
}

/// One phase of a task implementation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImplementationStep {
  pub name: String,
  /// File name under the workbench `prompts/` directory.
  pub prompt: String,
  #[serde(default)]
  pub required_files: Vec<String>,
  #[serde(default)]
  pub output_files: Vec<String>,
}

impl ImplementationStep {
  fn new(name: &str, prompt: &str, required: &[&str], outputs: &[&str]) -> Self {
    Self {
      name: name.to_string(),
      prompt: prompt.to_string(),
      required_files: required.iter().map(ToString::to_string).collect(),
      output_files: outputs.iter().map(ToString::to_string).collect(),
    }
  }
}

/// Flow written into a fresh `base-config.yaml`.
#[must_use]
pub fn default_implementation_flow() -> Vec<ImplementationStep> {
  vec![
    ImplementationStep::new(
      "Writing implementation docs",
      "task-write-impl-docs.md",
      &["spec.md"],
      &["impl.md"],
    ),
    ImplementationStep::new(
      "Implementing",
      "task-do-impl.md",
      &["spec.md", "impl.md"],
      &[],
    ),
    ImplementationStep::new(
      "Updating change docs",
      "task-update-change-docs.md",
      &["spec.md", "impl.md"],
      &[],
    ),
  ]
}

/// `<config-dir>/base-config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BaseConfig {
  #[serde(default)]
  pub sources: Vec<Source>,
  #[serde(default)]
  pub workbenches: Vec<WorkbenchEntry>,
  #[serde(default)]
  pub models: Models,
  #[serde(default)]
  pub implementation_flow_template: Vec<ImplementationStep>,
}

impl BaseConfig {
  #[must_use]
  pub fn initial() -> Self {
    Self {
      implementation_flow_template: default_implementation_flow(),
      ..Self::default()
    }
  }

  #[must_use]
  pub fn source(&self, name: &str) -> Option<&Source> {
    self.sources.iter().find(|s| s.name == name)
  }

  #[must_use]
  pub fn workbench(&self, name: &str) -> Option<&WorkbenchEntry> {
    self.workbenches.iter().find(|w| w.name == name)
  }

  pub fn workbench_mut(&mut self, name: &str) -> Option<&mut WorkbenchEntry> {
    self.workbenches.iter_mut().find(|w| w.name == name)
  }

  #[must_use]
  pub fn source_names(&self) -> Vec<String> {
    self.sources.iter().map(|s| s.name.clone()).collect()
  }

  #[must_use]
  pub fn workbench_names(&self) -> Vec<String> {
    self.workbenches.iter().map(|w| w.name.clone()).collect()
  }
}

/// `<scaffold>/bench/workbench-config.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkbenchConfig {
  pub name: String,
  pub source: String,
  pub git_branch: String,
  #[serde(default)]
  pub repos: Vec<SourceRepo>,
  #[serde(default)]
  pub implementation_flow: Vec<ImplementationStep>,
}

impl WorkbenchConfig {
  #[must_use]
  pub fn repo_dirs(&self) -> Vec<String> {
    self.repos.iter().map(|r| r.dir.clone()).collect()
  }
}

/// `tasks/<YYYYMMDD - name>/task.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
  pub name: String,
  #[serde(default)]
  pub completed: Option<NaiveDate>,
  /// Repository dirs the task is scoped to. Empty means every repo.
  #[serde(default)]
  pub repos: Vec<String>,
}

/// Join names for error messages, `(none)` when empty.
#[must_use]
pub fn name_list(names: &[String]) -> String {
  if names.is_empty() {
    "(none)".to_string()
  } else {
    names.join(", ")
  }
}

/// Read a YAML mapping into `T`.
///
/// Empty documents and non-mapping documents are configuration errors.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
  let data =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let value: serde_yaml::Value =
    serde_yaml::from_str(&data).map_err(|err| BenchError::InvalidYaml {
      path: path.to_path_buf(),
      message: err.to_string(),
    })?;
  match value {
    serde_yaml::Value::Null => Err(
      BenchError::EmptyConfig {
        path: path.to_path_buf(),
      }
      .into(),
    ),
    serde_yaml::Value::Mapping(_) => serde_yaml::from_str(&data).map_err(|err| {
      BenchError::InvalidConfig {
        path: path.to_path_buf(),
        message: err.to_string(),
      }
      .into()
    }),
    _ => Err(
      BenchError::NotAMapping {
        path: path.to_path_buf(),
      }
      .into(),
    ),
  }
}

pub fn save_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
  let data = serde_yaml::to_string(value)
    .with_context(|| format!("failed to serialize {}", path.display()))?;
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
  }
  fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}
