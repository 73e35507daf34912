//! Task folders under a workbench's `bench/tasks` directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::errors::BenchError;
use crate::store::{TASK_CONFIG_FILE, TaskConfig, load_yaml, save_yaml};
use crate::utils::error_messages;
use crate::utils::naming::{format_dated_name, parse_dated_name};
use crate::utils::prompts::SPEC_TEMPLATE;

pub const SPEC_FILE: &str = "spec.md";
pub const IMPL_FILE: &str = "impl.md";
pub const FILES_FILE: &str = "files.md";
pub const NOTES_FILE: &str = "notes.md";
pub const JOURNAL_FILE: &str = "journal.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
  #[default]
  Open,
  Completed,
  All,
}

impl TaskFilter {
  fn matches(self, completed: Option<NaiveDate>) -> bool {
    match self {
      Self::Open => completed.is_none(),
      Self::Completed => completed.is_some(),
      Self::All => true,
    }
  }
}

/// A resolved task folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFolder {
  pub name: String,
  pub folder_name: String,
  pub path: PathBuf,
}

impl TaskFolder {
  #[must_use]
  pub fn file(&self, name: &str) -> PathBuf {
    self.path.join(name)
  }

  pub fn load_config(&self) -> Result<TaskConfig> {
    load_yaml(&self.file(TASK_CONFIG_FILE))
  }

  pub fn save_config(&self, config: &TaskConfig) -> Result<()> {
    save_yaml(&self.file(TASK_CONFIG_FILE), config)
  }

  /// Fail with the task-level message unless `file` has content.
  pub fn require_file(&self, file: &str) -> Result<()> {
    if file_non_empty(&self.file(file)) {
      return Ok(());
    }
    Err(
      BenchError::MissingInput {
        task: self.name.clone(),
        file: file.to_string(),
      }
      .into(),
    )
  }
}

/// Row of `bench task list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
  pub name: String,
  pub folder_name: String,
  pub created: NaiveDate,
  pub completed: Option<NaiveDate>,
  pub repos: Vec<String>,
  pub has_spec: bool,
  pub has_impl: bool,
  pub has_files: bool,
  pub has_journal: bool,
}

/// True when `path` is a file with at least one byte.
#[must_use]
pub fn file_non_empty(path: &Path) -> bool {
  fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}

fn task_folders(tasks_dir: &Path) -> Result<Vec<(TaskFolder, NaiveDate)>> {
  if !tasks_dir.is_dir() {
    return Ok(Vec::new());
  }
  let mut folders = Vec::new();
  for entry in fs::read_dir(tasks_dir).with_context(|| format!("read dir {}", tasks_dir.display()))? {
    let entry = entry?;
    if !entry.file_type()?.is_dir() {
      continue;
    }
    let folder_name = entry.file_name().to_string_lossy().to_string();
    let Some(parsed) = parse_dated_name(&folder_name) else {
      continue;
    };
    folders.push((
      TaskFolder {
        name: parsed.name,
        folder_name,
        path: entry.path(),
      },
      parsed.date,
    ));
  }
  folders.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.folder_name.cmp(&b.0.folder_name)));
  Ok(folders)
}

/// Find the one task folder whose name suffix (or full folder name) equals `name`.
pub fn resolve_task(tasks_dir: &Path, name: &str) -> Result<TaskFolder> {
  let folders: Vec<TaskFolder> = task_folders(tasks_dir)?
    .into_iter()
    .map(|(folder, _)| folder)
    .collect();
  if let Some(exact) = folders.iter().find(|f| f.folder_name == name) {
    return Ok(exact.clone());
  }
  let mut iter = folders.into_iter().filter(|folder| folder.name == name);
  match (iter.next(), iter.next()) {
    (None, _) => Err(BenchError::validation(error_messages::task_not_found(name)).into()),
    (Some(only), None) => Ok(only),
    (Some(first), Some(second)) => {
      let mut names = vec![first.folder_name, second.folder_name];
      names.extend(iter.map(|f| f.folder_name));
      Err(
        BenchError::validation(format!(
          "Multiple tasks match \"{name}\": {}. Please specify the full folder name.",
          names.join(", ")
        ))
        .into(),
      )
    }
  }
}

/// Create `<date> - <name>` with `task.yaml`, the spec template and empty
/// working files.
pub fn create_task_folder(
  tasks_dir: &Path,
  name: &str,
  date: NaiveDate,
  repos: Vec<String>,
) -> Result<TaskFolder> {
  if task_folders(tasks_dir)?.iter().any(|(f, _)| f.name == name) {
    return Err(
      BenchError::validation(format!("Task \"{name}\" already exists in this workbench.")).into(),
    );
  }
  let folder_name = format_dated_name(date, name);
  let path = tasks_dir.join(&folder_name);
  fs::create_dir_all(&path).with_context(|| format!("create dir {}", path.display()))?;
  let folder = TaskFolder {
    name: name.to_string(),
    folder_name,
    path,
  };
  folder.save_config(&TaskConfig {
    name: name.to_string(),
    completed: None,
    repos,
  })?;
  for (file, body) in [
    (SPEC_FILE, SPEC_TEMPLATE),
    (FILES_FILE, ""),
    (IMPL_FILE, ""),
    (NOTES_FILE, ""),
  ] {
    let target = folder.file(file);
    fs::write(&target, body).with_context(|| format!("write {}", target.display()))?;
  }
  log::debug!("created task folder {}", folder.path.display());
  Ok(folder)
}

/// Tasks matching `filter`, oldest first. Folders without a readable
/// `task.yaml` are skipped.
pub fn list_task_entries(tasks_dir: &Path, filter: TaskFilter) -> Result<Vec<TaskEntry>> {
  let mut entries = Vec::new();
  for (folder, created) in task_folders(tasks_dir)? {
    let config = match folder.load_config() {
      Ok(config) => config,
      Err(err) => {
        log::debug!("skipping {}: {err:#}", folder.folder_name);
        continue;
      }
    };
    if !filter.matches(config.completed) {
      continue;
    }
    let name = if config.name.is_empty() {
      folder.name.clone()
    } else {
      config.name
    };
    entries.push(TaskEntry {
      name,
      created,
      completed: config.completed,
      repos: config.repos,
      has_spec: file_non_empty(&folder.file(SPEC_FILE)),
      has_impl: file_non_empty(&folder.file(IMPL_FILE)),
      has_files: file_non_empty(&folder.file(FILES_FILE)),
      has_journal: file_non_empty(&folder.file(JOURNAL_FILE)),
      folder_name: folder.folder_name,
    });
  }
  Ok(entries)
}
