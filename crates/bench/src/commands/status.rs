use anyhow::Result;
use owo_colors::OwoColorize as _;

use crate::config::AppContext;
use crate::mode::{Mode, RuntimeContext};

fn mode_label(mode: Mode) -> String {
  let label = mode.label();
  match mode {
    Mode::Root => label.green().to_string(),
    Mode::Workbench => label.cyan().to_string(),
    Mode::WithinRoot => label.yellow().to_string(),
    Mode::Uninitialized => label.red().to_string(),
  }
}

/// Key/value rows describing where the command runs.
fn status_rows(runtime: &RuntimeContext) -> Vec<(&'static str, String)> {
  let mut rows = vec![("Mode", mode_label(runtime.mode))];
  let root = runtime
    .root_path
    .as_ref()
    .map(|p| p.display().to_string());
  match runtime.mode {
    Mode::Root => {
      rows.extend(root.map(|r| ("Root", r)));
    }
    Mode::Workbench => {
      if let Some(config) = &runtime.workbench_config {
        rows.push(("Workbench", config.name.clone()));
      }
      rows.extend(root.map(|r| ("Root", r)));
      rows.push(("CWD", runtime.cwd.display().to_string()));
    }
    Mode::WithinRoot => {
      if let Some(root_path) = &runtime.root_path {
        rows.push(("Root", root_path.display().to_string()));
        match runtime.cwd.strip_prefix(root_path) {
          Ok(rel) => rows.push(("Position", rel.display().to_string())),
          Err(_) => rows.push(("CWD", runtime.cwd.display().to_string())),
        }
      }
    }
    Mode::Uninitialized => {
      rows.push(("Info", "No bench project found".to_string()));
      rows.push(("CWD", runtime.cwd.display().to_string()));
    }
  }
  if let Some(base) = &runtime.base_config {
    rows.push(("Task Model", base.models.task.clone()));
  }
  rows
}

pub fn run(ctx: &AppContext) -> Result<()> {
  let rows = status_rows(&ctx.runtime);
  let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
  anstream::println!("{}", "Bench Status".bold());
  for (key, value) in rows {
    anstream::println!("{}  {}", format!("{key:<width$}").bold(), value);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mode::detect_mode;
  use crate::store::{BASE_CONFIG_FILE, BaseConfig, save_yaml};

  #[test]
  fn within_root_reports_position() {
    let dir = tempfile::tempdir().unwrap();
    save_yaml(&dir.path().join(".bench").join(BASE_CONFIG_FILE), &BaseConfig::initial()).unwrap();
    let nested = dir.path().join("api").join("src");
    std::fs::create_dir_all(&nested).unwrap();

    let rows = status_rows(&detect_mode(&nested).unwrap());
    let keys: Vec<&str> = rows.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["Mode", "Root", "Position", "Task Model"]);
    assert_eq!(rows[2].1, "api/src");
  }

  #[test]
  fn uninitialized_has_no_model_row() {
    let dir = tempfile::tempdir().unwrap();
    let rows = status_rows(&detect_mode(dir.path()).unwrap());
    let keys: Vec<&str> = rows.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["Mode", "Info", "CWD"]);
  }
}
