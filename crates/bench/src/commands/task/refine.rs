use std::fs;

use anyhow::{Context, Result};

use crate::commands::task::run_session;
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::utils::discussion::{inject_into_spec, resolve_discussions};
use crate::utils::log::t;
use crate::utils::prompts::TASK_REFINE_SPEC;
use crate::utils::task::{SPEC_FILE, resolve_task};
use crate::{log_info, log_success};

pub fn run(ctx: &AppContext, name: &str, discussions: &[String]) -> Result<()> {
  ctx.runtime.require_workbench("task refine")?;
  let wb = ctx.runtime.workbench_paths();
  let folder = resolve_task(&wb.tasks_dir(), name)?;
  let spec_path = folder.file(SPEC_FILE);
  if !spec_path.is_file() {
    return Err(BenchError::validation(format!("Task \"{name}\" is missing spec.md.")).into());
  }
  let discussions = resolve_discussions(&wb.discussions_dir(), discussions)?;
  if !discussions.is_empty() {
    let spec = fs::read_to_string(&spec_path)
      .with_context(|| format!("failed to read {}", spec_path.display()))?;
    fs::write(&spec_path, inject_into_spec(&spec, &discussions))
      .with_context(|| format!("failed to write {}", spec_path.display()))?;
  }

  log_info!("Refining task \"{}\"", name);
  log_info!("  Folder: {}", t::path(&folder.folder_name));
  log_info!("");
  run_session(ctx, TASK_REFINE_SPEC, &folder, &discussions, "task refine")?;
  log_success!("Refine session complete for task: {}", name);
  Ok(())
}
