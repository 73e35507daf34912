use anyhow::Result;

use crate::commands::task::run_session;
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::utils::discussion::resolve_discussions;
use crate::utils::prompts::TASK_FOLLOWUP;
use crate::utils::task::{IMPL_FILE, SPEC_FILE, file_non_empty, resolve_task};
use crate::{log_info, log_success};

/// Interactive session on an already implemented task.
pub fn run(ctx: &AppContext, name: &str, discussions: &[String]) -> Result<()> {
  ctx.runtime.require_workbench("task followup")?;
  let wb = ctx.runtime.workbench_paths();
  let folder = resolve_task(&wb.tasks_dir(), name)?;
  if !folder.file(SPEC_FILE).is_file() {
    return Err(BenchError::validation(format!("Task \"{name}\" is missing spec.md.")).into());
  }
  if !file_non_empty(&folder.file(IMPL_FILE)) {
    return Err(
      BenchError::validation(format!(
        "Task \"{name}\" has not been implemented yet (impl.md is missing or empty)."
      ))
      .into(),
    );
  }
  let discussions = resolve_discussions(&wb.discussions_dir(), discussions)?;

  log_info!("Starting followup session for task: {} ({})", name, folder.folder_name);
  log_info!("");
  run_session(ctx, TASK_FOLLOWUP, &folder, &discussions, "task followup")?;
  log_success!("Followup session complete for task: {}", name);
  Ok(())
}
