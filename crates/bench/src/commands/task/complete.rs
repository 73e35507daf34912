use anyhow::Result;

use crate::config::AppContext;
use crate::errors::BenchError;
use crate::utils::log::t;
use crate::utils::naming::today;
use crate::utils::task::resolve_task;
use crate::{log_info, log_success};

pub fn run(ctx: &AppContext, name: &str) -> Result<()> {
  ctx.runtime.require_workbench("task complete")?;
  let folder = resolve_task(&ctx.runtime.workbench_paths().tasks_dir(), name)?;
  let mut config = folder.load_config()?;
  if let Some(done) = config.completed {
    return Err(
      BenchError::validation(format!(
        "Task \"{name}\" is already marked as complete (completed: {done})."
      ))
      .into(),
    );
  }
  let date = today();
  config.completed = Some(date);
  folder.save_config(&config)?;

  log_success!("Task \"{}\" marked as complete", name);
  log_info!("  Folder: {}", t::path(&folder.folder_name));
  log_info!("  Completed: {}", date);
  Ok(())
}
