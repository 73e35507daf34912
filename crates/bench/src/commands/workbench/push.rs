use anyhow::Result;

use crate::commands::workbench::{find_entry, load_workbench_config, target_name};
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::store::WorkbenchStatus;
use crate::utils::error_messages;
use crate::utils::git::push_branch;
use crate::utils::log::t;
use crate::{log_info, log_success, log_warn};

/// Push the workbench branch of every worktree to `origin`.
pub fn run(ctx: &AppContext, name: Option<&str>) -> Result<()> {
  ctx.runtime.require_root_or_workbench("workbench push")?;
  let name = target_name(ctx, name)?;
  let paths = ctx.runtime.paths()?;
  let entry = find_entry(ctx.runtime.base_config()?, &name)?;
  if entry.status == WorkbenchStatus::Inactive {
    return Err(BenchError::validation(error_messages::workbench_inactive(&name)).into());
  }
  let config = load_workbench_config(&paths, &name)?;

  let mut pushed = 0;
  for repo in &config.repos {
    let worktree = paths.worktree_dir(&name, &repo.dir);
    if !worktree.is_dir() {
      log_warn!("Skipping {}: worktree missing at {}", repo.dir, worktree.display());
      continue;
    }
    log_info!("Pushing {} ({})...", repo.dir, t::branch(&config.git_branch));
    push_branch(&worktree, &config.git_branch)?;
    pushed += 1;
  }
  log_success!("Workbench \"{}\" pushed: {} repo(s)", name, pushed);
  Ok(())
}
