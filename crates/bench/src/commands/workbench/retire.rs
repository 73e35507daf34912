use std::fs;

use anyhow::{Context, Result};

use crate::commands::confirm_or_cancel;
use crate::commands::workbench::{find_entry, load_workbench_config};
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::store::{WorkbenchStatus, save_yaml};
use crate::utils::git::{git_status, prune_worktrees};
use crate::utils::log::t;
use crate::{log_info, log_success, log_warn};

pub fn run(ctx: &AppContext, name: &str, yes: bool) -> Result<()> {
  ctx.runtime.require_root("workbench retire")?;
  let paths = ctx.runtime.paths()?;
  let mut base = ctx.runtime.base_config()?.clone();

  let entry = find_entry(&base, name)?;
  if entry.status == WorkbenchStatus::Inactive {
    return Err(BenchError::validation(format!("Workbench \"{name}\" is already inactive.")).into());
  }
  let workspace = paths.workspace_dir(name);
  if !workspace.is_dir() {
    return Err(
      BenchError::validation(format!(
        "Workbench \"{name}\" workspace directory does not exist: {}. The workbench may already be retired.",
        workspace.display()
      ))
      .into(),
    );
  }
  let config = load_workbench_config(&paths, name)?;

  if !yes {
    // Removing the workspace drops uncommitted work in the worktrees.
    for repo in &config.repos {
      let worktree = paths.worktree_dir(name, &repo.dir);
      if !worktree.is_dir() {
        continue;
      }
      match git_status(&worktree) {
        Ok(status) if !status.is_clean() => {
          log_warn!(
            "{} has {} uncommitted change(s)",
            repo.dir,
            status.entries().len()
          );
        }
        Ok(_) => {}
        Err(err) => log::debug!("git status failed in {}: {err:#}", worktree.display()),
      }
    }
  }
  let prompt = format!(
    "Retire workbench \"{name}\"? This will remove the workspace directory and prune associated worktrees."
  );
  if !confirm_or_cancel(yes, &prompt, "Retirement cancelled.")? {
    return Ok(());
  }

  fs::remove_dir_all(&workspace)
    .with_context(|| format!("failed to remove {}", workspace.display()))?;
  let mut pruned = 0;
  for repo in &config.repos {
    let main_repo = paths.repo_dir(&repo.dir);
    if main_repo.is_dir() {
      prune_worktrees(&main_repo)?;
      pruned += 1;
    }
  }

  if let Some(entry) = base.workbench_mut(name) {
    entry.status = WorkbenchStatus::Inactive;
  }
  save_yaml(&paths.base_config_path(), &base)?;

  log_success!("Workbench \"{}\" retired successfully", name);
  log_info!("  Repos pruned: {}", pruned);
  log_info!("  Preserved: {}", t::path(paths.scaffold_dir(name).display()));
  Ok(())
}
