use std::fs;

use anyhow::{Context, Result};

use crate::commands::confirm_or_cancel;
use crate::commands::workbench::{find_entry, load_workbench_config};
use crate::config::AppContext;
use crate::store::{WorkbenchStatus, save_yaml};
use crate::utils::git::{branch_exists, delete_branch, prune_worktrees};
use crate::{log_info, log_success};

/// Remove a workbench in either state: workspace, branches, scaffold and entry.
pub fn run(ctx: &AppContext, name: &str, yes: bool) -> Result<()> {
  ctx.runtime.require_root("workbench delete")?;
  let paths = ctx.runtime.paths()?;
  let mut base = ctx.runtime.base_config()?.clone();
  let entry = find_entry(&base, name)?.clone();

  // The scaffold may already be gone; fall back to the source's repos.
  let repos = match load_workbench_config(&paths, name) {
    Ok(config) => config.repos,
    Err(err) => {
      log::debug!("no workbench config for {name}: {err:#}");
      base
        .source(&entry.source)
        .map(|s| s.repos.clone())
        .unwrap_or_default()
    }
  };

  let prompt = format!(
    "Delete workbench \"{name}\"? This removes its workspace, its data under {} and the branch \"{}\" in {} repo(s).",
    paths.scaffold_dir(name).display(),
    entry.git_branch,
    repos.len()
  );
  if !confirm_or_cancel(yes, &prompt, "Deletion cancelled.")? {
    return Ok(());
  }

  if entry.status == WorkbenchStatus::Active {
    let workspace = paths.workspace_dir(name);
    if workspace.exists() {
      fs::remove_dir_all(&workspace)
        .with_context(|| format!("failed to remove {}", workspace.display()))?;
    }
    for repo in &repos {
      let main_repo = paths.repo_dir(&repo.dir);
      if main_repo.is_dir() {
        prune_worktrees(&main_repo)?;
      }
    }
  }

  let mut deleted = 0;
  for repo in &repos {
    let main_repo = paths.repo_dir(&repo.dir);
    if !main_repo.is_dir() {
      continue;
    }
    if branch_exists(&main_repo, &entry.git_branch)? {
      delete_branch(&main_repo, &entry.git_branch)?;
      deleted += 1;
    }
  }

  let scaffold = paths.scaffold_dir(name);
  if scaffold.exists() {
    fs::remove_dir_all(&scaffold)
      .with_context(|| format!("failed to remove {}", scaffold.display()))?;
  }
  base.workbenches.retain(|w| w.name != name);
  save_yaml(&paths.base_config_path(), &base)?;

  log_success!("Workbench \"{}\" deleted successfully", name);
  log_info!("  Branches deleted: {}", deleted);
  Ok(())
}
