use anyhow::Result;

use crate::commands::workbench::{
  add_repo_worktree, find_entry, load_workbench_config, plan_worktrees, print_summary,
};
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::store::{WorkbenchStatus, save_yaml};
use crate::utils::scaffold::create_workspace;

pub fn run(ctx: &AppContext, name: &str) -> Result<()> {
  ctx.runtime.require_root("workbench activate")?;
  let paths = ctx.runtime.paths()?;
  let mut base = ctx.runtime.base_config()?.clone();

  let entry = find_entry(&base, name)?;
  if entry.status == WorkbenchStatus::Active {
    return Err(BenchError::validation(format!("Workbench \"{name}\" is already active.")).into());
  }
  let scaffold = paths.scaffold_dir(name);
  if !scaffold.is_dir() {
    return Err(
      BenchError::validation(format!(
        "Workbench \"{name}\" bench directory does not exist: {}. The workbench data may have been deleted.",
        scaffold.display()
      ))
      .into(),
    );
  }
  let workspace = paths.workspace_dir(name);
  if workspace.exists() {
    return Err(
      BenchError::validation(format!(
        "Workbench \"{name}\" workspace directory already exists: {}. Remove it first before activating.",
        workspace.display()
      ))
      .into(),
    );
  }
  let config = load_workbench_config(&paths, name)?;
  let plans = plan_worktrees(&paths, &config.git_branch, &config.repos)?;

  create_workspace(&paths, name)?;
  let mut worktrees = Vec::new();
  for plan in &plans {
    let path = add_repo_worktree(&paths, name, &config.git_branch, plan)?;
    worktrees.push((plan.repo.dir.clone(), path));
  }

  if let Some(entry) = base.workbench_mut(name) {
    entry.status = WorkbenchStatus::Active;
  }
  save_yaml(&paths.base_config_path(), &base)?;

  print_summary("activated", &config, &worktrees);
  Ok(())
}
