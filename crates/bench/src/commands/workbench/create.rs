use anyhow::Result;

use crate::commands::workbench::{add_repo_worktree, plan_worktrees, print_summary};
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::store::{WorkbenchConfig, WorkbenchEntry, WorkbenchStatus, save_yaml};
use crate::utils::error_messages;
use crate::utils::scaffold::{create_workbench_scaffold, create_workspace};

pub fn run(ctx: &AppContext, source_name: &str, name: &str, git_branch: Option<&str>) -> Result<()> {
  ctx.runtime.require_root("workbench create")?;
  let paths = ctx.runtime.paths()?;
  let mut base = ctx.runtime.base_config()?.clone();

  let source = base.source(source_name).ok_or_else(|| {
    BenchError::validation(error_messages::source_not_found(
      source_name,
      &base.source_names(),
    ))
  })?;
  if source.repos.is_empty() {
    return Err(
      BenchError::validation(format!(
        "Source \"{source_name}\" has no repositories defined. Add repos first."
      ))
      .into(),
    );
  }
  if base.workbench(name).is_some() {
    return Err(
      BenchError::validation(format!("Workbench \"{name}\" already exists in configuration."))
        .into(),
    );
  }
  for dir in [paths.workspace_dir(name), paths.scaffold_dir(name)] {
    if dir.exists() {
      return Err(
        BenchError::validation(format!("Workbench directory already exists: {}", dir.display()))
          .into(),
      );
    }
  }

  let config = WorkbenchConfig {
    name: name.to_string(),
    source: source_name.to_string(),
    git_branch: git_branch.unwrap_or(name).to_string(),
    repos: source.repos.clone(),
    implementation_flow: base.implementation_flow_template.clone(),
  };

  let plans = plan_worktrees(&paths, &config.git_branch, &config.repos)?;

  create_workbench_scaffold(&paths, &config)?;
  create_workspace(&paths, name)?;
  let mut worktrees = Vec::new();
  for plan in &plans {
    let path = add_repo_worktree(&paths, name, &config.git_branch, plan)?;
    worktrees.push((plan.repo.dir.clone(), path));
  }

  base.workbenches.push(WorkbenchEntry {
    name: name.to_string(),
    source: source_name.to_string(),
    git_branch: config.git_branch.clone(),
    status: WorkbenchStatus::Active,
  });
  save_yaml(&paths.base_config_path(), &base)?;

  print_summary("created", &config, &worktrees);
  Ok(())
}
