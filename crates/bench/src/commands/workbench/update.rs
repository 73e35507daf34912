use anyhow::Result;

use crate::commands::workbench::{
  add_repo_worktree, find_entry, load_workbench_config, plan_worktrees, target_name,
};
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::store::{SourceRepo, WorkbenchStatus, name_list, save_yaml};
use crate::utils::error_messages;
use crate::utils::git::remove_worktree;
use crate::utils::validation::{parse_repo_specs, validate_repo};
use crate::log_success;

pub fn run(
  ctx: &AppContext,
  name: Option<&str>,
  add_specs: &[String],
  remove_dirs: &[String],
) -> Result<()> {
  ctx.runtime.require_root_or_workbench("workbench update")?;
  let name = target_name(ctx, name)?;
  if add_specs.is_empty() && remove_dirs.is_empty() {
    return Err(
      BenchError::validation("At least one --add-repo or --remove-repo option is required.").into(),
    );
  }
  let additions = parse_repo_specs(add_specs)?;

  let paths = ctx.runtime.paths()?;
  let entry = find_entry(ctx.runtime.base_config()?, &name)?;
  if entry.status == WorkbenchStatus::Inactive {
    return Err(BenchError::validation(error_messages::workbench_inactive(&name)).into());
  }
  let mut config = load_workbench_config(&paths, &name)?;

  let current = config.repo_dirs();
  for dir in remove_dirs {
    if !current.contains(dir) {
      return Err(
        BenchError::validation(format!(
          "Repo \"{dir}\" not found in workbench \"{name}\". Available repos: {}",
          name_list(&current)
        ))
        .into(),
      );
    }
  }
  let mut remaining: Vec<SourceRepo> = config
    .repos
    .iter()
    .filter(|r| !remove_dirs.contains(&r.dir))
    .cloned()
    .collect();

  let mut taken: Vec<String> = remaining.iter().map(|r| r.dir.clone()).collect();
  for addition in &additions {
    if taken.contains(&addition.dir) {
      return Err(
        BenchError::validation(format!(
          "Repository directory \"{}\" already exists in workbench \"{name}\".",
          addition.dir
        ))
        .into(),
      );
    }
    validate_repo(paths.root(), addition)?;
    taken.push(addition.dir.clone());
  }

  let plans = plan_worktrees(&paths, &config.git_branch, &additions)?;

  for dir in remove_dirs {
    remove_worktree(&paths.repo_dir(dir), &paths.worktree_dir(&name, dir))?;
  }
  for plan in &plans {
    add_repo_worktree(&paths, &name, &config.git_branch, plan)?;
  }
  remaining.extend(additions.iter().cloned());
  config.repos = remaining;
  save_yaml(&paths.workbench_config_path(&name), &config)?;

  log_success!(
    "Workbench \"{}\" updated: removed {} repo(s), added {} repo(s)",
    name,
    remove_dirs.len(),
    additions.len()
  );
  Ok(())
}
