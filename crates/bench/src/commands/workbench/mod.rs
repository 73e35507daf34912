//! Workbench lifecycle: `nonexistent -> active <-> inactive -> deleted`.
//!
//! Every command validates first and mutates afterwards. Mutations that span
//! several repositories are not rolled back if a later repository fails.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::{AppContext, BenchPaths};
use crate::errors::BenchError;
use crate::mode::Mode;
use crate::store::{BaseConfig, SourceRepo, WorkbenchConfig, WorkbenchEntry, load_yaml};
use crate::utils::error_messages;
use crate::utils::git::{add_worktree, list_local_branches};
use crate::utils::validation::{ensure_repo_dir, missing_branch};
use crate::utils::log::t;
use crate::{log_info, log_success};

pub mod activate;
pub mod create;
pub mod delete;
pub mod list;
pub mod push;
pub mod retire;
pub mod update;

pub(crate) fn find_entry<'a>(base: &'a BaseConfig, name: &str) -> Result<&'a WorkbenchEntry> {
  base.workbench(name).ok_or_else(|| {
    BenchError::validation(error_messages::workbench_not_found(
      name,
      &base.workbench_names(),
    ))
    .into()
  })
}

/// Workbench name for commands that accept `[name]` from ROOT and infer it
/// from the cwd in WORKBENCH mode.
pub(crate) fn target_name(ctx: &AppContext, name: Option<&str>) -> Result<String> {
  match (ctx.runtime.mode, name) {
    (Mode::Workbench, Some(_)) => Err(
      BenchError::validation(
        "Do not provide a workbench name when running from a workbench directory.",
      )
      .into(),
    ),
    (Mode::Workbench, None) => Ok(ctx.runtime.workbench_name()),
    (_, Some(name)) => Ok(name.to_string()),
    (_, None) => Err(
      BenchError::validation("A workbench name is required when running from the project root.")
        .into(),
    ),
  }
}

pub(crate) fn load_workbench_config(paths: &BenchPaths, name: &str) -> Result<WorkbenchConfig> {
  load_yaml(&paths.workbench_config_path(name))
}

/// A worktree to add once every repository has been checked.
#[derive(Debug, Clone)]
pub(crate) struct WorktreePlan {
  pub repo: SourceRepo,
  /// `None` checks out the existing branch; otherwise branch from here.
  pub start_point: Option<String>,
}

/// Check every repository and decide how its worktree on `branch` gets
/// created. Runs before anything is written so a bad repo leaves no trace.
pub(crate) fn plan_worktrees(
  paths: &BenchPaths,
  branch: &str,
  repos: &[SourceRepo],
) -> Result<Vec<WorktreePlan>> {
  repos
    .iter()
    .map(|repo| -> Result<WorktreePlan> {
      let main_repo = ensure_repo_dir(paths.root(), &repo.dir)?;
      let branches = list_local_branches(&main_repo)?;
      let start_point = if branches.iter().any(|b| b == branch) {
        None
      } else if branches.contains(&repo.source_branch) {
        Some(repo.source_branch.clone())
      } else {
        return Err(missing_branch(repo, &branches).into());
      };
      Ok(WorktreePlan {
        repo: repo.clone(),
        start_point,
      })
    })
    .collect()
}

/// Create `workbench/<name>/repo/<dir>` on `branch` as planned.
pub(crate) fn add_repo_worktree(
  paths: &BenchPaths,
  name: &str,
  branch: &str,
  plan: &WorktreePlan,
) -> Result<PathBuf> {
  let main_repo = paths.repo_dir(&plan.repo.dir);
  let worktree = paths.worktree_dir(name, &plan.repo.dir);
  log::debug!(
    "adding worktree {} on {branch} (start point {:?})",
    worktree.display(),
    plan.start_point
  );
  add_worktree(&main_repo, &worktree, branch, plan.start_point.as_deref())?;
  Ok(worktree)
}

pub(crate) fn print_summary(verb: &str, config: &WorkbenchConfig, worktrees: &[(String, PathBuf)]) {
  log_success!("Workbench \"{}\" {} successfully", config.name, verb);
  log_info!("  Source: {}", t::name(&config.source));
  log_info!("  Git branch: {}", t::branch(&config.git_branch));
  if worktrees.is_empty() {
    return;
  }
  log_info!("  Repositories:");
  for (dir, path) in worktrees {
    log_info!("    {} -> {}", dir, t::path(path.display()));
  }
}
