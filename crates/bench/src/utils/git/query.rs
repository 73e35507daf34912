use std::path::Path;

use anyhow::Result;

use super::command::{git_succeeds, run_git};

/// Returns true if `dir` exists and is the top of a git working tree.
///
/// Plain directories nested inside some other repository do not count.
#[must_use]
pub fn is_git_repository(dir: &Path) -> bool {
  dir.is_dir() && gix::open(dir).is_ok()
}

/// Short names of all local branches, in git's order.
pub fn list_local_branches(repo: &Path) -> Result<Vec<String>> {
  let out = run_git(&["branch", "--format=%(refname:short)"], repo)?;
  Ok(
    out
      .lines()
      .map(str::trim)
      .filter(|line| !line.is_empty())
      .map(ToString::to_string)
      .collect(),
  )
}

pub fn branch_exists(repo: &Path, branch: &str) -> Result<bool> {
  Ok(list_local_branches(repo)?.iter().any(|b| b == branch))
}

/// Returns true when `branch` already tracks a remote.
pub fn has_upstream(repo: &Path, branch: &str) -> Result<bool> {
  let key = format!("branch.{branch}.remote");
  git_succeeds(&["config", "--get", &key], repo)
}
