use std::path::Path;

use anyhow::{Result, bail};

use super::command::run_git;

/// Add a linked worktree at `wt_path`.
///
/// With `start_point` a new branch is created from it (`worktree add -b`);
/// without, the existing `branch` is checked out.
pub fn add_worktree(
  repo: &Path,
  wt_path: &Path,
  branch: &str,
  start_point: Option<&str>,
) -> Result<()> {
  if wt_path.exists() {
    bail!("worktree path {} already exists", wt_path.display());
  }
  let path = wt_path.to_string_lossy();
  match start_point {
    Some(start) => run_git(
      &["worktree", "add", "--quiet", "-b", branch, path.as_ref(), start],
      repo,
    )?,
    None => run_git(&["worktree", "add", "--quiet", path.as_ref(), branch], repo)?,
  };
  Ok(())
}

/// Remove a linked worktree. Not forced: dirty worktrees make git fail.
pub fn remove_worktree(repo: &Path, wt_path: &Path) -> Result<()> {
  run_git(
    &["worktree", "remove", wt_path.to_string_lossy().as_ref()],
    repo,
  )?;
  Ok(())
}

/// Drop administrative entries of worktrees whose directories are gone.
pub fn prune_worktrees(repo: &Path) -> Result<()> {
  run_git(&["worktree", "prune"], repo)?;
  Ok(())
}
