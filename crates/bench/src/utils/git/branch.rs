use std::path::Path;

use anyhow::Result;

use super::command::run_git;
use super::query::has_upstream;

/// Safe delete (`branch -d`): refuses branches that are not fully merged.
pub fn delete_branch(repo: &Path, branch: &str) -> Result<()> {
  run_git(&["branch", "-d", branch], repo)?;
  Ok(())
}

/// Push `branch` to origin, setting upstream on the first push.
pub fn push_branch(repo: &Path, branch: &str) -> Result<()> {
  if has_upstream(repo, branch)? {
    run_git(&["push", "origin", branch], repo)?;
  } else {
    run_git(&["push", "-u", "origin", branch], repo)?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::errors::BenchError;
  use crate::utils::git::branch_exists;
  use crate::utils::git::testing::{init_repo, run_git as git};

  #[test]
  fn deletes_merged_branch() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    git(dir.path(), &["branch", "topic"]);
    delete_branch(dir.path(), "topic").unwrap();
    assert!(!branch_exists(dir.path(), "topic").unwrap());
  }

  #[test]
  fn refuses_unmerged_branch() {
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    git(dir.path(), &["checkout", "--quiet", "-b", "topic"]);
    std::fs::write(dir.path().join("topic.txt"), "x").unwrap();
    git(dir.path(), &["add", "topic.txt"]);
    git(dir.path(), &["commit", "--quiet", "-m", "topic"]);
    git(dir.path(), &["checkout", "--quiet", "main"]);

    let err = delete_branch(dir.path(), "topic").unwrap_err();
    assert!(matches!(
      err.downcast_ref::<BenchError>(),
      Some(BenchError::GitFailed { .. })
    ));
    assert!(branch_exists(dir.path(), "topic").unwrap());
  }

  #[test]
  fn push_sets_upstream_then_reuses_it() {
    let dir = tempfile::tempdir().unwrap();
    let remote = dir.path().join("remote.git");
    std::fs::create_dir_all(&remote).unwrap();
    git(&remote, &["init", "--quiet", "--bare"]);
    let repo = dir.path().join("repo");
    init_repo(&repo);
    git(&repo, &["remote", "add", "origin", remote.to_str().unwrap()]);

    push_branch(&repo, "main").unwrap();
    assert_eq!(git(&repo, &["config", "--get", "branch.main.remote"]), "origin");

    std::fs::write(repo.join("more.txt"), "x").unwrap();
    git(&repo, &["add", "more.txt"]);
    git(&repo, &["commit", "--quiet", "-m", "more"]);
    push_branch(&repo, "main").unwrap();
    assert_eq!(
      git(&remote, &["rev-parse", "main"]),
      git(&repo, &["rev-parse", "main"])
    );
  }
}
