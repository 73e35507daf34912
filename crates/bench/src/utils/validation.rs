//! Shared checks for `dir:branch` repository specs.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::errors::BenchError;
use crate::store::{SourceRepo, name_list};
use crate::utils::error_messages;
use crate::utils::git::{is_git_repository, list_local_branches};

/// Parse `directory-name:branch-name`; exactly one `:` and both sides non-empty.
pub fn parse_repo_spec(spec: &str) -> Result<SourceRepo> {
  let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
  match parts.as_slice() {
    [dir, branch] if !dir.is_empty() && !branch.is_empty() => Ok(SourceRepo::new(*dir, *branch)),
    _ => Err(BenchError::validation(error_messages::invalid_repo_spec(spec)).into()),
  }
}

pub fn parse_repo_specs(specs: &[String]) -> Result<Vec<SourceRepo>> {
  specs.iter().map(|s| parse_repo_spec(s)).collect()
}

/// Check that `<root>/<dir>` exists and is a git repository.
pub fn ensure_repo_dir(root: &Path, dir: &str) -> Result<PathBuf> {
  let path = root.join(dir);
  if !path.is_dir() {
    return Err(
      BenchError::validation(format!(
        "Repository directory \"{dir}\" does not exist in project root: {}",
        root.display()
      ))
      .into(),
    );
  }
  if !is_git_repository(&path) {
    return Err(
      BenchError::validation(format!("Directory \"{dir}\" is not a git repository")).into(),
    );
  }
  Ok(path)
}

pub(crate) fn missing_branch(repo: &SourceRepo, branches: &[String]) -> BenchError {
  BenchError::validation(format!(
    "Branch \"{}\" does not exist in repository \"{}\". Available local branches: {}",
    repo.source_branch,
    repo.dir,
    name_list(branches)
  ))
}

/// Check that `<root>/<dir>` is a git repository with a local `branch`.
pub fn validate_repo(root: &Path, repo: &SourceRepo) -> Result<()> {
  let path = ensure_repo_dir(root, &repo.dir)?;
  let branches = list_local_branches(&path)?;
  if !branches.contains(&repo.source_branch) {
    return Err(missing_branch(repo, &branches).into());
  }
  Ok(())
}

/// Names in `requested` that are not in `available`, rejected as one error.
pub fn check_known_repos(requested: &[String], available: &[String]) -> Result<()> {
  let mut unknown: Vec<String> = requested
    .iter()
    .filter(|r| !available.contains(r))
    .cloned()
    .collect();
  unknown.sort();
  unknown.dedup();
  if unknown.is_empty() {
    return Ok(());
  }
  Err(BenchError::validation(error_messages::unknown_repositories(&unknown, available)).into())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utils::git::testing::init_repo;

  #[test]
  fn parses_dir_and_branch() {
    let repo = parse_repo_spec("api:main").unwrap();
    assert_eq!(repo, SourceRepo::new("api", "main"));
    let repo = parse_repo_spec(" web : feature/x ").unwrap();
    assert_eq!(repo, SourceRepo::new("web", "feature/x"));
  }

  #[test]
  fn rejects_malformed_specs() {
    for spec in ["api", ":main", "api:", "", "api:feature:x"] {
      let err = parse_repo_spec(spec).unwrap_err();
      assert_eq!(
        err.to_string(),
        format!("Invalid --add-repo format \"{spec}\". Expected format: directory-name:branch-name")
      );
    }
  }

  #[test]
  fn validates_directory_repository_and_branch() {
    let root = tempfile::tempdir().unwrap();
    let err = validate_repo(root.path(), &SourceRepo::new("missing-dir", "main")).unwrap_err();
    assert!(err.to_string().starts_with(
      "Repository directory \"missing-dir\" does not exist in project root:"
    ));

    std::fs::create_dir(root.path().join("plain")).unwrap();
    let err = validate_repo(root.path(), &SourceRepo::new("plain", "main")).unwrap_err();
    assert_eq!(err.to_string(), "Directory \"plain\" is not a git repository");

    init_repo(&root.path().join("api"));
    assert!(validate_repo(root.path(), &SourceRepo::new("api", "main")).is_ok());
    let err = validate_repo(root.path(), &SourceRepo::new("api", "nope")).unwrap_err();
    assert_eq!(
      err.to_string(),
      "Branch \"nope\" does not exist in repository \"api\". Available local branches: main"
    );
  }

  #[test]
  fn unknown_repos_are_listed() {
    let err = check_known_repos(&["x".into(), "api".into()], &["api".into(), "web".into()])
      .unwrap_err();
    assert_eq!(err.to_string(), "Unknown repositories: x. Available: api, web");
  }
}
