use crate::common::test_env::TestEnv;
use anyhow::{Context, Result, anyhow};
use std::path::Path;

pub fn git_in(dir: &Path, args: &[&str]) -> Result<String> {
  let output = std::process::Command::new("git")
    .current_dir(dir)
    .args(args)
    .output()
    .context("run git command")?;
  if !output.status.success() {
    return Err(anyhow!(
      "git {:?} failed with status {status} and stderr: {stderr}",
      args,
      status = output.status,
      stderr = String::from_utf8_lossy(&output.stderr)
    ));
  }
  Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

impl TestEnv {
  /// `git` in `<root>/<relative>`.
  pub fn git_stdout(&self, relative: &str, args: &[&str]) -> Result<String> {
    git_in(&self.path().join(relative), args)
  }

  /// Create `<root>/<dir>` as a repository with one commit on `main`.
  pub fn init_repo(&self, dir: &str) -> Result<()> {
    let path = self.path().join(dir);
    std::fs::create_dir_all(&path)?;
    git_in(&path, &["init", "--quiet", "-b", "main"])?;
    git_in(&path, &["config", "user.name", "test"])?;
    git_in(&path, &["config", "user.email", "test@example.com"])?;
    git_in(&path, &["config", "commit.gpgsign", "false"])?;
    std::fs::write(path.join("README.md"), format!("# {dir}\n"))?;
    git_in(&path, &["add", "README.md"])?;
    git_in(&path, &["commit", "--quiet", "-m", "init"])?;
    Ok(())
  }

  pub fn branch_exists(&self, repo: &str, branch: &str) -> Result<bool> {
    let out = self.git_stdout(repo, &["branch", "--format=%(refname:short)"])?;
    Ok(out.lines().any(|line| line.trim() == branch))
  }
}
