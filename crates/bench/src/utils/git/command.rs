use std::path::Path;

use anyhow::Result;

use crate::errors::BenchError;
use crate::utils::child::capture_child_process;

const GIT: &str = "git";

/// Run git quietly in `cwd` and return trimmed-right stdout.
///
/// Non-zero exits become [`BenchError::GitFailed`] carrying stderr.
pub(super) fn run_git(args: &[&str], cwd: &Path) -> Result<String> {
  let out = capture_child_process("Git", GIT, args, cwd)?;
  if !out.status.success() {
    return Err(
      BenchError::GitFailed {
        command: args.join(" "),
        code: out.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
      }
      .into(),
    );
  }
  Ok(String::from_utf8_lossy(&out.stdout).trim_end().to_string())
}

/// Run git and only report whether it exited successfully.
pub(super) fn git_succeeds(args: &[&str], cwd: &Path) -> Result<bool> {
  let out = capture_child_process("Git", GIT, args, cwd)?;
  Ok(out.status.success())
}
