use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Output, Stdio};

use anyhow::{Context, Result};

use crate::errors::BenchError;

/// Spawn a child process with inherited stdio and wait for it.
///
/// The working directory must exist. A missing executable is reported as
/// [`BenchError::ToolMissing`] rather than a raw I/O error.
pub fn run_child_process(
  program: &str,
  args: &[String],
  cwd: &Path,
) -> Result<ExitStatus> {
  ensure_dir(cwd)?;
  log::debug!("spawn {} {:?} in {}", program, args, cwd.display());
  let status = Command::new(program)
    .current_dir(cwd)
    .args(args)
    .stdin(Stdio::inherit())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit())
    .status();
  match status {
    Ok(status) => Ok(status),
    Err(err) if err.kind() == io::ErrorKind::NotFound => Err(
      BenchError::ToolMissing {
        label: program.to_string(),
        program: program.to_string(),
      }
      .into(),
    ),
    Err(err) => Err(err).with_context(|| format!("failed to run {program}")),
  }
}

/// Run a child process with captured stdout/stderr.
pub fn capture_child_process(
  label: &str,
  program: &str,
  args: &[&str],
  cwd: &Path,
) -> Result<Output> {
  ensure_dir(cwd)?;
  log::debug!("run {} {} in {}", program, args.join(" "), cwd.display());
  let output = Command::new(program)
    .current_dir(cwd)
    .args(args)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .output();
  match output {
    Ok(out) => Ok(out),
    Err(err) if err.kind() == io::ErrorKind::NotFound => Err(
      BenchError::ToolMissing {
        label: label.to_string(),
        program: program.to_string(),
      }
      .into(),
    ),
    Err(err) => Err(err).with_context(|| format!("failed to run {program} {}", args.join(" "))),
  }
}

fn ensure_dir(cwd: &Path) -> Result<()> {
  if !cwd.is_dir() {
    return Err(
      BenchError::NotADirectory {
        path: cwd.to_path_buf(),
      }
      .into(),
    );
  }
  Ok(())
}
