use std::path::Path;

use anyhow::Result;

use crate::config::BenchConfig;
use crate::utils::child::run_child_process;

/// Launches the coding agent (`opencode` unless configured otherwise).
///
/// Only the exit code is observed; all stdio is passed through.
#[derive(Debug, Clone)]
pub struct Agent {
  program: String,
  leading_args: Vec<String>,
}

impl Agent {
  #[must_use]
  pub fn from_config(config: &BenchConfig) -> Self {
    let mut argv = config.agent_argv();
    let program = if argv.is_empty() {
      "opencode".to_string()
    } else {
      argv.remove(0)
    };
    Self {
      program,
      leading_args: argv,
    }
  }

  /// `opencode --prompt <prompt> --model <model> .` with the terminal attached.
  pub fn run_interactive(&self, prompt: &str, model: &str, cwd: &Path) -> Result<i32> {
    let args = [
      "--prompt".to_string(),
      prompt.to_string(),
      "--model".to_string(),
      model.to_string(),
      ".".to_string(),
    ];
    self.run(&args, cwd)
  }

  /// `opencode run --model <model> <message>`: runs to completion without a TUI.
  pub fn run_headless(&self, message: &str, model: &str, cwd: &Path) -> Result<i32> {
    let args = [
      "run".to_string(),
      "--model".to_string(),
      model.to_string(),
      message.to_string(),
    ];
    self.run(&args, cwd)
  }

  fn run(&self, args: &[String], cwd: &Path) -> Result<i32> {
    let mut argv = self.leading_args.clone();
    argv.extend_from_slice(args);
    let status = run_child_process(&self.program, &argv, cwd)?;
    // Killed by a signal: report a generic failure.
    Ok(status.code().unwrap_or(1))
  }
}
