use std::path::PathBuf;

use thiserror::Error;

/// Failures that callers classify instead of only printing.
///
/// Everything else travels as a plain `anyhow::Error` with context.
#[derive(Debug, Error)]
pub enum BenchError {
  /// A precondition failed before anything was mutated.
  #[error("{0}")]
  Validation(String),

  /// The command is not allowed in the detected runtime mode.
  #[error("{0}")]
  WrongMode(String),

  #[error("Invalid YAML in {}: {message}", path.display())]
  InvalidYaml { path: PathBuf, message: String },

  /// The YAML parsed but does not match the expected schema.
  #[error("Invalid configuration in {}: {message}", path.display())]
  InvalidConfig { path: PathBuf, message: String },

  #[error("YAML file is empty: {}", path.display())]
  EmptyConfig { path: PathBuf },

  #[error("YAML file does not contain a mapping: {}", path.display())]
  NotAMapping { path: PathBuf },

  #[error("Git command failed: git {command}\nReturn code: {code}\nstderr: {stderr}")]
  GitFailed {
    command: String,
    code: i32,
    stderr: String,
  },

  #[error("{label} is not installed or not found on PATH (tried: {program})")]
  ToolMissing { label: String, program: String },

  #[error("Not a directory: {}", path.display())]
  NotADirectory { path: PathBuf },

  #[error("Task \"{task}\" requires {file} to be present and non-empty.")]
  MissingInput { task: String, file: String },

  #[error("Phase '{phase}' completed but {file} was not created or is empty.")]
  MissingOutput { phase: String, file: String },

  /// The agent exited non-zero; `code` becomes the process exit code.
  #[error("{message}")]
  AgentExited { message: String, code: i32 },
}

impl BenchError {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  pub fn wrong_mode(message: impl Into<String>) -> Self {
    Self::WrongMode(message.into())
  }
}

/// Map an error to the process exit status.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
  match err.downcast_ref::<BenchError>() {
    Some(BenchError::AgentExited { code, .. }) if *code != 0 => *code,
    _ => 1,
  }
}
