//! Common error messages used across the codebase.
//! Centralizes error message strings to ensure consistency and simplify maintenance.

use std::fmt::Display;

use crate::store::name_list;

// Mode gates
pub(crate) const UNINITIALIZED: &str =
  "This folder is uninitialized. Run 'bench init' to create a bench project first.";
pub(crate) const NOT_A_PROJECT: &str = "Not inside a bench project. Run 'bench init' first.";

pub(crate) fn root_only(command: &str) -> String {
  format!("The '{command}' command can only be run from the project root directory.")
}

pub(crate) fn workbench_only(command: &str) -> String {
  format!("The '{command}' command can only be run from a workbench directory.")
}

pub(crate) fn root_or_workbench(command: &str) -> String {
  format!("The '{command}' command can only be run from the project root or a workbench directory.")
}

// Sources
pub(crate) fn source_not_found(name: &str, available: &[String]) -> String {
  format!(
    "Source \"{name}\" not found. Available sources: {}",
    name_list(available)
  )
}

// Workbenches
pub(crate) fn workbench_not_found(name: &str, available: &[String]) -> String {
  format!(
    "Workbench \"{name}\" not found. Available workbenches: {}",
    name_list(available)
  )
}

pub(crate) fn workbench_inactive(name: &str) -> String {
  format!("Workbench \"{name}\" is inactive. Activate it first with `bench workbench activate`.")
}

// Repository specs
pub(crate) fn invalid_repo_spec(spec: &str) -> String {
  format!("Invalid --add-repo format \"{spec}\". Expected format: directory-name:branch-name")
}

pub(crate) fn unknown_repositories(unknown: &[String], available: &[String]) -> String {
  format!(
    "Unknown repositories: {}. Available: {}",
    unknown.join(", "),
    name_list(available)
  )
}

// Tasks
pub(crate) fn task_not_found(name: &str) -> String {
  format!("Task \"{name}\" not found in this workbench.")
}

// Agent
pub(crate) fn agent_exited(code: impl Display, during: &str) -> String {
  format!("opencode exited with code {code} during {during}")
}
