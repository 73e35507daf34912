use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub const TASK_PLACEHOLDER: &str = "{{TASK}}";
pub const REPOSITORIES_PLACEHOLDER: &str = "{{REPOSITORIES}}";
pub const DISCUSSIONS_PLACEHOLDER: &str = "{{DISCUSSIONS}}";
pub const EXISTING_DISCUSSIONS_PLACEHOLDER: &str = "{{EXISTING_DISCUSSIONS}}";
pub const DIRECTORIES_PLACEHOLDER: &str = "{{DIRECTORIES}}";
pub const OUTPUT_FILE_PLACEHOLDER: &str = "{{OUTPUT_FILE}}";
pub const MAPS_LOCATION_PLACEHOLDER: &str = "{{MAPS_LOCATION}}";

pub const TASK_CREATE_SPEC: &str = "task-create-spec.md";
pub const TASK_REFINE_SPEC: &str = "task-refine-spec.md";
pub const TASK_FOLLOWUP: &str = "task-followup.md";
pub const DISCUSS: &str = "discuss.md";
pub const POPULATE_AGENTS: &str = "populate-agents.md";
pub const MAP_INIT: &str = "map-init.md";
pub const MAP_UPDATE: &str = "map-update.md";

macro_rules! seed {
  ($name:literal) => {
    (
      $name,
      include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/prompts/", $name)),
    )
  };
}

/// Prompt files written into `<config-dir>/prompts` by `bench init`.
pub const SEED_PROMPTS: &[(&str, &str)] = &[
  seed!("task-create-spec.md"),
  seed!("task-refine-spec.md"),
  seed!("task-write-impl-docs.md"),
  seed!("task-do-impl.md"),
  seed!("task-update-change-docs.md"),
  seed!("task-followup.md"),
  seed!("discuss.md"),
  seed!("populate-agents.md"),
  seed!("map-init.md"),
  seed!("map-update.md"),
];

pub const AGENTS_TEMPLATE: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/AGENTS.md"));

pub const SPEC_TEMPLATE: &str = "# Spec\n\n## Introduction\n\n## Goals\n\n## Specification\n";

pub fn read_prompt(prompts_dir: &Path, file: &str) -> Result<String> {
  let path = prompts_dir.join(file);
  fs::read_to_string(&path).with_context(|| format!("failed to read prompt {}", path.display()))
}

/// Replace every `(placeholder, value)` pair in `template`.
#[must_use]
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
  vars
    .iter()
    .fold(template.to_string(), |acc, (key, value)| acc.replace(key, value))
}

/// `<repositories>` block listing `./repo/<dir>` per line.
#[must_use]
pub fn repositories_block(dirs: &[String]) -> String {
  let mut block = String::from("<repositories>\n");
  for dir in dirs {
    block.push_str("./repo/");
    block.push_str(dir);
    block.push('\n');
  }
  block.push_str("</repositories>");
  block
}

/// `./<dir>` per line.
#[must_use]
pub fn directories_lines(dirs: &[String]) -> String {
  dirs
    .iter()
    .map(|d| format!("./{d}"))
    .collect::<Vec<_>>()
    .join("\n")
}
