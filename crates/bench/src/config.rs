use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;
use serde::Deserialize;
use toml::Value as TomlValue;

use crate::mode::RuntimeContext;
use crate::utils::agent::Agent;

/// Config directory names, canonical first.
pub const CONFIG_DIR_NAMES: [&str; 2] = [".bench", "bench"];

/// Name used when creating a new project.
pub const CANONICAL_CONFIG_DIR: &str = ".bench";

/// Name of the per-workbench data dir inside a scaffold.
pub const WORKBENCH_DATA_DIR: &str = "bench";

/// Known top-level keys of `bench.toml`.
const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["log_level", "agent"];

/// Known keys within `[agent]`.
const KNOWN_AGENT_KEYS: &[&str] = &["cmd"];

const CONFIG_FILE: &str = "bench.toml";

// Embed repository defaults
const DEFAULT_TOML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/bench.toml"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Off,
  Error,
  #[default]
  Warn,
  Info,
  Debug,
  Trace,
}

impl LogLevel {
  #[must_use]
  pub fn as_filter(self) -> &'static str {
    match self {
      Self::Off => "off",
      Self::Error => "error",
      Self::Warn => "warn",
      Self::Info => "info",
      Self::Debug => "debug",
      Self::Trace => "trace",
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentConfig {
  #[serde(default)]
  pub cmd: Vec<String>,
}

/// Tool settings merged from defaults, the XDG file and the project file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchConfig {
  #[serde(default)]
  pub log_level: LogLevel,
  #[serde(default)]
  pub agent: AgentConfig,
}

impl BenchConfig {
  /// Resolve the agent argv prefix with precedence: `$BENCH_AGENT` -> config -> [`opencode`].
  #[must_use]
  pub fn agent_argv(&self) -> Vec<String> {
    if let Some(tokens) = agent_env_argv() {
      return tokens;
    }
    if !self.agent.cmd.is_empty() {
      return self.agent.cmd.clone();
    }
    vec!["opencode".to_string()]
  }
}

#[must_use]
pub(crate) fn agent_env_argv() -> Option<Vec<String>> {
  let raw = std::env::var("BENCH_AGENT").ok()?;
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }
  let tokens = shell_words::split(trimmed).ok()?;
  if tokens.is_empty() {
    return None;
  }
  Some(tokens)
}

fn merge_values(base: &mut TomlValue, overlay: TomlValue) {
  match (base, overlay) {
    (TomlValue::Table(base_tbl), TomlValue::Table(overlay_tbl)) => {
      for (k, v) in overlay_tbl {
        match base_tbl.get_mut(&k) {
          Some(existing) => merge_values(existing, v),
          None => {
            base_tbl.insert(k, v);
          }
        }
      }
    }
    // Arrays and scalars: replace last-wins
    (base_slot, new_v) => *base_slot = new_v,
  }
}

/// Warn about unknown keys so typos do not go unnoticed.
fn warn_unknown_keys(val: &TomlValue, file_path: &Path) {
  let TomlValue::Table(table) = val else {
    return;
  };

  for key in table.keys() {
    if !KNOWN_TOP_LEVEL_KEYS.contains(&key.as_str()) {
      anstream::eprintln!(
        "{}: unknown config key '{}' in {} (did you mean one of: {}?)",
        "warning".yellow(),
        key,
        file_path.display(),
        KNOWN_TOP_LEVEL_KEYS.join(", ")
      );
    }
  }

  if let Some(TomlValue::Table(agent)) = table.get("agent") {
    for key in agent.keys() {
      if !KNOWN_AGENT_KEYS.contains(&key.as_str()) {
        anstream::eprintln!(
          "{}: unknown config key 'agent.{}' in {} (known keys: {})",
          "warning".yellow(),
          key,
          file_path.display(),
          KNOWN_AGENT_KEYS.join(", ")
        );
      }
    }
  }
}

fn merge_file(merged: &mut TomlValue, path: &Path) -> Result<()> {
  let data =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let val: TomlValue =
    toml::from_str(&data).with_context(|| format!("invalid TOML in {}", path.display()))?;
  warn_unknown_keys(&val, path);
  merge_values(merged, val);
  Ok(())
}

/// Load and merge tool settings.
///
/// `project_config_dir` is the project's config directory (e.g. `<root>/.bench`)
/// when one was detected.
pub fn load_config(project_config_dir: Option<&Path>) -> Result<BenchConfig> {
  let mut merged: TomlValue =
    toml::from_str(DEFAULT_TOML).context("invalid embedded default config")?;

  let xdg = xdg::BaseDirectories::with_prefix("bench");
  if let Some(global_path) = xdg.find_config_file(CONFIG_FILE) {
    merge_file(&mut merged, &global_path)?;
  }

  if let Some(dir) = project_config_dir {
    let project_cfg = dir.join(CONFIG_FILE);
    if project_cfg.is_file() {
      merge_file(&mut merged, &project_cfg)?;
    }
  }

  let merged_str = toml::to_string(&merged).context("failed to serialize merged config")?;
  let cfg: BenchConfig = toml::from_str(&merged_str).context("failed to parse merged config")?;
  Ok(cfg)
}

/// Per-invocation state handed to every command.
#[derive(Debug, Clone)]
pub struct AppContext {
  pub runtime: RuntimeContext,
  pub config: BenchConfig,
}

impl AppContext {
  #[must_use]
  pub fn agent(&self) -> Agent {
    Agent::from_config(&self.config)
  }
}

/// Paths of a bench project, anchored at the project root.
#[derive(Debug, Clone)]
pub struct BenchPaths {
  root: PathBuf,
  config_dir_name: String,
}

impl BenchPaths {
  pub fn new(root: impl Into<PathBuf>, config_dir_name: impl Into<String>) -> Self {
    Self {
      root: root.into(),
      config_dir_name: config_dir_name.into(),
    }
  }

  #[must_use]
  pub fn root(&self) -> &Path {
    &self.root
  }

  #[must_use]
  pub fn config_dir_name(&self) -> &str {
    &self.config_dir_name
  }

  #[must_use]
  pub fn config_dir(&self) -> PathBuf {
    self.root.join(&self.config_dir_name)
  }

  #[must_use]
  pub fn base_config_path(&self) -> PathBuf {
    self.config_dir().join(crate::store::BASE_CONFIG_FILE)
  }

  #[must_use]
  pub fn prompts_dir(&self) -> PathBuf {
    self.config_dir().join("prompts")
  }

  #[must_use]
  pub fn maps_dir(&self) -> PathBuf {
    self.config_dir().join("maps")
  }

  /// `<root>/<repo>`: the main checkout a worktree is created from.
  #[must_use]
  pub fn repo_dir(&self, dir: &str) -> PathBuf {
    self.root.join(dir)
  }

  /// Durable per-workbench data: `<config-dir>/workbench/<name>`.
  #[must_use]
  pub fn scaffold_dir(&self, name: &str) -> PathBuf {
    self.config_dir().join("workbench").join(name)
  }

  /// Disposable working area: `workbench/<name>`.
  #[must_use]
  pub fn workspace_dir(&self, name: &str) -> PathBuf {
    self.root.join("workbench").join(name)
  }

  #[must_use]
  pub fn worktree_dir(&self, name: &str, dir: &str) -> PathBuf {
    self.workspace_dir(name).join("repo").join(dir)
  }

  #[must_use]
  pub fn workbench_config_path(&self, name: &str) -> PathBuf {
    self
      .scaffold_dir(name)
      .join(WORKBENCH_DATA_DIR)
      .join(crate::store::WORKBENCH_CONFIG_FILE)
  }
}

/// Paths inside a workbench workspace (the cwd in WORKBENCH mode).
#[derive(Debug, Clone)]
pub struct WorkbenchPaths {
  dir: PathBuf,
  data_dir_name: String,
}

impl WorkbenchPaths {
  pub fn new(dir: impl Into<PathBuf>, data_dir_name: impl Into<String>) -> Self {
    Self {
      dir: dir.into(),
      data_dir_name: data_dir_name.into(),
    }
  }

  #[must_use]
  pub fn dir(&self) -> &Path {
    &self.dir
  }

  #[must_use]
  pub fn data_dir(&self) -> PathBuf {
    self.dir.join(&self.data_dir_name)
  }

  #[must_use]
  pub fn data_dir_name(&self) -> &str {
    &self.data_dir_name
  }

  #[must_use]
  pub fn tasks_dir(&self) -> PathBuf {
    self.data_dir().join("tasks")
  }

  #[must_use]
  pub fn discussions_dir(&self) -> PathBuf {
    self.data_dir().join("discussions")
  }

  #[must_use]
  pub fn prompts_dir(&self) -> PathBuf {
    self.data_dir().join("prompts")
  }

  #[must_use]
  pub fn maps_dir(&self) -> PathBuf {
    self.data_dir().join("maps")
  }
}
