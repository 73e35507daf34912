//! Repository maps: agent-written overviews under `<config-dir>/maps` at the
//! root or `bench/maps` inside a workbench. `metamap.md` marks an initialized
//! maps directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::commands::{check_agent_exit, confirm_or_cancel, models};
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::mode::Mode;
use crate::utils::error_messages;
use crate::utils::prompts::{
  MAP_INIT, MAP_UPDATE, MAPS_LOCATION_PLACEHOLDER, REPOSITORIES_PLACEHOLDER, read_prompt, render,
  repositories_block,
};
use crate::utils::scaffold::{list_repo_directories, list_sibling_directories};
use crate::utils::validation::check_known_repos;
use crate::log_info;

const METAMAP_FILE: &str = "metamap.md";

struct MapTarget {
  maps_dir: PathBuf,
  prompts_dir: PathBuf,
  cwd: PathBuf,
  location: String,
  repos: Vec<String>,
}

fn resolve_target(ctx: &AppContext, action: &str) -> Result<MapTarget> {
  let runtime = &ctx.runtime;
  match runtime.mode {
    Mode::Uninitialized => Err(BenchError::wrong_mode(error_messages::NOT_A_PROJECT).into()),
    Mode::WithinRoot => Err(
      BenchError::wrong_mode(format!(
        "Cannot {action} maps from inside the project tree. Run this command from the project root or a workbench directory."
      ))
      .into(),
    ),
    Mode::Root => {
      let paths = runtime.paths()?;
      Ok(MapTarget {
        maps_dir: paths.maps_dir(),
        prompts_dir: paths.prompts_dir(),
        cwd: paths.root().to_path_buf(),
        location: format!("{}/maps", paths.config_dir_name()),
        repos: list_sibling_directories(paths.root())?,
      })
    }
    Mode::Workbench => {
      let wb = runtime.workbench_paths();
      Ok(MapTarget {
        maps_dir: wb.maps_dir(),
        prompts_dir: wb.prompts_dir(),
        cwd: wb.dir().to_path_buf(),
        location: format!("{}/maps", wb.data_dir_name()),
        repos: list_repo_directories(wb.dir())?,
      })
    }
  }
}

fn narrow(target: &mut MapTarget, only_repos: &[String]) -> Result<()> {
  if only_repos.is_empty() {
    return Ok(());
  }
  check_known_repos(only_repos, &target.repos)?;
  target.repos.retain(|r| only_repos.contains(r));
  Ok(())
}

fn run_agent(
  ctx: &AppContext,
  target: &MapTarget,
  prompt_file: &str,
  model: Option<&str>,
  during: &str,
) -> Result<()> {
  let model = model.map_or_else(|| models(ctx).map, ToString::to_string);
  let template = read_prompt(&target.prompts_dir, prompt_file)?;
  let prompt = render(
    &template,
    &[
      (MAPS_LOCATION_PLACEHOLDER, &target.location),
      (REPOSITORIES_PLACEHOLDER, &repositories_block(&target.repos)),
    ],
  );
  let code = ctx.agent().run_headless(&prompt, &model, &target.cwd)?;
  check_agent_exit(code, during)
}

pub fn init(ctx: &AppContext, model: Option<&str>, only_repos: &[String]) -> Result<()> {
  let mut target = resolve_target(ctx, "initialize")?;
  if target.maps_dir.join(METAMAP_FILE).exists() {
    return Err(
      BenchError::validation(
        "Maps are already initialized. Use 'bench map update' to update existing maps.",
      )
      .into(),
    );
  }
  if target.repos.is_empty() {
    return Err(BenchError::validation("No repositories found to map.").into());
  }
  narrow(&mut target, only_repos)?;

  for repo in &target.repos {
    let dir = target.maps_dir.join(repo);
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let keep = dir.join(".gitkeep");
    if !keep.exists() {
      fs::write(&keep, "").with_context(|| format!("failed to write {}", keep.display()))?;
    }
  }

  log_info!("Initializing repository maps...");
  run_agent(ctx, &target, MAP_INIT, model, "map initialization")
}

pub fn update(ctx: &AppContext, model: Option<&str>, only_repos: &[String], yes: bool) -> Result<()> {
  let mut target = resolve_target(ctx, "update")?;
  if !target.maps_dir.join(METAMAP_FILE).exists() {
    return Err(
      BenchError::validation("Maps have not been initialized. Run 'bench map init' first.").into(),
    );
  }
  if target.repos.is_empty() {
    return Err(BenchError::validation("No repositories found to update maps for.").into());
  }
  narrow(&mut target, only_repos)?;

  let mut missing: Vec<String> = target
    .repos
    .iter()
    .filter(|r| !target.maps_dir.join(r).is_dir())
    .cloned()
    .collect();
  if !missing.is_empty() {
    missing.sort();
    return Err(
      BenchError::validation(format!(
        "Map directories missing for: {}. Run 'bench map init' for these repositories first.",
        missing.join(", ")
      ))
      .into(),
    );
  }

  if !confirm_or_cancel(yes, "Update repository maps?", "Map update cancelled.")? {
    return Ok(());
  }
  log_info!("Updating repository maps...");
  run_agent(ctx, &target, MAP_UPDATE, model, "map update")
}
