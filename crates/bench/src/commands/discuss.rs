use anyhow::Result;

use crate::commands::{check_agent_exit, models};
use crate::config::AppContext;
use crate::log_info;
use crate::utils::discussion::list_discussions;
use crate::utils::log::t;
use crate::utils::prompts::{
  DISCUSS, EXISTING_DISCUSSIONS_PLACEHOLDER, REPOSITORIES_PLACEHOLDER, read_prompt, render,
  repositories_block,
};
use crate::utils::term::print_table;
use crate::utils::validation::check_known_repos;

/// Open an interactive discussion; the agent saves it under `bench/discussions`.
pub fn start(ctx: &AppContext, only_repos: &[String]) -> Result<()> {
  ctx.runtime.require_workbench("discuss start")?;
  let wb = ctx.runtime.workbench_paths();
  let mut repos = ctx.runtime.workbench_config()?.repo_dirs();
  if !only_repos.is_empty() {
    check_known_repos(only_repos, &repos)?;
    repos.retain(|r| only_repos.contains(r));
  }

  let existing = list_discussions(&wb.discussions_dir())?;
  let existing = if existing.is_empty() {
    "(none)".to_string()
  } else {
    existing
      .iter()
      .map(|d| format!("- {}", d.name))
      .collect::<Vec<_>>()
      .join("\n")
  };
  let template = read_prompt(&wb.prompts_dir(), DISCUSS)?;
  let prompt = render(
    &template,
    &[
      (REPOSITORIES_PLACEHOLDER, &repositories_block(&repos)),
      (EXISTING_DISCUSSIONS_PLACEHOLDER, &existing),
    ],
  );

  log_info!("Starting discussion...");
  log_info!("");
  let code = ctx
    .agent()
    .run_interactive(&prompt, &models(ctx).discuss, wb.dir())?;
  check_agent_exit(code, "discussion")
}

pub fn list(ctx: &AppContext) -> Result<()> {
  ctx.runtime.require_workbench("discuss list")?;
  let entries = list_discussions(&ctx.runtime.workbench_paths().discussions_dir())?;
  if entries.is_empty() {
    log_info!("{}", t::dim("No discussions in this workbench."));
    return Ok(());
  }
  let rows: Vec<Vec<String>> = entries
    .iter()
    .map(|d| vec![d.name.clone(), d.created.to_string()])
    .collect();
  print_table(&["Name", "Date"], &rows);
  Ok(())
}
