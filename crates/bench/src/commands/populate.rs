use std::path::PathBuf;

use anyhow::Result;

use crate::commands::{check_agent_exit, confirm_or_cancel, models};
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::mode::Mode;
use crate::utils::error_messages;
use crate::utils::log::t;
use crate::utils::prompts::{
  DIRECTORIES_PLACEHOLDER, OUTPUT_FILE_PLACEHOLDER, POPULATE_AGENTS, directories_lines,
  read_prompt, render,
};
use crate::utils::scaffold::{list_repo_directories, list_sibling_directories};
use crate::utils::validation::check_known_repos;
use crate::utils::wizard::Wizard;
use crate::{log_info, log_warn};

/// Where the agent runs and what it should look at.
struct Target {
  cwd: PathBuf,
  prompts_dir: PathBuf,
  output_file: String,
  directories: Vec<String>,
}

fn resolve_target(ctx: &AppContext) -> Result<Target> {
  let runtime = &ctx.runtime;
  match runtime.mode {
    Mode::Uninitialized => Err(BenchError::wrong_mode(error_messages::NOT_A_PROJECT).into()),
    Mode::WithinRoot => Err(
      BenchError::wrong_mode(
        "Cannot populate AGENTS.md from inside the project tree. Run this command from the project root or a workbench directory.",
      )
      .into(),
    ),
    Mode::Root => {
      let paths = runtime.paths()?;
      Ok(Target {
        cwd: paths.root().to_path_buf(),
        prompts_dir: paths.prompts_dir(),
        output_file: format!("{}/AGENTS.md", paths.config_dir_name()),
        directories: list_sibling_directories(paths.root())?,
      })
    }
    Mode::Workbench => {
      let wb = runtime.workbench_paths();
      Ok(Target {
        cwd: wb.dir().to_path_buf(),
        prompts_dir: wb.prompts_dir(),
        output_file: "./AGENTS.md".to_string(),
        directories: list_repo_directories(wb.dir())?,
      })
    }
  }
}

/// Generate AGENTS.md with a headless agent run over the project's repositories.
pub fn run(ctx: &AppContext, model: Option<&str>, repos: &[String], yes: bool) -> Result<()> {
  let mut target = resolve_target(ctx)?;

  if !repos.is_empty() {
    check_known_repos(repos, &target.directories)?;
    target.directories.retain(|d| repos.contains(d));
  }
  if target.directories.is_empty() {
    log_warn!("No directories found to scan. Nothing to populate.");
    return Ok(());
  }

  log_info!("Directories to scan:");
  Wizard::info_lines(
    &target
      .directories
      .iter()
      .map(|d| format!("  {}", t::path(format!("./{d}"))))
      .collect::<Vec<_>>(),
  );
  if !confirm_or_cancel(
    yes,
    &format!("Populate {} from these directories?", target.output_file),
    "Population cancelled.",
  )? {
    return Ok(());
  }

  let model = model.map_or_else(|| models(ctx).task, ToString::to_string);
  let template = read_prompt(&target.prompts_dir, POPULATE_AGENTS)?;
  let prompt = render(
    &template,
    &[
      (DIRECTORIES_PLACEHOLDER, &directories_lines(&target.directories)),
      (OUTPUT_FILE_PLACEHOLDER, &target.output_file),
    ],
  );

  log_info!("Populating AGENTS.md...");
  log::debug!("populate agents with model {model} in {}", target.cwd.display());
  let code = ctx.agent().run_headless(&prompt, &model, &target.cwd)?;
  check_agent_exit(code, "AGENTS.md population")
}
