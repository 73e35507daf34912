use std::fs;

use anyhow::{Context, Result};

use crate::commands::print_created;
use crate::commands::task::run_session;
use crate::config::AppContext;
use crate::store::TASK_CONFIG_FILE;
use crate::utils::discussion::{inject_into_spec, resolve_discussions};
use crate::utils::log::t;
use crate::utils::naming::today;
use crate::utils::prompts::TASK_CREATE_SPEC;
use crate::utils::task::{FILES_FILE, IMPL_FILE, NOTES_FILE, SPEC_FILE, create_task_folder};
use crate::utils::validation::check_known_repos;
use crate::{log_info, log_success};

pub fn run(
  ctx: &AppContext,
  name: &str,
  interview: bool,
  discussions: &[String],
  only_repos: &[String],
) -> Result<()> {
  ctx.runtime.require_workbench("task create")?;
  let wb = ctx.runtime.workbench_paths();
  check_known_repos(only_repos, &ctx.runtime.workbench_config()?.repo_dirs())?;
  let discussions = resolve_discussions(&wb.discussions_dir(), discussions)?;

  let folder = create_task_folder(&wb.tasks_dir(), name, today(), only_repos.to_vec())?;
  if !discussions.is_empty() {
    let spec_path = folder.file(SPEC_FILE);
    let spec = fs::read_to_string(&spec_path)
      .with_context(|| format!("failed to read {}", spec_path.display()))?;
    fs::write(&spec_path, inject_into_spec(&spec, &discussions))
      .with_context(|| format!("failed to write {}", spec_path.display()))?;
  }

  log_success!("Task \"{}\" created successfully", name);
  log_info!("  Folder: {}", t::path(&folder.folder_name));
  log_info!("");
  let created: Vec<String> = [TASK_CONFIG_FILE, SPEC_FILE, FILES_FILE, IMPL_FILE, NOTES_FILE]
    .iter()
    .map(|file| format!("{}/tasks/{}/{file}", wb.data_dir_name(), folder.folder_name))
    .collect();
  print_created(&created);

  if interview {
    log_info!("");
    log_info!("Starting spec interview for task \"{}\"...", name);
    run_session(ctx, TASK_CREATE_SPEC, &folder, &discussions, "task interview")?;
  }
  Ok(())
}
