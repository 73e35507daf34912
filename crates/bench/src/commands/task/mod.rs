//! Task pipeline commands. All of them run from a workbench directory and
//! work on `bench/tasks/<YYYYMMDD - name>/`.

use anyhow::Result;

use crate::commands::{check_agent_exit, models};
use crate::config::AppContext;
use crate::store::TaskConfig;
use crate::utils::discussion::{DiscussionEntry, discussions_block};
use crate::utils::prompts::{
  DISCUSSIONS_PLACEHOLDER, REPOSITORIES_PLACEHOLDER, TASK_PLACEHOLDER, read_prompt, render,
  repositories_block,
};
use crate::utils::task::TaskFolder;

pub mod complete;
pub mod create;
pub mod followup;
pub mod implement;
pub mod list;
pub mod refine;

/// Repositories a task works on: its own scope, or every workbench repo.
pub(crate) fn task_repositories(ctx: &AppContext, task: &TaskConfig) -> Result<Vec<String>> {
  if !task.repos.is_empty() {
    return Ok(task.repos.clone());
  }
  Ok(ctx.runtime.workbench_config()?.repo_dirs())
}

/// Read `prompt_file` from the workbench prompts and fill in the task placeholders.
pub(crate) fn render_task_prompt(
  ctx: &AppContext,
  prompt_file: &str,
  task: &TaskFolder,
  discussions: &[DiscussionEntry],
) -> Result<String> {
  let template = read_prompt(&ctx.runtime.workbench_paths().prompts_dir(), prompt_file)?;
  let repos = task_repositories(ctx, &task.load_config()?)?;
  Ok(render(
    &template,
    &[
      (TASK_PLACEHOLDER, &task.folder_name),
      (REPOSITORIES_PLACEHOLDER, &repositories_block(&repos)),
      (DISCUSSIONS_PLACEHOLDER, &discussions_block(discussions)),
    ],
  ))
}

/// Run an interactive agent session in the workbench for `task`.
pub(crate) fn run_session(
  ctx: &AppContext,
  prompt_file: &str,
  task: &TaskFolder,
  discussions: &[DiscussionEntry],
  during: &str,
) -> Result<()> {
  let prompt = render_task_prompt(ctx, prompt_file, task, discussions)?;
  let model = models(ctx).task;
  let code = ctx
    .agent()
    .run_interactive(&prompt, &model, ctx.runtime.workbench_paths().dir())?;
  check_agent_exit(code, during)
}
