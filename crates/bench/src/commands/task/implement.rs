use anyhow::Result;

use crate::commands::models;
use crate::commands::task::render_task_prompt;
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::store::ImplementationStep;
use crate::utils::log::t;
use crate::utils::task::{TaskFolder, file_non_empty, resolve_task};
use crate::{log_info, log_success};

/// Run the workbench's implementation flow on a task, one headless agent
/// run per step.
///
/// Each step checks its required files before the agent starts and its
/// output files after a zero exit. The first failure stops the flow; there
/// is no resume, so a re-run starts from the first step again.
pub fn run(ctx: &AppContext, name: &str) -> Result<()> {
  ctx.runtime.require_workbench("task implement")?;
  let wb = ctx.runtime.workbench_paths();
  let folder = resolve_task(&wb.tasks_dir(), name)?;
  let flow = &ctx.runtime.workbench_config()?.implementation_flow;
  if flow.is_empty() {
    return Err(
      BenchError::validation("No implementation flow steps configured for this workbench.").into(),
    );
  }

  let total = flow.len();
  let names: Vec<&str> = flow.iter().map(|s| s.name.as_str()).collect();
  log_info!("Implementing task \"{}\"", name);
  log_info!("  Folder: {}", t::path(&folder.folder_name));
  log_info!("  Phases: {} ({} total)", names.join(", "), total);
  log_info!("");

  let model = models(ctx).task;
  for (idx, step) in flow.iter().enumerate() {
    run_step(ctx, &folder, step, &model, idx + 1, total)?;
  }

  let suffix = if total == 1 { "" } else { "s" };
  log_success!(
    "Task \"{}\" implementation complete ({} phase{} executed)",
    name,
    total,
    suffix
  );
  Ok(())
}

fn run_step(
  ctx: &AppContext,
  folder: &TaskFolder,
  step: &ImplementationStep,
  model: &str,
  number: usize,
  total: usize,
) -> Result<()> {
  for file in &step.required_files {
    folder.require_file(file)?;
  }

  log_info!("Phase {}/{}: {}...", number, total, step.name);
  log_info!("");
  let message = render_task_prompt(ctx, &step.prompt, folder, &[])?;
  let code = ctx
    .agent()
    .run_headless(&message, model, ctx.runtime.workbench_paths().dir())?;
  if code != 0 {
    return Err(
      BenchError::AgentExited {
        message: format!("Phase '{}' failed: opencode exited with code {code}", step.name),
        code,
      }
      .into(),
    );
  }
  log_info!("");
  log_success!("Phase {}/{} complete: {}", number, total, step.name);
  log_info!("");

  for file in &step.output_files {
    if !file_non_empty(&folder.file(file)) {
      return Err(
        BenchError::MissingOutput {
          phase: step.name.clone(),
          file: file.clone(),
        }
        .into(),
      );
    }
  }
  Ok(())
}
