use anyhow::Result;

use crate::config::AppContext;
use crate::log_info;
use crate::utils::log::t;
use crate::utils::task::{TaskFilter, list_task_entries};
use crate::utils::term::{check_mark, print_table};

fn empty_message(filter: TaskFilter) -> &'static str {
  match filter {
    TaskFilter::Open => "No open tasks in this workbench.",
    TaskFilter::Completed => "No completed tasks in this workbench.",
    TaskFilter::All => "No tasks in this workbench.",
  }
}

pub fn run(ctx: &AppContext, filter: TaskFilter) -> Result<()> {
  ctx.runtime.require_workbench("task list")?;
  let entries = list_task_entries(&ctx.runtime.workbench_paths().tasks_dir(), filter)?;
  if entries.is_empty() {
    log_info!("{}", t::dim(empty_message(filter)));
    return Ok(());
  }

  let rows: Vec<Vec<String>> = entries
    .iter()
    .map(|e| {
      vec![
        e.name.clone(),
        e.created.to_string(),
        e.completed.map(|d| d.to_string()).unwrap_or_default(),
        if e.repos.is_empty() {
          t::dim("all")
        } else {
          e.repos.join(", ")
        },
        check_mark(e.has_spec),
        check_mark(e.has_impl),
        check_mark(e.has_files),
        check_mark(e.has_journal),
      ]
    })
    .collect();
  print_table(
    &["Name", "Created", "Completed", "Repos", "Spec", "Impl", "Files", "Journal"],
    &rows,
  );
  Ok(())
}
