use anyhow::Result;

use crate::config::AppContext;
use crate::log_info;
use crate::store::{WorkbenchEntry, WorkbenchStatus};
use crate::utils::log::t;
use crate::utils::term::print_table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkbenchFilter {
  #[default]
  All,
  Active,
  Inactive,
}

impl WorkbenchFilter {
  fn matches(self, entry: &WorkbenchEntry) -> bool {
    match self {
      Self::All => true,
      Self::Active => entry.status == WorkbenchStatus::Active,
      Self::Inactive => entry.status == WorkbenchStatus::Inactive,
    }
  }

  fn empty_message(self) -> &'static str {
    match self {
      Self::All => "No workbenches defined. Use 'bench workbench create' to create one.",
      Self::Active => "No active workbenches.",
      Self::Inactive => "No inactive workbenches.",
    }
  }
}

pub fn run(ctx: &AppContext, filter: WorkbenchFilter) -> Result<()> {
  ctx.runtime.require_initialized()?;
  let base = ctx.runtime.base_config()?;
  let rows: Vec<Vec<String>> = base
    .workbenches
    .iter()
    .filter(|w| filter.matches(w))
    .map(|w| {
      let status = match w.status {
        WorkbenchStatus::Active => t::ok(w.status),
        WorkbenchStatus::Inactive => t::dim(w.status),
      };
      vec![w.name.clone(), w.source.clone(), t::branch(&w.git_branch), status]
    })
    .collect();
  if rows.is_empty() {
    log_info!("{}", filter.empty_message());
    return Ok(());
  }
  print_table(&["Name", "Source", "Branch", "Status"], &rows);
  Ok(())
}
