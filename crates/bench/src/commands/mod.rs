use anyhow::Result;

use crate::config::AppContext;
use crate::errors::BenchError;
use crate::store::Models;
use crate::utils::error_messages;
use crate::utils::wizard::Wizard;
use crate::{log_info, log_warn};

pub mod discuss;
pub mod init;
pub mod map;
pub mod populate;
pub mod source;
pub mod status;
pub mod task;
pub mod workbench;

/// Ask before a destructive step unless `--yes` was given.
///
/// A declined prompt prints `cancelled` and yields `false`.
pub(crate) fn confirm_or_cancel(yes: bool, prompt: &str, cancelled: &str) -> Result<bool> {
  if yes {
    return Ok(true);
  }
  if Wizard::new().confirm(prompt, false)? {
    return Ok(true);
  }
  log_warn!("{}", cancelled);
  Ok(false)
}

/// Models from the base config, or the defaults for a workbench without a root.
pub(crate) fn models(ctx: &AppContext) -> Models {
  ctx
    .runtime
    .base_config
    .as_ref()
    .map(|base| base.models.clone())
    .unwrap_or_default()
}

/// Turn a non-zero agent exit into an error carrying the code.
pub(crate) fn check_agent_exit(code: i32, during: &str) -> Result<()> {
  if code == 0 {
    return Ok(());
  }
  Err(
    BenchError::AgentExited {
      message: error_messages::agent_exited(code, during),
      code,
    }
    .into(),
  )
}

/// Print "created <path>" lines after a scaffold step.
pub(crate) fn print_created(paths: &[String]) {
  for path in paths {
    log_info!("  created {}", path);
  }
}
