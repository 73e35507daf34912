use anyhow::Result;

use crate::commands::{populate, print_created};
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::mode::{Mode, detect_mode};
use crate::utils::scaffold::create_project_scaffold;
use crate::utils::wizard::Wizard;
use crate::{log_info, log_success, log_warn};

pub fn run(ctx: &AppContext, yes: bool, no_populate: bool) -> Result<()> {
  match ctx.runtime.mode {
    Mode::Root => {
      return Err(BenchError::validation("This directory is already a bench project root.").into());
    }
    Mode::Workbench => {
      return Err(BenchError::validation("Cannot initialize inside a workbench directory.").into());
    }
    Mode::WithinRoot => {
      let root = ctx.runtime.root_path.clone().unwrap_or_default();
      return Err(
        BenchError::validation(format!(
          "Cannot initialize inside an existing bench project. Project root is at: {}",
          root.display()
        ))
        .into(),
      );
    }
    Mode::Uninitialized => {}
  }

  let created = create_project_scaffold(&ctx.runtime.cwd)?;
  log_success!("Initialized bench project");
  log_info!("");
  print_created(&created);

  if no_populate {
    return Ok(());
  }
  let accepted = yes || Wizard::new().confirm("Populate AGENTS.md now?", false)?;
  if !accepted {
    log_info!("You can populate it later with 'bench populate agents'.");
    return Ok(());
  }

  // The project exists now; re-read the context so populate sees ROOT mode.
  let populated = detect_mode(&ctx.runtime.cwd).and_then(|runtime| {
    let ctx = AppContext {
      runtime,
      config: ctx.config.clone(),
    };
    populate::run(&ctx, None, &[], true)
  });
  if let Err(err) = populated {
    log_warn!(
      "Warning: AGENTS.md population failed: {}. You can populate it later with 'bench populate agents'.",
      err
    );
  }
  Ok(())
}
