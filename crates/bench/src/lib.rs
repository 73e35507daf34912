use anyhow::Result;
use clap::Parser;

pub mod args;
mod commands;
pub mod config;
pub mod errors;
pub mod mode;
pub mod store;
pub mod utils;

use crate::args::{
  Cli, Commands, DiscussCommand, MapCommand, PopulateCommand, SourceCommand, TaskCommand,
  WorkbenchCommand,
};
use crate::commands::workbench::list::WorkbenchFilter;
use crate::config::{AppContext, load_config};
use crate::utils::log::init_diagnostics;
use crate::utils::task::TaskFilter;

pub use errors::exit_code;

pub fn run() -> Result<()> {
  let cli = Cli::parse();
  let cwd = std::env::current_dir()?;
  let runtime = mode::detect_mode(&cwd)?;
  let config = load_config(runtime.project_config_dir().as_deref())?;
  init_diagnostics(config.log_level.as_filter());
  log::debug!("mode {} at {}", runtime.mode.label(), runtime.cwd.display());

  let ctx = AppContext { runtime, config };
  dispatch(&ctx, cli.command.unwrap_or(Commands::Status))
}

fn dispatch(ctx: &AppContext, command: Commands) -> Result<()> {
  match command {
    Commands::Status => commands::status::run(ctx),
    Commands::Init(args) => commands::init::run(ctx, args.yes, args.no_populate),
    Commands::Source(cmd) => match cmd {
      SourceCommand::Add { name, add_repo } => commands::source::add(ctx, &name, &add_repo),
      SourceCommand::List => commands::source::list(ctx),
      SourceCommand::Update {
        name,
        add_repo,
        remove_repo,
      } => commands::source::update(ctx, &name, &add_repo, &remove_repo),
      SourceCommand::Remove { name, yes } => commands::source::remove(ctx, &name, yes),
    },
    Commands::Workbench(cmd) => match cmd {
      WorkbenchCommand::Create {
        source,
        name,
        git_branch,
      } => commands::workbench::create::run(ctx, &source, &name, git_branch.as_deref()),
      WorkbenchCommand::Update {
        name,
        add_repo,
        remove_repo,
      } => commands::workbench::update::run(ctx, name.as_deref(), &add_repo, &remove_repo),
      WorkbenchCommand::Retire { name, yes } => commands::workbench::retire::run(ctx, &name, yes),
      WorkbenchCommand::Activate { name } => commands::workbench::activate::run(ctx, &name),
      WorkbenchCommand::Delete { name, yes } => commands::workbench::delete::run(ctx, &name, yes),
      WorkbenchCommand::List { active, inactive } => {
        let filter = if active {
          WorkbenchFilter::Active
        } else if inactive {
          WorkbenchFilter::Inactive
        } else {
          WorkbenchFilter::All
        };
        commands::workbench::list::run(ctx, filter)
      }
      WorkbenchCommand::Push { name } => commands::workbench::push::run(ctx, name.as_deref()),
    },
    Commands::Task(cmd) => match cmd {
      TaskCommand::Create {
        name,
        interview,
        discussions,
        only_repo,
      } => commands::task::create::run(
        ctx,
        &name,
        interview,
        &discussions.add_discussion,
        &only_repo,
      ),
      TaskCommand::Refine { name, discussions } => {
        commands::task::refine::run(ctx, &name, &discussions.add_discussion)
      }
      TaskCommand::Followup { name, discussions } => {
        commands::task::followup::run(ctx, &name, &discussions.add_discussion)
      }
      TaskCommand::Implement { name } => commands::task::implement::run(ctx, &name),
      TaskCommand::Complete { name } => commands::task::complete::run(ctx, &name),
      TaskCommand::List { all, completed } => {
        let filter = if all {
          TaskFilter::All
        } else if completed {
          TaskFilter::Completed
        } else {
          TaskFilter::Open
        };
        commands::task::list::run(ctx, filter)
      }
    },
    Commands::Discuss(cmd) => match cmd {
      DiscussCommand::Start { only_repo } => commands::discuss::start(ctx, &only_repo),
      DiscussCommand::List => commands::discuss::list(ctx),
    },
    Commands::Populate(PopulateCommand::Agents { model, repo, yes }) => {
      commands::populate::run(ctx, model.as_deref(), &repo, yes)
    }
    Commands::Map(cmd) => match cmd {
      MapCommand::Init { model, only_repo } => {
        commands::map::init(ctx, model.as_deref(), &only_repo)
      }
      MapCommand::Update {
        model,
        only_repo,
        yes,
      } => commands::map::update(ctx, model.as_deref(), &only_repo, yes),
    },
  }
}
