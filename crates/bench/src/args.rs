use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
  version,
  about = "Multi-repository workbenches and agent-driven tasks on git worktrees",
  long_about = None,
  bin_name = "bench"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Show the detected mode for the current directory
  Status,
  /// Create a bench project in the current directory
  Init(InitArgs),
  /// Manage named sets of repositories and branches
  #[command(subcommand)]
  Source(SourceCommand),
  /// Manage workbenches
  #[command(subcommand)]
  Workbench(WorkbenchCommand),
  /// Manage tasks inside a workbench
  #[command(subcommand)]
  Task(TaskCommand),
  /// Hold and list design discussions inside a workbench
  #[command(subcommand)]
  Discuss(DiscussCommand),
  /// Generate files with the agent
  #[command(subcommand)]
  Populate(PopulateCommand),
  /// Create and refresh repository maps
  #[command(subcommand)]
  Map(MapCommand),
}

#[derive(Debug, ClapArgs)]
pub struct InitArgs {
  /// Populate AGENTS.md without asking
  #[arg(long, short = 'y')]
  pub yes: bool,
  /// Skip AGENTS.md population
  #[arg(long, conflicts_with = "yes")]
  pub no_populate: bool,
}

#[derive(Debug, Subcommand)]
pub enum SourceCommand {
  /// Add a source
  Add {
    name: String,
    /// Repository as `directory-name:branch-name` (repeatable)
    #[arg(long = "add-repo")]
    add_repo: Vec<String>,
  },
  /// List sources
  List,
  /// Add or remove repositories of a source
  Update {
    name: String,
    /// Repository to add as `directory-name:branch-name` (repeatable)
    #[arg(long = "add-repo")]
    add_repo: Vec<String>,
    /// Repository to remove as `directory-name:branch-name` (repeatable)
    #[arg(long = "remove-repo")]
    remove_repo: Vec<String>,
  },
  /// Remove a source
  Remove {
    name: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
  },
}

#[derive(Debug, Subcommand)]
pub enum WorkbenchCommand {
  /// Create a workbench from a source
  Create {
    source: String,
    name: String,
    /// Branch to use in every worktree (defaults to the workbench name)
    #[arg(long = "workbench-git-branch")]
    git_branch: Option<String>,
  },
  /// Add or remove repositories of a workbench
  Update {
    /// Workbench name (omit inside a workbench directory)
    name: Option<String>,
    /// Repository to add as `directory-name:branch-name` (repeatable)
    #[arg(long = "add-repo")]
    add_repo: Vec<String>,
    /// Repository directory to remove (repeatable)
    #[arg(long = "remove-repo")]
    remove_repo: Vec<String>,
  },
  /// Remove the workspace and worktrees, keeping the workbench data
  Retire {
    name: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
  },
  /// Recreate the workspace and worktrees of a retired workbench
  Activate { name: String },
  /// Delete a workbench, its data and its branches
  Delete {
    name: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
  },
  /// List workbenches
  List {
    /// Only active workbenches
    #[arg(long, conflicts_with = "inactive")]
    active: bool,
    /// Only inactive workbenches
    #[arg(long)]
    inactive: bool,
  },
  /// Push the workbench branch of every repository to origin
  Push {
    /// Workbench name (omit inside a workbench directory)
    name: Option<String>,
  },
}

#[derive(Debug, ClapArgs)]
pub struct DiscussionArgs {
  /// Saved discussion to reference in the spec (repeatable)
  #[arg(long = "add-discussion")]
  pub add_discussion: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
  /// Create a task folder
  Create {
    name: String,
    /// Start an interactive spec interview afterwards
    #[arg(long)]
    interview: bool,
    #[command(flatten)]
    discussions: DiscussionArgs,
    /// Restrict the task to these repositories (repeatable)
    #[arg(long = "only-repo")]
    only_repo: Vec<String>,
  },
  /// Refine the spec of a task interactively
  Refine {
    name: String,
    #[command(flatten)]
    discussions: DiscussionArgs,
  },
  /// Follow up on an implemented task interactively
  Followup {
    name: String,
    #[command(flatten)]
    discussions: DiscussionArgs,
  },
  /// Run the implementation flow
  Implement { name: String },
  /// Mark a task as complete
  Complete { name: String },
  /// List tasks (open by default)
  List {
    /// Include completed tasks
    #[arg(long, conflicts_with = "completed")]
    all: bool,
    /// Only completed tasks
    #[arg(long)]
    completed: bool,
  },
}

#[derive(Debug, Subcommand)]
pub enum DiscussCommand {
  /// Start an interactive discussion
  Start {
    /// Restrict the discussion to these repositories (repeatable)
    #[arg(long = "only-repo")]
    only_repo: Vec<String>,
  },
  /// List saved discussions
  List,
}

#[derive(Debug, Subcommand)]
pub enum PopulateCommand {
  /// Populate AGENTS.md
  Agents {
    /// Override the model
    #[arg(long)]
    model: Option<String>,
    /// Only scan these directories (repeatable)
    #[arg(long)]
    repo: Vec<String>,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
  },
}

#[derive(Debug, Subcommand)]
pub enum MapCommand {
  /// Create initial repository maps
  Init {
    /// Override the model
    #[arg(long)]
    model: Option<String>,
    /// Only map these repositories (repeatable)
    #[arg(long = "only-repo")]
    only_repo: Vec<String>,
  },
  /// Update existing repository maps
  Update {
    /// Override the model
    #[arg(long)]
    model: Option<String>,
    /// Only update these repositories (repeatable)
    #[arg(long = "only-repo")]
    only_repo: Vec<String>,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
  },
}
