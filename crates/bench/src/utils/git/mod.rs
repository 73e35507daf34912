mod branch;
mod command;
mod query;
mod status;
mod worktree;

pub use branch::{delete_branch, push_branch};
pub use query::{branch_exists, has_upstream, is_git_repository, list_local_branches};
pub use status::{FileStatus, GitFileChange, GitStatus, git_status};
pub use worktree::{add_worktree, prune_worktrees, remove_worktree};
