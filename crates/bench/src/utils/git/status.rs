use std::path::Path;

use anyhow::{Result, bail};

use super::command::run_git;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
  Modified,
  Added,
  Deleted,
  Renamed,
  Copied,
  Untracked,
  TypeChanged,
  Unmerged,
}

impl FileStatus {
  fn from_code(code: char) -> Result<Self> {
    Ok(match code {
      'M' => Self::Modified,
      'A' => Self::Added,
      'D' => Self::Deleted,
      'R' => Self::Renamed,
      'C' => Self::Copied,
      'T' => Self::TypeChanged,
      other => bail!("unknown git status code: {other}"),
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitFileChange {
  pub path: String,
  pub status: FileStatus,
  pub staged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitStatus {
  /// `None` when HEAD is detached.
  pub branch: Option<String>,
  pub files: Vec<GitFileChange>,
  pub untracked: Vec<String>,
}

impl GitStatus {
  #[must_use]
  pub fn is_clean(&self) -> bool {
    self.files.is_empty() && self.untracked.is_empty()
  }

  /// Tracked changes followed by untracked paths as `Untracked` entries.
  #[must_use]
  pub fn entries(&self) -> Vec<GitFileChange> {
    let mut all = self.files.clone();
    all.extend(self.untracked.iter().map(|path| GitFileChange {
      path: path.clone(),
      status: FileStatus::Untracked,
      staged: false,
    }));
    all
  }
}

pub fn git_status(repo: &Path) -> Result<GitStatus> {
  let out = run_git(&["status", "--porcelain=v2", "--branch"], repo)?;
  parse_porcelain_v2(&out)
}

fn parse_porcelain_v2(output: &str) -> Result<GitStatus> {
  let mut status = GitStatus::default();
  for line in output.lines() {
    if let Some(head) = line.strip_prefix("# branch.head ") {
      status.branch = (head != "(detached)").then(|| head.to_string());
    } else if line.starts_with("1 ") {
      // 1 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <path>
      let parts: Vec<&str> = line.splitn(9, ' ').collect();
      let (Some(xy), Some(path)) = (parts.get(1), parts.get(8)) else {
        bail!("malformed git status line: {line}");
      };
      push_changes(&mut status.files, xy, path)?;
    } else if line.starts_with("2 ") {
      // 2 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <score> <path>\t<origPath>
      let parts: Vec<&str> = line.splitn(10, ' ').collect();
      let (Some(xy), Some(paths)) = (parts.get(1), parts.get(9)) else {
        bail!("malformed git status line: {line}");
      };
      let path = paths.split('\t').next().unwrap_or(paths);
      push_changes(&mut status.files, xy, path)?;
    } else if line.starts_with("u ") {
      // u <XY> <sub> <m1> <m2> <m3> <mW> <h1> <h2> <h3> <path>
      let parts: Vec<&str> = line.splitn(11, ' ').collect();
      let Some(path) = parts.get(10) else {
        bail!("malformed git status line: {line}");
      };
      status.files.push(GitFileChange {
        path: (*path).to_string(),
        status: FileStatus::Unmerged,
        staged: false,
      });
    } else if let Some(path) = line.strip_prefix("? ") {
      status.untracked.push(path.to_string());
    }
  }
  Ok(status)
}

fn push_changes(files: &mut Vec<GitFileChange>, xy: &str, path: &str) -> Result<()> {
  let mut codes = xy.chars();
  let staged = codes.next().unwrap_or('.');
  let unstaged = codes.next().unwrap_or('.');
  if staged != '.' {
    files.push(GitFileChange {
      path: path.to_string(),
      status: FileStatus::from_code(staged)?,
      staged: true,
    });
  }
  if unstaged != '.' {
    files.push(GitFileChange {
      path: path.to_string(),
      status: FileStatus::from_code(unstaged)?,
      staged: false,
    });
  }
  Ok(())
}
