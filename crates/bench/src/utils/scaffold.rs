use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reflink_copy::reflink_or_copy;

use crate::config::{BenchPaths, CANONICAL_CONFIG_DIR, CONFIG_DIR_NAMES, WORKBENCH_DATA_DIR};
use crate::store::{BASE_CONFIG_FILE, BaseConfig, WORKBENCH_CONFIG_FILE, WorkbenchConfig, save_yaml};
use crate::utils::prompts::{AGENTS_TEMPLATE, SEED_PROMPTS};

const GITKEEP: &str = ".gitkeep";
const AGENTS_FILE: &str = "AGENTS.md";

/// Asset directories copied from the project config dir into each workbench.
const SHARED_ASSET_DIRS: [&str; 3] = ["files", "prompts", "scripts"];

/// Create `<root>/.bench` for a new project. Returns created paths relative to `root`.
pub fn create_project_scaffold(root: &Path) -> Result<Vec<String>> {
  let config_dir = root.join(CANONICAL_CONFIG_DIR);
  let mut created = Vec::new();

  create_dir(&config_dir)?;
  created.push(format!("{CANONICAL_CONFIG_DIR}/"));

  save_yaml(&config_dir.join(BASE_CONFIG_FILE), &BaseConfig::initial())?;
  created.push(format!("{CANONICAL_CONFIG_DIR}/{BASE_CONFIG_FILE}"));

  for sub in ["files", "prompts", "scripts", "workbench"] {
    let dir = config_dir.join(sub);
    create_dir(&dir)?;
    touch(&dir.join(GITKEEP))?;
    created.push(format!("{CANONICAL_CONFIG_DIR}/{sub}/"));
  }

  let prompts = config_dir.join("prompts");
  for (name, body) in SEED_PROMPTS {
    write_file(&prompts.join(name), body)?;
    created.push(format!("{CANONICAL_CONFIG_DIR}/prompts/{name}"));
  }

  write_file(&config_dir.join(AGENTS_FILE), AGENTS_TEMPLATE)?;
  created.push(format!("{CANONICAL_CONFIG_DIR}/{AGENTS_FILE}"));

  Ok(created)
}

/// Create the durable scaffold `<config-dir>/workbench/<name>/`.
pub fn create_workbench_scaffold(paths: &BenchPaths, config: &WorkbenchConfig) -> Result<()> {
  let scaffold = paths.scaffold_dir(&config.name);
  let data_dir = scaffold.join(WORKBENCH_DATA_DIR);
  create_dir(&data_dir)?;

  let agents_src = paths.config_dir().join(AGENTS_FILE);
  if agents_src.is_file() {
    copy_file(&agents_src, &scaffold.join(AGENTS_FILE))?;
  } else {
    write_file(&scaffold.join(AGENTS_FILE), AGENTS_TEMPLATE)?;
  }

  save_yaml(&data_dir.join(WORKBENCH_CONFIG_FILE), config)?;
  write_file(&data_dir.join("history.md"), "")?;
  for sub in ["discussions", "tasks"] {
    let dir = data_dir.join(sub);
    create_dir(&dir)?;
    touch(&dir.join(GITKEEP))?;
  }
  for sub in SHARED_ASSET_DIRS {
    let src = paths.config_dir().join(sub);
    let dst = data_dir.join(sub);
    if src.is_dir() {
      copy_dir_tree(&src, &dst)?;
    } else {
      create_dir(&dst)?;
    }
  }
  Ok(())
}

/// Create the disposable workspace `workbench/<name>/` with its symlinks and `repo/`.
pub fn create_workspace(paths: &BenchPaths, name: &str) -> Result<PathBuf> {
  let workspace = paths.workspace_dir(name);
  create_dir(&workspace.join("repo"))?;

  // Relative links keep the project relocatable.
  let scaffold_rel = Path::new("..")
    .join("..")
    .join(paths.config_dir_name())
    .join("workbench")
    .join(name);
  symlink(&scaffold_rel.join(AGENTS_FILE), &workspace.join(AGENTS_FILE))?;
  symlink(
    &scaffold_rel.join(WORKBENCH_DATA_DIR),
    &workspace.join(WORKBENCH_DATA_DIR),
  )?;
  Ok(workspace)
}

/// Immediate child directories of the project root that may hold repositories.
///
/// Skips config dirs, the `workbench/` container and hidden entries.
pub fn list_sibling_directories(root: &Path) -> Result<Vec<String>> {
  let mut dirs = list_child_dirs(root)?;
  dirs.retain(|name| {
    !CONFIG_DIR_NAMES.contains(&name.as_str()) && name != "workbench" && !name.starts_with('.')
  });
  Ok(dirs)
}

/// Repository dirs under a workspace's `repo/`; empty when `repo/` is absent.
pub fn list_repo_directories(workspace: &Path) -> Result<Vec<String>> {
  let repo_dir = workspace.join("repo");
  if !repo_dir.is_dir() {
    return Ok(Vec::new());
  }
  list_child_dirs(&repo_dir)
}

fn list_child_dirs(dir: &Path) -> Result<Vec<String>> {
  let mut names = Vec::new();
  for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
    let entry = entry?;
    if entry.path().is_dir() {
      names.push(entry.file_name().to_string_lossy().to_string());
    }
  }
  names.sort();
  Ok(names)
}

/// Copy a directory tree, skipping files that already exist at the destination.
pub fn copy_dir_tree(src_dir: &Path, dst_dir: &Path) -> Result<()> {
  create_dir(dst_dir)?;
  for entry in fs::read_dir(src_dir).with_context(|| format!("read dir {}", src_dir.display()))? {
    let entry = entry?;
    let file_type = entry.file_type()?;
    let src = entry.path();
    let dst = dst_dir.join(entry.file_name());
    if file_type.is_dir() {
      copy_dir_tree(&src, &dst)?;
    } else if file_type.is_file() {
      if dst.exists() {
        continue;
      }
      copy_file(&src, &dst)?;
      copy_permissions(&src, &dst)?;
    }
  }
  Ok(())
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
  reflink_or_copy(src, dst)
    .with_context(|| format!("failed to copy {} -> {}", src.display(), dst.display()))?;
  Ok(())
}

fn copy_permissions(src: &Path, dst: &Path) -> Result<()> {
  let perms = fs::metadata(src)?.permissions();
  fs::set_permissions(dst, perms)
    .with_context(|| format!("failed to set permissions on {}", dst.display()))
}

fn create_dir(dir: &Path) -> Result<()> {
  fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))
}

fn write_file(path: &Path, body: &str) -> Result<()> {
  fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

fn touch(path: &Path) -> Result<()> {
  if !path.exists() {
    write_file(path, "")?;
  }
  Ok(())
}

fn symlink(target: &Path, link: &Path) -> Result<()> {
  std::os::unix::fs::symlink(target, link).with_context(|| {
    format!(
      "failed to link {} -> {}",
      link.display(),
      target.display()
    )
  })
}
