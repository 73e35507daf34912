use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use temp_env::with_vars;
use tempfile::{Builder, TempDir};

/// Records every invocation into `$FAKE_AGENT_LOG`. `FAKE_AGENT_TOUCH=<file>`
/// writes that file into every task folder; `FAKE_AGENT_EXIT` sets the status.
const FAKE_AGENT: &str = r#"#!/bin/sh
{
  echo "cwd=$(pwd)"
  for arg in "$@"; do echo "arg=$arg"; done
  echo "---"
} >> "$FAKE_AGENT_LOG"
if [ -n "$FAKE_AGENT_TOUCH" ]; then
  for dir in bench/tasks/*/; do
    [ -d "$dir" ] && printf 'generated\n' > "$dir$FAKE_AGENT_TOUCH"
  done
fi
exit "${FAKE_AGENT_EXIT:-0}"
"#;

#[derive(Debug)]
pub struct TestEnv {
  temp: TempDir,
  xdg_home: PathBuf,
}

impl TestEnv {
  pub fn run<F, R>(f: F) -> R
  where
    F: FnOnce(&TestEnv) -> R,
  {
    let env = TestEnv::new();
    with_vars(
      [
        (
          "XDG_CONFIG_HOME",
          Some(env.xdg_home_dir().display().to_string()),
        ),
        ("BENCH_AGENT", Some(env.fake_agent_path().display().to_string())),
        ("FAKE_AGENT_LOG", Some(env.agent_log_path().display().to_string())),
        ("FAKE_AGENT_TOUCH", None),
        ("FAKE_AGENT_EXIT", None),
        ("BENCH_LOG", None),
      ],
      || f(&env),
    )
  }

  pub fn new() -> Self {
    let temp = Builder::new()
      .prefix("bench-test-")
      .tempdir_in(tmp_root())
      .expect("temp dir");
    // Keep tool state outside the project tree so it never looks like a repo dir.
    let xdg_home = temp.path().join(".xdg");
    std::fs::create_dir_all(&xdg_home).expect("xdg dir");
    let env = Self { temp, xdg_home };
    env
      .write_executable_script(&env.fake_agent_path(), FAKE_AGENT)
      .expect("fake agent");
    env
  }

  /// Project root used by the tests.
  pub fn path(&self) -> PathBuf {
    self.temp.path().join("project")
  }

  pub fn xdg_home_dir(&self) -> &Path {
    &self.xdg_home
  }

  pub fn fake_agent_path(&self) -> PathBuf {
    self.temp.path().join("bin").join("fake-agent")
  }

  pub fn agent_log_path(&self) -> PathBuf {
    self.temp.path().join("agent.log")
  }

  /// Everything the fake agent recorded so far (empty when it never ran).
  pub fn agent_log(&self) -> String {
    std::fs::read_to_string(self.agent_log_path()).unwrap_or_default()
  }

  pub fn agent_runs(&self) -> usize {
    self.agent_log().matches("---\n").count()
  }

  /// `bench` running in the project root.
  pub fn bench(&self) -> Result<Command> {
    self.bench_in("")
  }

  /// `bench` running in `<root>/<relative>`.
  pub fn bench_in(&self, relative: &str) -> Result<Command> {
    let dir = self.path().join(relative);
    std::fs::create_dir_all(&dir)?;
    let mut cmd = Command::cargo_bin("bench")?;
    cmd.current_dir(dir);
    Ok(cmd)
  }

  pub fn write_executable_script(&self, path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|err| anyhow::anyhow!("create parent dir for {}: {err}", path.display()))?;
    }
    std::fs::write(path, body)
      .map_err(|err| anyhow::anyhow!("write script at {}: {err}", path.display()))?;
    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt as _;
      let mut perms = std::fs::metadata(path)?.permissions();
      perms.set_mode(0o755);
      std::fs::set_permissions(path, perms)
        .map_err(|err| anyhow::anyhow!("set script executable at {}: {err}", path.display()))?;
    }
    Ok(())
  }

  pub fn write_file(&self, relative: &str, body: &str) -> Result<PathBuf> {
    let path = self.path().join(relative);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|err| anyhow::anyhow!("create parent dir for {}: {err}", path.display()))?;
    }
    std::fs::write(&path, body)
      .map_err(|err| anyhow::anyhow!("write file at {}: {err}", path.display()))?;
    Ok(path)
  }

  pub fn read_file(&self, relative: &str) -> Result<String> {
    let path = self.path().join(relative);
    std::fs::read_to_string(&path)
      .map_err(|err| anyhow::anyhow!("read {}: {err}", path.display()))
  }

  /// `bench init --no-populate` in the project root.
  pub fn init_project(&self) -> Result<()> {
    self
      .bench()?
      .args(["init", "--no-populate"])
      .assert()
      .success();
    Ok(())
  }

  /// Project with repos `api` and `web` and a source `core` pointing at `main`.
  pub fn init_project_with_source(&self) -> Result<()> {
    self.init_project()?;
    self.init_repo("api")?;
    self.init_repo("web")?;
    self
      .bench()?
      .args(["source", "add", "core", "--add-repo", "api:main", "--add-repo", "web:main"])
      .assert()
      .success();
    Ok(())
  }

  /// Source plus an active workbench `name`; returns the workspace path relative to root.
  pub fn create_workbench(&self, name: &str) -> Result<String> {
    self.init_project_with_source()?;
    self
      .bench()?
      .args(["workbench", "create", "core", name])
      .assert()
      .success();
    Ok(format!("workbench/{name}"))
  }

  /// Name of the only task folder below `<workspace>/bench/tasks`.
  pub fn task_folder(&self, workspace: &str) -> Result<String> {
    let tasks = self.path().join(workspace).join("bench").join("tasks");
    let mut names: Vec<String> = std::fs::read_dir(&tasks)?
      .filter_map(|e| e.ok())
      .filter(|e| e.path().is_dir())
      .map(|e| e.file_name().to_string_lossy().to_string())
      .collect();
    names.sort();
    names
      .pop()
      .ok_or_else(|| anyhow::anyhow!("no task folder in {}", tasks.display()))
  }
}

/// Returns a workspace-local temp root under `./target/test-tmp` at the workspace root.
pub fn tmp_root() -> PathBuf {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  // crates/bench -> crates -> workspace root
  let workspace_root = manifest_dir
    .parent()
    .and_then(|p| p.parent())
    .unwrap_or(&manifest_dir)
    .to_path_buf();
  let root = workspace_root.join("target").join("test-tmp");
  let _ = std::fs::create_dir_all(&root);
  root
}

/// Today's task/discussion prefix.
pub fn today_prefix() -> String {
  chrono::Local::now().format("%Y%m%d").to_string()
}
