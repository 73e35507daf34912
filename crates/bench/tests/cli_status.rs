mod common;

use crate::common::test_env::TestEnv;
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn status_reports_uninitialized() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env
      .bench()?
      .arg("status")
      .assert()
      .success()
      .stdout(predicates::str::contains("Bench Status").from_utf8())
      .stdout(predicates::str::contains("uninitialized").from_utf8())
      .stdout(predicates::str::contains("No bench project found").from_utf8());
    Ok(())
  })
}

#[test]
fn bare_invocation_prints_status() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env.init_project()?;
    env
      .bench()?
      .assert()
      .success()
      .stdout(predicates::str::contains("Mode").from_utf8())
      .stdout(predicates::str::contains("root").from_utf8())
      .stdout(predicates::str::contains("Task Model").from_utf8());
    Ok(())
  })
}

#[test]
fn status_within_root_shows_position() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env.init_project()?;
    env
      .bench_in("docs/notes")?
      .arg("status")
      .assert()
      .success()
      .stdout(predicates::str::contains("within_root").from_utf8())
      .stdout(predicates::str::contains("Position").from_utf8())
      .stdout(predicates::str::contains("docs/notes").from_utf8());
    Ok(())
  })
}

#[test]
fn status_inside_workbench_names_it() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    let workspace = env.create_workbench("feat")?;
    env
      .bench_in(&workspace)?
      .arg("status")
      .assert()
      .success()
      .stdout(predicates::str::contains("workbench").from_utf8())
      .stdout(predicates::str::contains("feat").from_utf8());
    Ok(())
  })
}

#[test]
fn project_toml_sets_agent_command() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env.init_project()?;
    env.init_repo("api")?;
    let marker = env.path().join("custom-agent-ran");
    let script = env.path().join("custom-agent.sh");
    env.write_executable_script(
      &script,
      &format!("#!/bin/sh\ntouch '{}'\n", marker.display()),
    )?;
    env.write_file(
      ".bench/bench.toml",
      &format!("[agent]\ncmd = [\"{}\"]\n", script.display()),
    )?;
    env
      .bench()?
      .env_remove("BENCH_AGENT")
      .args(["populate", "agents", "--yes"])
      .assert()
      .success();
    assert!(marker.exists(), "configured agent should have run");
    assert_eq!(env.agent_runs(), 0);
    Ok(())
  })
}
