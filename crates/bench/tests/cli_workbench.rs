mod common;

use crate::common::test_env::TestEnv;
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn create_builds_scaffold_workspace_and_worktrees() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env.init_project_with_source()?;
    env
      .bench()?
      .args(["workbench", "create", "core", "feat"])
      .assert()
      .success()
      .stdout(predicates::str::contains("Workbench \"feat\" created successfully").from_utf8())
      .stdout(predicates::str::contains("api ->").from_utf8());

    let scaffold = env.path().join(".bench/workbench/feat");
    assert!(scaffold.join("bench/workbench-config.yaml").is_file());
    assert!(scaffold.join("bench/prompts/discuss.md").is_file());
    assert!(scaffold.join("bench/tasks/.gitkeep").is_file());
    assert!(scaffold.join("AGENTS.md").is_file());

    let workspace = env.path().join("workbench/feat");
    let link = std::fs::read_link(workspace.join("bench"))?;
    assert!(link.is_relative(), "link should be relative: {}", link.display());
    assert!(workspace.join("bench/workbench-config.yaml").is_file());
    assert!(workspace.join("AGENTS.md").is_file());

    for repo in ["api", "web"] {
      let worktree = format!("workbench/feat/repo/{repo}");
      assert!(env.path().join(&worktree).join("README.md").is_file());
      assert_eq!(env.git_stdout(&worktree, &["branch", "--show-current"])?, "feat");
    }
    let base = env.read_file(".bench/base-config.yaml")?;
    assert!(base.contains("status: active"), "{base}");
    Ok(())
  })
}

#[test]
fn create_honors_custom_branch_and_reuses_existing() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env.init_project_with_source()?;
    env.git_stdout("api", &["branch", "topic"])?;
    env
      .bench()?
      .args(["workbench", "create", "core", "feat", "--workbench-git-branch", "topic"])
      .assert()
      .success();
    assert_eq!(
      env.git_stdout("workbench/feat/repo/api", &["branch", "--show-current"])?,
      "topic"
    );
    assert!(env.branch_exists("web", "topic")?);
    Ok(())
  })
}

#[test]
fn create_rejects_duplicates_and_unknown_sources() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env.create_workbench("feat")?;
    env
      .bench()?
      .args(["workbench", "create", "core", "feat"])
      .assert()
      .failure()
      .stderr(predicates::str::contains("Workbench \"feat\" already exists").from_utf8());
    env
      .bench()?
      .args(["workbench", "create", "ghost", "other"])
      .assert()
      .failure()
      .stderr(predicates::str::contains("Source \"ghost\" not found").from_utf8());
    assert!(!env.path().join("workbench/other").exists());
    Ok(())
  })
}

#[test]
fn create_with_missing_repo_writes_nothing() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env.init_project_with_source()?;
    std::fs::rename(env.path().join("web"), env.path().join("web-moved"))?;
    env
      .bench()?
      .args(["workbench", "create", "core", "feat"])
      .assert()
      .failure()
      .stderr(
        predicates::str::contains("Repository directory \"web\" does not exist in project root")
          .from_utf8(),
      );
    assert!(!env.path().join(".bench/workbench/feat").exists());
    assert!(!env.path().join("workbench/feat").exists());
    assert!(!env.branch_exists("api", "feat")?);
    assert!(!env.read_file(".bench/base-config.yaml")?.contains("name: feat"));

    std::fs::rename(env.path().join("web-moved"), env.path().join("web"))?;
    env
      .bench()?
      .args(["workbench", "create", "core", "feat"])
      .assert()
      .success();
    assert!(env.path().join("workbench/feat/repo/web/README.md").is_file());
    Ok(())
  })
}

#[test]
fn retire_and_activate_round_trip() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    let workspace = env.create_workbench("feat")?;
    env.write_file(&format!("{workspace}/bench/discussions/20240101 - notes.md"), "hi\n")?;

    env
      .bench()?
      .args(["workbench", "retire", "feat"])
      .write_stdin("n\n")
      .assert()
      .success()
      .stdout(predicates::str::contains("Retirement cancelled.").from_utf8());
    assert!(env.path().join(&workspace).is_dir());

    env
      .bench()?
      .args(["workbench", "retire", "feat", "--yes"])
      .assert()
      .success()
      .stdout(predicates::str::contains("Workbench \"feat\" retired successfully").from_utf8());
    assert!(!env.path().join(&workspace).exists());
    assert!(
      env
        .path()
        .join(".bench/workbench/feat/bench/discussions/20240101 - notes.md")
        .is_file(),
      "scaffold data survives retirement"
    );
    assert!(env.branch_exists("api", "feat")?);
    assert!(env.read_file(".bench/base-config.yaml")?.contains("status: inactive"));

    env
      .bench()?
      .args(["workbench", "retire", "feat", "--yes"])
      .assert()
      .failure()
      .stderr(predicates::str::contains("already inactive").from_utf8());

    env
      .bench()?
      .args(["workbench", "activate", "feat"])
      .assert()
      .success()
      .stdout(predicates::str::contains("Workbench \"feat\" activated successfully").from_utf8());
    assert!(env.path().join(&workspace).join("repo/api/README.md").is_file());
    assert!(
      env
        .path()
        .join(&workspace)
        .join("bench/discussions/20240101 - notes.md")
        .is_file()
    );

    env
      .bench()?
      .args(["workbench", "activate", "feat"])
      .assert()
      .failure()
      .stderr(predicates::str::contains("already active").from_utf8());
    Ok(())
  })
}

#[test]
fn retire_warns_about_dirty_worktrees() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    let workspace = env.create_workbench("feat")?;
    env.write_file(&format!("{workspace}/repo/api/scratch.txt"), "wip\n")?;
    env
      .bench()?
      .args(["workbench", "retire", "feat"])
      .write_stdin("n\n")
      .assert()
      .success()
      .stdout(predicates::str::contains("api has 1 uncommitted change(s)").from_utf8());
    Ok(())
  })
}

#[test]
fn update_from_workbench_adds_and_removes_repos() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    let workspace = env.create_workbench("feat")?;
    env.init_repo("docs")?;
    env
      .bench_in(&workspace)?
      .args(["workbench", "update", "--remove-repo", "web", "--add-repo", "docs:main"])
      .assert()
      .success()
      .stdout(
        predicates::str::contains("Workbench \"feat\" updated: removed 1 repo(s), added 1 repo(s)")
          .from_utf8(),
      );
    assert!(!env.path().join(&workspace).join("repo/web").exists());
    assert!(env.path().join(&workspace).join("repo/docs/README.md").is_file());
    let config = env.read_file(".bench/workbench/feat/bench/workbench-config.yaml")?;
    assert!(config.contains("dir: docs"), "{config}");
    assert!(!config.contains("dir: web"), "{config}");
    // The source itself is untouched.
    assert!(env.read_file(".bench/base-config.yaml")?.contains("dir: web"));
    Ok(())
  })
}

#[test]
fn update_can_remove_and_readd_the_same_repo() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    let workspace = env.create_workbench("feat")?;
    env.git_stdout("web", &["branch", "release"])?;
    env
      .bench()?
      .args(["workbench", "update", "feat", "--remove-repo", "web", "--add-repo", "web:release"])
      .assert()
      .success()
      .stdout(
        predicates::str::contains("Workbench \"feat\" updated: removed 1 repo(s), added 1 repo(s)")
          .from_utf8(),
      );
    assert!(env.path().join(&workspace).join("repo/web/README.md").is_file());
    let config = env.read_file(".bench/workbench/feat/bench/workbench-config.yaml")?;
    assert_eq!(config.matches("dir: web").count(), 1, "{config}");
    assert!(config.contains("source-branch: release"), "{config}");
    Ok(())
  })
}

#[test]
fn update_with_missing_addition_keeps_existing_worktrees() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    let workspace = env.create_workbench("feat")?;
    env
      .bench()?
      .args(["workbench", "update", "feat", "--remove-repo", "web", "--add-repo", "docs:main"])
      .assert()
      .failure()
      .stderr(predicates::str::contains("Repository directory \"docs\" does not exist").from_utf8());
    assert!(env.path().join(&workspace).join("repo/web/README.md").is_file());
    Ok(())
  })
}

#[test]
fn update_name_rules_depend_on_mode() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    let workspace = env.create_workbench("feat")?;
    env
      .bench()?
      .args(["workbench", "update", "--remove-repo", "web"])
      .assert()
      .failure()
      .stderr(predicates::str::contains("A workbench name is required").from_utf8());
    env
      .bench_in(&workspace)?
      .args(["workbench", "update", "feat", "--remove-repo", "web"])
      .assert()
      .failure()
      .stderr(predicates::str::contains("Do not provide a workbench name").from_utf8());
    env
      .bench()?
      .args(["workbench", "update", "feat", "--remove-repo", "nope"])
      .assert()
      .failure()
      .stderr(predicates::str::contains("Repo \"nope\" not found in workbench \"feat\"").from_utf8());
    Ok(())
  })
}

#[test]
fn update_rejects_inactive_workbench() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env.create_workbench("feat")?;
    env
      .bench()?
      .args(["workbench", "retire", "feat", "-y"])
      .assert()
      .success();
    env
      .bench()?
      .args(["workbench", "update", "feat", "--remove-repo", "web"])
      .assert()
      .failure()
      .stderr(predicates::str::contains("Workbench \"feat\" is inactive").from_utf8());
    Ok(())
  })
}

#[test]
fn delete_removes_everything() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env.create_workbench("feat")?;
    env
      .bench()?
      .args(["workbench", "delete", "feat", "--yes"])
      .assert()
      .success()
      .stdout(predicates::str::contains("Branches deleted: 2").from_utf8());
    assert!(!env.path().join("workbench/feat").exists());
    assert!(!env.path().join(".bench/workbench/feat").exists());
    assert!(!env.branch_exists("api", "feat")?);
    assert!(!env.branch_exists("web", "feat")?);
    assert!(!env.read_file(".bench/base-config.yaml")?.contains("name: feat"));
    Ok(())
  })
}

#[test]
fn delete_inactive_workbench_skips_missing_repo_dirs() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env.create_workbench("feat")?;
    env
      .bench()?
      .args(["workbench", "retire", "feat", "-y"])
      .assert()
      .success();
    std::fs::rename(env.path().join("web"), env.path().join("web-moved"))?;
    env
      .bench()?
      .args(["workbench", "delete", "feat", "--yes"])
      .assert()
      .success()
      .stdout(predicates::str::contains("Branches deleted: 1").from_utf8());
    assert!(!env.branch_exists("api", "feat")?);
    assert!(!env.path().join(".bench/workbench/feat").exists());
    assert!(!env.read_file(".bench/base-config.yaml")?.contains("name: feat"));
    Ok(())
  })
}

#[test]
fn list_filters_by_status() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    env
      .bench()?
      .args(["init", "--no-populate"])
      .assert()
      .success();
    env
      .bench()?
      .args(["workbench", "list"])
      .assert()
      .success()
      .stdout(predicates::str::contains("No workbenches defined").from_utf8());

    env.init_repo("api")?;
    env
      .bench()?
      .args(["source", "add", "core", "--add-repo", "api:main"])
      .assert()
      .success();
    for name in ["one", "two"] {
      env
        .bench()?
        .args(["workbench", "create", "core", name])
        .assert()
        .success();
    }
    env
      .bench()?
      .args(["workbench", "retire", "two", "-y"])
      .assert()
      .success();

    env
      .bench()?
      .args(["workbench", "list"])
      .assert()
      .success()
      .stdout(predicates::str::contains("Status").from_utf8())
      .stdout(predicates::str::contains("one").from_utf8())
      .stdout(predicates::str::contains("two").from_utf8());
    env
      .bench()?
      .args(["workbench", "list", "--active"])
      .assert()
      .success()
      .stdout(predicates::str::contains("one").from_utf8())
      .stdout(predicates::str::contains("two").not().from_utf8());
    env
      .bench()?
      .args(["workbench", "list", "--active", "--inactive"])
      .assert()
      .failure();
    Ok(())
  })
}

#[test]
fn push_sends_branches_to_origin() -> Result<()> {
  TestEnv::run(|env| -> Result<()> {
    let workspace = env.create_workbench("feat")?;
    for repo in ["api", "web"] {
      let remote = env.path().join(format!("remotes/{repo}.git"));
      std::fs::create_dir_all(&remote)?;
      common::git::git_in(&remote, &["init", "--quiet", "--bare"])?;
      env.git_stdout(repo, &["remote", "add", "origin", &remote.display().to_string()])?;
    }
    env
      .bench_in(&workspace)?
      .args(["workbench", "push"])
      .assert()
      .success()
      .stdout(predicates::str::contains("Workbench \"feat\" pushed: 2 repo(s)").from_utf8());
    let remote_branches = common::git::git_in(
      &env.path().join("remotes/api.git"),
      &["branch", "--format=%(refname:short)"],
    )?;
    assert!(remote_branches.lines().any(|l| l == "feat"), "{remote_branches}");
    Ok(())
  })
}
