use std::collections::HashSet;

use anyhow::Result;

use crate::commands::confirm_or_cancel;
use crate::config::AppContext;
use crate::errors::BenchError;
use crate::store::{Source, SourceRepo, name_list, save_yaml};
use crate::utils::error_messages;
use crate::utils::log::t;
use crate::utils::validation::{parse_repo_specs, validate_repo};
use crate::{log_info, log_success};

fn describe(repo: &SourceRepo) -> String {
  format!("{}:{}", repo.dir, repo.source_branch)
}

pub fn add(ctx: &AppContext, name: &str, repo_specs: &[String]) -> Result<()> {
  ctx.runtime.require_root("source add")?;
  let paths = ctx.runtime.paths()?;
  let repos = parse_repo_specs(repo_specs)?;
  for repo in &repos {
    validate_repo(paths.root(), repo)?;
  }

  let mut base = ctx.runtime.base_config()?.clone();
  if base.source(name).is_some() {
    return Err(
      BenchError::validation(format!(
        "Source \"{name}\" already exists. Source names must be unique."
      ))
      .into(),
    );
  }
  base.sources.push(Source {
    name: name.to_string(),
    repos,
  });
  save_yaml(&paths.base_config_path(), &base)?;
  log_success!("Source \"{}\" added successfully", name);
  Ok(())
}

pub fn list(ctx: &AppContext) -> Result<()> {
  ctx.runtime.require_root("source list")?;
  let base = ctx.runtime.base_config()?;
  if base.sources.is_empty() {
    log_info!("No sources defined. Use 'bench source add' to create one.");
    return Ok(());
  }
  log_info!("Sources:");
  for source in &base.sources {
    log_info!("  * {}", t::name(&source.name));
    if source.repos.is_empty() {
      log_info!("      {}", t::dim("(no repositories)"));
    }
    for repo in &source.repos {
      log_info!("      - {} -> {}", repo.dir, t::branch(&repo.source_branch));
    }
  }
  Ok(())
}

/// Remove exact `dir:branch` pairs, then add new repos.
pub fn update(ctx: &AppContext, name: &str, add_specs: &[String], remove_specs: &[String]) -> Result<()> {
  ctx.runtime.require_root("source update")?;
  let paths = ctx.runtime.paths()?;
  let additions = parse_repo_specs(add_specs)?;
  let removals = parse_repo_specs(remove_specs)?;
  if additions.is_empty() && removals.is_empty() {
    return Err(
      BenchError::validation("At least one --add-repo or --remove-repo option is required.").into(),
    );
  }

  let mut base = ctx.runtime.base_config()?.clone();
  let available = base.source_names();
  let Some(source) = base.sources.iter_mut().find(|s| s.name == name) else {
    return Err(BenchError::validation(error_messages::source_not_found(name, &available)).into());
  };

  for removal in &removals {
    if !source.repos.contains(removal) {
      let listed: Vec<String> = source.repos.iter().map(describe).collect();
      return Err(
        BenchError::validation(format!(
          "Repo \"{}\" not found in source \"{name}\". Available repos: {}",
          describe(removal),
          name_list(&listed)
        ))
        .into(),
      );
    }
  }
  let mut remaining: Vec<SourceRepo> = source
    .repos
    .iter()
    .filter(|r| !removals.contains(r))
    .cloned()
    .collect();

  let mut dirs: HashSet<String> = remaining.iter().map(|r| r.dir.clone()).collect();
  for addition in &additions {
    if !dirs.insert(addition.dir.clone()) {
      return Err(
        BenchError::validation(format!(
          "Repository directory \"{}\" already exists in source \"{name}\". Remove it first or use a different directory.",
          addition.dir
        ))
        .into(),
      );
    }
    validate_repo(paths.root(), addition)?;
  }
  remaining.extend(additions.iter().cloned());
  source.repos = remaining;
  save_yaml(&paths.base_config_path(), &base)?;

  let mut parts = Vec::new();
  if !removals.is_empty() {
    parts.push(format!("removed {} repo(s)", removals.len()));
  }
  if !additions.is_empty() {
    parts.push(format!("added {} repo(s)", additions.len()));
  }
  log_success!("Source \"{}\" updated: {}", name, parts.join(", "));
  Ok(())
}

pub fn remove(ctx: &AppContext, name: &str, yes: bool) -> Result<()> {
  ctx.runtime.require_root("source remove")?;
  let paths = ctx.runtime.paths()?;
  let mut base = ctx.runtime.base_config()?.clone();
  let Some(idx) = base.sources.iter().position(|s| s.name == name) else {
    return Err(
      BenchError::validation(error_messages::source_not_found(name, &base.source_names())).into(),
    );
  };

  let source = &base.sources[idx];
  let prompt = if source.repos.is_empty() {
    format!("Source \"{name}\" has no repositories. Remove?")
  } else {
    let repos: Vec<String> = source
      .repos
      .iter()
      .map(|r| format!("{} -> {}", r.dir, r.source_branch))
      .collect();
    format!(
      "Source \"{name}\" has {} repo(s): {}. Remove?",
      source.repos.len(),
      repos.join(", ")
    )
  };
  if !confirm_or_cancel(yes, &prompt, "Removal cancelled.")? {
    return Ok(());
  }

  base.sources.remove(idx);
  save_yaml(&paths.base_config_path(), &base)?;
  log_success!("Source \"{}\" removed successfully", name);
  Ok(())
}
