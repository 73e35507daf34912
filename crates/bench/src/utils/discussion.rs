use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::WORKBENCH_DATA_DIR;
use crate::errors::BenchError;
use crate::store::name_list;
use crate::utils::naming::parse_dated_name;

pub const DISCUSSION_MARKER: &str = "make sure to read these discussions:";
const DISCUSSION_PREFIX: &str = "discussion: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionEntry {
  pub name: String,
  pub filename: String,
  pub created: NaiveDate,
}

impl DiscussionEntry {
  /// Path as referenced from the workbench root.
  #[must_use]
  pub fn reference(&self) -> String {
    format!("./{WORKBENCH_DATA_DIR}/discussions/{}", self.filename)
  }
}

/// Saved discussions sorted by date, then name. Missing dir means none.
pub fn list_discussions(dir: &Path) -> Result<Vec<DiscussionEntry>> {
  if !dir.is_dir() {
    return Ok(Vec::new());
  }
  let mut entries = Vec::new();
  for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
    let entry = entry?;
    let path = entry.path();
    if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
      continue;
    }
    let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
      continue;
    };
    let Some(parsed) = parse_dated_name(&stem) else {
      continue;
    };
    entries.push(DiscussionEntry {
      name: parsed.name,
      filename: entry.file_name().to_string_lossy().to_string(),
      created: parsed.date,
    });
  }
  entries.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.name.cmp(&b.name)));
  Ok(entries)
}

/// Resolve titles to discussions, failing on the first unknown title.
pub fn resolve_discussions(dir: &Path, names: &[String]) -> Result<Vec<DiscussionEntry>> {
  let all = list_discussions(dir)?;
  names
    .iter()
    .map(|name| {
      all.iter().find(|d| &d.name == name).cloned().ok_or_else(|| {
        let mut available: Vec<String> = all.iter().map(|d| d.name.clone()).collect();
        available.sort();
        BenchError::validation(format!(
          "Discussion \"{name}\" not found. Available discussions: {}",
          name_list(&available)
        ))
        .into()
      })
    })
    .collect()
}

/// Block substituted for `{{DISCUSSIONS}}`; empty without discussions.
#[must_use]
pub fn discussions_block(entries: &[DiscussionEntry]) -> String {
  if entries.is_empty() {
    return String::new();
  }
  let mut lines = vec![DISCUSSION_MARKER.to_string()];
  lines.extend(
    entries
      .iter()
      .map(|d| format!("{DISCUSSION_PREFIX}{}", d.reference())),
  );
  lines.join("\n")
}

/// Splice discussion references into a spec document.
///
/// An existing block grows after its last `discussion: ` line. Otherwise a
/// new block replaces the gap between `# Spec` and `## Introduction`; specs
/// without both headings are returned unchanged.
#[must_use]
pub fn inject_into_spec(spec: &str, entries: &[DiscussionEntry]) -> String {
  if entries.is_empty() {
    return spec.to_string();
  }
  let new_lines: Vec<String> = entries
    .iter()
    .map(|d| format!("{DISCUSSION_PREFIX}{}\n", d.reference()))
    .collect();
  let mut lines: Vec<String> = spec.split_inclusive('\n').map(ToString::to_string).collect();

  if spec.contains(DISCUSSION_MARKER) {
    let last = lines
      .iter()
      .rposition(|l| l.trim_end().starts_with(DISCUSSION_PREFIX));
    if let Some(idx) = last {
      if !lines[idx].ends_with('\n') {
        lines[idx].push('\n');
      }
      for (offset, line) in new_lines.into_iter().enumerate() {
        lines.insert(idx + 1 + offset, line);
      }
    }
    return lines.concat();
  }

  let spec_idx = lines.iter().rposition(|l| l.trim_end() == "# Spec");
  let intro_idx = lines.iter().rposition(|l| l.trim_end() == "## Introduction");
  match (spec_idx, intro_idx) {
    (Some(spec_idx), Some(intro_idx)) if spec_idx < intro_idx => {
      let mut out: Vec<String> = lines[..=spec_idx].to_vec();
      out.push("\n".to_string());
      out.push(format!("{DISCUSSION_MARKER}\n"));
      out.extend(new_lines);
      out.push("\n".to_string());
      out.extend_from_slice(&lines[intro_idx..]);
      out.concat()
    }
    _ => spec.to_string(),
  }
}
