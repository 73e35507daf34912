use std::sync::OnceLock;

use owo_colors::OwoColorize as _;
use regex::Regex;

fn ansi_regex() -> &'static Regex {
  static ANSI_RE: OnceLock<Regex> = OnceLock::new();
  ANSI_RE.get_or_init(|| {
    Regex::new(
      r"(?x)
      \x1B\[[0-?]*[ -/]*[@-~]    # CSI sequence
      |
      \x1B\][^\x07\x1B]*(?:\x07|\x1B\\)  # OSC sequence
    ",
    )
    .expect("valid ANSI regex")
  })
}

fn visible_len(s: &str) -> usize {
  ansi_regex().replace_all(s, "").chars().count()
}

/// Render a column-aligned table. Widths follow the visible text, so colored
/// cells line up with plain ones.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
  let cols = headers.len();
  let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
  for row in rows {
    for (i, cell) in row.iter().enumerate().take(cols) {
      widths[i] = widths[i].max(visible_len(cell));
    }
  }

  let mut header_line = String::new();
  for (i, text) in headers.iter().enumerate() {
    header_line.push_str(text);
    if i + 1 < cols {
      header_line.push_str(&" ".repeat(widths[i].saturating_sub(text.len()) + 2));
    }
  }
  let mut lines = vec![header_line.dimmed().to_string()];

  for row in rows {
    let mut line = String::new();
    for (i, cell) in row.iter().enumerate().take(cols) {
      line.push_str(cell);
      if i + 1 < cols {
        line.push_str(&" ".repeat(widths[i].saturating_sub(visible_len(cell)) + 2));
      }
    }
    lines.push(line);
  }
  lines
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
  for line in render_table(headers, rows) {
    anstream::println!("{line}");
  }
}

/// Status marker for boolean table cells.
#[must_use]
pub fn check_mark(value: bool) -> String {
  if value {
    "yes".green().to_string()
  } else {
    "-".dimmed().to_string()
  }
}
