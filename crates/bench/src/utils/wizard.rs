use std::io::{self, IsTerminal as _, Read, Write};

use anyhow::{Context, Result, anyhow};
use inquire::Confirm;
use owo_colors::OwoColorize as _;

use crate::log_info;

/// Interactive prompts that degrade to plain stdin reads when not attached
/// to a terminal (tests, pipes).
#[derive(Clone, Debug)]
pub struct Wizard {
  is_tty: bool,
}

impl Default for Wizard {
  fn default() -> Self {
    Self::new()
  }
}

impl Wizard {
  #[must_use]
  pub fn new() -> Self {
    Self {
      is_tty: io::stdin().is_terminal() && io::stdout().is_terminal(),
    }
  }

  /// Print preview lines ahead of a confirmation.
  pub fn info_lines(lines: &[String]) {
    for line in lines {
      log_info!("{}", line);
    }
  }

  /// Prompt for a yes/no confirmation.
  pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
    if self.is_tty {
      return Confirm::new(prompt)
        .with_default(default)
        .prompt()
        .map_err(|err| anyhow!(err));
    }
    Self::fallback_confirm(prompt, default)
  }

  fn fallback_confirm(prompt: &str, default: bool) -> Result<bool> {
    let suffix = if default { "[Y/n]" } else { "[y/N]" };
    log_info!("{} {}", prompt, suffix);
    anstream::print!("{}", "-> ".bright_cyan());
    io::stdout().flush().ok();

    let mut input = String::new();
    read_line(&mut input)?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Ok(default);
    }
    Ok(trimmed.starts_with(['y', 'Y']))
  }
}

fn read_line(target: &mut String) -> Result<()> {
  let mut stdin = io::stdin().lock();
  loop {
    let mut buf = [0u8; 1];
    match stdin.read(&mut buf) {
      Ok(0) => break,
      Ok(_) => {
        let ch = buf[0] as char;
        if ch == '\n' || ch == '\r' {
          break;
        }
        target.push(ch);
        if target.len() > 200 {
          break;
        }
      }
      Err(err) => return Err(err).context("failed to read from stdin"),
    }
  }
  Ok(())
}
