use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

fn dated_name_regex() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^(\d{8}) - (.+)$").expect("valid dated name regex"))
}

/// A `"<YYYYMMDD> - <name>"` folder or file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedName {
  pub date: NaiveDate,
  pub name: String,
}

/// Parse a dated name; anything not matching (or with an impossible date) is `None`.
#[must_use]
pub fn parse_dated_name(value: &str) -> Option<DatedName> {
  let caps = dated_name_regex().captures(value)?;
  let date = NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%Y%m%d").ok()?;
  Some(DatedName {
    date,
    name: caps.get(2)?.as_str().to_string(),
  })
}

#[must_use]
pub fn format_dated_name(date: NaiveDate, name: &str) -> String {
  format!("{} - {name}", date.format("%Y%m%d"))
}

#[must_use]
pub fn today() -> NaiveDate {
  chrono::Local::now().date_naive()
}
