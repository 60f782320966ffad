use std::ffi::OsString;
use std::ops::RangeInclusive;
use std::process::Command;

use chrono::{Datelike as _, NaiveDate};

use crate::error::{Error, Result};

use super::{Annotations, SecondaryCalendar, HOLIDAYS};

const YEAR_PREFIX: &str = "Rosh Hashana ";

/// Runs the `hebcal` command line program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hebcal {
  program: OsString,
  israel: bool,
}

impl Hebcal {
  pub fn new(israel: bool) -> Self {
    Self::with_program("hebcal", israel)
  }

  pub fn with_program(program: impl Into<OsString>, israel: bool) -> Self {
    Self {
      program: program.into(),
      israel,
    }
  }

  fn command(&self, first_year: i32, years: i32) -> Command {
    let mut command = Command::new(&self.program);

    command.arg("-g");
    if self.israel {
      command.arg("-i");
    }
    command
      .arg("--no-modern")
      .arg("--years")
      .arg(years.to_string())
      .arg(first_year.to_string());

    command
  }
}

impl SecondaryCalendar for Hebcal {
  fn name(&self) -> &'static str {
    "hebcal"
  }

  fn supported_range(&self) -> RangeInclusive<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN);
    let last = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX);

    first..=last
  }

  fn lookup(&self, range: RangeInclusive<NaiveDate>) -> Result<Annotations> {
    // the year before holds the Rosh Hashana preceding the range
    let first_year = range.start().year() - 1;
    let years = range.end().year() - first_year + 1;

    let output = self
      .command(first_year, years)
      .output()
      .map_err(|e| Error::SecondaryCalendarUnavailable(format!("could not run {:?}: {e}", self.program)))?;

    if !output.status.success() {
      return Err(Error::SecondaryCalendarUnavailable(format!(
        "{:?} exited with {}: {}",
        self.program,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim(),
      )));
    }

    let mut annotations = parse_output(&String::from_utf8_lossy(&output.stdout));
    let keep_from = annotations
      .iter()
      .filter(|(date, day)| **date <= *range.start() && day.year_label.is_some())
      .map(|(date, _)| *date)
      .last()
      .unwrap_or(*range.start());
    annotations.retain(&(keep_from..=*range.end()));

    Ok(annotations)
  }
}

/// Read `YYYY-MM-DD description` lines, keeping holidays and year starts
pub fn parse_output(text: &str) -> Annotations {
  let mut annotations = Annotations::new();

  for line in text.lines() {
    let Some((date, description)) = line.trim().split_once(' ') else {
      continue;
    };

    let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
      log::trace!("skipping hebcal line {line:?}");
      continue;
    };

    let description = description.trim();

    if let Some(year) = description
      .strip_prefix(YEAR_PREFIX)
      .filter(|year| !year.is_empty() && year.chars().all(|c| c.is_ascii_digit()))
    {
      annotations.insert_year(date, year);
    }

    if let Some(holiday) = HOLIDAYS.iter().find(|holiday| description.starts_with(holiday.name)) {
      annotations.insert_holiday(date, holiday.clone());
    }
  }

  annotations
}
