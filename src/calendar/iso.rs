//! ISO 8601 week arithmetic on top of [`chrono`].

use chrono::{Datelike as _, Days, NaiveDate, Weekday};

use crate::error::{Error, Result};

pub const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%d-%m-%Y"];

/// Parse a date given as `dd/mm/yyyy` or `dd-mm-yyyy`
pub fn parse_date(text: &str) -> Result<NaiveDate> {
  let text = text.trim();

  DATE_FORMATS
    .iter()
    .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    .ok_or_else(|| Error::InvalidDate(text.to_string()))
}

/// The Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
  date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Number of ISO weeks in `year`, either 52 or 53
pub fn iso_week_count(year: i32) -> u32 {
  // 28 December always lies in the last ISO week of its year
  NaiveDate::from_ymd_opt(year, 12, 28)
    .map_or(52, |date| date.iso_week().week())
}

pub fn first_of_year(year: i32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Monday of the week containing 1 January, the left edge of a year row
pub fn row_origin(year: i32) -> NaiveDate {
  week_start(first_of_year(year))
}

/// 1 when ISO week 1 starts after 1 January, i.e. 1 January is Friday through Sunday
pub fn leading_shift(year: i32) -> u32 {
  match first_of_year(year).weekday() {
    Weekday::Fri | Weekday::Sat | Weekday::Sun => 1,
    _ => 0,
  }
}

/// Weekday offset of 1 January, Monday being 0
pub fn jan_first_offset(year: i32) -> u32 {
  first_of_year(year).weekday().num_days_from_monday()
}
