//! Arithmetic of the fixed Hebrew calendar.
//!
//! Days are counted as fixed day numbers, day 1 being 1 January of year 1
//! in the proleptic Gregorian calendar, which is what
//! [`chrono::Datelike::num_days_from_ce`] returns. Months are numbered from
//! Nisan, so that the civil year starts with month 7 (Tishrei).

use std::fmt::{Display, Formatter};

use chrono::{Datelike as _, NaiveDate};

/// Fixed day number of 1 Tishrei, year 1
const EPOCH: i64 = -1_373_427;

const PARTS_PER_DAY: i64 = 25_920;

pub const NISAN: u8 = 1;
pub const SIVAN: u8 = 3;
pub const TISHREI: u8 = 7;
pub const MARHESHVAN: u8 = 8;
pub const KISLEV: u8 = 9;
pub const ADAR: u8 = 12;
pub const ADAR_II: u8 = 13;

const MONTH_NAMES: [&str; 13] = [
  "Nisan",
  "Iyyar",
  "Sivan",
  "Tamuz",
  "Av",
  "Elul",
  "Tishrei",
  "Cheshvan",
  "Kislev",
  "Tevet",
  "Sh'vat",
  "Adar",
  "Adar II",
];

pub fn is_leap_year(year: i64) -> bool {
  (7 * year + 1).rem_euclid(19) < 7
}

/// Adar in common years, Adar II in leap years
pub fn last_month(year: i64) -> u8 {
  if is_leap_year(year) { ADAR_II } else { ADAR }
}

/// Days from the epoch to the molad of Tishrei, after the weekday postponement
fn elapsed_days(year: i64) -> i64 {
  let months = (235 * year - 234).div_euclid(19);
  let parts = 12_084 + 13_753 * months;
  let days = 29 * months + parts.div_euclid(PARTS_PER_DAY);

  if (3 * (days + 1)).rem_euclid(7) < 3 { days + 1 } else { days }
}

/// Keeps the year length within 353..=355 or 383..=385 days
fn year_length_correction(year: i64) -> i64 {
  let previous = elapsed_days(year - 1);
  let current = elapsed_days(year);
  let next = elapsed_days(year + 1);

  if next - current == 356 {
    2
  } else if current - previous == 382 {
    1
  } else {
    0
  }
}

/// Fixed day number of 1 Tishrei of `year`
pub fn new_year(year: i64) -> i64 {
  EPOCH + elapsed_days(year) + year_length_correction(year)
}

pub fn days_in_year(year: i64) -> i64 {
  new_year(year + 1) - new_year(year)
}

fn long_marheshvan(year: i64) -> bool {
  matches!(days_in_year(year), 355 | 385)
}

fn short_kislev(year: i64) -> bool {
  matches!(days_in_year(year), 353 | 383)
}

pub fn days_in_month(year: i64, month: u8) -> i64 {
  match month {
    2 | 4 | 6 | 10 | ADAR_II => 29,
    ADAR if !is_leap_year(year) => 29,
    MARHESHVAN if !long_marheshvan(year) => 29,
    KISLEV if short_kislev(year) => 29,
    _ => 30,
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HebrewDate {
  pub year: i64,
  pub month: u8,
  pub day: u8,
}

impl HebrewDate {
  pub const fn new(year: i64, month: u8, day: u8) -> Self {
    Self { year, month, day }
  }

  pub fn to_fixed(self) -> i64 {
    let month_days = |months: std::ops::Range<u8>| -> i64 {
      months.map(|month| days_in_month(self.year, month)).sum()
    };

    let before = if self.month < TISHREI {
      month_days(TISHREI..last_month(self.year) + 1) + month_days(NISAN..self.month)
    } else {
      month_days(TISHREI..self.month)
    };

    new_year(self.year) + before + i64::from(self.day) - 1
  }

  pub fn from_fixed(fixed: i64) -> Self {
    // mean year length is 35975351/98496 days
    let approx = (98_496 * (fixed - EPOCH)).div_euclid(35_975_351) + 1;

    let mut year = approx - 1;
    while new_year(year + 1) <= fixed {
      year += 1;
    }

    let mut month = if fixed < Self::new(year, NISAN, 1).to_fixed() { TISHREI } else { NISAN };
    while fixed > Self::new(year, month, 1).to_fixed() + days_in_month(year, month) - 1 {
      month += 1;
    }

    let day = fixed - Self::new(year, month, 1).to_fixed() + 1;

    Self::new(year, month, day as u8)
  }

  pub fn from_gregorian(date: NaiveDate) -> Self {
    Self::from_fixed(i64::from(date.num_days_from_ce()))
  }

  pub fn to_gregorian(self) -> Option<NaiveDate> {
    i32::try_from(self.to_fixed())
      .ok()
      .and_then(NaiveDate::from_num_days_from_ce_opt)
  }

  pub fn month_name(&self) -> &'static str {
    if self.month == ADAR && is_leap_year(self.year) {
      "Adar I"
    } else {
      MONTH_NAMES[usize::from(self.month - 1)]
    }
  }
}

impl Display for HebrewDate {
  fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
    write!(formatter, "{} {} {}", self.day, self.month_name(), self.year)
  }
}
