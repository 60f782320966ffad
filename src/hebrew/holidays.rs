use std::ops::RangeInclusive;

use chrono::{Datelike as _, NaiveDate};

use crate::error::{Error, Result};

use super::date::{self, HebrewDate, KISLEV, NISAN, SIVAN, TISHREI};
use super::{Annotations, Holiday, HolidayClass, SecondaryCalendar};

pub const ROSH_HASHANA: Holiday = Holiday { name: "Rosh Hashana", class: HolidayClass::Major };
pub const YOM_KIPPUR: Holiday = Holiday { name: "Yom Kippur", class: HolidayClass::Major };
pub const SUKKOT: Holiday = Holiday { name: "Sukkot", class: HolidayClass::Major };
pub const CHANUKAH: Holiday = Holiday { name: "Chanukah", class: HolidayClass::Minor };
pub const SHUSHAN_PURIM: Holiday = Holiday { name: "Shushan Purim", class: HolidayClass::Minor };
pub const PESACH: Holiday = Holiday { name: "Pesach", class: HolidayClass::Major };
pub const SHAVUOT: Holiday = Holiday { name: "Shavuot", class: HolidayClass::Major };

pub const HOLIDAYS: [Holiday; 7] = [
  CHANUKAH,
  SHUSHAN_PURIM,
  PESACH,
  SHAVUOT,
  ROSH_HASHANA,
  YOM_KIPPUR,
  SUKKOT,
];

/// Gregorian years the arithmetic calendar answers for
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1583..=9999;

/// In-process Hebrew calendar with the holidays shown on the poster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin {
  israel: bool,
}

impl Builtin {
  pub const fn new(israel: bool) -> Self {
    Self { israel }
  }

  /// First day, length and holiday, in the Hebrew year starting in autumn of `year - 3761`
  pub fn holidays(&self, year: i64) -> Vec<(HebrewDate, u8, Holiday)> {
    let diaspora = u8::from(!self.israel);

    vec![
      (HebrewDate::new(year, TISHREI, 1), 2, ROSH_HASHANA),
      (HebrewDate::new(year, TISHREI, 10), 1, YOM_KIPPUR),
      (HebrewDate::new(year, TISHREI, 15), 7, SUKKOT),
      (HebrewDate::new(year, KISLEV, 25), 8, CHANUKAH),
      (HebrewDate::new(year, date::last_month(year), 15), 1, SHUSHAN_PURIM),
      (HebrewDate::new(year, NISAN, 15), 7 + diaspora, PESACH),
      (HebrewDate::new(year, SIVAN, 6), 1 + diaspora, SHAVUOT),
    ]
  }
}

impl SecondaryCalendar for Builtin {
  fn name(&self) -> &'static str {
    "builtin Hebrew"
  }

  fn supported_range(&self) -> RangeInclusive<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(*SUPPORTED_YEARS.start(), 1, 1).unwrap_or(NaiveDate::MIN);
    let last = NaiveDate::from_ymd_opt(*SUPPORTED_YEARS.end(), 12, 31).unwrap_or(NaiveDate::MAX);

    first..=last
  }

  fn lookup(&self, range: RangeInclusive<NaiveDate>) -> Result<Annotations> {
    if !SUPPORTED_YEARS.contains(&range.start().year()) || !SUPPORTED_YEARS.contains(&range.end().year()) {
      return Err(Error::SecondaryCalendarUnavailable(format!(
        "dates {} to {} are outside the years {SUPPORTED_YEARS:?}",
        range.start(),
        range.end(),
      )));
    }

    let first_year = HebrewDate::from_gregorian(*range.start()).year;
    let last_year = HebrewDate::from_gregorian(*range.end()).year;

    let mut annotations = Annotations::new();

    for year in first_year..=last_year {
      if let Some(new_year) = HebrewDate::new(year, TISHREI, 1).to_gregorian() {
        annotations.insert_year(new_year, year.to_string());
      }

      for (start, length, holiday) in self.holidays(year) {
        log::trace!("{} from {start} for {length} days", holiday.name);
        let first = start.to_fixed();

        for fixed in first..first + i64::from(length) {
          let Some(day) = i32::try_from(fixed).ok().and_then(NaiveDate::from_num_days_from_ce_opt) else {
            continue;
          };

          if range.contains(&day) {
            annotations.insert_holiday(day, holiday.clone());
          }
        }
      }
    }

    Ok(annotations)
  }
}
