//! Hebrew calendar year labels and Jewish holidays laid over the week grid.

mod hebcal;
mod holidays;

pub mod date;

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{Days, NaiveDate};

use crate::calendar::WeekGrid;
use crate::error::{Error, Result};
use crate::logger::LogExt as _;

pub use hebcal::*;
pub use holidays::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HolidayClass {
  Minor,
  Major,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Holiday {
  pub name: &'static str,
  pub class: HolidayClass,
}

/// A run of holiday days inside one week, days counted from Monday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HolidayMark {
  pub class: HolidayClass,
  pub first_day: u8,
  pub num_days: u8,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DayAnnotation {
  pub year_label: Option<String>,
  pub holiday: Option<Holiday>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Annotations {
  days: BTreeMap<NaiveDate, DayAnnotation>,
}

impl Annotations {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.days.is_empty()
  }

  pub fn len(&self) -> usize {
    self.days.len()
  }

  pub fn get(&self, date: NaiveDate) -> Option<&DayAnnotation> {
    self.days.get(&date)
  }

  pub fn insert_year(&mut self, date: NaiveDate, label: impl Into<String>) {
    self.days.entry(date).or_default().year_label = Some(label.into());
  }

  /// The first holiday registered for a day wins
  pub fn insert_holiday(&mut self, date: NaiveDate, holiday: Holiday) {
    self.days.entry(date).or_default().holiday.get_or_insert(holiday);
  }

  pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DayAnnotation)> {
    self.days.iter()
  }

  /// Year in effect on `date`, i.e. the label of the last year start on or before it
  pub fn year_label_at(&self, date: NaiveDate) -> Option<&str> {
    self.days
      .range(..=date)
      .rev()
      .find_map(|(_, day)| day.year_label.as_deref())
  }

  pub fn retain(&mut self, range: &RangeInclusive<NaiveDate>) {
    self.days.retain(|date, _| range.contains(date));
  }
}

/// Source of year labels and holidays, queried by Gregorian date range
pub trait SecondaryCalendar {
  fn name(&self) -> &'static str;

  /// Dates this calendar can answer for
  fn supported_range(&self) -> RangeInclusive<NaiveDate>;

  /// Annotations for every day of `range`. The last year start on or before
  /// the range is included as well so year labels are known from its first day.
  fn lookup(&self, range: RangeInclusive<NaiveDate>) -> Result<Annotations>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
  /// Computed in-process
  #[default]
  Builtin,
  /// The external `hebcal` program
  Hebcal,
}

pub fn provider(kind: ProviderKind, israel: bool) -> Box<dyn SecondaryCalendar> {
  match kind {
    ProviderKind::Builtin => Box::new(Builtin::new(israel)),
    ProviderKind::Hebcal => Box::new(Hebcal::new(israel)),
  }
}

/// Query `calendar` for the dates covered by `grid` and copy the results into its week cells.
///
/// Dates outside the supported range of the calendar stay unannotated, a
/// failing calendar leaves the whole grid unannotated. Neither is an error
/// for the caller.
pub fn annotate(grid: &mut WeekGrid, calendar: &dyn SecondaryCalendar) -> Annotations {
  let wanted = grid.first_week()..=grid.last_day();

  let Some(range) = clamp(&wanted, &calendar.supported_range()) else {
    log::warn!(
      "{}",
      unavailable(calendar, wanted.start(), wanted.end())
    );
    return Annotations::new();
  };

  if range.start() > wanted.start() {
    log::warn!("{}", unavailable(calendar, wanted.start(), &(*range.start() - Days::new(1))));
  }
  if range.end() < wanted.end() {
    log::warn!("{}", unavailable(calendar, &(*range.end() + Days::new(1)), wanted.end()));
  }

  log::debug!("looking up {} dates {} to {}", calendar.name(), range.start(), range.end());

  let Ok(annotations) = calendar
    .lookup(range.clone())
    .log_warn("Jewish calendar not available")
  else {
    return Annotations::new();
  };

  for cell in grid.weeks_mut() {
    if cell.week_start > *range.end() || cell.week_start + Days::new(6) < *range.start() {
      continue;
    }

    let days: Vec<Option<&DayAnnotation>> = cell
      .days()
      .map(|day| range.contains(&day).then(|| annotations.get(day)).flatten())
      .collect();

    cell.secondary_label = days
      .iter()
      .flatten()
      .find_map(|day| day.year_label.clone());

    let mut names: Vec<&str> = Vec::new();
    for holiday in days.iter().flatten().filter_map(|day| day.holiday.as_ref()) {
      if !names.contains(&holiday.name) {
        names.push(holiday.name);
      }
    }
    cell.holiday_label = (!names.is_empty()).then(|| names.join(", "));

    let classes: Vec<Option<HolidayClass>> = days
      .iter()
      .map(|day| day.and_then(|day| day.holiday.as_ref()).map(|holiday| holiday.class))
      .collect();
    cell.holidays = coalesce(&classes);
  }

  if annotations.is_empty() {
    log::info!("{} has nothing to show between {} and {}", calendar.name(), range.start(), range.end());
  } else {
    log::debug!("{} annotated days", annotations.len());
  }

  annotations
}

/// Merge consecutive days of the same class into marks
pub fn coalesce(classes: &[Option<HolidayClass>]) -> Vec<HolidayMark> {
  let mut marks: Vec<HolidayMark> = Vec::new();

  for (day, class) in classes.iter().enumerate() {
    let Some(class) = *class else {
      continue;
    };

    match marks.last_mut() {
      Some(mark) if mark.class == class && usize::from(mark.first_day + mark.num_days) == day => {
        mark.num_days += 1;
      }
      _ => marks.push(HolidayMark {
        class,
        first_day: day as u8,
        num_days: 1,
      }),
    }
  }

  marks
}

fn clamp(
  wanted: &RangeInclusive<NaiveDate>,
  supported: &RangeInclusive<NaiveDate>,
) -> Option<RangeInclusive<NaiveDate>> {
  let start = *wanted.start().max(supported.start());
  let end = *wanted.end().min(supported.end());

  (start <= end).then_some(start..=end)
}

fn unavailable(calendar: &dyn SecondaryCalendar, start: &NaiveDate, end: &NaiveDate) -> Error {
  Error::SecondaryCalendarUnavailable(format!(
    "{} calendar does not cover {start} to {end}",
    calendar.name()
  ))
}
