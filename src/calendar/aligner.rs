use chrono::{Datelike as _, Days, Months, NaiveDate};

use crate::error::{Error, Result};
use crate::hebrew::HolidayMark;

use super::grid::{self, GridPosition, GRID_COLS};
use super::iso;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
  /// A week of the calendar
  Week,
  /// A slot of the first row that lies before the start week
  BeforeStart,
  /// A slot without an ISO week in that year
  Padding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekCell {
  pub index: usize,
  pub position: GridPosition,
  /// Monday of the week, or of the slot for cells that hold no week
  pub week_start: NaiveDate,
  pub kind: CellKind,
  pub is_elapsed: bool,
  pub is_current: bool,
  pub secondary_label: Option<String>,
  pub holiday_label: Option<String>,
  pub holidays: Vec<HolidayMark>,
}

impl WeekCell {
  pub fn is_week(&self) -> bool {
    self.kind == CellKind::Week
  }

  pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
    self.week_start.iter_days().take(7)
  }
}

/// Rectangular grid of `num_years * 53` cells, one row per ISO year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
  start_date: NaiveDate,
  first_week: NaiveDate,
  base_year: i32,
  num_years: usize,
  cells: Vec<WeekCell>,
}

impl WeekGrid {
  pub const fn start_date(&self) -> NaiveDate {
    self.start_date
  }

  pub const fn first_week(&self) -> NaiveDate {
    self.first_week
  }

  /// Year shown in the first row
  pub const fn base_year(&self) -> i32 {
    self.base_year
  }

  pub const fn rows(&self) -> usize {
    self.num_years
  }

  pub fn row_year(&self, row: usize) -> i32 {
    self.base_year + row as i32
  }

  /// Last day covered by the requested number of years
  pub fn end_date(&self) -> NaiveDate {
    self.start_date
      .checked_add_months(Months::new(12 * self.num_years as u32))
      .and_then(|date| date.pred_opt())
      .unwrap_or(NaiveDate::MAX)
  }

  /// Last day of the last week drawn
  pub fn last_day(&self) -> NaiveDate {
    self.weeks()
      .last()
      .and_then(|cell| cell.week_start.checked_add_days(Days::new(6)))
      .unwrap_or(self.first_week)
  }

  pub fn cells(&self) -> &[WeekCell] {
    &self.cells
  }

  pub fn row(&self, row: usize) -> &[WeekCell] {
    let idx = grid::index(GridPosition { row, column: 0 });
    &self.cells[idx..(idx + GRID_COLS)]
  }

  pub fn weeks(&self) -> impl Iterator<Item = &WeekCell> {
    self.cells.iter().filter(|cell| cell.is_week())
  }

  pub fn weeks_mut(&mut self) -> impl Iterator<Item = &mut WeekCell> {
    self.cells.iter_mut().filter(|cell| cell.is_week())
  }
}

/// Lay out `num_years` rows of weeks starting with the week of `start_date`.
///
/// Row `r` holds the ISO year `base_year + r` and ISO week `w` of a year
/// lands in column `w - 1`, or `w` when 1 January falls Friday to Sunday.
/// Every row gets 53 slots, so a long year never pushes the following rows
/// out of line. When the start date lies in the last ISO week of the
/// previous year the first row is the start date's own year, and the start
/// week takes the slot of the week containing 1 January.
pub fn align(start_date: NaiveDate, num_years: usize, today: NaiveDate) -> Result<WeekGrid> {
  if num_years == 0 {
    return Err(Error::InvalidArgument("number of years must be positive".to_string()));
  }

  let first_week = iso::week_start(start_date);
  let base_year = start_date.iso_week().year().max(start_date.year());

  let last_year = i32::try_from(num_years)
    .ok()
    .and_then(|years| base_year.checked_add(years))
    .filter(|year| NaiveDate::from_ymd_opt(*year, 12, 31).is_some())
    .ok_or_else(|| Error::InvalidArgument(format!("{num_years} years from {start_date} is out of range")))?;

  log::debug!("aligning {num_years} rows from {base_year} to {}, first week {first_week}", last_year - 1);

  let mut cells = Vec::with_capacity(num_years * GRID_COLS);

  for row in 0..num_years {
    let year = base_year + row as i32;
    let origin = iso::row_origin(year);
    let shift = iso::leading_shift(year) as usize;
    let weeks = iso::iso_week_count(year) as usize;

    for column in 0..GRID_COLS {
      let week_start = origin + Days::new(7 * column as u64);

      let mut kind = if column < shift || column >= shift + weeks {
        CellKind::Padding
      } else {
        CellKind::Week
      };

      if row == 0 {
        if week_start < first_week {
          kind = CellKind::BeforeStart;
        } else if week_start == first_week {
          kind = CellKind::Week;
        }
      }

      let index = cells.len();
      let is_week = kind == CellKind::Week;

      cells.push(WeekCell {
        index,
        position: grid::position(index),
        week_start,
        kind,
        is_elapsed: is_week && week_start <= today,
        is_current: is_week && week_start <= today && today < week_start + Days::new(7),
        secondary_label: None,
        holiday_label: None,
        holidays: Vec::new(),
      });
    }
  }

  Ok(WeekGrid {
    start_date,
    first_week,
    base_year,
    num_years,
    cells,
  })
}

#[cfg(test)]
mod tests {
  use chrono::Weekday;

  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn today() -> NaiveDate {
    date(2026, 10, 19)
  }

  const STARTS: [(i32, u32, u32); 9] = [
    (2000, 1, 1),
    (2000, 1, 3),
    (1990, 6, 15),
    (2021, 1, 2),
    (2024, 12, 30),
    (2020, 12, 31),
    (1987, 3, 29),
    (2015, 1, 1),
    (2009, 12, 31),
  ];

  #[test]
  fn produces_53_cells_per_year() {
    for (y, m, d) in STARTS {
      for years in [1, 2, 5, 90] {
        let grid = align(date(y, m, d), years, today()).unwrap();

        assert_eq!(years * 53, grid.cells().len());
        assert_eq!(years, grid.rows());
      }
    }
  }

  #[test]
  fn rejects_zero_years() {
    assert!(matches!(align(date(2000, 1, 1), 0, today()), Err(Error::InvalidArgument(_))));
  }

  #[test]
  fn rejects_years_beyond_calendar_range() {
    assert!(matches!(
      align(date(2000, 1, 1), 10_000_000, today()),
      Err(Error::InvalidArgument(_))
    ));
  }

  #[test]
  fn first_week_contains_start_date() {
    for (y, m, d) in STARTS {
      let start = date(y, m, d);
      let grid = align(start, 3, today()).unwrap();
      let first = grid.weeks().next().unwrap();

      assert_eq!(Weekday::Mon, first.week_start.weekday());
      assert!(first.week_start <= start);
      assert!((start - first.week_start).num_days() <= 6);
      assert_eq!(grid.first_week(), first.week_start);
    }
  }

  #[test]
  fn indexes_match_positions() {
    let grid = align(date(1990, 6, 15), 4, today()).unwrap();

    for (idx, cell) in grid.cells().iter().enumerate() {
      assert_eq!(idx, cell.index);
      assert_eq!(grid::position(idx), cell.position);
    }
  }

  #[test]
  fn weeks_follow_each_other_without_gaps() {
    for (y, m, d) in STARTS {
      let grid = align(date(y, m, d), 12, today()).unwrap();
      let weeks: Vec<NaiveDate> = grid.weeks().map(|cell| cell.week_start).collect();

      for pair in weeks.windows(2) {
        assert_eq!(7, (pair[1] - pair[0]).num_days(), "{pair:?}");
      }
    }
  }

  #[test]
  fn iso_week_lands_in_its_column_after_long_years() {
    // 2015 and 2020 have 53 weeks
    let grid = align(date(2014, 5, 5), 10, today()).unwrap();

    for row in 0..grid.rows() {
      let year = grid.row_year(row);
      let shift = iso::leading_shift(year) as usize;

      let populated: Vec<&WeekCell> = grid.row(row).iter().filter(|cell| cell.is_week()).collect();
      let first_column = populated[0].position.column;

      for (offset, cell) in populated.iter().enumerate() {
        let week = cell.week_start.iso_week();

        assert_eq!(year, week.year());
        assert_eq!(week.week() as usize - 1 + shift, cell.position.column);
        // no gap before the last populated column
        assert_eq!(first_column + offset, cell.position.column);
      }

      if row > 0 {
        assert_eq!(iso::iso_week_count(year) as usize, populated.len(), "{year}");
      }
    }
  }

  #[test]
  fn start_in_previous_iso_year_takes_first_slot() {
    let grid = align(date(2000, 1, 1), 1, today()).unwrap();

    assert_eq!(2000, grid.base_year());
    let row = grid.row(0);
    assert!(row.iter().all(WeekCell::is_week));
    assert_eq!(date(1999, 12, 27), row[0].week_start);
    assert_eq!(date(2000, 1, 3), row[1].week_start);
    assert_eq!(date(2000, 12, 25), row[52].week_start);
  }

  #[test]
  fn start_in_next_iso_year_begins_that_year() {
    let grid = align(date(2024, 12, 31), 2, today()).unwrap();

    assert_eq!(2025, grid.base_year());
    assert_eq!(date(2024, 12, 30), grid.row(0)[0].week_start);
    assert_eq!(CellKind::Week, grid.row(0)[0].kind);
  }

  #[test]
  fn slots_before_start_are_flagged() {
    let grid = align(date(1990, 6, 15), 2, today()).unwrap();
    let row = grid.row(0);

    // 1990-06-15 is in ISO week 24, 1990-01-01 is a Monday
    assert!(row[..23].iter().all(|cell| cell.kind == CellKind::BeforeStart));
    assert_eq!(CellKind::Week, row[23].kind);
    assert_eq!(date(1990, 6, 11), row[23].week_start);
    // 1990 has 52 weeks
    assert_eq!(CellKind::Padding, row[52].kind);
  }

  #[test]
  fn elapsed_and_current_weeks() {
    let grid = align(date(2000, 1, 1), 1, date(2000, 3, 1)).unwrap();
    let row = grid.row(0);

    assert!(row[0].is_elapsed);
    // 2000-03-01 is the Wednesday of ISO week 9
    let current: Vec<usize> = row.iter().filter(|cell| cell.is_current).map(|cell| cell.index).collect();
    assert_eq!(vec![9], current);
    assert!(row[9].is_elapsed);
    assert!(!row[10].is_elapsed);
    assert!(row[10..].iter().all(|cell| !cell.is_elapsed));
  }

  #[test]
  fn padding_is_never_elapsed() {
    let grid = align(date(1990, 6, 15), 3, today()).unwrap();

    assert!(grid
      .cells()
      .iter()
      .filter(|cell| !cell.is_week())
      .all(|cell| !cell.is_elapsed && !cell.is_current));
  }

  #[test]
  fn end_date_is_day_before_last_birthday() {
    let grid = align(date(1990, 6, 15), 90, today()).unwrap();

    assert_eq!(date(2080, 6, 14), grid.end_date());
    assert_eq!(date(2079, 12, 31), grid.last_day());
  }
}
