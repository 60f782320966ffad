use std::ops::RangeInclusive;

use chrono::{Datelike as _, Month, NaiveDate};

use super::iso;

pub const GRID_COLS: usize = 53;

/// Rows a default poster has, the box size never grows beyond what this many rows allow
pub const DEFAULT_ROWS: usize = 90;

// A2 portrait, in points
pub const PAGE_WIDTH: f32 = 1190.0;
pub const PAGE_HEIGHT: f32 = 1684.0;

pub const TOP_MARGIN: f32 = 72.0;
pub const BOTTOM_MARGIN: f32 = 42.0;
pub const BOX_MARGIN_FRAC: f32 = 0.175;
pub const BOX_LINE_WIDTH: f32 = 1.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPosition {
  pub row: usize,
  pub column: usize,
}

pub const fn position(index: usize) -> GridPosition {
  GridPosition {
    row: index / GRID_COLS,
    column: index % GRID_COLS,
  }
}

pub const fn index(position: GridPosition) -> usize {
  position.row * GRID_COLS + position.column
}

/// Columns of one year row that a month overlaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSpan {
  pub month: Month,
  pub first: NaiveDate,
  pub last: NaiveDate,
  pub columns: RangeInclusive<usize>,
}

/// Column of `date` within the row of `year`, `None` outside that row
pub fn column_of(year: i32, date: NaiveDate) -> Option<usize> {
  let days = (date - iso::row_origin(year)).num_days();
  let column = usize::try_from(days.div_euclid(7)).ok()?;

  (column < GRID_COLS).then_some(column)
}

pub fn month_spans(year: i32) -> Vec<MonthSpan> {
  (1..=12)
    .filter_map(|number: u8| {
      let first = NaiveDate::from_ymd_opt(year, u32::from(number), 1)?;
      let last = first.checked_add_months(chrono::Months::new(1))?.pred_opt()?;
      let month = Month::try_from(number).ok()?;

      let start = column_of(year, first)?;
      let end = column_of(year, last).unwrap_or(GRID_COLS - 1);

      Some(MonthSpan { month, first, last, columns: start..=end })
    })
    .collect()
}

/// Page coordinates of the grid, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
  pub rows: usize,
  pub box_size: f32,
  pub box_margin: f32,
  pub x_margin: f32,
}

impl Layout {
  pub fn new(rows: usize) -> Self {
    let chart_height = PAGE_HEIGHT - TOP_MARGIN - BOTTOM_MARGIN;
    let box_size = chart_height / rows.max(DEFAULT_ROWS) as f32 / (1.0 + BOX_MARGIN_FRAC);
    let box_margin = box_size * BOX_MARGIN_FRAC;
    let x_margin = (PAGE_WIDTH - (box_size + box_margin) * GRID_COLS as f32) / 2.0;

    Self {
      rows,
      box_size,
      box_margin,
      x_margin,
    }
  }

  /// Horizontal position of a week column shifted by `day` sevenths of a box
  pub fn x(&self, week: f32, day: f32) -> f32 {
    self.x_margin
      + week * (self.box_size + self.box_margin)
      + day * self.box_size / 7.0
      + self.box_size / 2.0
  }

  /// Vertical position of a row, rows before the first one are allowed for labels
  pub fn y(&self, row: i64) -> f32 {
    TOP_MARGIN + row as f32 * (self.box_size + self.box_margin)
  }

  /// Left edge of a cell; rows are shifted so that 1 January lines up across years
  pub fn cell_x(&self, year: i32, column: usize) -> f32 {
    self.x(column as f32, -(iso::jan_first_offset(year) as f32))
  }

  /// Position of a day within the row of its own year
  pub fn date_x(&self, date: NaiveDate) -> f32 {
    let days = (date - iso::first_of_year(date.year())).num_days();

    self.x(days.div_euclid(7) as f32, days.rem_euclid(7) as f32)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn position_round_trips_index() {
    assert_eq!(GridPosition { row: 0, column: 0 }, position(0));
    assert_eq!(GridPosition { row: 0, column: 52 }, position(52));
    assert_eq!(GridPosition { row: 1, column: 0 }, position(53));
    assert_eq!(GridPosition { row: 89, column: 52 }, position(90 * 53 - 1));

    for idx in [0, 17, 53, 400, 4769] {
      assert_eq!(idx, index(position(idx)));
    }
  }

  #[test]
  fn columns_start_at_week_of_january_first() {
    // 2000-01-01 is a Saturday, the row starts on Monday 1999-12-27
    assert_eq!(Some(0), column_of(2000, date(1999, 12, 27)));
    assert_eq!(Some(0), column_of(2000, date(2000, 1, 2)));
    assert_eq!(Some(1), column_of(2000, date(2000, 1, 3)));
    assert_eq!(Some(52), column_of(2000, date(2000, 12, 31)));
    assert_eq!(None, column_of(2000, date(1999, 12, 26)));
  }

  #[test]
  fn month_spans_are_contiguous() {
    for year in [2000, 2015, 2020, 2021] {
      let spans = month_spans(year);
      assert_eq!(12, spans.len());
      assert_eq!(0, *spans[0].columns.start());

      for pair in spans.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let end = *prev.columns.end();
        let start = *next.columns.start();
        // consecutive months either share the boundary week or touch
        assert!(start == end || start == end + 1, "{year} {:?}", next.month);
      }

      assert!(*spans[11].columns.end() < GRID_COLS);
    }
  }

  #[test]
  fn january_2020_span() {
    let spans = month_spans(2020);

    // 2020-01-01 Wednesday, 2020-01-31 Friday in the fifth row week
    assert_eq!(Month::January, spans[0].month);
    assert_eq!(0..=4, spans[0].columns);
    assert_eq!(4..=8, spans[1].columns);
  }

  #[test]
  fn layout_fits_page() {
    let layout = Layout::new(DEFAULT_ROWS);

    assert!(layout.x_margin > 0.0);
    let bottom = layout.y(DEFAULT_ROWS as i64);
    assert!(bottom <= PAGE_HEIGHT - BOTTOM_MARGIN + 0.01);

    // a short calendar keeps the default box size, a long one shrinks
    assert_eq!(layout.box_size, Layout::new(1).box_size);
    assert!(Layout::new(120).box_size < layout.box_size);
  }

  #[test]
  fn january_first_lines_up_across_rows() {
    let layout = Layout::new(DEFAULT_ROWS);

    for year in 1995..2030 {
      let column = column_of(year, date(year, 1, 1)).unwrap();
      let cell = layout.cell_x(year, column);
      let jan = layout.date_x(date(year, 1, 1));
      let offset = iso::jan_first_offset(year) as f32;

      assert!((jan - (cell + offset * layout.box_size / 7.0)).abs() < 0.001, "{year}");
    }
  }
}
