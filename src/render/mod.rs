mod canvas;
mod font;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::calendar::grid::{self, Layout, BOX_LINE_WIDTH, PAGE_HEIGHT, PAGE_WIDTH, TOP_MARGIN};
use crate::calendar::{WeekCell, WeekGrid};
use crate::config::CalendarSpec;
use crate::error::{Error, Result};
use crate::hebrew::{Annotations, HolidayClass};
use crate::logger::LogExt as _;
use crate::palette::{Palette, INK, WHITE};

use canvas::Canvas;
use font::Font;

pub const BIGFONT_SIZE: f32 = 24.0;
pub const SMALLFONT_SIZE: f32 = 11.0;

const CELL_ALPHA: f32 = 0.75;
const ELAPSED_ALPHA: f32 = 0.5;

/// Draw the poster and return the bytes of the PDF document
pub fn render(spec: &CalendarSpec, grid: &WeekGrid, palette: &Palette, annotations: &Annotations) -> Vec<u8> {
  let layout = Layout::new(grid.rows());
  let mut canvas = Canvas::new();

  canvas.set_color(WHITE, 1.0);
  canvas.fill_rectangle(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT);

  draw_title(&mut canvas, &spec.title, palette);
  draw_months(&mut canvas, &layout, grid, palette, spec.month_background);
  draw_year_labels(&mut canvas, &layout, grid);

  if spec.use_secondary_calendar {
    draw_secondary_year_labels(&mut canvas, &layout, grid, annotations);
  }

  let drawn = draw_grid(&mut canvas, &layout, grid, palette);
  log::debug!("drew {drawn} of {} cells in {} rows", grid.cells().len(), grid.rows());

  canvas.finish(&spec.title)
}

fn draw_title(canvas: &mut Canvas, title: &str, palette: &Palette) {
  canvas.set_color(palette.title(), 1.0);
  canvas.center_text(0.0, 0.0, PAGE_WIDTH, TOP_MARGIN * 2.0 / 3.0, title, Font::Bold, BIGFONT_SIZE);
}

/// Month names above the grid and a band behind every other month
fn draw_months(canvas: &mut Canvas, layout: &Layout, grid: &WeekGrid, palette: &Palette, background: bool) {
  let top = layout.y(0) - layout.box_margin;
  let label_y = top - layout.box_size - layout.box_margin;

  let header = grid::month_spans(grid.base_year());
  let last = header.len().saturating_sub(1);

  for (idx, span) in header.iter().enumerate() {
    let x = layout.date_x(span.first);
    let width = layout.date_x(span.last) - x;
    log::trace!("{} covers columns {:?}", span.month.name(), span.columns);

    canvas.set_color(INK, 1.0);
    canvas.center_text(x, label_y, width, layout.box_size, &month_label(span.month), Font::Regular, SMALLFONT_SIZE);

    if !background {
      canvas.set_color(INK, 0.5);
      canvas.line((x, label_y), (x, top));
      if idx == last {
        canvas.line((x + width, label_y), (x + width, top));
      }
    }
  }

  if !background {
    return;
  }

  canvas.set_color(palette.month_band(), 1.0);
  for row in 0..layout.rows {
    let y = layout.y(row as i64) - layout.box_margin / 2.0;

    for span in grid::month_spans(grid.row_year(row)).iter().step_by(2) {
      let x = layout.date_x(span.first);
      let width = layout.date_x(span.last) - x;

      canvas.fill_rectangle(x, y, width, layout.box_size + layout.box_margin);
    }
  }
}

fn month_label(month: chrono::Month) -> String {
  month.name().chars().take(3).collect()
}

fn draw_year_labels(canvas: &mut Canvas, layout: &Layout, grid: &WeekGrid) {
  canvas.set_color(INK, 1.0);

  for row in 0..layout.rows {
    canvas.center_text(
      layout.x_margin / 2.0,
      layout.y(row as i64),
      layout.x_margin / 2.0,
      layout.box_size,
      &grid.row_year(row).to_string(),
      Font::Regular,
      SMALLFONT_SIZE,
    );
  }
}

/// Hebrew year in effect at the end of each row, between that row and the next
fn draw_secondary_year_labels(canvas: &mut Canvas, layout: &Layout, grid: &WeekGrid, annotations: &Annotations) {
  canvas.set_color(INK, 1.0);

  for row in -1..layout.rows as i64 {
    let year = grid.base_year() + row as i32;
    let Some(label) = NaiveDate::from_ymd_opt(year, 12, 31).and_then(|date| annotations.year_label_at(date)) else {
      continue;
    };

    canvas.center_text(
      PAGE_WIDTH - layout.x_margin,
      layout.y(row) + layout.box_size / 2.0,
      layout.x_margin / 2.0,
      layout.box_size,
      label,
      Font::Regular,
      SMALLFONT_SIZE,
    );
  }
}

fn draw_grid(canvas: &mut Canvas, layout: &Layout, grid: &WeekGrid, palette: &Palette) -> usize {
  canvas.set_line_width(BOX_LINE_WIDTH);

  let mut drawn = 0;
  for row in 0..layout.rows {
    for cell in grid.row(row).iter().filter(|cell| cell.is_week()) {
      draw_week(canvas, layout, grid, palette, cell);
      drawn += 1;
    }
  }

  drawn
}

fn draw_week(canvas: &mut Canvas, layout: &Layout, grid: &WeekGrid, palette: &Palette, cell: &WeekCell) {
  let size = layout.box_size;
  let day_width = size / 7.0;
  let x = layout.cell_x(grid.row_year(cell.position.row), cell.position.column);
  let y = layout.y(cell.position.row as i64);

  if cell.is_current {
    canvas.set_color(palette.current_week(), 1.0);
  } else if cell.is_elapsed {
    canvas.set_color(INK, ELAPSED_ALPHA);
  } else {
    canvas.set_color(palette.future_week(), CELL_ALPHA);
  }
  canvas.fill_rectangle(x, y, size, size);

  if let Some(label) = &cell.holiday_label {
    log::trace!("week {} from {}: {label}", cell.index, cell.week_start);
  }

  for mark in &cell.holidays {
    let color = match mark.class {
      HolidayClass::Minor => palette.minor_holiday(),
      HolidayClass::Major => palette.major_holiday(),
    };

    canvas.set_color(color, CELL_ALPHA);
    canvas.fill_rectangle(
      x + f32::from(mark.first_day) * day_width,
      y,
      f32::from(mark.num_days) * day_width,
      size,
    );
  }

  canvas.set_color(INK, 1.0);
  canvas.stroke_rectangle(x, y, size, size);

  // underline the week in which the Hebrew year begins
  if cell.secondary_label.is_some() {
    let below = y + size + layout.box_margin / 2.0;
    canvas.line((x, below), (x + size, below));
  }
}

/// Write `bytes` to `path` through a temporary sibling, replacing any existing file
pub fn write(path: &Path, bytes: &[u8]) -> Result<()> {
  let temporary = temporary_path(path).ok_or_else(|| Error::OutputWrite {
    path: path.to_path_buf(),
    source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file name"),
  })?;

  let result = std::fs::write(&temporary, bytes).and_then(|()| std::fs::rename(&temporary, path));

  if let Err(source) = result {
    std::fs::remove_file(&temporary)
      .log_debug("Could not remove temporary file")
      .ok();

    return Err(Error::OutputWrite {
      path: path.to_path_buf(),
      source,
    });
  }

  log::debug!("wrote {} bytes to {}", bytes.len(), path.display());

  Ok(())
}

fn temporary_path(path: &Path) -> Option<PathBuf> {
  let name = path.file_name()?;

  let mut temporary = OsString::from(".");
  temporary.push(name);
  temporary.push(".tmp");

  Some(path.with_file_name(temporary))
}
