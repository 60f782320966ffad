use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Generate a personalized "Life Calendar", inspired by the calendar with
/// the same name from the waitbutwhy.com store
#[derive(Debug, Clone, Default, Parser)]
#[clap(bin_name = env!("CARGO_PKG_NAME"), version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
  /// Starting date; your birthday, in either dd/mm/yyyy or dd-mm-yyyy format
  #[clap(name = "start_date")]
  pub start_date: String,

  /// Output filename [default: life_calendar.pdf]
  #[clap(short, long)]
  pub filename: Option<PathBuf>,

  /// Number of years [default: 90]
  #[clap(short = 'y', long, allow_negative_numbers = true)]
  pub num_years: Option<i64>,

  /// Calendar title text [default: "LIFE CALENDAR"]
  #[clap(short, long)]
  pub title: Option<String>,

  /// Include Hebrew calendar years and Jewish holidays
  #[clap(short, long)]
  pub jewish_calendar: bool,

  /// Use Israeli Jewish holidays (implies -j)
  #[clap(short, long)]
  pub israeli: bool,

  /// Color palette (0 -- 8) [default: 0]
  #[clap(short, long, allow_negative_numbers = true)]
  pub color_palette: Option<i64>,

  /// Invert palette
  #[clap(long)]
  pub invert_palette: bool,

  /// Don't draw background columns for months
  #[clap(long)]
  pub no_month_background: bool,

  /// Take this date as today when shading elapsed weeks
  #[clap(long, value_name = "DATE")]
  pub today: Option<String>,

  /// Read the Jewish calendar from the hebcal program
  #[clap(long)]
  pub hebcal: bool,

  /// Path to a TOML configuration file
  #[clap(long, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[clap(short, long, action = ArgAction::Count)]
  pub verbose: u8,
}
