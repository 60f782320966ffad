use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::calendar::iso;
use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::hebrew::ProviderKind;

pub const DOC_NAME: &str = "life_calendar.pdf";
pub const DEFAULT_TITLE: &str = "LIFE CALENDAR";
pub const DEFAULT_YEARS: i64 = 90;
pub const DEFAULT_PALETTE: i64 = 0;

/// Defaults read from a TOML file, command line flags take precedence
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub filename: Option<PathBuf>,
  pub num_years: Option<i64>,
  pub title: Option<String>,
  pub color_palette: Option<i64>,
  pub invert_palette: bool,
  pub month_background: bool,
  pub secondary_calendar: SecondaryCalendar,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecondaryCalendar {
  pub enabled: bool,
  pub israeli: bool,
  pub provider: ProviderKind,
}

pub fn init(path: &Path) -> Result<Config> {
  let string = std::fs::read_to_string(path)
    .map_err(|e| Error::Config(format!("could not read {}: {e}", path.display())))?;

  parse(&string).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

pub fn parse(string: &str) -> Result<Config, toml::de::Error> {
  toml::from_str(string)
}

impl Default for Config {
  fn default() -> Self {
    Self {
      filename: None,
      num_years: None,
      title: None,
      color_palette: None,
      invert_palette: false,
      month_background: true,
      secondary_calendar: SecondaryCalendar::default(),
    }
  }
}

/// Everything one poster is drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSpec {
  pub start_date: NaiveDate,
  pub num_years: usize,
  pub title: String,
  pub use_secondary_calendar: bool,
  /// Israeli holidays instead of those kept abroad
  pub secondary_region_variant: bool,
  pub provider: ProviderKind,
  pub palette_index: i64,
  pub invert_palette: bool,
  pub month_background: bool,
  pub filename: PathBuf,
  pub today: NaiveDate,
}

impl CalendarSpec {
  /// Merge command line and configuration file; `today` is used unless `--today` is given
  pub fn new(cli: &Cli, config: Config, today: NaiveDate) -> Result<Self> {
    let start_date = iso::parse_date(&cli.start_date)?;

    let today = match &cli.today {
      Some(text) => iso::parse_date(text)?,
      None => today,
    };

    let num_years = cli.num_years.or(config.num_years).unwrap_or(DEFAULT_YEARS);
    let num_years = usize::try_from(num_years)
      .ok()
      .filter(|years| *years > 0)
      .ok_or_else(|| Error::InvalidArgument(format!("number of years must be positive, got {num_years}")))?;

    let secondary = config.secondary_calendar;
    let israeli = cli.israeli || secondary.israeli;

    Ok(Self {
      start_date,
      num_years,
      title: cli.title.clone().or(config.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
      use_secondary_calendar: cli.jewish_calendar || israeli || secondary.enabled,
      secondary_region_variant: israeli,
      provider: if cli.hebcal { ProviderKind::Hebcal } else { secondary.provider },
      palette_index: cli.color_palette.or(config.color_palette).unwrap_or(DEFAULT_PALETTE),
      invert_palette: cli.invert_palette || config.invert_palette,
      month_background: !cli.no_month_background && config.month_background,
      filename: cli.filename.clone().or(config.filename).unwrap_or_else(|| PathBuf::from(DOC_NAME)),
      today,
    })
  }
}
