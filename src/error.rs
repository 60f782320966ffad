use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The start date is neither `dd/mm/yyyy` nor `dd-mm-yyyy`
  #[error("incorrect date format {0:?}: must be dd-mm-yyyy or dd/mm/yyyy")]
  InvalidDate(String),

  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("color palette must be between 0 and {max}, got {0}", max = crate::palette::PALETTE_COUNT - 1)]
  InvalidPalette(i64),

  /// Not fatal, the calendar is drawn without annotations for the affected range
  #[error("secondary calendar unavailable: {0}")]
  SecondaryCalendarUnavailable(String),

  #[error("could not write {}", path.display())]
  OutputWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("configuration: {0}")]
  Config(String),
}
