use log::LevelFilter;

/// Verbosity 0 logs warnings, `-v` info, `-vv` debug and `-vvv` trace.
/// `RUST_LOG` takes precedence when set.
pub fn init(verbosity: u8) {
  let level = match verbosity {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };

  env_logger::builder()
    .filter_level(level)
    .parse_default_env()
    .format_timestamp(None)
    .init();
}

pub trait LogExt<T> {
  fn log_debug(self, msg: &str) -> anyhow::Result<T>;
  fn log_warn(self, msg: &str) -> anyhow::Result<T>;
}

impl<T, E> LogExt<T> for Result<T, E> where E: std::fmt::Display {
  #[track_caller]
  fn log_debug(self, msg: &str) -> anyhow::Result<T> {
    match self {
      Ok(value) => Ok(value),
      Err(error) => {
        let location = std::panic::Location::caller();

        log::debug!("[{location}] {msg}: {error}");

        anyhow::bail!("{msg}: {error}")
      }
    }
  }

  #[track_caller]
  fn log_warn(self, msg: &str) -> anyhow::Result<T> {
    match self {
      Ok(value) => Ok(value),
      Err(error) => {
        let location = std::panic::Location::caller();

        log::warn!("[{location}] {msg}: {error}");

        anyhow::bail!("{msg}: {error}")
      }
    }
  }
}
