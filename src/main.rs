#![warn(
    clippy::all,
    // clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    // clippy::unwrap_used
)]
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

mod calendar;
mod cli;
mod config;
mod error;
mod hebrew;
mod logger;
mod palette;
mod render;

use crate::config::{CalendarSpec, Config};

fn main() {
    let cli = cli::Cli::parse();
    logger::init(cli.verbose);

    match run(&cli) {
        Ok(path) => println!("Created {}", path.display()),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: &cli::Cli) -> Result<PathBuf> {
    let config = match &cli.config {
        Some(path) => config::init(path)?,
        None => Config::default(),
    };

    let today = chrono::Local::now().date_naive();
    let spec = CalendarSpec::new(cli, config, today)?;
    log::debug!("{spec:?}");

    create(&spec)?;

    Ok(spec.filename)
}

/// Validate, lay out, draw and save one poster
fn create(spec: &CalendarSpec) -> error::Result<()> {
    let palette = palette::select(spec.palette_index, spec.invert_palette)?;
    let mut grid = calendar::align(spec.start_date, spec.num_years, spec.today)?;
    log::info!("{} years from {} to {}", grid.rows(), grid.start_date(), grid.end_date());

    let annotations = if spec.use_secondary_calendar {
        let provider = hebrew::provider(spec.provider, spec.secondary_region_variant);
        hebrew::annotate(&mut grid, provider.as_ref())
    } else {
        hebrew::Annotations::new()
    };

    let bytes = render::render(spec, &grid, &palette, &annotations);

    render::write(&spec.filename, &bytes)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::NaiveDate;

    use super::*;
    use crate::error::Error;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn spec_on(dir: &Path, today: &str, args: &[&str]) -> CalendarSpec {
        let mut argv = vec!["life-calendar", "--today", today];
        argv.extend_from_slice(args);
        let mut cli = cli::Cli::try_parse_from(argv).unwrap();
        cli.filename = Some(dir.join(cli.filename.unwrap_or_else(|| config::DOC_NAME.into())));

        CalendarSpec::new(&cli, Config::default(), date(2000, 1, 1)).unwrap()
    }

    fn spec(dir: &Path, args: &[&str]) -> CalendarSpec {
        spec_on(dir, "19/10/2026", args)
    }

    #[test]
    fn one_year_from_2000() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec(dir.path(), &["-y", "1", "01/01/2000"]);

        let grid = calendar::align(spec.start_date, spec.num_years, spec.today).unwrap();
        let row = grid.row(0);

        assert_eq!(53, row.len());
        assert_eq!(53, row.iter().filter(|cell| cell.is_week()).count());

        let first = row.iter().find(|cell| cell.days().any(|day| day == date(2000, 1, 1))).unwrap();
        assert!(first.is_elapsed);
        assert!(row.iter().all(|cell| cell.is_elapsed));

        create(&spec).unwrap();
        let bytes = std::fs::read(&spec.filename).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn future_weeks_are_not_elapsed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec_on(dir.path(), "01-03-2000", &["-y", "1", "01/01/2000"]);
        assert_eq!(date(2000, 3, 1), spec.today);

        let grid = calendar::align(spec.start_date, spec.num_years, spec.today).unwrap();

        for cell in grid.weeks() {
            let entirely_after = cell.week_start > spec.today;
            assert_eq!(!entirely_after, cell.is_elapsed, "{}", cell.week_start);
        }

        let current: Vec<NaiveDate> = grid.weeks().filter(|cell| cell.is_current).map(|cell| cell.week_start).collect();
        assert_eq!(vec![date(2000, 2, 28)], current);
        assert!(grid.weeks().any(|cell| !cell.is_elapsed));

        create(&spec).unwrap();
        assert!(spec.filename.exists());
    }

    #[test]
    fn identical_arguments_give_identical_files() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let first = spec(dir.path(), &["-f", "a.pdf", "-j", "-c", "6", "15/06/1990"]);
        let second = spec(dir.path(), &["-f", "b.pdf", "-j", "-c", "6", "15/06/1990"]);
        create(&first).unwrap();
        create(&second).unwrap();

        let a = std::fs::read(&first.filename).unwrap();
        let b = std::fs::read(&second.filename).unwrap();
        assert_eq!(a, b);

        create(&first).unwrap();
        assert_eq!(a, std::fs::read(&first.filename).unwrap());
    }

    #[test]
    fn invalid_palette_writes_nothing() {
        let dir = tempfile::tempdir().expect("create temp dir");

        for index in ["9", "-1"] {
            let spec = spec(dir.path(), &["-c", index, "15/06/1990"]);

            assert!(matches!(create(&spec), Err(Error::InvalidPalette(_))));
            assert!(!spec.filename.exists());
        }
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec(dir.path(), &["-f", "no/such/dir/out.pdf", "-y", "2", "15/06/1990"]);

        assert!(matches!(create(&spec), Err(Error::OutputWrite { .. })));
    }

    #[test]
    fn palettes_and_options_all_render() {
        let dir = tempfile::tempdir().expect("create temp dir");

        for index in 0..palette::PALETTE_COUNT {
            let index = index.to_string();
            let spec = spec(
                dir.path(),
                &["-c", &index, "--invert-palette", "--no-month-background", "-i", "-y", "3", "29-02-2004"],
            );

            create(&spec).unwrap();
        }
    }

    #[test]
    fn bad_config_file_stops_the_run() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("life-calendar.toml");
        std::fs::write(&path, "num_years = \"many\"").unwrap();

        let cli = cli::Cli::try_parse_from([
            "life-calendar",
            "--config",
            path.to_str().unwrap(),
            "15/06/1990",
        ])
        .unwrap();

        let error = run(&cli).unwrap_err();
        assert!(matches!(error.downcast_ref::<Error>(), Some(Error::Config(_))));
    }
}
