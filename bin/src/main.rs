//! Padron CLI binary.
//!
//! Builds membership grids from index constituents and aligns CSV data to
//! them.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::BuildArgs;
use padron_calendar::CalendarKind;
use padron_membership::{AdjustmentConfig, Contents, DateMode, IntervalKey};
use std::{path::PathBuf, process};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "padron")]
#[command(about = "Survivorship-safe index membership grids", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file holding an adjustment config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Asset id column, overriding the config
    #[arg(long, global = true)]
    id_column: Option<String>,

    /// Output date representation (timestamp or period)
    #[arg(long, global = true)]
    date_mode: Option<DateMode>,

    /// Duplicate key for constituents (asset or asset-span)
    #[arg(long, global = true)]
    interval_key: Option<IntervalKey>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build grids and write one of them as CSV
    Grid {
        #[command(flatten)]
        build: BuildArgs,

        /// Grid to write (factor or pricing)
        #[arg(long, default_value = "factor")]
        contents: Contents,

        /// Output CSV, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Align a data file to a membership grid
    Adjust {
        #[command(flatten)]
        build: BuildArgs,

        /// Data CSV with date and id columns
        #[arg(long)]
        data: PathBuf,

        /// Grid to align to (factor or pricing)
        #[arg(long, default_value = "factor")]
        contents: Contents,

        /// chrono format of the data's date column
        #[arg(long, default_value = "%Y-%m-%d")]
        data_date_format: String,

        /// Output CSV, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show sessions and weekday closures of a calendar
    Holidays {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Trading calendar (nyse or weekday)
        #[arg(long, default_value = "nyse")]
        calendar: CalendarKind,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "padron=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Grid {
            build,
            contents,
            output,
        } => {
            cmd::grid::write_grid(config, &build, contents, output.as_deref())?;
        }
        Commands::Adjust {
            build,
            data,
            contents,
            data_date_format,
            output,
        } => {
            cmd::adjust::adjust_file(
                config,
                &build,
                &data,
                contents,
                &data_date_format,
                output.as_deref(),
            )?;
        }
        Commands::Holidays {
            start,
            end,
            calendar,
        } => {
            let start = data::parse_date(&start)?;
            let end = data::parse_date(&end)?;
            cmd::holidays::show_holidays(calendar.build().as_ref(), start, end)?;
        }
    }

    Ok(())
}

/// The config file, if any, with command-line overrides applied.
fn resolve_config(cli: &Cli) -> Result<AdjustmentConfig> {
    let mut config = data::load_config(cli.config.as_deref())?;
    if let Some(id_column) = &cli.id_column {
        config.id_column = id_column.clone();
    }
    if let Some(date_mode) = cli.date_mode {
        config.date_mode = date_mode;
    }
    if let Some(interval_key) = cli.interval_key {
        config.interval_key = interval_key;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply_over_defaults() {
        let cli = Cli::parse_from([
            "padron",
            "--id-column",
            "permno",
            "--date-mode",
            "period",
            "holidays",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-31",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.id_column, "permno");
        assert_eq!(config.date_mode, DateMode::Period);
        assert_eq!(config.interval_key, IntervalKey::Asset);
    }

    #[test]
    fn test_reserved_id_column_is_rejected() {
        let cli = Cli::parse_from([
            "padron",
            "--id-column",
            "date",
            "holidays",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-31",
        ]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_unknown_contents_is_a_parse_error() {
        let result = Cli::try_parse_from([
            "padron",
            "grid",
            "--constituents",
            "c.csv",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-31",
            "--contents",
            "returns",
        ]);
        assert!(result.is_err());
    }
}
