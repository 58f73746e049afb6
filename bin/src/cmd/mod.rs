//! CLI subcommand modules.
//!
//! This module contains the implementations for all padron CLI subcommands.

pub(crate) mod adjust;
pub(crate) mod grid;
pub(crate) mod holidays;

use crate::data::{parse_date, read_csv};
use anyhow::{Context, Result};
use clap::Args;
use padron_calendar::CalendarKind;
use padron_membership::{AdjustmentConfig, ConstituteAdjustment};
use std::path::PathBuf;

/// Arguments shared by every command that builds grids.
#[derive(Debug, Args)]
pub(crate) struct BuildArgs {
    /// Constituents CSV with id, from and thru columns
    #[arg(long)]
    pub(crate) constituents: PathBuf,

    /// Calendar start date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) start: String,

    /// Calendar end date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) end: String,

    /// chrono format of the from/thru columns
    #[arg(long, default_value = "%Y-%m-%d")]
    pub(crate) date_format: String,

    /// Trading calendar (nyse or weekday)
    #[arg(long, default_value = "nyse")]
    pub(crate) calendar: CalendarKind,
}

/// Reads the constituents and builds both grids.
pub(crate) fn build_adjustment(
    config: AdjustmentConfig,
    args: &BuildArgs,
) -> Result<ConstituteAdjustment> {
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;
    let constituents = read_csv(&args.constituents)?;

    let mut adjustment = ConstituteAdjustment::with_calendar(config, args.calendar.build())?;
    adjustment
        .add_index_info(
            &constituents,
            Some(start),
            Some(end),
            Some(args.date_format.as_str()),
        )
        .with_context(|| format!("Failed to build grids from {}", args.constituents.display()))?;
    Ok(adjustment)
}
