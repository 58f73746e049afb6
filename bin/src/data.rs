//! File and argument helpers for the padron CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use padron_membership::AdjustmentConfig;
use polars::prelude::*;
use std::{fs, io, path::Path};

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{date_str}', expected YYYY-MM-DD"))
}

/// Read a CSV file with a header row. Columns are not date-parsed.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .and_then(LazyFrame::collect)
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Write `frame` as CSV to `output`, or to stdout when no path is given.
pub(crate) fn write_csv(frame: &mut DataFrame, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            CsvWriter::new(&mut file).include_header(true).finish(frame)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            CsvWriter::new(&mut stdout).include_header(true).finish(frame)?;
        }
    }
    Ok(())
}

/// Load an [`AdjustmentConfig`] from a JSON file, or the default.
///
/// Missing fields take their default values.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AdjustmentConfig> {
    let Some(path) = path else {
        return Ok(AdjustmentConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}
