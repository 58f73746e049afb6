//! Data adjustment command implementation.

use super::{BuildArgs, build_adjustment};
use crate::data::{read_csv, write_csv};
use anyhow::{Context, Result};
use padron_membership::{AdjustmentConfig, Contents};
use std::path::Path;

/// Build grids, align a data file to one of them and write the result.
pub(crate) fn adjust_file(
    config: AdjustmentConfig,
    args: &BuildArgs,
    data: &Path,
    contents: Contents,
    data_date_format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let adjustment = build_adjustment(config, args)?;
    let frame = read_csv(data)?;
    let rows_in = frame.height();

    let table = adjustment
        .adjust_data_for_membership(&frame, contents, Some(data_date_format))
        .with_context(|| format!("Failed to adjust {}", data.display()))?;

    tracing::info!(
        contents = %contents,
        rows_in,
        rows_out = table.len(),
        payload = ?table.payload_columns(),
        "adjusted data for membership"
    );

    let mut frame = table.into_frame();
    write_csv(&mut frame, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use padron_calendar::CalendarKind;
    use polars::prelude::*;
    use std::fs;

    #[test]
    fn test_adjust_file_fills_missing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let constituents = dir.path().join("constituents.csv");
        let prices = dir.path().join("prices.csv");
        let output = dir.path().join("out.csv");
        fs::write(
            &constituents,
            "permno,from,thru\n10107,20240102,20240104\n",
        )
        .unwrap();
        fs::write(
            &prices,
            "date,permno,close\n2024-01-02,10107,370.9\n2024-01-04,10107,367.9\n2024-01-05,10107,367.7\n",
        )
        .unwrap();
        let args = BuildArgs {
            constituents,
            start: "2024-01-01".to_string(),
            end: "2024-01-05".to_string(),
            date_format: "%Y%m%d".to_string(),
            calendar: CalendarKind::Nyse,
        };
        let config = AdjustmentConfig::new("permno", padron_membership::DateMode::Period);

        adjust_file(config, &args, &prices, Contents::Factor, "%Y-%m-%d", Some(&output)).unwrap();

        let out = crate::data::read_csv(&output).unwrap();
        assert_eq!(out.height(), 3);
        let close = out.column("close").unwrap().as_materialized_series().clone();
        assert_eq!(close.null_count(), 1);
    }

    #[test]
    fn test_adjust_file_requires_id_column() {
        let dir = tempfile::tempdir().unwrap();
        let constituents = dir.path().join("constituents.csv");
        let prices = dir.path().join("prices.csv");
        fs::write(&constituents, "symbol,from,thru\nAAA,2024-01-02,2024-01-04\n").unwrap();
        fs::write(&prices, "date,ticker,close\n2024-01-02,AAA,1.0\n").unwrap();
        let args = BuildArgs {
            constituents,
            start: "2024-01-01".to_string(),
            end: "2024-01-05".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            calendar: CalendarKind::Weekday,
        };

        let err = adjust_file(
            AdjustmentConfig::default(),
            &args,
            &prices,
            Contents::Pricing,
            "%Y-%m-%d",
            None,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("symbol"));
    }
}
