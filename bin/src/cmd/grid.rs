//! Grid export command implementation.

use super::{BuildArgs, build_adjustment};
use crate::data::write_csv;
use anyhow::Result;
use padron_membership::{AdjustmentConfig, Contents};
use std::path::Path;

/// Build grids from a constituents file and write the selected one as CSV.
pub(crate) fn write_grid(
    config: AdjustmentConfig,
    args: &BuildArgs,
    contents: Contents,
    output: Option<&Path>,
) -> Result<()> {
    let adjustment = build_adjustment(config, args)?;
    let grid = match contents {
        Contents::Factor => adjustment.factor_components(),
        Contents::Pricing => adjustment.pricing_components(),
    }
    .ok_or_else(|| anyhow::anyhow!("grids were not built"))?;

    tracing::info!(
        contents = %contents,
        keys = grid.len(),
        assets = grid.assets()?.len(),
        "writing grid"
    );

    let mut frame = grid.frame().clone();
    write_csv(&mut frame, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_csv;
    use padron_calendar::CalendarKind;
    use std::fs;

    #[test]
    fn test_write_factor_and_pricing_grids() {
        let dir = tempfile::tempdir().unwrap();
        let constituents = dir.path().join("constituents.csv");
        fs::write(
            &constituents,
            "symbol,from,thru\nAAA,2024-01-02,2024-01-03\nBBB,2024-01-04,\n",
        )
        .unwrap();
        let args = BuildArgs {
            constituents,
            start: "2024-01-01".to_string(),
            end: "2024-01-05".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            calendar: CalendarKind::Weekday,
        };

        let factor = dir.path().join("factor.csv");
        write_grid(AdjustmentConfig::default(), &args, Contents::Factor, Some(&factor)).unwrap();
        assert_eq!(read_csv(&factor).unwrap().height(), 4);

        let pricing = dir.path().join("pricing.csv");
        write_grid(AdjustmentConfig::default(), &args, Contents::Pricing, Some(&pricing)).unwrap();
        assert_eq!(read_csv(&pricing).unwrap().height(), 6);
    }
}
