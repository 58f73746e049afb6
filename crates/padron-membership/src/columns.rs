//! Column presence validation.

use padron_traits::{PadronError, Result};
use polars::prelude::*;

/// Name of the date column in data passed for reindexing.
pub const DATE_COLUMN: &str = "date";
/// Name of the membership start column.
pub const FROM_COLUMN: &str = "from";
/// Name of the membership end column.
pub const THRU_COLUMN: &str = "thru";

/// What [`require_columns`] returns once the check passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Only the required columns, in the order they were requested.
    #[default]
    Required,
    /// Every column of the input.
    All,
}

/// Checks that `frame` exposes every column in `needed`.
///
/// Polars frames are always positionally indexed, so there is no row index to
/// flatten first. The caller's frame is never modified; the result is a new
/// frame sharing its buffers.
///
/// # Errors
///
/// [`PadronError::MissingColumn`] naming the first absent column.
pub fn require_columns(frame: &DataFrame, needed: &[&str], selection: Selection) -> Result<DataFrame> {
    if let Some(missing) = needed
        .iter()
        .find(|name| frame.get_column_index(name).is_none())
    {
        return Err(PadronError::MissingColumn((*missing).to_string()));
    }

    match selection {
        Selection::Required => Ok(frame.select(needed.iter().copied())?),
        Selection::All => Ok(frame.clone()),
    }
}

/// Column names of `frame` other than `keys`, in frame order.
pub fn payload_columns(frame: &DataFrame, keys: &[&str]) -> Vec<String> {
    frame
        .get_column_names()
        .into_iter()
        .filter(|name| !keys.contains(&name.as_str()))
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df! {
            "symbol" => &["AAA", "BBB"],
            "from" => &["2012-01-01", "2014-01-01"],
            "thru" => &["2015-01-01", "2016-01-01"],
            "sector" => &["Tech", "Energy"],
        }
        .unwrap()
    }

    #[test]
    fn test_projects_required_columns_in_order() {
        let out = require_columns(&sample(), &["thru", "symbol"], Selection::Required).unwrap();
        let names: Vec<&str> = out.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["thru", "symbol"]);
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn test_keeps_all_columns() {
        let out = require_columns(&sample(), &["symbol"], Selection::All).unwrap();
        assert_eq!(out.width(), 4);
    }

    #[test]
    fn test_reports_first_missing_column() {
        let err = require_columns(&sample(), &["symbol", "date", "permno"], Selection::All)
            .unwrap_err();
        match err {
            PadronError::MissingColumn(name) => assert_eq!(name, "date"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_input_is_not_modified() {
        let input = sample();
        let _ = require_columns(&input, &["symbol"], Selection::Required).unwrap();
        assert_eq!(input.width(), 4);
    }

    #[test]
    fn test_payload_columns() {
        assert_eq!(
            payload_columns(&sample(), &["symbol", "from", "thru"]),
            vec!["sector".to_string()]
        );
    }
}
