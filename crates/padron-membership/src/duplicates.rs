//! Duplicate key detection and policy enforcement.
//!
//! A row is a duplicate when an earlier row carries the same composite key.
//! The first occurrence of every key is never counted.

use padron_traits::{PadronError, Result, error::rounded_fraction};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// What to do when duplicate keys are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail with [`PadronError::DuplicateKeys`].
    Fail,
    /// Log a warning and return the table unchanged.
    Warn,
    /// Log a warning and keep only the first row per key.
    WarnAndDrop,
}

/// Duplicate counts for one table and key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DuplicateReport {
    /// Rows whose key repeats an earlier row.
    pub duplicates: usize,
    /// Rows checked.
    pub total: usize,
}

impl DuplicateReport {
    /// Share of duplicate rows, rounded to three decimals.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        rounded_fraction(self.duplicates, self.total)
    }

    /// Whether any duplicates were found.
    #[must_use]
    pub const fn has_duplicates(&self) -> bool {
        self.duplicates > 0
    }
}

/// First occurrence of every key in `subset`, in the original row order.
fn first_occurrences(frame: &DataFrame, subset: &[&str]) -> Result<DataFrame> {
    Ok(frame
        .clone()
        .lazy()
        .unique_stable(
            Some(subset.iter().map(|name| (*name).into()).collect()),
            UniqueKeepStrategy::First,
        )
        .collect()?)
}

/// Counts duplicate keys in `frame` over the columns in `subset`.
pub fn find_duplicates(frame: &DataFrame, subset: &[&str]) -> Result<DuplicateReport> {
    let distinct = first_occurrences(frame, subset)?.height();
    Ok(DuplicateReport {
        duplicates: frame.height() - distinct,
        total: frame.height(),
    })
}

/// Applies `policy` to duplicate keys of `frame` over `subset`.
///
/// `name` identifies the table in warnings and errors. When there are no
/// duplicates the frame is returned as is, whatever the policy.
///
/// # Errors
///
/// [`PadronError::DuplicateKeys`] under [`DuplicatePolicy::Fail`], or
/// [`PadronError::MissingColumn`] if a key column does not exist.
pub fn enforce_unique(
    frame: DataFrame,
    subset: &[&str],
    policy: DuplicatePolicy,
    name: &str,
) -> Result<DataFrame> {
    if let Some(missing) = subset
        .iter()
        .find(|column| frame.get_column_index(column).is_none())
    {
        return Err(PadronError::MissingColumn((*missing).to_string()));
    }

    let deduplicated = first_occurrences(&frame, subset)?;
    let report = DuplicateReport {
        duplicates: frame.height() - deduplicated.height(),
        total: frame.height(),
    };
    if !report.has_duplicates() {
        return Ok(frame);
    }

    match policy {
        DuplicatePolicy::Fail => Err(PadronError::duplicate_keys(
            name,
            report.duplicates,
            report.total,
        )),
        DuplicatePolicy::Warn => {
            warn_duplicates(name, subset, &report);
            Ok(frame)
        }
        DuplicatePolicy::WarnAndDrop => {
            warn_duplicates(name, subset, &report);
            Ok(deduplicated)
        }
    }
}

fn warn_duplicates(name: &str, subset: &[&str], report: &DuplicateReport) {
    tracing::warn!(
        table = name,
        key = ?subset,
        duplicates = report.duplicates,
        total = report.total,
        fraction = report.fraction(),
        "{name} is {} duplicates, {} of {} rows",
        report.fraction(),
        report.duplicates,
        report.total,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn prices() -> DataFrame {
        df! {
            "date" => &["2024-01-02", "2024-01-02", "2024-01-03", "2024-01-02"],
            "symbol" => &["AAA", "BBB", "AAA", "AAA"],
            "close" => &[10.0, 20.0, 11.0, 99.0],
        }
        .unwrap()
    }

    #[test]
    fn test_report_counts_later_occurrences_only() {
        let report = find_duplicates(&prices(), &["date", "symbol"]).unwrap();
        assert_eq!(report, DuplicateReport { duplicates: 1, total: 4 });
        assert!((report.fraction() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_fail_reports_count_and_fraction() {
        let err = enforce_unique(prices(), &["date", "symbol"], DuplicatePolicy::Fail, "Data")
            .unwrap_err();
        match err {
            PadronError::DuplicateKeys {
                duplicates,
                total,
                fraction,
                ..
            } => {
                assert_eq!((duplicates, total), (1, 4));
                assert!((fraction - 0.25).abs() < 1e-12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_warn_keeps_rows() {
        let out = enforce_unique(prices(), &["date", "symbol"], DuplicatePolicy::Warn, "Data")
            .unwrap();
        assert_eq!(out.height(), 4);
    }

    #[test]
    fn test_warn_and_drop_keeps_first_occurrence_in_order() {
        let out = enforce_unique(
            prices(),
            &["date", "symbol"],
            DuplicatePolicy::WarnAndDrop,
            "Data",
        )
        .unwrap();
        assert_eq!(out.height(), 3);
        let close: Vec<f64> = out
            .column("close")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(close, vec![10.0, 20.0, 11.0]);
    }

    #[rstest]
    #[case(DuplicatePolicy::Fail)]
    #[case(DuplicatePolicy::Warn)]
    #[case(DuplicatePolicy::WarnAndDrop)]
    fn test_unique_input_is_identity(#[case] policy: DuplicatePolicy) {
        let frame = prices().slice(0, 3);
        let out = enforce_unique(frame.clone(), &["date", "symbol"], policy, "Data").unwrap();
        assert!(out.equals(&frame));
    }

    #[test]
    fn test_single_column_key() {
        let frame = df! {
            "symbol" => &["AAA", "BBB", "AAA"],
            "from" => &["2012-01-01", "2014-01-01", "2016-01-01"],
        }
        .unwrap();
        assert!(enforce_unique(frame.clone(), &["symbol"], DuplicatePolicy::Fail, "Symbols").is_err());
        assert!(enforce_unique(frame, &["symbol", "from"], DuplicatePolicy::Fail, "Symbols").is_ok());
    }

    #[test]
    fn test_missing_key_column() {
        assert!(matches!(
            enforce_unique(prices(), &["permno"], DuplicatePolicy::Warn, "Data"),
            Err(PadronError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_empty_frame() {
        let frame = prices().slice(0, 0);
        let report = find_duplicates(&frame, &["date", "symbol"]).unwrap();
        assert_eq!(report.total, 0);
        assert_eq!(report.fraction(), 0.0);
    }
}
