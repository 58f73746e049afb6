//! Error types for padron.
//!
//! Every failure in padron reflects caller misuse or malformed input, so none
//! of these variants are retryable. The only soft-failure path (duplicate
//! warnings) is logged rather than returned.

use thiserror::Error;

/// The main error type for padron operations.
#[derive(Debug, Error)]
pub enum PadronError {
    /// A required column is absent from the input table.
    #[error("Required column \"{0}\" is not present")]
    MissingColumn(String),

    /// Duplicate keys were found under a policy that does not tolerate them.
    #[error("{name} is {fraction} duplicates, {duplicates} of {total} rows")]
    DuplicateKeys {
        /// Human readable name of the checked table.
        name: String,
        /// Number of rows whose key repeats an earlier row.
        duplicates: usize,
        /// Total number of rows checked.
        total: usize,
        /// `duplicates / total`, rounded to three decimals.
        fraction: f64,
    },

    /// Unrecognised or inconsistent configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A date is missing, malformed or cannot be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A membership interval ends before it starts.
    #[error("Invalid membership interval for {asset}: from {from} is after thru {thru}")]
    InvalidInterval {
        /// Asset identifier of the offending interval.
        asset: String,
        /// Interval start.
        from: chrono::NaiveDate,
        /// Interval end.
        thru: chrono::NaiveDate,
    },

    /// An operation that needs built grids was called before `add_index_info`.
    #[error("Index constitutes are not set: call add_index_info first")]
    GridsNotSet,

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl PadronError {
    /// Builds a [`PadronError::DuplicateKeys`] from raw counts.
    pub fn duplicate_keys(name: impl Into<String>, duplicates: usize, total: usize) -> Self {
        Self::DuplicateKeys {
            name: name.into(),
            duplicates,
            total,
            fraction: rounded_fraction(duplicates, total),
        }
    }
}

/// `part / total` rounded to three decimals, `0.0` for an empty total.
pub fn rounded_fraction(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 1000.0
}

/// A specialized Result type for padron operations.
pub type Result<T> = std::result::Result<T, PadronError>;
