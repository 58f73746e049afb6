//! Common types used throughout padron.
//!
//! This module defines the raw membership record, the calendar range a grid is
//! built over, and the day count polars stores for a chrono date.

use crate::{PadronError, Result};
use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// An asset identifier (ticker, PERMNO rendered as text, ...).
pub type AssetId = String;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts a date to the days-since-epoch value polars stores.
pub fn epoch_days(date: Date) -> i32 {
    use chrono::Datelike;
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// A single contiguous span during which one asset belonged to the universe.
///
/// `thru` is `None` while the asset is still a member; the span then runs to
/// the end of whatever calendar it is expanded against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MembershipInterval {
    asset: AssetId,
    from: Date,
    thru: Option<Date>,
}

impl MembershipInterval {
    /// Creates an interval, rejecting `from > thru`.
    pub fn new(asset: impl Into<AssetId>, from: Date, thru: Option<Date>) -> Result<Self> {
        let asset = asset.into();
        if let Some(thru) = thru
            && from > thru
        {
            return Err(PadronError::InvalidInterval { asset, from, thru });
        }
        Ok(Self { asset, from, thru })
    }

    /// Creates a closed interval `[from, thru]`.
    pub fn closed(asset: impl Into<AssetId>, from: Date, thru: Date) -> Result<Self> {
        Self::new(asset, from, Some(thru))
    }

    /// Creates an interval with no recorded exit.
    pub fn open(asset: impl Into<AssetId>, from: Date) -> Self {
        Self {
            asset: asset.into(),
            from,
            thru: None,
        }
    }

    /// The asset this interval belongs to.
    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// First day of membership.
    pub const fn from(&self) -> Date {
        self.from
    }

    /// Last day of membership, `None` if the asset is still a member.
    pub const fn thru(&self) -> Option<Date> {
        self.thru
    }

    /// Last day of membership, bounded by `horizon` when open-ended.
    pub fn thru_or(&self, horizon: Date) -> Date {
        self.thru.unwrap_or(horizon)
    }
}

/// Inclusive calendar bounds a grid is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarRange {
    start: Date,
    end: Date,
}

impl CalendarRange {
    /// Validates the bounds: both must be present and `start <= end`.
    pub fn new(start: Option<Date>, end: Option<Date>) -> Result<Self> {
        let start =
            start.ok_or_else(|| PadronError::InvalidDate("start_date is required".to_string()))?;
        let end = end.ok_or_else(|| PadronError::InvalidDate("end_date is required".to_string()))?;
        Self::between(start, end)
    }

    /// Creates a range from two present dates.
    pub fn between(start: Date, end: Date) -> Result<Self> {
        if start > end {
            return Err(PadronError::InvalidDate(format!(
                "start_date {start} is after end_date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First calendar day.
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last calendar day.
    pub const fn end(&self) -> Date {
        self.end
    }
}
