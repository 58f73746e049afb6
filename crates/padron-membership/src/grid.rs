//! Membership grid construction.
//!
//! Two canonical `(date, asset)` key spaces are derived from the same
//! membership intervals:
//!
//! - the **factor grid** holds every session in `[from, thru]`, the days an
//!   asset may carry signal values;
//! - the **pricing grid** holds every session in `[from, calendar end]`.
//!   Exit from the universe does not end it, so the return earned after the
//!   last membership day can still be computed.
//!
//! Both grids are sets: overlapping intervals of one asset collapse to a
//! single key. Keys are ordered by date, then asset.

use crate::{
    columns::{DATE_COLUMN, FROM_COLUMN, THRU_COLUMN},
    dates::{DateMode, DateNormalizer},
};
use padron_traits::{
    AssetId, CalendarRange, Date, MembershipInterval, PadronError, Result, TradingCalendar,
    epoch_days,
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeSet, fmt, str::FromStr};

/// Which grid a dataset is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contents {
    /// Signal or factor values, bounded by membership end.
    #[default]
    Factor,
    /// Prices, kept from membership start to the calendar end.
    Pricing,
}

impl Contents {
    /// The name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Factor => "factor",
            Self::Pricing => "pricing",
        }
    }
}

impl fmt::Display for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Contents {
    type Err = PadronError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "factor" => Ok(Self::Factor),
            "pricing" => Ok(Self::Pricing),
            _ => Err(PadronError::InvalidConfig(format!(
                "Representation {s} is not recognised. Valid arguments are \"pricing\", \"factor\""
            ))),
        }
    }
}

/// Ordered, duplicate-free grid keys before they become frames.
///
/// Asset ids are borrowed from the intervals they were expanded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridKeys<'i> {
    /// Sessions in `[from, thru]` per asset.
    pub factor: Vec<(Date, &'i str)>,
    /// Sessions in `[from, calendar end]` per asset.
    pub pricing: Vec<(Date, &'i str)>,
}

/// Expands membership intervals against a trading calendar.
pub struct GridBuilder<'a> {
    calendar: &'a dyn TradingCalendar,
}

impl fmt::Debug for GridBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridBuilder")
            .field("calendar", &self.calendar.name())
            .finish()
    }
}

impl<'a> GridBuilder<'a> {
    /// Create a builder drawing sessions from `calendar`.
    pub const fn new(calendar: &'a dyn TradingCalendar) -> Self {
        Self { calendar }
    }

    /// Computes the factor and pricing keys for `intervals` over `range`.
    ///
    /// The calendar is queried once. Intervals lying outside the range
    /// contribute nothing, and a one-day interval contributes its day only if
    /// it is a session. Open-ended intervals run to the end of the range.
    pub fn expand<'i>(
        &self,
        intervals: &'i [MembershipInterval],
        range: CalendarRange,
    ) -> Result<GridKeys<'i>> {
        let sessions = self.calendar.valid_days(range.start(), range.end())?;

        let mut factor = Vec::new();
        let mut pricing = Vec::new();

        for interval in intervals {
            let first = sessions.partition_point(|day| *day < interval.from());
            let last = sessions
                .partition_point(|day| *day <= interval.thru_or(range.end()))
                .max(first);
            let asset = interval.asset();

            factor.extend(sessions[first..last].iter().map(|day| (*day, asset)));
            pricing.extend(sessions[first..].iter().map(|day| (*day, asset)));
        }

        for keys in [&mut factor, &mut pricing] {
            keys.sort_unstable();
            keys.dedup();
        }

        tracing::debug!(
            calendar = self.calendar.name(),
            sessions = sessions.len(),
            intervals = intervals.len(),
            factor_keys = factor.len(),
            pricing_keys = pricing.len(),
            "expanded membership intervals"
        );

        Ok(GridKeys { factor, pricing })
    }

    /// Expands `intervals` and renders both grids as frames.
    pub fn build(
        &self,
        intervals: &[MembershipInterval],
        range: CalendarRange,
        id_column: &str,
        mode: DateMode,
    ) -> Result<MembershipGrids> {
        let GridKeys { factor, pricing } = self.expand(intervals, range)?;
        Ok(MembershipGrids {
            factor: MembershipGrid::from_keys(factor, id_column, mode)?,
            pricing: MembershipGrid::from_keys(pricing, id_column, mode)?,
        })
    }
}

/// An immutable, ordered set of `(date, asset)` keys held as a two-column frame.
///
/// The frame's columns are `date` (in the grid's [`DateMode`]) and the
/// configured asset id column (strings).
#[derive(Debug, Clone)]
pub struct MembershipGrid {
    frame: DataFrame,
    id_column: String,
    date_mode: DateMode,
}

impl MembershipGrid {
    /// Builds a grid from keys already sorted and deduplicated.
    pub fn from_keys<S: AsRef<str>>(
        keys: Vec<(Date, S)>,
        id_column: &str,
        mode: DateMode,
    ) -> Result<Self> {
        let (dates, owners): (Vec<Date>, Vec<S>) = keys.into_iter().unzip();
        let assets: Vec<&str> = owners.iter().map(AsRef::as_ref).collect();
        let frame = DataFrame::new(vec![
            Column::new(DATE_COLUMN.into(), dates),
            Column::new(id_column.into(), assets),
        ])?;
        Ok(Self {
            frame: DateNormalizer::new(mode).normalize(frame, DATE_COLUMN)?,
            id_column: id_column.to_string(),
            date_mode: mode,
        })
    }

    /// The keys as a frame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Consumes the grid, returning its frame.
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Name of the asset id column.
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Representation of the `date` column.
    pub const fn date_mode(&self) -> DateMode {
        self.date_mode
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the grid holds no keys.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// The same keys with dates in another representation.
    pub fn with_date_mode(&self, mode: DateMode) -> Result<Self> {
        Ok(Self {
            frame: DateNormalizer::new(mode).normalize(self.frame.clone(), DATE_COLUMN)?,
            id_column: self.id_column.clone(),
            date_mode: mode,
        })
    }

    /// Every key in grid order.
    pub fn pairs(&self) -> Result<Vec<(Date, AssetId)>> {
        let dates = self.frame.column(DATE_COLUMN)?.cast(&DataType::Date)?;
        let dates = dates.as_materialized_series().date()?;
        let assets = self
            .frame
            .column(&self.id_column)?
            .as_materialized_series()
            .str()?;

        dates
            .as_date_iter()
            .zip(assets)
            .map(|key| match key {
                (Some(date), Some(asset)) => Ok((date, asset.to_string())),
                _ => Err(PadronError::InvalidDate("grid holds a null key".to_string())),
            })
            .collect()
    }

    /// Distinct assets present in the grid, sorted.
    pub fn assets(&self) -> Result<Vec<AssetId>> {
        let assets = self
            .frame
            .column(&self.id_column)?
            .as_materialized_series()
            .str()?;
        let distinct: BTreeSet<&str> = assets.into_iter().flatten().collect();
        Ok(distinct.into_iter().map(str::to_string).collect())
    }

    /// Whether `(date, asset)` is a key of the grid.
    ///
    /// Binary search over the frame's rows, which are ordered by date then
    /// asset.
    pub fn contains(&self, date: Date, asset: &str) -> Result<bool> {
        let days = self
            .frame
            .column(DATE_COLUMN)?
            .cast(&DataType::Date)?
            .cast(&DataType::Int32)?;
        let days = days.as_materialized_series().i32()?;
        let assets = self
            .frame
            .column(&self.id_column)?
            .as_materialized_series()
            .str()?;
        let target = (Some(epoch_days(date)), Some(asset));

        let (mut lo, mut hi) = (0, self.frame.height());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match (days.get(mid), assets.get(mid)).cmp(&target) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Ok(true),
            }
        }
        Ok(false)
    }
}

/// The factor and pricing grids of one build.
#[derive(Debug, Clone)]
pub struct MembershipGrids {
    /// Keys bounded by membership end.
    pub factor: MembershipGrid,
    /// Keys bounded by the calendar end.
    pub pricing: MembershipGrid,
}

impl MembershipGrids {
    /// The grid matching `contents`.
    pub const fn get(&self, contents: Contents) -> &MembershipGrid {
        match contents {
            Contents::Factor => &self.factor,
            Contents::Pricing => &self.pricing,
        }
    }
}

/// Reads typed intervals from a validated frame.
///
/// `id_column` must be a string column and `from`/`thru` date columns. A null
/// `thru` marks an asset that is still a member.
///
/// # Errors
///
/// A null id or `from`, or any interval with `from > thru`.
pub fn intervals_from_frame(frame: &DataFrame, id_column: &str) -> Result<Vec<MembershipInterval>> {
    let ids = frame.column(id_column)?.as_materialized_series().str()?;
    let from = frame.column(FROM_COLUMN)?.as_materialized_series().date()?;
    let thru = frame.column(THRU_COLUMN)?.as_materialized_series().date()?;

    ids.into_iter()
        .zip(from.as_date_iter())
        .zip(thru.as_date_iter())
        .enumerate()
        .map(|(row, ((id, from), thru))| {
            let id = id.ok_or_else(|| {
                PadronError::InvalidConfig(format!("row {row} has no value in \"{id_column}\""))
            })?;
            let from = from.ok_or_else(|| {
                PadronError::InvalidDate(format!("row {row} ({id}) has no \"{FROM_COLUMN}\" date"))
            })?;
            MembershipInterval::new(id, from, thru)
        })
        .collect()
}
