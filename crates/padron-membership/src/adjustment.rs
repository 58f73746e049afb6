//! The [`ConstituteAdjustment`] facade.

use crate::{
    columns::{FROM_COLUMN, Selection, THRU_COLUMN, require_columns},
    config::{AdjustmentConfig, IntervalKey},
    dates::to_calendar_dates,
    duplicates::{DuplicatePolicy, enforce_unique},
    grid::{Contents, GridBuilder, MembershipGrid, MembershipGrids, intervals_from_frame},
    reindex::{ReindexedTable, reindex},
};
use padron_calendar::NyseCalendar;
use padron_traits::{CalendarRange, Date, PadronError, Result, TradingCalendar};
use polars::prelude::*;
use std::fmt;

#[derive(Debug, Clone)]
enum GridState {
    Unbuilt,
    Built {
        grids: MembershipGrids,
        range: CalendarRange,
    },
}

/// Builds membership grids from index constituents and aligns data to them.
///
/// The facade starts unbuilt. [`add_index_info`](Self::add_index_info)
/// builds both grids; calling it again replaces them. A failed build leaves
/// the previous grids in place.
///
/// # Example
///
/// ```rust,ignore
/// use padron_membership::{AdjustmentConfig, ConstituteAdjustment, Contents};
///
/// let mut adjustment = ConstituteAdjustment::new(AdjustmentConfig::default())?;
/// adjustment.add_index_info(&constituents, Some(start), Some(end), Some("%Y-%m-%d"))?;
/// let prices = adjustment.adjust_data_for_membership(&prices, Contents::Pricing, None)?;
/// ```
pub struct ConstituteAdjustment {
    config: AdjustmentConfig,
    calendar: Box<dyn TradingCalendar>,
    state: GridState,
}

impl fmt::Debug for ConstituteAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstituteAdjustment")
            .field("config", &self.config)
            .field("calendar", &self.calendar.name())
            .field("state", &self.state)
            .finish()
    }
}

impl ConstituteAdjustment {
    /// Create an unbuilt facade on the NYSE calendar.
    pub fn new(config: AdjustmentConfig) -> Result<Self> {
        Self::with_calendar(config, NyseCalendar::new())
    }

    /// Create an unbuilt facade drawing sessions from `calendar`.
    pub fn with_calendar(
        config: AdjustmentConfig,
        calendar: impl TradingCalendar + 'static,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            calendar: Box::new(calendar),
            state: GridState::Unbuilt,
        })
    }

    /// Builds the factor and pricing grids from constituent intervals.
    ///
    /// `intervals` must hold the id column plus `from` and `thru`; other
    /// columns are ignored. Text dates are parsed with `date_format`. A null
    /// `thru` keeps the asset in the universe until `end`.
    ///
    /// # Errors
    ///
    /// - [`PadronError::InvalidDate`] if `start` or `end` is missing, or a
    ///   date cannot be read
    /// - [`PadronError::MissingColumn`] if a required column is absent
    /// - [`PadronError::DuplicateKeys`] if an interval key repeats
    /// - [`PadronError::InvalidInterval`] if `from > thru`
    pub fn add_index_info(
        &mut self,
        intervals: &DataFrame,
        start: Option<Date>,
        end: Option<Date>,
        date_format: Option<&str>,
    ) -> Result<()> {
        let range = CalendarRange::new(start, end)?;
        let id_column = self.config.id_column.as_str();

        let frame = require_columns(
            intervals,
            &[id_column, FROM_COLUMN, THRU_COLUMN],
            Selection::Required,
        )?
        .lazy()
        .with_column(col(id_column).cast(DataType::String))
        .collect()?;

        // Keys without dates are checked on the raw table, before parsing
        let subset = self.config.interval_subset();
        let check = |frame| enforce_unique(frame, &subset, DuplicatePolicy::Fail, "Index info");
        let frame = match self.config.interval_key {
            IntervalKey::Asset => check(frame)?,
            IntervalKey::AssetSpan => frame,
        };
        let frame = to_calendar_dates(frame, FROM_COLUMN, date_format)?;
        let frame = to_calendar_dates(frame, THRU_COLUMN, date_format)?;
        let frame = match self.config.interval_key {
            IntervalKey::Asset => frame,
            IntervalKey::AssetSpan => check(frame)?,
        };

        let intervals = intervals_from_frame(&frame, id_column)?;
        let grids = GridBuilder::new(self.calendar.as_ref()).build(
            &intervals,
            range,
            id_column,
            self.config.date_mode,
        )?;

        tracing::info!(
            calendar = self.calendar.name(),
            start = %range.start(),
            end = %range.end(),
            intervals = intervals.len(),
            factor = grids.factor.len(),
            pricing = grids.pricing.len(),
            "built membership grids"
        );

        self.state = GridState::Built { grids, range };
        Ok(())
    }

    /// Aligns `data` to the grid selected by `contents`.
    ///
    /// `data` must hold `date` and the id column. The result has one row per
    /// grid key with the payload of `data` joined in; keys without data carry
    /// nulls. Duplicate `(date, id)` rows are dropped after a warning.
    ///
    /// # Errors
    ///
    /// [`PadronError::GridsNotSet`] before a successful build, or any error
    /// from reading `data`.
    pub fn adjust_data_for_membership(
        &self,
        data: &DataFrame,
        contents: Contents,
        date_format: Option<&str>,
    ) -> Result<ReindexedTable> {
        let GridState::Built { grids, .. } = &self.state else {
            return Err(PadronError::GridsNotSet);
        };
        reindex(grids.get(contents), data, date_format)
    }

    /// The factor grid, if built.
    pub const fn factor_components(&self) -> Option<&MembershipGrid> {
        match &self.state {
            GridState::Built { grids, .. } => Some(&grids.factor),
            GridState::Unbuilt => None,
        }
    }

    /// The pricing grid, if built.
    pub const fn pricing_components(&self) -> Option<&MembershipGrid> {
        match &self.state {
            GridState::Built { grids, .. } => Some(&grids.pricing),
            GridState::Unbuilt => None,
        }
    }

    /// Calendar bounds of the last successful build.
    pub const fn calendar_range(&self) -> Option<CalendarRange> {
        match &self.state {
            GridState::Built { range, .. } => Some(*range),
            GridState::Unbuilt => None,
        }
    }

    /// Whether grids have been built.
    pub const fn is_built(&self) -> bool {
        matches!(self.state, GridState::Built { .. })
    }

    /// The configuration in use.
    pub const fn config(&self) -> &AdjustmentConfig {
        &self.config
    }

    /// The calendar sessions are drawn from.
    pub fn calendar(&self) -> &dyn TradingCalendar {
        self.calendar.as_ref()
    }
}
