//! Survivorship-safe membership grids for padron.
//!
//! Given index constituents as `(asset, from, thru)` intervals and a trading
//! calendar, [`ConstituteAdjustment`] builds two key spaces:
//!
//! - the factor grid, every session during which an asset was a member
//! - the pricing grid, every session from an asset's entry to the calendar end
//!
//! Arbitrary `(date, asset)` keyed frames are then left-joined onto either
//! grid so that downstream computations see exactly the historical universe.
//!
//! # Example
//!
//! ```rust,ignore
//! use padron_calendar::WeekdayCalendar;
//! use padron_membership::{AdjustmentConfig, ConstituteAdjustment, Contents};
//!
//! let mut adjustment =
//!     ConstituteAdjustment::with_calendar(AdjustmentConfig::default(), WeekdayCalendar::new())?;
//! adjustment.add_index_info(&constituents, Some(start), Some(end), Some("%Y-%m-%d"))?;
//! let factors = adjustment.adjust_data_for_membership(&signals, Contents::Factor, None)?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod adjustment;
pub mod columns;
pub mod config;
pub mod dates;
pub mod duplicates;
pub mod grid;
pub mod reindex;

// Re-export main types
pub use adjustment::ConstituteAdjustment;
pub use columns::{DATE_COLUMN, FROM_COLUMN, Selection, THRU_COLUMN, require_columns};
pub use config::{AdjustmentConfig, IntervalKey};
pub use dates::{DateMode, DateNormalizer, TIME_ZONE, to_calendar_dates};
pub use duplicates::{DuplicatePolicy, DuplicateReport, enforce_unique, find_duplicates};
pub use grid::{
    Contents, GridBuilder, GridKeys, MembershipGrid, MembershipGrids, intervals_from_frame,
};
pub use reindex::{ReindexedTable, reindex};
