#![doc(issue_tracker_base_url = "https://github.com/factordynamics/padron/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # padron
//!
//! Survivorship-safe index membership for equity research.
//!
//! padron is an umbrella crate that re-exports all padron sub-crates for
//! convenience. It turns a table of index constituents into the exact
//! `(date, asset)` universe that existed on every trading day, and aligns
//! price and factor data to that universe.
//!
//! ## Quick Start
//!
//! ```ignore
//! use padron::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut adjustment = ConstituteAdjustment::new(AdjustmentConfig::default())?;
//! adjustment.add_index_info(&constituents, Some(start), Some(end), Some("%Y-%m-%d"))?;
//!
//! // Prices keep every session after entry so exit returns can be computed
//! let prices = adjustment.adjust_data_for_membership(&prices, Contents::Pricing, None)?;
//! // Factors only exist while the asset is a member
//! let signals = adjustment.adjust_data_for_membership(&signals, Contents::Factor, None)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Shared types and the [`TradingCalendar`] seam
//! - [`calendar`] - NYSE, weekday and fixed calendars
//! - [`membership`] - Grid construction, reindexing and the facade
//!
//! ## Architecture
//!
//! 1. **Intervals** are validated and checked for duplicate assets
//! 2. **Calendars** supply the trading sessions between two dates
//! 3. **Grids** expand intervals into factor and pricing key spaces
//! 4. **Reindexing** left-joins any keyed frame onto a grid

/// Version information for the padron crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core type and trait definitions.
///
/// - [`TradingCalendar`] - Source of trading sessions
/// - [`MembershipInterval`] - One span of index membership
/// - [`CalendarRange`] - Inclusive bounds of a grid build
pub mod traits {
    pub use padron_traits::*;
}

pub use padron_traits::{
    AssetId, CalendarRange, Date, MembershipInterval, PadronError, Result, TradingCalendar,
};

// ============================================================================
// Calendars
// ============================================================================

/// Trading calendars.
///
/// ## Available Calendars
///
/// - **NyseCalendar**: weekdays minus NYSE holidays and special closures
/// - **WeekdayCalendar**: every Monday to Friday
/// - **FixedCalendar**: an explicit session list
///
/// # Example
///
/// ```ignore
/// use padron::calendar::CalendarKind;
///
/// let calendar = "nyse".parse::<CalendarKind>()?.build();
/// let sessions = calendar.valid_days(start, end)?;
/// ```
pub mod calendar {
    pub use padron_calendar::*;
}

pub use padron_calendar::{CalendarKind, FixedCalendar, NyseCalendar, WeekdayCalendar};

// ============================================================================
// Membership
// ============================================================================

/// Membership grids and data alignment.
///
/// ## Grids
///
/// The **factor grid** holds every session in `[from, thru]` per asset. The
/// **pricing grid** holds every session from `from` to the calendar end, so
/// that the return realised after an asset leaves the index is still
/// available.
///
/// ## Dates
///
/// Output dates are either UTC midnight timestamps or plain days, fixed per
/// [`ConstituteAdjustment`] by [`DateMode`].
pub mod membership {
    pub use padron_membership::*;
}

pub use padron_membership::{
    AdjustmentConfig, ConstituteAdjustment, Contents, DateMode, IntervalKey, MembershipGrid,
    ReindexedTable,
};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use padron::prelude::*;
/// ```
///
/// This brings into scope the facade, its configuration, the grid and result
/// types, the calendars and the error types.
pub mod prelude {
    pub use crate::{
        AdjustmentConfig, CalendarKind, ConstituteAdjustment, Contents, Date, DateMode,
        FixedCalendar, IntervalKey, MembershipGrid, MembershipInterval, NyseCalendar,
        PadronError, ReindexedTable, Result, TradingCalendar, WeekdayCalendar,
    };
}

// ============================================================================
// Tests
// ============================================================================
