#![doc(issue_tracker_base_url = "https://github.com/factordynamics/padron/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type and trait definitions for padron.
//!
//! This crate provides the vocabulary shared by the calendar sources and the
//! membership engine: the error type, raw membership intervals, calendar
//! bounds, and the [`TradingCalendar`] seam.

/// The version of the padron-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod calendar;
pub mod error;
pub mod types;

// Re-exports
pub use calendar::TradingCalendar;
pub use error::{PadronError, Result};
pub use types::{AssetId, CalendarRange, Date, MembershipInterval, epoch_days};
