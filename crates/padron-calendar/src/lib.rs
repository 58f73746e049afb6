//! Trading calendar sources for padron.
//!
//! This crate provides concrete [`TradingCalendar`] implementations:
//! - [`NyseCalendar`]: weekdays minus NYSE holidays and unscheduled closures
//! - [`WeekdayCalendar`]: every Monday to Friday
//! - [`FixedCalendar`]: an explicit list of sessions
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use padron_calendar::CalendarKind;
//!
//! let calendar = "nyse".parse::<CalendarKind>().unwrap().build();
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! // New Year's Day is closed
//! assert_eq!(calendar.valid_days(start, end).unwrap().len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod fixed;
mod nyse;
mod weekday;

use padron_traits::{PadronError, TradingCalendar};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// Re-export calendar types
pub use fixed::FixedCalendar;
pub use nyse::NyseCalendar;
pub use weekday::WeekdayCalendar;

/// The built-in calendars selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    /// New York Stock Exchange
    #[default]
    Nyse,
    /// Monday to Friday, no holidays
    Weekday,
}

impl CalendarKind {
    /// Instantiate the calendar.
    #[must_use]
    pub fn build(self) -> Box<dyn TradingCalendar> {
        match self {
            Self::Nyse => Box::new(NyseCalendar::new()),
            Self::Weekday => Box::new(WeekdayCalendar::new()),
        }
    }

    /// All selectable calendars.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Nyse, Self::Weekday]
    }

    /// The name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nyse => "nyse",
            Self::Weekday => "weekday",
        }
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarKind {
    type Err = PadronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nyse" | "xnys" => Ok(Self::Nyse),
            "weekday" | "weekdays" => Ok(Self::Weekday),
            _ => Err(PadronError::InvalidConfig(format!(
                "Calendar '{s}' is not recognised. Valid calendars are \"nyse\", \"weekday\""
            ))),
        }
    }
}
