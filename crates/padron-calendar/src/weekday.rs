//! Monday to Friday calendar with no holidays.

use padron_traits::{Date, TradingCalendar};

/// Every weekday is a session.
///
/// Useful for synthetic data and for markets whose holidays are handled
/// upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdayCalendar;

impl WeekdayCalendar {
    /// Create the calendar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TradingCalendar for WeekdayCalendar {
    fn name(&self) -> &str {
        "weekday"
    }

    fn is_session(&self, date: Date) -> bool {
        crate::nyse::is_weekday(date)
    }
}
