//! Trading calendar trait.
//!
//! A calendar is the authoritative, ordered, duplicate-free set of sessions
//! for a market. Grid construction only ever asks one question of it: which
//! days between two bounds are trading days.

use crate::{Date, Result};

/// A source of valid trading dates.
///
/// Implementations must be deterministic: two calls with the same bounds
/// return the same sessions. Implementations should be thread-safe
/// (`Send + Sync`) so independent grid builds can share one calendar.
///
/// # Example
///
/// ```no_run
/// use padron_traits::{Date, Result, TradingCalendar};
///
/// struct EveryDay;
///
/// impl TradingCalendar for EveryDay {
///     fn name(&self) -> &str {
///         "every_day"
///     }
///
///     fn is_session(&self, _date: Date) -> bool {
///         true
///     }
/// }
/// ```
pub trait TradingCalendar: Send + Sync {
    /// Returns the name of this calendar, used in logs.
    fn name(&self) -> &str;

    /// Whether `date` is a trading session.
    fn is_session(&self, date: Date) -> bool;

    /// Returns the ordered sessions in `[start, end]`, inclusive on both ends.
    ///
    /// # Errors
    ///
    /// The default implementation fails with
    /// [`PadronError::InvalidDate`](crate::PadronError::InvalidDate) when
    /// `start > end`.
    fn valid_days(&self, start: Date, end: Date) -> Result<Vec<Date>> {
        if start > end {
            return Err(crate::PadronError::InvalidDate(format!(
                "calendar start {start} is after end {end}"
            )));
        }
        Ok(start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| self.is_session(*day))
            .collect())
    }
}

impl<T: TradingCalendar + ?Sized> TradingCalendar for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_session(&self, date: Date) -> bool {
        (**self).is_session(date)
    }

    fn valid_days(&self, start: Date, end: Date) -> Result<Vec<Date>> {
        (**self).valid_days(start, end)
    }
}

impl<T: TradingCalendar + ?Sized> TradingCalendar for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_session(&self, date: Date) -> bool {
        (**self).is_session(date)
    }

    fn valid_days(&self, start: Date, end: Date) -> Result<Vec<Date>> {
        (**self).valid_days(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    struct Weekends;

    impl TradingCalendar for Weekends {
        fn name(&self) -> &str {
            "weekends"
        }

        fn is_session(&self, date: Date) -> bool {
            matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
        }
    }

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_default_valid_days_is_inclusive() {
        // 2024-01-06 is a Saturday, 2024-01-14 a Sunday
        let days = Weekends.valid_days(d(2024, 1, 6), d(2024, 1, 14)).unwrap();
        assert_eq!(
            days,
            vec![d(2024, 1, 6), d(2024, 1, 7), d(2024, 1, 13), d(2024, 1, 14)]
        );
    }

    #[test]
    fn test_default_valid_days_rejects_inverted_range() {
        assert!(Weekends.valid_days(d(2024, 1, 7), d(2024, 1, 6)).is_err());
    }

    #[test]
    fn test_boxed_calendar_delegates() {
        let boxed: Box<dyn TradingCalendar> = Box::new(Weekends);
        assert_eq!(boxed.name(), "weekends");
        assert!(boxed.is_session(d(2024, 1, 6)));
    }

    #[test]
    fn test_calendar_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn TradingCalendar>>();
    }
}
