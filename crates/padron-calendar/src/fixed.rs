//! Calendar backed by an explicit list of sessions.

use padron_traits::{Date, PadronError, Result, TradingCalendar};
use std::collections::BTreeSet;

/// A calendar whose sessions are exactly the dates it was given.
///
/// Input order and duplicates do not matter; sessions are kept sorted and
/// unique. Days outside the list are never sessions.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use padron_calendar::FixedCalendar;
/// use padron_traits::TradingCalendar;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let calendar = FixedCalendar::new([d(3), d(2), d(3)]);
/// assert_eq!(calendar.valid_days(d(1), d(31)).unwrap(), vec![d(2), d(3)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedCalendar {
    sessions: BTreeSet<Date>,
}

impl FixedCalendar {
    /// Create a calendar from any collection of dates.
    pub fn new(sessions: impl IntoIterator<Item = Date>) -> Self {
        Self {
            sessions: sessions.into_iter().collect(),
        }
    }

    /// Number of sessions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the calendar holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Earliest and latest session, if any.
    #[must_use]
    pub fn bounds(&self) -> Option<(Date, Date)> {
        Some((*self.sessions.first()?, *self.sessions.last()?))
    }
}

impl TradingCalendar for FixedCalendar {
    fn name(&self) -> &str {
        "fixed"
    }

    fn is_session(&self, date: Date) -> bool {
        self.sessions.contains(&date)
    }

    fn valid_days(&self, start: Date, end: Date) -> Result<Vec<Date>> {
        if start > end {
            return Err(PadronError::InvalidDate(format!(
                "calendar start {start} is after end {end}"
            )));
        }
        Ok(self.sessions.range(start..=end).copied().collect())
    }
}

impl FromIterator<Date> for FixedCalendar {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_sorts_and_dedups() {
        let calendar = FixedCalendar::new([d(2024, 1, 5), d(2024, 1, 2), d(2024, 1, 5)]);
        assert_eq!(calendar.len(), 2);
        assert_eq!(calendar.bounds(), Some((d(2024, 1, 2), d(2024, 1, 5))));
    }

    #[test]
    fn test_range_is_inclusive() {
        let calendar: FixedCalendar = [d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)]
            .into_iter()
            .collect();
        assert_eq!(
            calendar.valid_days(d(2024, 1, 3), d(2024, 1, 4)).unwrap(),
            vec![d(2024, 1, 3), d(2024, 1, 4)]
        );
        assert!(calendar.valid_days(d(2025, 1, 1), d(2025, 2, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_empty_calendar() {
        let calendar = FixedCalendar::default();
        assert!(calendar.is_empty());
        assert_eq!(calendar.bounds(), None);
        assert!(!calendar.is_session(d(2024, 1, 2)));
    }
}
