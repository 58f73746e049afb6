//! New York Stock Exchange full-day closures.
//!
//! Sessions are weekdays minus the exchange's rule-based holidays and a table
//! of unscheduled closures. Early closes are still sessions at daily
//! granularity and are not modelled.

use chrono::{Datelike, Days, Weekday};
use padron_traits::{Date, PadronError, Result, TradingCalendar};
use std::collections::HashSet;

/// Unscheduled full-day closures (weather, national days of mourning, 9/11).
const SPECIAL_CLOSURES: &[(i32, u32, u32)] = &[
    (1985, 9, 27),  // Hurricane Gloria
    (1994, 4, 27),  // President Nixon funeral
    (2001, 9, 11),  // September 11
    (2001, 9, 12),
    (2001, 9, 13),
    (2001, 9, 14),
    (2004, 6, 11),  // President Reagan funeral
    (2007, 1, 2),   // President Ford funeral
    (2012, 10, 29), // Hurricane Sandy
    (2012, 10, 30),
    (2018, 12, 5),  // President G.H.W. Bush funeral
    (2025, 1, 9),   // President Carter funeral
];

/// NYSE trading calendar.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use padron_calendar::NyseCalendar;
/// use padron_traits::TradingCalendar;
///
/// let nyse = NyseCalendar::new();
/// let christmas = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
/// assert!(!nyse.is_session(christmas));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NyseCalendar;

impl NyseCalendar {
    /// Create the calendar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Full-day closures falling on weekdays in `year`, in date order.
    #[must_use]
    pub fn holidays(year: i32) -> Vec<Date> {
        let mut days: Vec<Date> = Vec::with_capacity(12);

        // New Year's Day: a Saturday holiday is not moved to the prior Friday.
        if let Some(new_year) = ymd(year, 1, 1) {
            match new_year.weekday() {
                Weekday::Sat => {}
                Weekday::Sun => days.extend(new_year.checked_add_days(Days::new(1))),
                _ => days.push(new_year),
            }
        }
        if year >= 1998 {
            days.extend(nth_weekday(year, 1, Weekday::Mon, 3));
        }
        days.extend(nth_weekday(year, 2, Weekday::Mon, 3));
        days.extend(good_friday(year));
        days.extend(last_weekday(year, 5, Weekday::Mon));
        if year >= 2022 {
            days.extend(ymd(year, 6, 19).map(observed));
        }
        days.extend(ymd(year, 7, 4).map(observed));
        days.extend(nth_weekday(year, 9, Weekday::Mon, 1));
        days.extend(nth_weekday(year, 11, Weekday::Thu, 4));
        days.extend(ymd(year, 12, 25).map(observed));

        days.extend(
            SPECIAL_CLOSURES
                .iter()
                .filter(|(y, _, _)| *y == year)
                .filter_map(|&(y, m, d)| ymd(y, m, d)),
        );

        days.sort_unstable();
        days.dedup();
        days
    }

    fn closures_between(start: Date, end: Date) -> HashSet<Date> {
        (start.year()..=end.year())
            .flat_map(Self::holidays)
            .collect()
    }
}

impl TradingCalendar for NyseCalendar {
    fn name(&self) -> &str {
        "NYSE"
    }

    fn is_session(&self, date: Date) -> bool {
        is_weekday(date) && !Self::holidays(date.year()).contains(&date)
    }

    fn valid_days(&self, start: Date, end: Date) -> Result<Vec<Date>> {
        if start > end {
            return Err(PadronError::InvalidDate(format!(
                "calendar start {start} is after end {end}"
            )));
        }
        let closed = Self::closures_between(start, end);
        let days: Vec<Date> = start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| is_weekday(*day) && !closed.contains(day))
            .collect();
        tracing::debug!(
            calendar = "NYSE",
            %start,
            %end,
            sessions = days.len(),
            "resolved trading sessions"
        );
        Ok(days)
    }
}

pub(crate) fn is_weekday(date: Date) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn ymd(year: i32, month: u32, day: u32) -> Option<Date> {
    Date::from_ymd_opt(year, month, day)
}

/// Saturday holidays move to Friday, Sunday holidays to Monday.
fn observed(date: Date) -> Date {
    match date.weekday() {
        Weekday::Sat => date.checked_sub_days(Days::new(1)).unwrap_or(date),
        Weekday::Sun => date.checked_add_days(Days::new(1)).unwrap_or(date),
        _ => date,
    }
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<Date> {
    Date::from_weekday_of_month_opt(year, month, weekday, n)
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<Date> {
    let next_month = if month == 12 {
        ymd(year + 1, 1, 1)?
    } else {
        ymd(year, month + 1, 1)?
    };
    let last = next_month.pred_opt()?;
    let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last.checked_sub_days(Days::new(u64::from(back)))
}

/// Two days before Easter Sunday (anonymous Gregorian computus).
fn good_friday(year: i32) -> Option<Date> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    let easter = ymd(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)?;
    easter.checked_sub_days(Days::new(2))
}
