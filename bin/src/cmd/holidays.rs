//! Calendar inspection command implementation.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use padron_traits::TradingCalendar;

/// Weekdays in `[start, end]` that are not sessions of `calendar`.
pub(crate) fn closed_weekdays(
    calendar: &dyn TradingCalendar,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .filter(|day| !calendar.is_session(*day))
        .collect()
}

/// Print the session count and the weekday closures of a calendar.
pub(crate) fn show_holidays(
    calendar: &dyn TradingCalendar,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<()> {
    let sessions = calendar.valid_days(start, end)?;
    let closed = closed_weekdays(calendar, start, end);

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Trading Calendar                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Calendar:  {}", calendar.name());
    println!("Range:     {start} to {end}");
    println!("Sessions:  {}", sessions.len());
    println!();

    if closed.is_empty() {
        println!("No weekday closures in range.");
    } else {
        println!("Weekday closures:");
        println!("{}", "-".repeat(60));
        for day in &closed {
            println!("  {day}  {}", day.weekday());
        }
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use padron_calendar::{NyseCalendar, WeekdayCalendar};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_nyse_closures_in_2024() {
        let closed = closed_weekdays(&NyseCalendar::new(), d(2024, 1, 1), d(2024, 12, 31));
        assert_eq!(closed.len(), 10);
        assert!(closed.contains(&d(2024, 3, 29)));
        assert!(closed.contains(&d(2024, 12, 25)));
    }

    #[test]
    fn test_weekday_calendar_has_no_closures() {
        assert!(closed_weekdays(&WeekdayCalendar::new(), d(2024, 1, 1), d(2024, 12, 31)).is_empty());
    }
}
