//! Date column coercion and output representation.
//!
//! Internally every date column is a polars `Date` (whole days). Outputs are
//! then rendered in one of two representations, chosen once per
//! [`ConstituteAdjustment`](crate::ConstituteAdjustment):
//!
//! - [`DateMode::Timestamp`]: midnight instants in UTC
//! - [`DateMode::Period`]: daily periods with no time zone

use chrono::NaiveDateTime;
use padron_traits::{Date, PadronError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Time zone attached to dates in timestamp mode.
pub const TIME_ZONE: &str = "UTC";

/// How finished date columns are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    /// Absolute instants at midnight, carrying [`TIME_ZONE`].
    #[default]
    Timestamp,
    /// Calendar days without a time component or zone.
    Period,
}

impl DateMode {
    /// The polars dtype of a date column in this representation.
    #[must_use]
    pub fn dtype(self) -> DataType {
        match self {
            Self::Timestamp => DataType::Datetime(TimeUnit::Microseconds, Some(TIME_ZONE.into())),
            Self::Period => DataType::Date,
        }
    }

    /// The name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Period => "period",
        }
    }
}

impl fmt::Display for DateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateMode {
    type Err = PadronError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "timestamp" => Ok(Self::Timestamp),
            "period" => Ok(Self::Period),
            _ => Err(PadronError::InvalidConfig(format!(
                "{s} is not recognised. Valid date modes are \"timestamp\", \"period\""
            ))),
        }
    }
}

/// Renders date columns in a fixed [`DateMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateNormalizer {
    mode: DateMode,
}

impl DateNormalizer {
    /// Create a normalizer for `mode`.
    #[must_use]
    pub const fn new(mode: DateMode) -> Self {
        Self { mode }
    }

    /// The representation this normalizer produces.
    #[must_use]
    pub const fn mode(&self) -> DateMode {
        self.mode
    }

    /// Expression casting `column` into this representation.
    ///
    /// The input must be a `Date` column or a column already produced by a
    /// normalizer of either mode.
    pub fn expr(&self, column: &str) -> Expr {
        col(column).cast(self.mode.dtype())
    }

    /// Rewrites `column` of `frame` into this representation.
    pub fn normalize(&self, frame: DataFrame, column: &str) -> Result<DataFrame> {
        Ok(frame.lazy().with_column(self.expr(column)).collect()?)
    }
}

/// Coerces `column` of `frame` to a polars `Date` column.
///
/// - `Date` columns are returned unchanged and `date_format` is ignored.
/// - `Datetime` columns are truncated to their calendar day in their own
///   time zone, so a New York close stays on its trading day.
/// - `String` columns are parsed with `date_format` (a chrono format string);
///   a missing or empty format is an error.
/// - Integer columns such as `20240102` are read as text under the same rule.
///
/// Nulls stay null. Any other dtype fails with [`PadronError::InvalidDate`].
pub fn to_calendar_dates(
    frame: DataFrame,
    column: &str,
    date_format: Option<&str>,
) -> Result<DataFrame> {
    let dtype = frame
        .column(column)
        .map_err(|_| PadronError::MissingColumn(column.to_string()))?
        .dtype()
        .clone();

    match dtype {
        DataType::Date => Ok(frame),
        DataType::Datetime(_, _) => Ok(frame
            .lazy()
            .with_column(col(column).dt().date())
            .collect()?),
        DataType::String => {
            let format = required_format(column, date_format)?;
            parse_text_dates(frame, column, format)
        }
        DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64 => {
            let format = required_format(column, date_format)?;
            let frame = frame
                .lazy()
                .with_column(col(column).cast(DataType::String))
                .collect()?;
            parse_text_dates(frame, column, format)
        }
        other => Err(PadronError::InvalidDate(format!(
            "column \"{column}\" has dtype {other}, expected a date, datetime, integer or string"
        ))),
    }
}

fn required_format<'a>(column: &str, date_format: Option<&'a str>) -> Result<&'a str> {
    date_format.filter(|f| !f.is_empty()).ok_or_else(|| {
        PadronError::InvalidDate(format!(
            "column \"{column}\" is not a date column; a date_format is required to parse it"
        ))
    })
}

fn parse_text_dates(mut frame: DataFrame, column: &str, format: &str) -> Result<DataFrame> {
    let parsed = frame
        .column(column)?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|value| value.map(|text| parse_date(text, format)).transpose())
        .collect::<Result<Vec<Option<Date>>>>()?;

    frame.with_column(Series::new(column.into(), parsed))?;
    Ok(frame)
}

/// Parses one date with a chrono format, accepting formats that carry a time.
pub fn parse_date(text: &str, format: &str) -> Result<Date> {
    Date::parse_from_str(text, format)
        .or_else(|_| NaiveDateTime::parse_from_str(text, format).map(|dt| dt.date()))
        .map_err(|e| {
            PadronError::InvalidDate(format!(
                "\"{text}\" does not match format \"{format}\": {e}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn dtype_of(frame: &DataFrame, column: &str) -> DataType {
        frame.column(column).unwrap().dtype().clone()
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("timestamp".parse::<DateMode>().unwrap(), DateMode::Timestamp);
        assert_eq!("period".parse::<DateMode>().unwrap(), DateMode::Period);
        assert!(matches!(
            "epoch".parse::<DateMode>(),
            Err(PadronError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_mode_serde_is_lowercase() {
        let json = serde_json::to_string(&DateMode::Period).unwrap();
        assert_eq!(json, "\"period\"");
        let mode: DateMode = serde_json::from_str("\"timestamp\"").unwrap();
        assert_eq!(mode, DateMode::Timestamp);
    }

    #[test]
    fn test_timestamp_mode_attaches_utc() {
        let frame = df!("date" => [d(2024, 1, 2), d(2024, 1, 3)]).unwrap();
        let out = DateNormalizer::new(DateMode::Timestamp)
            .normalize(frame, "date")
            .unwrap();
        match dtype_of(&out, "date") {
            DataType::Datetime(TimeUnit::Microseconds, Some(tz)) => assert_eq!(tz.as_str(), "UTC"),
            other => panic!("unexpected dtype {other}"),
        }
    }

    #[test]
    fn test_period_round_trip_keeps_days() {
        let frame = df!("date" => [d(2024, 1, 2), d(2024, 1, 3)]).unwrap();
        let stamped = DateNormalizer::new(DateMode::Timestamp)
            .normalize(frame.clone(), "date")
            .unwrap();
        let back = DateNormalizer::new(DateMode::Period)
            .normalize(stamped, "date")
            .unwrap();
        assert_eq!(dtype_of(&back, "date"), DataType::Date);
        assert!(back.equals(&frame));
    }

    #[test]
    fn test_text_dates_need_format() {
        let frame = df!("from" => ["2012-01-03", "2014-01-02"]).unwrap();
        assert!(matches!(
            to_calendar_dates(frame.clone(), "from", None),
            Err(PadronError::InvalidDate(_))
        ));
        assert!(to_calendar_dates(frame, "from", Some("")).is_err());
    }

    #[test]
    fn test_text_dates_parse_with_nulls() {
        let frame = df!("thru" => [Some("20150101"), None]).unwrap();
        let out = to_calendar_dates(frame, "thru", Some("%Y%m%d")).unwrap();
        let dates: Vec<Option<Date>> = out
            .column("thru")
            .unwrap()
            .as_materialized_series()
            .date()
            .unwrap()
            .as_date_iter()
            .collect();
        assert_eq!(dates, vec![Some(d(2015, 1, 1)), None]);
    }

    #[test]
    fn test_unparseable_text_is_error() {
        let frame = df!("date" => ["2012-13-45"]).unwrap();
        let err = to_calendar_dates(frame, "date", Some("%Y-%m-%d")).unwrap_err();
        assert!(err.to_string().contains("2012-13-45"));
    }

    #[test]
    fn test_datetime_truncates_to_day() {
        let frame = df!("date" => [d(2024, 1, 2)]).unwrap();
        let stamped = DateNormalizer::new(DateMode::Timestamp)
            .normalize(frame.clone(), "date")
            .unwrap();
        let out = to_calendar_dates(stamped, "date", Some("%Y")).unwrap();
        assert!(out.equals(&frame));
    }

    #[rstest]
    #[case("America/New_York", d(2024, 1, 2))]
    #[case("UTC", d(2024, 1, 3))]
    #[case("Asia/Tokyo", d(2024, 1, 3))]
    fn test_zoned_datetime_keeps_local_day(#[case] zone: &str, #[case] expected: Date) {
        // 2024-01-03 01:00 UTC, i.e. 20:00 on the 2nd in New York
        let instant = d(2024, 1, 3)
            .and_hms_opt(1, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_micros();
        let zoned = Series::new("date".into(), [instant])
            .cast(&DataType::Datetime(
                TimeUnit::Microseconds,
                Some(zone.into()),
            ))
            .unwrap();
        let frame = DataFrame::new(vec![zoned.into()]).unwrap();

        let out = to_calendar_dates(frame, "date", None).unwrap();
        let dates: Vec<Option<Date>> = out
            .column("date")
            .unwrap()
            .as_materialized_series()
            .date()
            .unwrap()
            .as_date_iter()
            .collect();
        assert_eq!(dates, vec![Some(expected)]);
    }

    #[test]
    fn test_float_column_is_rejected() {
        let frame = df!("date" => [20240102.0_f64]).unwrap();
        assert!(matches!(
            to_calendar_dates(frame, "date", Some("%Y%m%d")),
            Err(PadronError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_integer_column_needs_format() {
        let frame = df!("date" => [20240102_i64]).unwrap();
        assert!(matches!(
            to_calendar_dates(frame, "date", None),
            Err(PadronError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_integer_dates_parse_with_format() {
        let frame = df!("from" => [20240102_i64, 20150101]).unwrap();
        let out = to_calendar_dates(frame, "from", Some("%Y%m%d")).unwrap();
        let dates: Vec<Option<Date>> = out
            .column("from")
            .unwrap()
            .as_materialized_series()
            .date()
            .unwrap()
            .as_date_iter()
            .collect();
        assert_eq!(dates, vec![Some(d(2024, 1, 2)), Some(d(2015, 1, 1))]);
    }

    #[test]
    fn test_parse_date_with_time_format() {
        assert_eq!(
            parse_date("2024-01-02 16:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
            d(2024, 1, 2)
        );
    }
}
