use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Rendering used for dates in API responses, e.g. `Mon Jan 01 2024`
pub const CALENDAR_STRING_FORMAT: &str = "%a %b %d %Y";

/// Date-only formats accepted from clients, tried in order. `%B` also takes
/// the abbreviated month name
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    CALENDAR_STRING_FORMAT,
];

/// Date and time formats without an offset. Only the date part is kept
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses a client supplied date into a calendar day.
///
/// Accepts ISO dates (`2024-01-01`), US style dates (`01/15/2024`), written
/// out dates (`January 1, 2024`), RFC 3339 timestamps (reduced to their UTC
/// day), local timestamps without an offset and the calendar string rendering
/// produced by [calendar_string]. Returns `None` for anything else, including
/// out of range values like `2023-13-40`.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
    {
        return Some(date);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.with_timezone(&Utc).date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .map(|dt| dt.date())
}

pub fn calendar_string(date: NaiveDate) -> String {
    date.format(CALENDAR_STRING_FORMAT).to_string()
}

/// The current day in UTC, used when a client doesn't supply a date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_calendar_date("2023-02-01"), Some(ymd(2023, 2, 1)));
        assert_eq!(parse_calendar_date(" 2023-02-01 "), Some(ymd(2023, 2, 1)));
        assert_eq!(parse_calendar_date("2023/02/01"), Some(ymd(2023, 2, 1)));
    }

    #[test]
    fn test_parse_us_and_written_dates() {
        assert_eq!(parse_calendar_date("01/15/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_calendar_date("1/5/2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_calendar_date("January 1, 2024"), Some(ymd(2024, 1, 1)));
        assert_eq!(parse_calendar_date("Jan 1, 2024"), Some(ymd(2024, 1, 1)));
        assert_eq!(parse_calendar_date("March 3 2023"), Some(ymd(2023, 3, 3)));
        assert_eq!(parse_calendar_date("3 March 2023"), Some(ymd(2023, 3, 3)));
        assert_eq!(parse_calendar_date("13/01/2024"), None);
        assert_eq!(parse_calendar_date("Smarch 1, 2024"), None);
    }

    #[test]
    fn test_parse_timestamps_keep_the_day() {
        assert_eq!(parse_calendar_date("2023-02-01T23:30:00Z"), Some(ymd(2023, 2, 1)));
        assert_eq!(
            parse_calendar_date("2023-02-01T23:30:00-02:00"),
            Some(ymd(2023, 2, 2))
        );
        assert_eq!(parse_calendar_date("2023-02-01T08:15:00"), Some(ymd(2023, 2, 1)));
        assert_eq!(parse_calendar_date("2023-02-01T08:15"), Some(ymd(2023, 2, 1)));
    }

    #[test]
    fn test_parse_rejects_invalid_dates() {
        assert_eq!(parse_calendar_date("2023-13-40"), None);
        assert_eq!(parse_calendar_date("2023-02-30"), None);
        assert_eq!(parse_calendar_date("yesterday"), None);
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("   "), None);
    }

    #[test]
    fn test_calendar_string() {
        assert_eq!(calendar_string(ymd(2024, 1, 1)), "Mon Jan 01 2024");
        assert_eq!(calendar_string(ymd(1990, 12, 25)), "Tue Dec 25 1990");
    }

    #[test]
    fn test_calendar_string_parses_back_to_same_day() {
        for date in [ymd(2024, 1, 1), ymd(2023, 2, 28), ymd(2000, 2, 29)] {
            assert_eq!(parse_calendar_date(&calendar_string(date)), Some(date));
        }
    }

    #[test]
    fn test_calendar_string_with_wrong_weekday_is_rejected() {
        assert_eq!(parse_calendar_date("Tue Jan 01 2024"), None);
    }
}
