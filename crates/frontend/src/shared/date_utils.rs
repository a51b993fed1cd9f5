/// Utilities for date and time handling
///
/// Server timestamps come either naive (`2024-01-01T10:00:00`) or with an
/// offset (`2024-01-01T07:00:00Z`). Everything shown to the admin is in
/// local wall-clock time.
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Parse a server timestamp into local wall-clock time
///
/// Naive timestamps are taken as already local; offset timestamps are
/// converted to the browser's time zone.
pub fn local_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = value.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Local calendar date of a server timestamp (or a bare `YYYY-MM-DD`)
pub fn local_date(value: &str) -> Option<NaiveDate> {
    local_datetime(value)
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
}

/// Today's date in the browser's time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a timestamp for `<input type="datetime-local">`
/// Example: "2024-03-15T14:02:26.123" -> "2024-03-15T14:02"
pub fn to_datetime_local(value: &str) -> Option<String> {
    local_datetime(value).map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
}

/// Format ISO datetime string to DD.MM.YYYY HH:MM format
/// Example: "2024-03-15T14:02:26" -> "15.03.2024 14:02"
pub fn format_datetime(value: &str) -> String {
    local_datetime(value)
        .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}
