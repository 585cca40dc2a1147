//! Date parsing and formatting in the store's fixed timezone.
//!
//! Sheet cells hold dates the way Google Sheets renders them (`M/D/YYYY`,
//! optionally with a time), while the admin form sends ISO-8601 strings.
//! Every parse here is lenient: anything unrecognised is `None`, never an error.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

use crate::core::config::sheet;

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DATE_FORMATS: [&str; 4] = ["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d", "%d %B %Y"];
const DATETIME_FORMATS: [&str; 6] = [
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// The store timezone (UTC+07:00).
pub fn store_tz() -> FixedOffset {
    FixedOffset::east_opt(sheet::TIMEZONE_OFFSET_SECS).unwrap_or(Utc.fix())
}

/// Parses a cell or form value into an instant.
///
/// Values with an explicit offset (RFC 3339) keep it; naive dates and
/// date-times are interpreted in the store timezone.
pub fn parse_flexible(raw: &str) -> Option<DateTime<FixedOffset>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }

    let tz = store_tz();
    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive).single()
}

/// `"<MonthName> <FullYear>"`, e.g. `"March 2024"`.
pub fn month_year_label(dt: &DateTime<FixedOffset>) -> String {
    use chrono::Datelike;

    let local = dt.with_timezone(&store_tz());
    let month = MONTH_NAMES[local.month0() as usize];
    format!("{} {}", month, local.year())
}

/// Milliseconds since the Unix epoch of the far-future sort sentinel.
pub fn tba_sentinel_millis() -> i64 {
    let (year, month, day) = sheet::TBA_SENTINEL;
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or(i64::MAX)
}

/// `M/D/YYYY HH:mm:ss` in the store timezone.
pub fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&store_tz()).format("%-m/%-d/%Y %H:%M:%S").to_string()
}

/// `M/D/YYYY` in the store timezone.
pub fn format_short_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&store_tz()).format("%-m/%-d/%Y").to_string()
}
