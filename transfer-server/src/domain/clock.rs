//! Clock handling for TRA timetables.
//!
//! The TRA site prints times as "HH:MM" in Taiwan local time (UTC+8, no
//! daylight saving). Feasibility checks only need minutes since local
//! midnight, so that is the unit used throughout.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc};

/// Taiwan's offset from UTC, in seconds.
const TAIWAN_UTC_OFFSET_SECS: i32 = 8 * 60 * 60;

/// The Taiwan local timezone.
pub fn taiwan_offset() -> FixedOffset {
    FixedOffset::east_opt(TAIWAN_UTC_OFFSET_SECS).expect("UTC+8 is a valid offset")
}

/// Current time in Taiwan.
pub fn taiwan_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&taiwan_offset())
}

/// Format a date the way the TRA query form expects it (`YYYY/MM/DD`).
///
/// # Examples
///
/// ```
/// use transfer_server::domain::query_date;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
/// assert_eq!(query_date(date), "2025/03/07");
/// ```
pub fn query_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Minutes since midnight for a time of day.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Parse an "H:MM" or "HH:MM" clock time into minutes since midnight.
///
/// Returns `None` for anything that isn't two colon-separated digit groups
/// with a minute below 60. Hours are not capped, since upstream times past
/// midnight are occasionally printed as `24:10`.
///
/// # Examples
///
/// ```
/// use transfer_server::domain::parse_clock_minutes;
///
/// assert_eq!(parse_clock_minutes("08:05"), Some(485));
/// assert_eq!(parse_clock_minutes("7:30"), Some(450));
/// assert_eq!(parse_clock_minutes("0805"), None);
/// assert_eq!(parse_clock_minutes("新竹"), None);
/// ```
pub fn parse_clock_minutes(s: &str) -> Option<u32> {
    let (hours, minutes) = s.trim().split_once(':')?;

    if !is_digits(hours) || minutes.len() != 2 || !is_digits(minutes) {
        return None;
    }

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    hours.checked_mul(60)?.checked_add(minutes)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.len() <= 2 && s.bytes().all(|b| b.is_ascii_digit())
}
