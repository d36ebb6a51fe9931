//! Duration text parsing.
//!
//! The TRA site prints durations as `1時30分`, `45分` or `2時`, sometimes
//! with spaces between the number and the unit.

use std::sync::LazyLock;

use regex::Regex;

static HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*時").expect("valid hours regex"));

static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*分").expect("valid minutes regex"));

/// Parse a duration into whole minutes.
///
/// Returns `None` when neither an hour nor a minute component is present,
/// so "unparseable" stays distinct from zero minutes.
///
/// # Examples
///
/// ```
/// use transfer_server::domain::parse_duration_minutes;
///
/// assert_eq!(parse_duration_minutes("1時30分"), Some(90));
/// assert_eq!(parse_duration_minutes("45分"), Some(45));
/// assert_eq!(parse_duration_minutes("2時"), Some(120));
/// assert_eq!(parse_duration_minutes("--"), None);
/// ```
pub fn parse_duration_minutes(text: &str) -> Option<u32> {
    let hours = capture_number(&HOURS, text);
    let minutes = capture_number(&MINUTES, text);

    if hours.is_none() && minutes.is_none() {
        return None;
    }

    let total = hours
        .unwrap_or(0)
        .checked_mul(60)?
        .checked_add(minutes.unwrap_or(0))?;
    Some(total)
}

fn capture_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}
