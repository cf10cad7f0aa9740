use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

/// Shown wherever a timestamp is missing or could not be parsed.
pub const TIME_PLACEHOLDER: &str = "-";

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const WEEK: i64 = 604_800;

/// Naive layouts written by the feed generator (no offset, local wall time).
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Format a timestamp as short month name, numeric day and a 24-hour clock.
///
/// The layout is fixed regardless of the user's locale, e.g. `Oct 7, 09:05`.
/// The date is rendered in whatever zone it carries; callers convert to
/// `Local` first when the result is shown to a user.
pub fn format_absolute<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%b %-d, %H:%M").to_string()
}

/// The "last updated" line: absolute local time, or the placeholder when unknown.
pub fn format_last_updated(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(
        || TIME_PLACEHOLDER.to_string(),
        |date| format_absolute(&date.with_timezone(&Local)),
    )
}

/// Format the time elapsed between `date` and `now` as a "time ago" string.
///
/// Elapsed seconds are floored. Anything under a minute, including dates in
/// the future, reads "just now". After a week the absolute format is used.
pub fn format_relative<Tz>(date: &DateTime<Tz>, now: DateTime<Utc>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let diff = now
        .signed_duration_since(date.with_timezone(&Utc))
        .num_milliseconds()
        .div_euclid(1000);

    if diff < MINUTE {
        return "just now".to_string();
    }
    if diff < HOUR {
        return format!("{} minutes ago", diff / MINUTE);
    }
    if diff < DAY {
        return format!("{} hours ago", diff / HOUR);
    }
    if diff < WEEK {
        return format!("{} days ago", diff / DAY);
    }

    format_absolute(date)
}

/// Parse a feed timestamp.
///
/// Accepts RFC 3339 (with offset) and naive ISO-8601 date-times, the latter
/// interpreted in the local time zone. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}
