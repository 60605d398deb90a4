use chrono::{Duration, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Sentinel written into `hours_worked` when a time pair cannot be parsed.
pub const INVALID_TIME_FORMAT: &str = "Invalid time format";

/// 12-hour clock time: "8:05 AM", "08:05 PM". Hour 1-12, minute 00-59.
static CLOCK_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0?[1-9]|1[0-2]):([0-5][0-9]) (AM|PM)$").unwrap());

/// Parse a 12-hour clock string into a time of day.
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let caps = CLOCK_TIME_RE.captures(value)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;

    let hour = match &caps[3] {
        "AM" => hour % 12,
        _ => hour % 12 + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Render a minute count as "H:MM" (hours unpadded, minutes zero-padded).
pub fn format_minutes(total_minutes: i64) -> String {
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Elapsed time between two 12-hour clock strings, as "H:MM".
///
/// A `time_out` at or before `time_in` is taken to fall on the next day,
/// so "09:00 PM" -> "05:00 AM" is an 8 hour shift and identical times
/// count as a full 24 hours.
///
/// Returns [`INVALID_TIME_FORMAT`] if either side fails to parse.
pub fn calculate_hours(time_in: &str, time_out: &str) -> String {
    let (Some(t_in), Some(t_out)) = (parse_clock_time(time_in), parse_clock_time(time_out)) else {
        return INVALID_TIME_FORMAT.to_string();
    };

    let mut elapsed = t_out.signed_duration_since(t_in);
    if t_out <= t_in {
        elapsed = elapsed + Duration::hours(24);
    }

    format_minutes(elapsed.num_minutes())
}

fn parse_duration_minutes(value: &str) -> Option<i64> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    Some(i64::from(hours) * 60 + i64::from(minutes))
}

/// Sum "H:MM" durations into a single "H:MM" total.
///
/// Elements without a colon (such as [`INVALID_TIME_FORMAT`]) contribute
/// nothing. Elements with a colon but non-numeric parts are skipped too.
pub fn add_durations<I, S>(durations: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut total_minutes = 0i64;

    for duration in durations {
        let duration = duration.as_ref();
        if !duration.contains(':') {
            continue;
        }

        match parse_duration_minutes(duration) {
            Some(minutes) => total_minutes += minutes,
            None => warn!("Skipping malformed duration: {:?}", duration),
        }
    }

    format_minutes(total_minutes)
}
