//! Human-readable formatting of tracked durations
//!
//! Tracked time is minute-resolvable, so formatting drops seconds.

use chrono::Duration;

/// Format a duration as hours and minutes
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use tallyline_common::time::format_duration;
///
/// assert_eq!(format_duration(Duration::minutes(5)), "5m");
/// assert_eq!(format_duration(Duration::minutes(60)), "1h");
/// assert_eq!(format_duration(Duration::minutes(125)), "2h 5m");
/// assert_eq!(format_duration(Duration::seconds(20)), "0m");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let sign = if duration < Duration::zero() { "-" } else { "" };
    let total_minutes = duration.num_minutes().abs();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{sign}{m}m"),
        (h, 0) => format!("{sign}{h}h"),
        (h, m) => format!("{sign}{h}h {m}m"),
    }
}

/// Format a duration as `H:MM`, the layout used by report exports
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use tallyline_common::time::format_clock;
///
/// assert_eq!(format_clock(Duration::minutes(7)), "0:07");
/// assert_eq!(format_clock(Duration::minutes(605)), "10:05");
/// ```
pub fn format_clock(duration: Duration) -> String {
    let sign = if duration < Duration::zero() { "-" } else { "" };
    let total_minutes = duration.num_minutes().abs();
    format!("{sign}{}:{:02}", total_minutes / 60, total_minutes % 60)
}
