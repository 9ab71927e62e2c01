//! Local calendar helpers shared by the period structures

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Local calendar date of `instant` in `tz`
pub(super) fn local_date(tz: Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// First instant of local `date` in `tz`, as UTC.
///
/// Where a DST jump skips midnight the day starts at the first local time
/// that exists.
pub(super) fn local_midnight(tz: Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(start) => start.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => (1..=3)
            .find_map(|hours| tz.from_local_datetime(&(midnight + Duration::hours(hours))).earliest())
            .map_or_else(|| Utc.from_utc_datetime(&midnight), |start| start.with_timezone(&Utc)),
    }
}

/// Last local day touched by `[from, to)`.
///
/// A `to` sitting exactly on a local midnight is exclusive, so the day it
/// opens is not covered. Never earlier than the day of `from`.
pub(super) fn last_covered_day(tz: Tz, from: DateTime<Utc>, to: DateTime<Utc>) -> NaiveDate {
    let first = local_date(tz, from);
    let mut last = local_date(tz, to);
    if to > from && to == local_midnight(tz, last) {
        last = last.pred_opt().unwrap_or(last);
    }
    last.max(first)
}

/// Monday on or before `date`
pub(super) fn monday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub(super) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Months since year 0, for month arithmetic by subtraction
pub(super) fn month_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_local_midnight_respects_offset() {
        let start = local_midnight(chrono_tz::America::New_York, date(2024, 1, 15));
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 15, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_local_midnight_skipped_by_dst() {
        // Santiago springs forward at local midnight
        let start = local_midnight(chrono_tz::America::Santiago, date(2024, 9, 8));
        let local = start.with_timezone(&chrono_tz::America::Santiago);
        assert_eq!(local.date_naive(), date(2024, 9, 8));
        assert_eq!(local.time(), NaiveTime::from_hms_opt(1, 0, 0).unwrap());
    }

    #[test]
    fn test_last_covered_day_exclusive_midnight() {
        let from = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
        assert_eq!(last_covered_day(Tz::UTC, from, to), date(2024, 3, 3));

        let to_mid_day = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 1).unwrap();
        assert_eq!(last_covered_day(Tz::UTC, from, to_mid_day), date(2024, 3, 4));
    }

    #[test]
    fn test_monday_on_or_before() {
        assert_eq!(monday_on_or_before(date(2024, 3, 6)), date(2024, 3, 4)); // Wednesday
        assert_eq!(monday_on_or_before(date(2024, 3, 4)), date(2024, 3, 4)); // Monday
        assert_eq!(monday_on_or_before(date(2024, 3, 10)), date(2024, 3, 4)); // Sunday
    }

    #[test]
    fn test_month_ordinal_difference() {
        assert_eq!(month_ordinal(date(2025, 1, 31)) - month_ordinal(date(2024, 11, 1)), 2);
    }
}
