//! Period structures
//!
//! A period structure maps a requested report window and grouping unit onto
//! a fixed number of discrete periods, and assigns any timestamp to a period
//! index. Boundaries are local calendar boundaries in the reporting user's
//! timezone, so a "day" is a local day even across DST transitions.
//!
//! Ranges are half-open: a timestamp exactly on a boundary belongs to the
//! period beginning at that instant.
//!
//! Callers reject inverted windows before building a structure (see
//! [`crate::validation::validate_window`]).

mod calendar;
mod custom;
mod daily;
mod monthly;
mod weekly;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
pub use custom::CustomPeriods;
pub use daily::DailyPeriods;
pub use monthly::MonthlyPeriods;
use tallyline_domain::PeriodGrouping;
pub use weekly::WeeklyPeriods;

/// Shared contract of the four period groupings
pub trait PeriodStructure: Send + Sync + std::fmt::Debug {
    fn grouping(&self) -> PeriodGrouping;

    /// Normalized start of the first period
    fn from_time(&self) -> DateTime<Utc>;

    /// Normalized end of the last period (exclusive)
    fn to_time(&self) -> DateTime<Utc>;

    /// Number of periods, always at least 1
    fn num_periods(&self) -> usize;

    /// Index of the period containing `timestamp`.
    ///
    /// Not range checked: timestamps before `from_time` give negative
    /// indices, timestamps after `to_time` give indices past the end.
    fn calc_entry_period_index(&self, timestamp: DateTime<Utc>) -> i64;

    /// Start instant of every period, in order
    fn period_start_dates(&self) -> Vec<DateTime<Utc>>;

    /// Index of the period containing `timestamp`, or `None` when the
    /// timestamp lies outside `[from_time, to_time)`
    fn period_index_checked(&self, timestamp: DateTime<Utc>) -> Option<usize> {
        if timestamp < self.from_time() || timestamp >= self.to_time() {
            return None;
        }
        usize::try_from(self.calc_entry_period_index(timestamp))
            .ok()
            .filter(|index| *index < self.num_periods())
    }
}

/// Build the period structure for `grouping` over `[from, to)` in `tz`
pub fn build_period_structure(
    grouping: PeriodGrouping,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    tz: Tz,
) -> Box<dyn PeriodStructure> {
    match grouping {
        PeriodGrouping::Day => Box::new(DailyPeriods::new(from, to, tz)),
        PeriodGrouping::Week => Box::new(WeeklyPeriods::new(from, to, tz)),
        PeriodGrouping::Month => Box::new(MonthlyPeriods::new(from, to, tz)),
        PeriodGrouping::Custom => Box::new(CustomPeriods::new(from, to)),
    }
}
