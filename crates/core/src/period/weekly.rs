use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use tallyline_domain::PeriodGrouping;

use super::calendar::{last_covered_day, local_date, local_midnight, monday_on_or_before};
use super::PeriodStructure;

/// One period per Monday-to-Sunday week
#[derive(Debug, Clone)]
pub struct WeeklyPeriods {
    tz: Tz,
    first_monday: NaiveDate,
    num_weeks: usize,
    from_time: DateTime<Utc>,
    to_time: DateTime<Utc>,
}

impl WeeklyPeriods {
    /// Rounds `from` down to the Monday on or before it and `to` up to the
    /// Monday after the last covered day
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, tz: Tz) -> Self {
        let first_monday = monday_on_or_before(local_date(tz, from));
        let end_monday = monday_on_or_before(last_covered_day(tz, from, to)) + Duration::weeks(1);
        let num_weeks =
            usize::try_from((end_monday - first_monday).num_weeks()).unwrap_or(1).max(1);

        Self {
            tz,
            first_monday,
            num_weeks,
            from_time: local_midnight(tz, first_monday),
            to_time: local_midnight(tz, end_monday),
        }
    }
}

impl PeriodStructure for WeeklyPeriods {
    fn grouping(&self) -> PeriodGrouping {
        PeriodGrouping::Week
    }

    fn from_time(&self) -> DateTime<Utc> {
        self.from_time
    }

    fn to_time(&self) -> DateTime<Utc> {
        self.to_time
    }

    fn num_periods(&self) -> usize {
        self.num_weeks
    }

    fn calc_entry_period_index(&self, timestamp: DateTime<Utc>) -> i64 {
        (local_date(self.tz, timestamp) - self.first_monday).num_days().div_euclid(7)
    }

    fn period_start_dates(&self) -> Vec<DateTime<Utc>> {
        self.first_monday
            .iter_weeks()
            .take(self.num_weeks)
            .map(|monday| local_midnight(self.tz, monday))
            .collect()
    }
}
