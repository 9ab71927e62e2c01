use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use tallyline_domain::PeriodGrouping;

use super::calendar::{last_covered_day, local_date, local_midnight};
use super::PeriodStructure;

/// One period per local calendar day
#[derive(Debug, Clone)]
pub struct DailyPeriods {
    tz: Tz,
    first_day: NaiveDate,
    num_days: usize,
    from_time: DateTime<Utc>,
    to_time: DateTime<Utc>,
}

impl DailyPeriods {
    /// Rounds `from` down to the start of its day and `to` up to the start
    /// of the following day (unless it is already on a day boundary)
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, tz: Tz) -> Self {
        let first_day = local_date(tz, from);
        let end_day = last_covered_day(tz, from, to) + Duration::days(1);
        let num_days = usize::try_from((end_day - first_day).num_days()).unwrap_or(1).max(1);

        Self {
            tz,
            first_day,
            num_days,
            from_time: local_midnight(tz, first_day),
            to_time: local_midnight(tz, end_day),
        }
    }
}

impl PeriodStructure for DailyPeriods {
    fn grouping(&self) -> PeriodGrouping {
        PeriodGrouping::Day
    }

    fn from_time(&self) -> DateTime<Utc> {
        self.from_time
    }

    fn to_time(&self) -> DateTime<Utc> {
        self.to_time
    }

    fn num_periods(&self) -> usize {
        self.num_days
    }

    fn calc_entry_period_index(&self, timestamp: DateTime<Utc>) -> i64 {
        (local_date(self.tz, timestamp) - self.first_day).num_days()
    }

    fn period_start_dates(&self) -> Vec<DateTime<Utc>> {
        self.first_day
            .iter_days()
            .take(self.num_days)
            .map(|day| local_midnight(self.tz, day))
            .collect()
    }
}
