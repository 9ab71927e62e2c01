use chrono::{DateTime, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use tallyline_domain::PeriodGrouping;

use super::calendar::{first_of_month, last_covered_day, local_date, local_midnight, month_ordinal};
use super::PeriodStructure;

/// One period per calendar month
#[derive(Debug, Clone)]
pub struct MonthlyPeriods {
    tz: Tz,
    first_month: NaiveDate,
    num_months: usize,
    from_time: DateTime<Utc>,
    to_time: DateTime<Utc>,
}

impl MonthlyPeriods {
    /// Rounds `from` down to the first of its month and `to` up to the first
    /// of the month after the last covered day
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>, tz: Tz) -> Self {
        let first_month = first_of_month(local_date(tz, from));
        let last_month = first_of_month(last_covered_day(tz, from, to));
        let num_months = usize::try_from(month_ordinal(last_month) - month_ordinal(first_month) + 1)
            .unwrap_or(1)
            .max(1);
        let end_month = last_month.checked_add_months(Months::new(1)).unwrap_or(last_month);

        Self {
            tz,
            first_month,
            num_months,
            from_time: local_midnight(tz, first_month),
            to_time: local_midnight(tz, end_month),
        }
    }
}

impl PeriodStructure for MonthlyPeriods {
    fn grouping(&self) -> PeriodGrouping {
        PeriodGrouping::Month
    }

    fn from_time(&self) -> DateTime<Utc> {
        self.from_time
    }

    fn to_time(&self) -> DateTime<Utc> {
        self.to_time
    }

    fn num_periods(&self) -> usize {
        self.num_months
    }

    fn calc_entry_period_index(&self, timestamp: DateTime<Utc>) -> i64 {
        month_ordinal(local_date(self.tz, timestamp)) - month_ordinal(self.first_month)
    }

    fn period_start_dates(&self) -> Vec<DateTime<Utc>> {
        (0..self.num_months)
            .filter_map(|offset| u32::try_from(offset).ok())
            .filter_map(|offset| self.first_month.checked_add_months(Months::new(offset)))
            .map(|month| local_midnight(self.tz, month))
            .collect()
    }
}
