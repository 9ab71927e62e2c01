use chrono::{DateTime, Utc};
use tallyline_domain::PeriodGrouping;

use super::PeriodStructure;

/// The raw window as a single period
#[derive(Debug, Clone)]
pub struct CustomPeriods {
    from_time: DateTime<Utc>,
    to_time: DateTime<Utc>,
}

impl CustomPeriods {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from_time: from, to_time: to }
    }
}

impl PeriodStructure for CustomPeriods {
    fn grouping(&self) -> PeriodGrouping {
        PeriodGrouping::Custom
    }

    fn from_time(&self) -> DateTime<Utc> {
        self.from_time
    }

    fn to_time(&self) -> DateTime<Utc> {
        self.to_time
    }

    fn num_periods(&self) -> usize {
        1
    }

    fn calc_entry_period_index(&self, _timestamp: DateTime<Utc>) -> i64 {
        0
    }

    fn period_start_dates(&self) -> Vec<DateTime<Utc>> {
        vec![self.from_time]
    }
}
