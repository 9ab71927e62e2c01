//! Report service - builds summary and totals trees for a window

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tallyline_domain::{
    AccountScope, AggregationNode, GrandTotal, PeriodGrouping, PeriodTotals, Result, SummaryReport, TimeTotals, TotalsReport,
    VisibleEntry,
};
use tracing::{debug, info};

use super::aggregate_entries;
use crate::activity::{ActivityGroupRepository, ActivityHierarchy};
use crate::aggregation::AggregationHierarchy;
use crate::period::{build_period_structure, CustomPeriods, PeriodStructure};
use crate::timeline::TimelineService;
use crate::validation::validate_window;

/// Report service
pub struct ReportService {
    timeline: Arc<TimelineService>,
    groups: Arc<dyn ActivityGroupRepository>,
}

impl ReportService {
    pub fn new(timeline: Arc<TimelineService>, groups: Arc<dyn ActivityGroupRepository>) -> Self {
        Self { timeline, groups }
    }

    /// Per-period summary for `[from, to)`.
    ///
    /// The window is rounded out to whole periods of `grouping` in `tz`.
    /// Both default to the configured values.
    pub async fn daily_summary(
        &self,
        scope: &AccountScope,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        grouping: Option<PeriodGrouping>,
        tz: Option<Tz>,
    ) -> Result<SummaryReport> {
        let config = self.timeline.config();
        validate_window(from, to, config)?;
        let grouping = grouping.unwrap_or(config.default_grouping);
        let tz = match tz {
            Some(tz) => tz,
            None => config.parsed_timezone()?,
        };

        let periods = build_period_structure(grouping, from, to, tz);
        let activities = self.build_tree::<PeriodTotals>(scope, periods.as_ref()).await?;
        info!(account = %scope, grouping = %grouping, periods = periods.num_periods(), roots = activities.len(), "Built summary report");

        Ok(SummaryReport {
            grouping,
            from_time: periods.from_time(),
            to_time: periods.to_time(),
            period_start_dates: periods.period_start_dates(),
            activities,
        })
    }

    /// Whole-window totals for `[from, to)`, without period rounding
    pub async fn totals(&self, scope: &AccountScope, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<TotalsReport> {
        validate_window(from, to, self.timeline.config())?;

        let periods = CustomPeriods::new(from, to);
        let activities = self.build_tree::<GrandTotal>(scope, &periods).await?;
        info!(account = %scope, roots = activities.len(), "Built totals report");

        Ok(TotalsReport { from_time: from, to_time: to, activities })
    }

    async fn build_tree<T: TimeTotals + Send>(
        &self,
        scope: &AccountScope,
        periods: &dyn PeriodStructure,
    ) -> Result<Vec<AggregationNode<T>>> {
        let (entries, groups): (Vec<VisibleEntry>, _) = tokio::try_join!(
            self.timeline.reconciled_window(scope, periods.from_time(), periods.to_time()),
            self.groups.fetch_groups(scope),
        )?;

        let hierarchy = ActivityHierarchy::build(groups);
        let mut tree = AggregationHierarchy::<T>::build(&hierarchy, periods.num_periods());
        let counted = aggregate_entries(&mut tree, &entries, periods);
        debug!(account = %scope, entries = entries.len(), counted, groups = hierarchy.len(), "Aggregated entries");

        tree.recalculate_time_totals();
        tree.prune_empty_leafs();
        Ok(tree.into_activities())
    }
}
