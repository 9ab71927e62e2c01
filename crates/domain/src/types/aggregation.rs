//! Aggregation tree nodes and report payloads
//!
//! Nodes are generic over their time accumulator so the same tree code
//! serves both report flavours:
//! - [`PeriodTotals`]: the daily summary, one slot per period
//!   (`timeSpentPerPeriod`)
//! - [`GrandTotal`]: the totals report, a single figure (`timeSpent`)
//!
//! All durations on the wire are whole seconds.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use crate::constants::{GROUP_KEY_PREFIX, NAME_KEY_PREFIX};
use crate::PeriodGrouping;

/// Time accumulated by one aggregation node
pub trait TimeTotals: Clone + std::fmt::Debug {
    /// Zeroed accumulator for a report with `num_periods` periods
    fn zeroed(num_periods: usize) -> Self;

    /// Add `amount` to the slot for `period_index`.
    ///
    /// Returns `false` when the index has no slot (nothing is recorded).
    fn add(&mut self, period_index: usize, amount: Duration) -> bool;

    /// Add every slot of `other` into `self`
    fn accumulate(&mut self, other: &Self);

    /// Reset every slot to zero
    fn clear(&mut self);

    fn is_zero(&self) -> bool;

    /// Sum over all slots
    fn total(&self) -> Duration;
}

/// Per-period time spent, in seconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct PeriodTotals {
    #[cfg_attr(feature = "ts-gen", ts(type = "Array<number>"))]
    pub time_spent_per_period: Vec<i64>,
}

impl PeriodTotals {
    pub fn slot(&self, period_index: usize) -> Option<Duration> {
        self.time_spent_per_period.get(period_index).map(|secs| Duration::seconds(*secs))
    }
}

impl TimeTotals for PeriodTotals {
    fn zeroed(num_periods: usize) -> Self {
        Self { time_spent_per_period: vec![0; num_periods] }
    }

    fn add(&mut self, period_index: usize, amount: Duration) -> bool {
        match self.time_spent_per_period.get_mut(period_index) {
            Some(slot) => {
                *slot += amount.num_seconds();
                true
            }
            None => false,
        }
    }

    fn accumulate(&mut self, other: &Self) {
        for (slot, extra) in self.time_spent_per_period.iter_mut().zip(&other.time_spent_per_period)
        {
            *slot += extra;
        }
    }

    fn clear(&mut self) {
        self.time_spent_per_period.iter_mut().for_each(|slot| *slot = 0);
    }

    fn is_zero(&self) -> bool {
        self.time_spent_per_period.iter().all(|secs| *secs == 0)
    }

    fn total(&self) -> Duration {
        Duration::seconds(self.time_spent_per_period.iter().sum())
    }
}

/// Single time-spent figure for the whole window, in seconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct GrandTotal {
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub time_spent: i64,
}

impl TimeTotals for GrandTotal {
    fn zeroed(_num_periods: usize) -> Self {
        Self::default()
    }

    fn add(&mut self, _period_index: usize, amount: Duration) -> bool {
        self.time_spent += amount.num_seconds();
        true
    }

    fn accumulate(&mut self, other: &Self) {
        self.time_spent += other.time_spent;
    }

    fn clear(&mut self) {
        self.time_spent = 0;
    }

    fn is_zero(&self) -> bool {
        self.time_spent == 0
    }

    fn total(&self) -> Duration {
        Duration::seconds(self.time_spent)
    }
}

/// One node of an aggregation tree, as serialized for the summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationNode<T> {
    /// `"id|<groupId>"` for nodes backed 1:1 by a group, otherwise
    /// `"name|<responseText>"`
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_group_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_activity_group_id: Option<Uuid>,
    #[serde(flatten)]
    pub totals: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<AggregationNode<T>>>,
    pub position: i32,
    /// Aggregates by literal response text rather than being a pure folder
    pub tracks_poll_response_text: bool,
    /// Synthetic node holding literal matches of its parent's text
    pub tracks_exact_parent_matches: bool,
}

impl<T: TimeTotals> AggregationNode<T> {
    /// Node standing for exactly one persisted activity group
    pub fn for_group(
        group_id: Uuid,
        name: impl Into<String>,
        parent_group_id: Option<Uuid>,
        position: i32,
        tracks_poll_response_text: bool,
        num_periods: usize,
    ) -> Self {
        Self {
            key: group_key(group_id),
            name: name.into(),
            activity_group_id: Some(group_id),
            parent_activity_group_id: parent_group_id,
            totals: T::zeroed(num_periods),
            children: None,
            position,
            tracks_poll_response_text,
            tracks_exact_parent_matches: false,
        }
    }

    /// Synthetic child for responses matching the parent group's text verbatim
    pub fn exact_parent_match(
        parent_group_id: Uuid,
        response_text: impl Into<String>,
        num_periods: usize,
    ) -> Self {
        let response_text = response_text.into();
        Self {
            key: name_key(&response_text),
            name: response_text,
            activity_group_id: None,
            parent_activity_group_id: Some(parent_group_id),
            totals: T::zeroed(num_periods),
            children: None,
            position: -1,
            tracks_poll_response_text: true,
            tracks_exact_parent_matches: true,
        }
    }

    /// Ad-hoc node for response text no group claims
    pub fn uncategorized(response_text: impl Into<String>, num_periods: usize) -> Self {
        let response_text = response_text.into();
        Self {
            key: name_key(&response_text),
            name: response_text,
            activity_group_id: None,
            parent_activity_group_id: None,
            totals: T::zeroed(num_periods),
            children: None,
            position: 0,
            tracks_poll_response_text: true,
            tracks_exact_parent_matches: false,
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.activity_group_id.is_none() && !self.tracks_exact_parent_matches
    }

    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|children| !children.is_empty())
    }

    pub fn children(&self) -> &[AggregationNode<T>] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Key of a node backed 1:1 by an activity group
pub fn group_key(group_id: Uuid) -> String {
    format!("{GROUP_KEY_PREFIX}{group_id}")
}

/// Key of a node identified by literal response text
pub fn name_key(response_text: &str) -> String {
    format!("{NAME_KEY_PREFIX}{response_text}")
}

/// Daily/weekly/monthly summary report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub grouping: PeriodGrouping,
    pub from_time: DateTime<Utc>,
    pub to_time: DateTime<Utc>,
    pub period_start_dates: Vec<DateTime<Utc>>,
    pub activities: Vec<AggregationNode<PeriodTotals>>,
}

/// Whole-window totals report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsReport {
    pub from_time: DateTime<Utc>,
    pub to_time: DateTime<Utc>,
    pub activities: Vec<AggregationNode<GrandTotal>>,
}
