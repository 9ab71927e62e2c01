//! Timeline service - reconciled views and ingestion over the record log

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tallyline_common::time::{Clock, SystemClock};
use tallyline_domain::{AccountScope, ReportConfig, Result, TallylineError, TimeBlockRecord, VisibleEntry};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::coverage::{clip_to_window, find_gaps, Gap};
use super::ingest::NewTimeBlock;
use super::ports::TimeBlockRepository;
use super::reconciler::reconcile_validated;
use crate::validation::validate_window;

/// Timeline service
pub struct TimelineService {
    repository: Arc<dyn TimeBlockRepository>,
    clock: Arc<dyn Clock>,
    config: ReportConfig,
}

impl TimelineService {
    /// Create a new timeline service stamping records with the system clock
    pub fn new(repository: Arc<dyn TimeBlockRepository>, config: ReportConfig) -> Self {
        Self { repository, clock: Arc::new(SystemClock), config }
    }

    /// Replace the clock used to stamp new records
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Reconciled timeline for `[from, to)`, clipped to the window, latest
    /// entry first
    pub async fn visible_entries(
        &self,
        scope: &AccountScope,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<VisibleEntry>> {
        validate_window(from, to, &self.config)?;
        self.reconciled_window(scope, from, to).await
    }

    /// Fetch, reconcile and clip without the window length check. Reports
    /// use this after rounding a checked window out to period boundaries.
    pub(crate) async fn reconciled_window(
        &self,
        scope: &AccountScope,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<VisibleEntry>> {
        let records = self
            .repository
            .fetch_records_intersecting_window(scope, from, to)
            .await
            .inspect_err(|err| warn!(account = %scope, error = err.error_label(), "Failed to fetch time blocks: {err}"))?;
        let outcome = reconcile_validated(records)
            .inspect_err(|err| warn!(account = %scope, error = err.error_label(), "Rejected stored time blocks: {err}"))?;
        debug!(
            account = %scope,
            input_records = outcome.input_records,
            undone = outcome.undone,
            dropped = outcome.dropped,
            deletions_removed = outcome.deletions_removed,
            anomalies = outcome.anomalies,
            visible = outcome.entries.len(),
            "Reconciled timeline"
        );

        Ok(clip_to_window(outcome.entries, from, to))
    }

    /// Untracked stretches of `[from, to)` at least `min_gap_minutes` long
    pub async fn gaps(&self, scope: &AccountScope, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Gap>> {
        let entries = self.visible_entries(scope, from, to).await?;
        Ok(find_gaps(&entries, from, to, self.config.min_gap()))
    }

    /// Log an activity over `[from, to)`
    pub async fn record(
        &self,
        scope: &AccountScope,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        entry_text: impl Into<String> + Send,
    ) -> Result<TimeBlockRecord> {
        self.append(scope, NewTimeBlock::entry(from, to, entry_text)).await
    }

    /// Erase `[from, to)` from the visible timeline
    pub async fn delete_range(
        &self,
        scope: &AccountScope,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<TimeBlockRecord> {
        self.append(scope, NewTimeBlock::deletion(from, to)).await
    }

    /// Cancel the effect of record `target_id`
    ///
    /// # Errors
    /// `NotFound` when the account has no such record.
    pub async fn undo(&self, scope: &AccountScope, target_id: Uuid) -> Result<TimeBlockRecord> {
        let target = self
            .repository
            .find_record(scope, target_id)
            .await?
            .ok_or_else(|| TallylineError::NotFound(format!("time block {target_id}")))?;
        self.append(scope, NewTimeBlock::undo(&target)).await
    }

    async fn append(&self, scope: &AccountScope, block: NewTimeBlock) -> Result<TimeBlockRecord> {
        let record = block.into_record(self.clock.as_ref())?;
        self.repository.insert_record(scope, record.clone()).await?;
        info!(account = %scope, record_id = %record.id, is_deletion = record.is_deletion, is_undo = record.is_undo(), "Appended time block");
        Ok(record)
    }
}
