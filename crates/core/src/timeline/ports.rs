//! Port interfaces for the time-block log

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tallyline_domain::{AccountScope, Result, TimeBlockRecord};
use uuid::Uuid;

/// Storage for an account's append-only record log
#[async_trait]
pub trait TimeBlockRepository: Send + Sync {
    /// Every record whose range intersects `[from, to)`.
    ///
    /// Implementations must also return undo records targeting any returned
    /// record, and the targets of any returned undo, even when those fall
    /// outside the window.
    async fn fetch_records_intersecting_window(
        &self,
        scope: &AccountScope,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TimeBlockRecord>>;

    /// Append a record
    async fn insert_record(&self, scope: &AccountScope, record: TimeBlockRecord) -> Result<()>;

    /// Look up one record by id
    async fn find_record(&self, scope: &AccountScope, id: Uuid) -> Result<Option<TimeBlockRecord>>;
}
