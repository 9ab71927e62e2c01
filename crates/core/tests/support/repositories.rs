//! Mock repository implementations for testing
//!
//! Provides in-memory mocks for the core repository ports, enabling
//! deterministic tests without a storage layer.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tallyline_core::{ActivityGroupRepository, TimeBlockRepository};
use tallyline_domain::{AccountScope, ActivityGroupNode, Result as DomainResult, TimeBlockRecord};
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-memory mock for `TimeBlockRepository`.
///
/// Ignores the account scope; every test runs against a single log.
#[derive(Default, Clone)]
pub struct MockTimeBlockRepository {
    records: Arc<Mutex<Vec<TimeBlockRecord>>>,
}

impl MockTimeBlockRepository {
    /// Create a new mock seeded with the provided records.
    pub fn new(records: Vec<TimeBlockRecord>) -> Self {
        Self { records: Arc::new(Mutex::new(records)) }
    }

    /// Snapshot of everything inserted so far.
    pub async fn records(&self) -> Vec<TimeBlockRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl TimeBlockRepository for MockTimeBlockRepository {
    async fn fetch_records_intersecting_window(
        &self,
        _scope: &AccountScope,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<TimeBlockRecord>> {
        Ok(self.records.lock().await.iter().filter(|record| record.overlaps(from, to)).cloned().collect())
    }

    async fn insert_record(&self, _scope: &AccountScope, record: TimeBlockRecord) -> DomainResult<()> {
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn find_record(&self, _scope: &AccountScope, id: Uuid) -> DomainResult<Option<TimeBlockRecord>> {
        Ok(self.records.lock().await.iter().find(|record| record.id == id).cloned())
    }
}

/// In-memory mock for `ActivityGroupRepository`.
#[derive(Default, Clone)]
pub struct MockActivityGroupRepository {
    groups: Arc<Vec<ActivityGroupNode>>,
}

impl MockActivityGroupRepository {
    /// Create a new mock seeded with the provided groups.
    pub fn new(groups: Vec<ActivityGroupNode>) -> Self {
        Self { groups: Arc::new(groups) }
    }

    /// Convenience helper for adding a single group to the mock.
    pub fn with_group(mut self, group: ActivityGroupNode) -> Self {
        Arc::make_mut(&mut self.groups).push(group);
        self
    }
}

#[async_trait]
impl ActivityGroupRepository for MockActivityGroupRepository {
    async fn fetch_groups(&self, _scope: &AccountScope) -> DomainResult<Vec<ActivityGroupNode>> {
        Ok(self.groups.as_ref().clone())
    }
}
