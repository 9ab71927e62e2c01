use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tallyline_core::TimeBlockRepository;
use tallyline_domain::{AccountScope, Result, TallylineError, TimeBlockRecord};
use tracing::debug;
use uuid::Uuid;

/// Append-only record log per account
#[derive(Debug, Clone, Default)]
pub struct MemoryTimeBlockStore {
    logs: Arc<RwLock<HashMap<AccountScope, Vec<TimeBlockRecord>>>>,
}

impl MemoryTimeBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored for `scope`
    pub fn len(&self, scope: &AccountScope) -> usize {
        self.logs.read().get(scope).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, scope: &AccountScope) -> bool {
        self.len(scope) == 0
    }
}

/// Records intersecting the window plus every record linked to one of them
/// through an undo, in either direction, transitively
fn window_with_undo_chains(log: &[TimeBlockRecord], from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<TimeBlockRecord> {
    let mut selected: HashSet<Uuid> = log.iter().filter(|r| r.overlaps(from, to)).map(|r| r.id).collect();

    loop {
        let before = selected.len();
        for record in log {
            let Some(target) = record.undo_target_id else { continue };
            if selected.contains(&record.id) {
                selected.insert(target);
            } else if selected.contains(&target) {
                selected.insert(record.id);
            }
        }
        if selected.len() == before {
            break;
        }
    }

    log.iter().filter(|r| selected.contains(&r.id)).cloned().collect()
}

#[async_trait]
impl TimeBlockRepository for MemoryTimeBlockStore {
    async fn fetch_records_intersecting_window(
        &self,
        scope: &AccountScope,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TimeBlockRecord>> {
        let logs = self.logs.read();
        let records = logs.get(scope).map(|log| window_with_undo_chains(log, from, to)).unwrap_or_default();
        debug!(account = %scope, fetched = records.len(), "Fetched records for window");
        Ok(records)
    }

    async fn insert_record(&self, scope: &AccountScope, record: TimeBlockRecord) -> Result<()> {
        let mut logs = self.logs.write();
        let log = logs.entry(scope.clone()).or_default();
        if log.iter().any(|existing| existing.id == record.id) {
            return Err(TallylineError::InvalidInput(format!("time block {} already exists", record.id)));
        }
        log.push(record);
        Ok(())
    }

    async fn find_record(&self, scope: &AccountScope, id: Uuid) -> Result<Option<TimeBlockRecord>> {
        Ok(self.logs.read().get(scope).and_then(|log| log.iter().find(|r| r.id == id).cloned()))
    }
}
