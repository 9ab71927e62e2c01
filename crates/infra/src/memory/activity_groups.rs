use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tallyline_core::{ActivityGroupRepository, ActivityHierarchy};
use tallyline_domain::{AccountScope, ActivityGroupNode, Result, TallylineError};
use tracing::info;
use uuid::Uuid;

/// Activity groups per account
#[derive(Debug, Clone, Default)]
pub struct MemoryActivityGroupStore {
    groups: Arc<RwLock<HashMap<AccountScope, Vec<ActivityGroupNode>>>>,
}

impl MemoryActivityGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every group of `scope`
    pub fn replace_all(&self, scope: &AccountScope, groups: Vec<ActivityGroupNode>) {
        self.groups.write().insert(scope.clone(), groups);
    }

    /// Insert a group or update the one with the same id.
    ///
    /// # Errors
    /// `InvalidInput` when the new parent would make the group its own
    /// ancestor.
    pub fn upsert(&self, scope: &AccountScope, group: ActivityGroupNode) -> Result<()> {
        let mut all = self.groups.write();
        let groups = all.entry(scope.clone()).or_default();

        let hierarchy = ActivityHierarchy::build(groups.clone());
        if hierarchy.would_create_cycle(group.id, group.parent_id) {
            return Err(TallylineError::InvalidInput(format!(
                "moving activity group {} under {:?} would create a cycle",
                group.id, group.parent_id
            )));
        }

        match groups.iter_mut().find(|existing| existing.id == group.id) {
            Some(existing) => *existing = group,
            None => groups.push(group),
        }
        Ok(())
    }

    /// Remove a group. Its children become roots.
    pub fn remove(&self, scope: &AccountScope, group_id: Uuid) -> bool {
        let mut all = self.groups.write();
        let Some(groups) = all.get_mut(scope) else { return false };
        let before = groups.len();
        groups.retain(|group| group.id != group_id);
        let removed = groups.len() != before;
        if removed {
            for group in groups.iter_mut().filter(|group| group.parent_id == Some(group_id)) {
                group.parent_id = None;
            }
            info!(account = %scope, group_id = %group_id, "Removed activity group");
        }
        removed
    }
}

#[async_trait]
impl ActivityGroupRepository for MemoryActivityGroupStore {
    async fn fetch_groups(&self, scope: &AccountScope) -> Result<Vec<ActivityGroupNode>> {
        Ok(self.groups.read().get(scope).cloned().unwrap_or_default())
    }
}
