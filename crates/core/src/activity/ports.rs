//! Port interfaces for activity groups

use async_trait::async_trait;
use tallyline_domain::{AccountScope, ActivityGroupNode, Result};

/// Storage for an account's activity groups
#[async_trait]
pub trait ActivityGroupRepository: Send + Sync {
    /// All groups of the account as a flat list
    async fn fetch_groups(&self, scope: &AccountScope) -> Result<Vec<ActivityGroupNode>>;
}
