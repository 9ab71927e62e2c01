//! Activity groups
//!
//! An activity group is a user-defined folder/category. Groups nest through
//! `parent_id` and may directly capture literal poll responses through
//! `match_response_text`. Child lists are not persisted; they are derived
//! when the hierarchy is built.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

/// A persisted activity group, as fetched for one poll/account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ActivityGroupNode {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    /// Literal response text this group aggregates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_response_text: Option<String>,
    /// Sibling ordering
    pub position: i32,
}

impl ActivityGroupNode {
    /// Create a root group that only acts as a folder
    pub fn folder(id: Uuid, name: impl Into<String>, position: i32) -> Self {
        Self { id, name: name.into(), parent_id: None, match_response_text: None, position }
    }

    /// Set the parent group
    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the literal response text this group captures
    pub fn matching(mut self, response_text: impl Into<String>) -> Self {
        self.match_response_text = Some(response_text.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
