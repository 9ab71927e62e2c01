//! Time-block records and visible timeline entries
//!
//! A [`TimeBlockRecord`] is an immutable assertion appended to an account's
//! log: "between `from_time` and `to_time` I was doing `entry_text`". Edits
//! are new records with a later `created_at`; deletions are records with
//! `is_deletion` set; undos reference an earlier record through
//! `undo_target_id`.
//!
//! A [`VisibleEntry`] is one slice of the reconciled timeline. All ranges are
//! half-open: `[from_time, to_time)`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use crate::constants::DELETION_LABEL;

/// Account whose timeline is being queried
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountScope(pub String);

impl AccountScope {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self(account_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw time-block record, as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct TimeBlockRecord {
    pub id: Uuid,
    pub from_time: DateTime<Utc>,
    pub to_time: DateTime<Utc>,
    pub entry_text: String,
    /// Insertion timestamp; the later record wins contested time
    pub created_at: DateTime<Utc>,
    /// Set on undo records: the record whose effect is cancelled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undo_target_id: Option<Uuid>,
    #[serde(default)]
    pub is_deletion: bool,
}

impl TimeBlockRecord {
    pub fn duration(&self) -> Duration {
        self.to_time - self.from_time
    }

    /// Undo records carry no visible effect of their own
    pub fn is_undo(&self) -> bool {
        self.undo_target_id.is_some()
    }

    /// Whether `[from_time, to_time)` intersects `[from, to)`
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.from_time < to && self.to_time > from
    }

    /// Whether the entry text is the reserved deletion label
    pub fn has_deletion_label(&self) -> bool {
        self.entry_text == DELETION_LABEL
    }
}

/// One slice of the reconciled, non-overlapping timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct VisibleEntry {
    /// Id of the record this slice came from. A record split by a newer
    /// one yields several slices sharing the id.
    pub id: Uuid,
    pub from_time: DateTime<Utc>,
    pub to_time: DateTime<Utc>,
    pub entry_text: String,
    pub created_at: DateTime<Utc>,
    pub is_deletion: bool,
}

impl VisibleEntry {
    /// Slice covering the whole range of `record`
    pub fn from_record(record: &TimeBlockRecord) -> Self {
        Self {
            id: record.id,
            from_time: record.from_time,
            to_time: record.from_time + record.duration(),
            entry_text: record.entry_text.clone(),
            created_at: record.created_at,
            is_deletion: record.is_deletion,
        }
    }

    pub fn duration(&self) -> Duration {
        self.to_time - self.from_time
    }

    /// Whether `[from_time, to_time)` intersects `[from, to)`
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.from_time < to && self.to_time > from
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from_time <= instant && instant < self.to_time
    }

    /// Copy of this slice over `[from, to)`
    pub fn with_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from_time: from, to_time: to, ..self.clone() }
    }

    /// The part of this slice inside `[from, to)`, if any
    pub fn clipped_to(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Option<Self> {
        let start = self.from_time.max(from);
        let end = self.to_time.min(to);
        (start < end).then(|| self.with_range(start, end))
    }
}
