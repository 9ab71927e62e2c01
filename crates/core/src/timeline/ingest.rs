//! Builders for records about to be appended to the log

use chrono::{DateTime, Duration, Utc};
use tallyline_common::time::Clock;
use tallyline_domain::constants::DELETION_LABEL;
use tallyline_domain::{Result, TimeBlockRecord};
use uuid::Uuid;

use crate::validation::validate_record;

/// A record that has not been stamped yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeBlock {
    pub from_time: DateTime<Utc>,
    pub to_time: DateTime<Utc>,
    pub entry_text: String,
    pub undo_target_id: Option<Uuid>,
    pub is_deletion: bool,
}

impl NewTimeBlock {
    /// Plain activity entry over `[from, to)`
    pub fn entry(from: DateTime<Utc>, to: DateTime<Utc>, entry_text: impl Into<String>) -> Self {
        Self { from_time: from, to_time: to, entry_text: entry_text.into(), undo_target_id: None, is_deletion: false }
    }

    /// Plain activity entry starting at `from` and lasting `duration`
    pub fn entry_for(from: DateTime<Utc>, duration: Duration, entry_text: impl Into<String>) -> Self {
        Self::entry(from, from + duration, entry_text)
    }

    /// Erase whatever older records say about `[from, to)`
    pub fn deletion(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { is_deletion: true, ..Self::entry(from, to, DELETION_LABEL) }
    }

    /// Cancel `target`. The undo carries the target's range and text so that
    /// window queries which find the target also find its undo.
    pub fn undo(target: &TimeBlockRecord) -> Self {
        Self {
            from_time: target.from_time,
            to_time: target.to_time,
            entry_text: target.entry_text.clone(),
            undo_target_id: Some(target.id),
            is_deletion: target.is_deletion,
        }
    }

    /// Stamp with a fresh id and the clock's current time.
    ///
    /// # Errors
    /// `InvalidInput` when the resulting record is malformed.
    pub fn into_record(self, clock: &dyn Clock) -> Result<TimeBlockRecord> {
        let record = TimeBlockRecord {
            id: Uuid::now_v7(),
            from_time: self.from_time,
            to_time: self.to_time,
            entry_text: self.entry_text,
            created_at: clock.now(),
            undo_target_id: self.undo_target_id,
            is_deletion: self.is_deletion,
        };
        validate_record(&record)?;
        Ok(record)
    }
}
