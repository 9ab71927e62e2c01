//! Input validation for timeline queries and ingested records
//!
//! Everything here runs before the reconciler sees any data. Failures are
//! reported as [`TallylineError::InvalidInput`] with every offending field
//! listed.

use chrono::{DateTime, Duration, Utc};
use tallyline_common::validation::{ValidationError, Validator};
use tallyline_domain::constants::{DELETION_LABEL, MAX_ENTRY_TEXT_LENGTH};
use tallyline_domain::{ReportConfig, Result, TallylineError, TimeBlockRecord};

fn into_domain(error: ValidationError) -> TallylineError {
    TallylineError::InvalidInput(error.to_string())
}

/// Whole days spanned by `span`, counting a partial day as one
fn window_days(span: Duration) -> i64 {
    let whole = span.num_days();
    if span > Duration::days(whole) {
        whole + 1
    } else {
        whole
    }
}

/// Check a query window against the configured limits.
///
/// # Errors
/// `InvalidInput` when `from >= to` or the window is longer than
/// `max_window_days`.
pub fn validate_window(from: DateTime<Utc>, to: DateTime<Utc>, config: &ReportConfig) -> Result<()> {
    let mut validator = Validator::new();
    validator.validate_before("window", from, to);
    if from < to {
        validator.validate_max("windowDays", window_days(to - from), i64::from(config.max_window_days));
    }
    validator.finalize().map_err(into_domain)
}

fn check_record(validator: &mut Validator, record: &TimeBlockRecord) {
    validator.validate_before("range", record.from_time, record.to_time);
    validator.validate_not_empty("entryText", &record.entry_text);
    validator.validate_max_len("entryText", &record.entry_text, MAX_ENTRY_TEXT_LENGTH);

    if record.is_deletion && !record.has_deletion_label() {
        validator.add_error("entryText", format!("deletion records must use the label {DELETION_LABEL}"));
    }
    if !record.is_deletion && record.has_deletion_label() {
        validator.add_error("entryText", format!("{DELETION_LABEL} is reserved for deletion records"));
    }
    if record.undo_target_id == Some(record.id) {
        validator.add_error("undoTargetId", "a record cannot undo itself");
    }
}

/// Check one record before it is stored.
///
/// # Errors
/// `InvalidInput` listing every malformed field.
pub fn validate_record(record: &TimeBlockRecord) -> Result<()> {
    let mut validator = Validator::new();
    check_record(&mut validator, record);
    validator.finalize().map_err(into_domain)
}

/// Check a fetched batch before reconciliation. Field paths carry the record
/// id so the offending row can be found.
///
/// # Errors
/// `InvalidInput` when any record is malformed.
pub fn validate_records(records: &[TimeBlockRecord]) -> Result<()> {
    let mut validator = Validator::new();
    for record in records {
        validator.validate_nested(record.id.to_string(), |v| check_record(v, record));
    }
    validator.finalize().map_err(into_domain)
}
