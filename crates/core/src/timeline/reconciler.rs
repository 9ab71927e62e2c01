//! Interval sweep that turns the raw record log into the visible timeline
//!
//! Records are assertions about ranges of time. Where they overlap, the one
//! with the later `created_at` owns the contested stretch. Undo records
//! cancel their target outright; deletion records take part in the sweep
//! like any other record and are dropped from the final timeline, leaving a
//! hole where they won.
//!
//! # Algorithm
//! 1. Stable sort by `to_time` descending, then `created_at` descending.
//! 2. Work out which records are cancelled by an undo, newest undo first.
//!    An undo that is itself undone cancels nothing, which makes redo work.
//! 3. Place each remaining record into a list of non-overlapping entries,
//!    kept ordered by `to_time` descending. Placing walks the entries the
//!    candidate intersects, from its end towards its start, and resolves
//!    each one: the newer of the two keeps the overlap.
//! 4. Drop deletion entries.

use ahash::AHashSet as HashSet;
use tallyline_domain::{Result, TimeBlockRecord, VisibleEntry};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::validation::validate_records;

/// Timeline produced by a sweep, with counters describing what happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Visible entries, latest `to_time` first
    pub entries: Vec<VisibleEntry>,
    pub input_records: usize,
    /// Records cancelled by an effective undo
    pub undone: usize,
    /// Records left with no visible time at all
    pub dropped: usize,
    /// Deletion entries removed after the sweep
    pub deletions_removed: usize,
    /// Inconsistencies found during the sweep (tied `created_at`,
    /// malformed placed entries)
    pub anomalies: usize,
}

/// Reconcile `records` into a non-overlapping timeline.
///
/// Input order does not matter. Undo records whose target is absent are
/// ignored.
pub fn reconcile(records: Vec<TimeBlockRecord>) -> Vec<VisibleEntry> {
    reconcile_with_stats(records).entries
}

/// Like [`reconcile`], also reporting sweep statistics
pub fn reconcile_with_stats(mut records: Vec<TimeBlockRecord>) -> ReconcileOutcome {
    let input_records = records.len();
    records.sort_by(|a, b| {
        b.to_time.cmp(&a.to_time).then_with(|| b.created_at.cmp(&a.created_at))
    });

    let cancelled = effective_undo_targets(&records);
    let mut sweep = Sweep::with_capacity(records.len());
    let mut undone = 0;

    for record in &records {
        if record.is_undo() {
            continue;
        }
        if cancelled.contains(&record.id) {
            undone += 1;
            continue;
        }
        if record.from_time >= record.to_time {
            warn!(record_id = %record.id, from = %record.from_time, to = %record.to_time, "Skipping record with empty range");
            sweep.anomalies += 1;
            continue;
        }
        sweep.place(VisibleEntry::from_record(record));
    }

    let Sweep { mut placed, dropped, anomalies } = sweep;
    let before = placed.len();
    placed.retain(|entry| !entry.is_deletion);
    let deletions_removed = before - placed.len();

    ReconcileOutcome { entries: placed, input_records, undone, dropped, deletions_removed, anomalies }
}

/// Validate every record, then reconcile.
///
/// # Errors
/// `InvalidInput` when any record is malformed.
pub fn reconcile_validated(records: Vec<TimeBlockRecord>) -> Result<ReconcileOutcome> {
    validate_records(&records)?;
    Ok(reconcile_with_stats(records))
}

/// Ids cancelled by an undo that is not itself cancelled
fn effective_undo_targets(records: &[TimeBlockRecord]) -> HashSet<Uuid> {
    let mut undos: Vec<&TimeBlockRecord> = records.iter().filter(|r| r.is_undo()).collect();
    undos.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut cancelled = HashSet::with_capacity(undos.len());
    for undo in undos {
        if cancelled.contains(&undo.id) {
            continue;
        }
        if let Some(target) = undo.undo_target_id {
            cancelled.insert(target);
        }
    }
    cancelled
}

struct Sweep {
    /// Non-overlapping, ordered by `to_time` descending
    placed: Vec<VisibleEntry>,
    dropped: usize,
    anomalies: usize,
}

impl Sweep {
    fn with_capacity(capacity: usize) -> Self {
        Self { placed: Vec::with_capacity(capacity), dropped: 0, anomalies: 0 }
    }

    fn place(&mut self, candidate: VisibleEntry) {
        match self.placed.last() {
            Some(last) if candidate.to_time > last.from_time => {}
            _ => {
                self.placed.push(candidate);
                return;
            }
        }

        // First entry that starts before the candidate ends. Everything from
        // here on is at or below the candidate's end.
        let mut i = self.placed.len();
        while i > 0 && self.placed[i - 1].from_time < candidate.to_time {
            i -= 1;
        }

        let floor = candidate.from_time;
        let mut cursor = candidate.to_time;
        let mut piece_top = candidate.to_time;
        let mut kept_any = false;

        while i < self.placed.len() && cursor > floor {
            let (e_from, e_to, e_created, e_id) = {
                let e = &self.placed[i];
                (e.from_time, e.to_time, e.created_at, e.id)
            };

            if e_to <= floor {
                break;
            }
            if e_from >= cursor || e_from >= e_to {
                warn!(entry_id = %e_id, candidate_id = %candidate.id, "Placed entry out of order during sweep");
                self.anomalies += 1;
                i += 1;
                continue;
            }

            cursor = cursor.min(e_to);

            if e_created >= candidate.created_at {
                if e_created == candidate.created_at {
                    warn!(entry_id = %e_id, candidate_id = %candidate.id, created_at = %e_created, "Overlapping records share created_at; keeping the one placed first");
                    self.anomalies += 1;
                }
                if e_from > floor && e_to < candidate.to_time {
                    warn!(entry_id = %e_id, candidate_id = %candidate.id, "Newer entry sits inside older record; splitting the older record around it");
                }
                if piece_top > cursor {
                    self.placed.insert(i, candidate.with_range(cursor, piece_top));
                    kept_any = true;
                    i += 1;
                }
                cursor = e_from.max(floor);
                piece_top = cursor;
                i += 1;
                continue;
            }

            let covers_start = floor <= e_from;
            let covers_end = cursor >= e_to;
            match (covers_start, covers_end) {
                (true, true) => {
                    self.placed.remove(i);
                    cursor = e_from;
                }
                (true, false) => {
                    self.placed[i].from_time = cursor;
                    cursor = e_from;
                    i += 1;
                }
                (false, false) => {
                    let earlier = self.placed[i].with_range(e_from, floor);
                    self.placed[i].from_time = cursor;
                    self.placed.insert(i + 1, candidate.with_range(floor, piece_top));
                    self.placed.insert(i + 2, earlier);
                    return;
                }
                (false, true) => {
                    self.placed[i].to_time = floor;
                    self.placed.insert(i, candidate.with_range(floor, piece_top));
                    return;
                }
            }
        }

        if piece_top > floor {
            self.placed.insert(i, candidate.with_range(floor, piece_top));
        } else if !kept_any {
            debug!(record_id = %candidate.id, "Record fully overwritten by newer records");
            self.dropped += 1;
        }
    }
}
