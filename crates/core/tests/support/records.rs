//! Seeded random record logs and a brute-force timeline oracle
//!
//! Records are laid on a one-minute grid so the oracle can resolve every
//! minute independently: the newest live record covering a minute owns it.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use tallyline_domain::constants::DELETION_LABEL;
use tallyline_domain::{TimeBlockRecord, VisibleEntry};
use uuid::Uuid;

/// Length of the generated timeline, in minutes
pub const HORIZON_MINUTES: i64 = 240;

const TEXTS: [&str; 5] = ["coding", "email", "meeting", "lunch", "review"];

pub fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 15, 8, 0, 0).unwrap()
}

pub fn minute(offset: i64) -> DateTime<Utc> {
    origin() + Duration::minutes(offset)
}

/// Log of `count` records with distinct `created_at`, in creation order.
/// Roughly one in ten is an undo (sometimes of another undo) and one in
/// eight a deletion.
pub fn random_records(rng: &mut StdRng, count: usize) -> Vec<TimeBlockRecord> {
    let mut records: Vec<TimeBlockRecord> = Vec::with_capacity(count);
    for seq in 0..count {
        let created_at = origin() + Duration::days(1) + Duration::seconds(seq as i64);
        let id = Uuid::from_u128(seq as u128 + 1);

        if !records.is_empty() && rng.gen_bool(0.1) {
            let target = records[rng.gen_range(0..records.len())].clone();
            records.push(TimeBlockRecord { id, created_at, undo_target_id: Some(target.id), ..target });
            continue;
        }

        let start = rng.gen_range(0..HORIZON_MINUTES - 1);
        let length = rng.gen_range(1..=60).min(HORIZON_MINUTES - start);
        let is_deletion = rng.gen_bool(0.125);
        let entry_text =
            if is_deletion { DELETION_LABEL.to_string() } else { TEXTS[rng.gen_range(0..TEXTS.len())].to_string() };

        records.push(TimeBlockRecord {
            id,
            from_time: minute(start),
            to_time: minute(start + length),
            entry_text,
            created_at,
            undo_target_id: None,
            is_deletion,
        });
    }
    records
}

/// Ids cancelled by an undo that is not itself cancelled
fn cancelled_ids(records: &[TimeBlockRecord]) -> HashSet<Uuid> {
    let mut undos: Vec<&TimeBlockRecord> = records.iter().filter(|r| r.undo_target_id.is_some()).collect();
    undos.sort_by_key(|r| std::cmp::Reverse(r.created_at));
    let mut cancelled = HashSet::new();
    for undo in undos {
        if !cancelled.contains(&undo.id) {
            cancelled.extend(undo.undo_target_id);
        }
    }
    cancelled
}

/// Owner of every covered minute according to the latest-wins rule
pub fn oracle(records: &[TimeBlockRecord]) -> BTreeMap<i64, Uuid> {
    let cancelled = cancelled_ids(records);
    let live: Vec<&TimeBlockRecord> =
        records.iter().filter(|r| r.undo_target_id.is_none() && !cancelled.contains(&r.id)).collect();

    let mut owners = BTreeMap::new();
    for m in 0..HORIZON_MINUTES {
        let (start, end) = (minute(m), minute(m + 1));
        let winner = live.iter().filter(|r| r.from_time <= start && r.to_time >= end).max_by_key(|r| r.created_at);
        if let Some(winner) = winner {
            if !winner.is_deletion {
                owners.insert(m, winner.id);
            }
        }
    }
    owners
}

/// Owner of every minute covered by `entries`. Panics when two entries
/// claim the same minute.
pub fn coverage(entries: &[VisibleEntry]) -> BTreeMap<i64, Uuid> {
    let mut owners = BTreeMap::new();
    for entry in entries {
        let first = (entry.from_time - origin()).num_minutes();
        let last = (entry.to_time - origin()).num_minutes();
        for m in first..last {
            assert!(owners.insert(m, entry.id).is_none(), "minute {m} claimed twice");
        }
    }
    owners
}
