//! Property tests for the timeline reconciler over seeded random logs

mod support;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use support::records::{coverage, minute, oracle, random_records};
use tallyline_core::{reconcile, reconcile_validated, reconcile_with_stats, NewTimeBlock};
use tallyline_domain::{TimeBlockRecord, VisibleEntry};
use uuid::Uuid;

const SEEDS: u64 = 200;

fn assert_ordered_without_overlap(entries: &[VisibleEntry]) {
    for entry in entries {
        assert!(entry.from_time < entry.to_time, "empty entry {entry:?}");
    }
    for pair in entries.windows(2) {
        assert!(pair[0].from_time >= pair[1].to_time, "entries out of order or overlapping: {pair:?}");
    }
}

#[test]
fn test_output_is_ordered_and_non_overlapping() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let entries = reconcile(random_records(&mut rng, 40));
        assert_ordered_without_overlap(&entries);
    }
}

#[test]
fn test_latest_record_owns_every_minute() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let records = random_records(&mut rng, 40);
        let expected = oracle(&records);
        let entries = reconcile(records);
        assert_eq!(coverage(&entries), expected, "seed {seed}");
    }
}

#[test]
fn test_input_order_does_not_matter() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let records = random_records(&mut rng, 30);
        let baseline = reconcile(records.clone());

        let mut shuffled = records;
        shuffled.shuffle(&mut rng);
        assert_eq!(reconcile(shuffled), baseline, "seed {seed}");
    }
}

#[test]
fn test_deletions_never_visible() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = reconcile_with_stats(random_records(&mut rng, 40));
        assert!(outcome.entries.iter().all(|entry| !entry.is_deletion));
        assert_eq!(outcome.input_records, 40);
    }
}

#[test]
fn test_undo_cancels_exactly_its_target() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let records: Vec<TimeBlockRecord> =
            random_records(&mut rng, 25).into_iter().filter(|record| record.undo_target_id.is_none()).collect();
        let target = records.choose(&mut rng).unwrap().clone();

        let undo = TimeBlockRecord {
            id: Uuid::from_u128(u128::MAX),
            created_at: records.iter().map(|r| r.created_at).max().unwrap() + chrono::Duration::seconds(1),
            undo_target_id: Some(target.id),
            ..target.clone()
        };
        let mut with_undo = records.clone();
        with_undo.push(undo);
        let without_target: Vec<TimeBlockRecord> =
            records.into_iter().filter(|record| record.id != target.id).collect();

        let outcome = reconcile_with_stats(with_undo);
        assert_eq!(outcome.undone, 1, "seed {seed}");
        assert_eq!(outcome.entries, reconcile(without_target), "seed {seed}");
    }
}

#[test]
fn test_valid_generated_logs_pass_validation() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let records = random_records(&mut rng, 40);
        let expected = reconcile(records.clone());
        assert_eq!(reconcile_validated(records).unwrap().entries, expected);
    }
}

#[test]
fn test_overlapping_edit_scenario() {
    let clock = tallyline_common::time::MockClock::ticking(minute(600), chrono::Duration::seconds(1));
    let first = NewTimeBlock::entry(minute(60), minute(75), "x").into_record(&clock).unwrap();
    let second = NewTimeBlock::entry(minute(65), minute(80), "y").into_record(&clock).unwrap();

    let entries = reconcile(vec![second.clone(), first.clone()]);
    let spans: Vec<_> = entries.iter().map(|e| (e.id, e.from_time, e.to_time)).collect();
    assert_eq!(spans, vec![(second.id, minute(65), minute(80)), (first.id, minute(60), minute(65))]);
}
