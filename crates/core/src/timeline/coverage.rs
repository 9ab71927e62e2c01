//! Window clipping, gap detection and point lookup over a reconciled timeline

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tallyline_domain::VisibleEntry;

/// Untracked stretch of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    pub from_time: DateTime<Utc>,
    pub to_time: DateTime<Utc>,
}

impl Gap {
    pub fn duration(&self) -> Duration {
        self.to_time - self.from_time
    }
}

/// Clip entries to `[from, to)`, dropping those left empty. Order is kept.
pub fn clip_to_window(entries: Vec<VisibleEntry>, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<VisibleEntry> {
    entries
        .into_iter()
        .filter_map(|entry| {
            if entry.from_time >= from && entry.to_time <= to {
                Some(entry)
            } else {
                entry.clipped_to(from, to)
            }
        })
        .collect()
}

/// Stretches of `[from, to)` no entry covers, earliest first. Gaps shorter
/// than `min_gap` are left out.
pub fn find_gaps(entries: &[VisibleEntry], from: DateTime<Utc>, to: DateTime<Utc>, min_gap: Duration) -> Vec<Gap> {
    let mut covered: Vec<(DateTime<Utc>, DateTime<Utc>)> = entries
        .iter()
        .filter(|entry| entry.overlaps(from, to))
        .map(|entry| (entry.from_time.max(from), entry.to_time.min(to)))
        .collect();
    covered.sort_unstable();

    let mut gaps = Vec::new();
    let mut cursor = from;
    let mut push_gap = |start: DateTime<Utc>, end: DateTime<Utc>| {
        if end > start && end - start >= min_gap {
            gaps.push(Gap { from_time: start, to_time: end });
        }
    };

    for (start, end) in covered {
        if start > cursor {
            push_gap(cursor, start);
        }
        cursor = cursor.max(end);
    }
    push_gap(cursor, to);

    gaps
}

/// Entry covering `instant`. Expects the reconciler's ordering (latest
/// `to_time` first, no overlaps).
pub fn entry_at(entries: &[VisibleEntry], instant: DateTime<Utc>) -> Option<&VisibleEntry> {
    let ending_after = entries.partition_point(|entry| entry.to_time > instant);
    ending_after.checked_sub(1).and_then(|idx| entries.get(idx)).filter(|entry| entry.contains(instant))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 19, hour, minute, 0).unwrap()
    }

    fn create_test_entry(from: DateTime<Utc>, to: DateTime<Utc>, text: &str) -> VisibleEntry {
        VisibleEntry {
            id: Uuid::new_v4(),
            from_time: from,
            to_time: to,
            entry_text: text.to_string(),
            created_at: to,
            is_deletion: false,
        }
    }

    fn create_test_timeline() -> Vec<VisibleEntry> {
        vec![
            create_test_entry(at(11, 0), at(12, 0), "c"),
            create_test_entry(at(10, 0), at(10, 30), "b"),
            create_test_entry(at(9, 0), at(10, 0), "a"),
        ]
    }

    #[test]
    fn test_clip_to_window() {
        let clipped = clip_to_window(create_test_timeline(), at(9, 30), at(11, 30));
        let ranges: Vec<_> = clipped.iter().map(|e| (e.from_time, e.to_time)).collect();
        assert_eq!(
            ranges,
            vec![(at(11, 0), at(11, 30)), (at(10, 0), at(10, 30)), (at(9, 30), at(10, 0))]
        );

        assert!(clip_to_window(create_test_timeline(), at(12, 0), at(13, 0)).is_empty());
    }

    #[test]
    fn test_find_gaps() {
        let gaps = find_gaps(&create_test_timeline(), at(8, 0), at(13, 0), Duration::minutes(1));
        assert_eq!(
            gaps,
            vec![
                Gap { from_time: at(8, 0), to_time: at(9, 0) },
                Gap { from_time: at(10, 30), to_time: at(11, 0) },
                Gap { from_time: at(12, 0), to_time: at(13, 0) },
            ]
        );
        assert_eq!(gaps[1].duration(), Duration::minutes(30));
    }

    #[test]
    fn test_short_gaps_filtered() {
        let gaps = find_gaps(&create_test_timeline(), at(9, 0), at(12, 0), Duration::minutes(45));
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_empty_timeline_is_one_gap() {
        let gaps = find_gaps(&[], at(9, 0), at(10, 0), Duration::minutes(1));
        assert_eq!(gaps, vec![Gap { from_time: at(9, 0), to_time: at(10, 0) }]);
    }

    #[test]
    fn test_entry_at() {
        let timeline = create_test_timeline();
        assert_eq!(entry_at(&timeline, at(9, 59)).map(|e| e.entry_text.as_str()), Some("a"));
        assert_eq!(entry_at(&timeline, at(10, 0)).map(|e| e.entry_text.as_str()), Some("b"));
        assert!(entry_at(&timeline, at(10, 45)).is_none());
        assert!(entry_at(&timeline, at(12, 0)).is_none());
        assert!(entry_at(&timeline, at(8, 0)).is_none());
    }
}
