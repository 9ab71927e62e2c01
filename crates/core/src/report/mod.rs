//! Summary and totals reports over the reconciled timeline

pub mod service;

use tallyline_domain::{TimeTotals, VisibleEntry};
use tracing::debug;

use crate::aggregation::AggregationHierarchy;
use crate::period::PeriodStructure;

pub use service::ReportService;

/// Add every entry's time to the tree, in the period its start falls in.
///
/// Entries are clipped to the period window first; those left empty or
/// starting outside every period are skipped. Returns how many entries were
/// counted.
pub fn aggregate_entries<T: TimeTotals>(
    tree: &mut AggregationHierarchy<T>,
    entries: &[VisibleEntry],
    periods: &dyn PeriodStructure,
) -> usize {
    let mut counted = 0;
    for entry in entries {
        let Some(entry) = entry.clipped_to(periods.from_time(), periods.to_time()) else {
            debug!(entry_id = %entry.id, "Entry outside report window; skipping");
            continue;
        };
        let Some(period_index) = periods.period_index_checked(entry.from_time) else {
            debug!(entry_id = %entry.id, from = %entry.from_time, "Entry start has no period; skipping");
            continue;
        };
        if tree.add_time(&entry.entry_text, period_index, entry.duration()) {
            counted += 1;
        } else {
            debug!(entry_id = %entry.id, period_index, "Period index beyond tree slots; skipping");
        }
    }
    counted
}
