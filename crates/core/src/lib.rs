//! # Tallyline Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Period structures for day/week/month/custom reports
//! - The timeline reconciler and coverage queries
//! - Activity and aggregation hierarchies
//! - Port interfaces (traits) and the services built on them
//!
//! ## Architecture Principles
//! - Only depends on `tallyline-common` and `tallyline-domain`
//! - No database, HTTP, or platform code
//! - All storage access via traits

pub mod activity;
pub mod aggregation;
pub mod period;
pub mod report;
pub mod timeline;
pub mod validation;

// Re-export specific items to avoid ambiguity
pub use activity::{ActivityGroupRepository, ActivityHierarchy, HierarchyNode, HierarchyNodeKind};
pub use aggregation::AggregationHierarchy;
pub use period::{build_period_structure, CustomPeriods, DailyPeriods, MonthlyPeriods, PeriodStructure, WeeklyPeriods};
pub use report::{aggregate_entries, ReportService};
pub use timeline::{
    clip_to_window, entry_at, find_gaps, reconcile, reconcile_validated, reconcile_with_stats, Gap, NewTimeBlock,
    ReconcileOutcome, TimeBlockRepository, TimelineService,
};
pub use validation::{validate_record, validate_records, validate_window};
