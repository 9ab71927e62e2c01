//! Reconciled timeline: the sweep, ingestion builders, coverage queries and
//! the service tying them to storage

pub mod coverage;
pub mod ingest;
pub mod ports;
pub mod reconciler;
pub mod service;

pub use coverage::{clip_to_window, entry_at, find_gaps, Gap};
pub use ingest::NewTimeBlock;
pub use ports::TimeBlockRepository;
pub use reconciler::{reconcile, reconcile_validated, reconcile_with_stats, ReconcileOutcome};
pub use service::TimelineService;
