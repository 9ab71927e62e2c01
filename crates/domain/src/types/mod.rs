//! Domain types and models
//!
//! - [`time_block`]: raw time-block records and reconciled visible entries
//! - [`activity`]: user-defined activity groups
//! - [`period`]: report period groupings
//! - [`aggregation`]: aggregation tree nodes and report payloads (the wire
//!   contract consumed by the dashboard summary table)

pub mod activity;
pub mod aggregation;
pub mod period;
pub mod time_block;

pub use activity::ActivityGroupNode;
pub use aggregation::{
    AggregationNode, GrandTotal, PeriodTotals, SummaryReport, TimeTotals, TotalsReport,
};
pub use period::PeriodGrouping;
pub use time_block::{AccountScope, TimeBlockRecord, VisibleEntry};
