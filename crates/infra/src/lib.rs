//! # Tallyline Infrastructure
//!
//! Infrastructure implementations for Tallyline.
//!
//! This crate contains:
//! - Configuration loading (environment, JSON/TOML files)
//! - Tracing subscriber setup
//! - In-memory implementations of the core storage ports
//! - Report export
//!
//! ## Architecture
//! - Implements traits defined in `tallyline-core`
//! - Depends on `tallyline-domain` and `tallyline-core`

pub mod config;
pub mod export;
pub mod memory;
pub mod observability;

// Re-export commonly used items
pub use export::{export_report, render_outline, render_report, ExportableReport, ReportFormat};
pub use memory::{MemoryActivityGroupStore, MemoryTimeBlockStore};
pub use observability::init_tracing;
