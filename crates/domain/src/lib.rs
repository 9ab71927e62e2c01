//! # Tallyline Domain
//!
//! Business domain types and models for Tallyline.
//!
//! This crate contains:
//! - Raw time-block records and reconciled visible entries
//! - Activity groups and the aggregation wire types
//! - Domain error types and Result definitions
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - No dependencies on other Tallyline crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
