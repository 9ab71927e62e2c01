//! Time utilities and abstractions
//!
//! - **[`clock`]**: wall-clock abstraction so record stamping is testable
//! - **[`format`]**: human-readable formatting of tracked durations
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Duration;
//! use tallyline_common::time::{format_duration, Clock, SystemClock};
//!
//! assert_eq!(format_duration(Duration::minutes(95)), "1h 35m");
//!
//! let stamped = SystemClock.now();
//! assert!(stamped.timestamp() > 0);
//! ```

pub mod clock;
pub mod format;

// Re-export commonly used items
#[cfg(feature = "runtime")]
pub use clock::MockClock;
pub use clock::{Clock, SystemClock};
pub use format::{format_clock, format_duration};
