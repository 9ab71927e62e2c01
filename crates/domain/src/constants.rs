//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Reserved entry text carried by deletion records. Never shown to users.
pub const DELETION_LABEL: &str = "__deleted__";

// Aggregation node key prefixes
pub const GROUP_KEY_PREFIX: &str = "id|";
pub const NAME_KEY_PREFIX: &str = "name|";

// Report window limits
pub const DEFAULT_MAX_WINDOW_DAYS: u32 = 400;
pub const DEFAULT_MIN_GAP_MINUTES: u32 = 1;
pub const DEFAULT_TIMEZONE: &str = "UTC";

// Ingestion limits
pub const MAX_ENTRY_TEXT_LENGTH: usize = 500;
