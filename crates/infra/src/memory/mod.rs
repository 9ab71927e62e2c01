//! In-memory implementations of the core storage ports
//!
//! Stand-ins for a real persistence layer: embedding hosts, demos and
//! tests use them directly. State sits behind `Arc<RwLock<..>>` so clones
//! share one store.

mod activity_groups;
mod time_blocks;

pub use activity_groups::MemoryActivityGroupStore;
pub use time_blocks::MemoryTimeBlockStore;
