//! Activity groups arranged as a forest

pub mod hierarchy;
pub mod ports;

pub use hierarchy::{ActivityHierarchy, HierarchyNode, HierarchyNodeKind};
pub use ports::ActivityGroupRepository;
