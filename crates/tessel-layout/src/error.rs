//! Layout errors

use crate::NodeId;

/// Layout engine error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Out of memory: all {capacity} node slots are in use")]
    OutOfMemory { capacity: usize },

    #[error("Capacity {requested} exceeds the handle limit of {limit}")]
    CapacityExceeded { requested: usize, limit: usize },

    #[error("Invalid node: {0}")]
    InvalidNode(NodeId),

    #[error("Cycle detected: {new_parent} is {node} or one of its descendants")]
    CycleDetected { node: NodeId, new_parent: NodeId },
}

/// Result alias for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
