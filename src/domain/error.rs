//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeId;

/// Domain errors represent violations of the tree invariants or failures
/// reported by a leaf payload.
///
/// Every mutation that returns one of these leaves the hierarchy unchanged.
#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("invalid node '{label}': {reason}")]
    InvalidNode { label: String, reason: String },

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("not a container: '{0}'")]
    NotAContainer(String),

    #[error("cycle detected: '{child}' is '{container}' or one of its ancestors")]
    CycleDetected { container: String, child: String },

    #[error("node already owned: '{child}' belongs to '{owner}'")]
    AlreadyOwned { child: String, owner: String },

    #[error("index {index} out of range for '{container}' with {len} children")]
    IndexOutOfRange {
        container: String,
        index: usize,
        len: usize,
    },

    #[error("maximum depth {max} exceeded: attaching would reach depth {depth}")]
    DepthExceeded { max: usize, depth: usize },

    #[error("leaf operation failed on '{label}': {source}")]
    LeafOperationFailed {
        label: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl HierarchyError {
    /// Wrap a payload error with the label of the leaf that produced it.
    pub fn leaf_failed(
        label: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::LeafOperationFailed {
            label: label.into(),
            source: source.into(),
        }
    }
}

/// Result type for hierarchy operations.
pub type HierarchyResult<T> = Result<T, HierarchyError>;
