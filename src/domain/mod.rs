//! Domain layer: node model and hierarchy engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod engine;
pub mod error;
pub mod node;
pub mod render;

pub use arena::{Hierarchy, PostOrderIterator, PreOrderIterator};
pub use engine::{Capability, Outcome, Outcomes};
pub use error::{HierarchyError, HierarchyResult};
pub use node::{Node, NodeId, NodeKind, NodeSpec};
pub use render::{TreeRender, RENDER_DEPTH_LIMIT};
