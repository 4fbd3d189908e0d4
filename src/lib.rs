//! Composable hierarchy engine.
//!
//! Leaf and container nodes live in one arena-backed [`domain::Hierarchy`] and
//! share a single operation contract: performing an operation on any node runs
//! it on every leaf beneath, in pre-order and insertion order, and collects
//! every result, failures included.
//!
//! ```
//! use hierarchy::catalogue::staff::Role;
//! use hierarchy::catalogue::Describe;
//! use hierarchy::domain::Hierarchy;
//!
//! let mut h = Hierarchy::new();
//! let company = h.new_container("Company");
//! let dept = h.new_container("Dept");
//! let alice = h.new_leaf("Alice", Role::Developer);
//! let bob = h.new_leaf("Bob", Role::Designer);
//! h.attach(dept, alice)?;
//! h.attach(dept, bob)?;
//! h.attach(company, dept)?;
//!
//! let lines = h.perform(company, &Describe)?.into_result()?;
//! assert_eq!(lines, vec!["Developer: Alice", "Designer: Bob"]);
//! # Ok::<(), hierarchy::domain::HierarchyError>(())
//! ```

pub mod catalogue;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    Capability, Hierarchy, HierarchyError, HierarchyResult, Node, NodeId, NodeKind, NodeSpec,
    Outcome, Outcomes, TreeRender,
};
