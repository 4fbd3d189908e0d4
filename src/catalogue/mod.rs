//! Catalogue: toy payloads driven through the hierarchy engine
//!
//! Each module builds a small tree and supplies the leaf-level behavior for
//! the operations it understands.

pub mod coffee;
pub mod remote;
pub mod staff;

/// Operation asking a leaf to describe itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Describe;
