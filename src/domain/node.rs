//! Node model: the two node shapes and their construction.

use std::fmt;

use generational_arena::Index;

use crate::domain::error::{HierarchyError, HierarchyResult};

/// Handle to a node stored in a [`Hierarchy`](crate::domain::Hierarchy).
///
/// Handles are generational: once a node is discarded its handle goes stale
/// and is never reused for another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}.{}", slot, generation)
    }
}

/// The closed set of node shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<P> {
    /// Carries one irreducible unit of behavior.
    Leaf(P),
    /// Owns an ordered list of children and has no behavior of its own.
    Container,
}

/// Node stored in the hierarchy arena.
#[derive(Debug)]
pub struct Node<P> {
    label: String,
    kind: NodeKind<P>,
    /// Owning container, None for detached nodes (roots)
    pub(crate) parent: Option<NodeId>,
    /// Children in insertion order; always empty for leaves
    pub(crate) children: Vec<NodeId>,
}

impl<P> Node<P> {
    pub(crate) fn new(label: String, kind: NodeKind<P>) -> Self {
        Self {
            label,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &NodeKind<P> {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container)
    }

    /// Leaf payload, None for containers.
    pub fn payload(&self) -> Option<&P> {
        match &self.kind {
            NodeKind::Leaf(payload) => Some(payload),
            NodeKind::Container => None,
        }
    }
}

impl<P> fmt::Display for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[derive(Debug)]
enum SpecKind<P> {
    Leaf(Option<P>),
    Container,
}

/// Deferred node description, validated when inserted into a hierarchy.
///
/// Used where nodes are assembled piecemeal and the payload may be missing:
/// a leaf `NodeSpec` without a payload is rejected with
/// [`HierarchyError::InvalidNode`].
#[derive(Debug)]
pub struct NodeSpec<P> {
    label: String,
    kind: SpecKind<P>,
}

impl<P> NodeSpec<P> {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: SpecKind::Leaf(None),
        }
    }

    pub fn container(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: SpecKind::Container,
        }
    }

    /// Set the leaf payload. Has no effect on container specs.
    pub fn with_payload(mut self, payload: P) -> Self {
        if let SpecKind::Leaf(slot) = &mut self.kind {
            *slot = Some(payload);
        }
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn build(self) -> HierarchyResult<Node<P>> {
        match self.kind {
            SpecKind::Leaf(Some(payload)) => Ok(Node::new(self.label, NodeKind::Leaf(payload))),
            SpecKind::Leaf(None) => Err(HierarchyError::InvalidNode {
                label: self.label,
                reason: "leaf requires a payload".to_string(),
            }),
            SpecKind::Container => Ok(Node::new(self.label, NodeKind::Container)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_leaf_spec_without_payload_when_building_then_invalid_node() {
        let result = NodeSpec::<u32>::leaf("orphan").build();
        assert!(matches!(
            result,
            Err(HierarchyError::InvalidNode { ref label, .. }) if label == "orphan"
        ));
    }

    #[test]
    fn given_leaf_spec_with_payload_when_building_then_leaf() {
        let node = NodeSpec::leaf("a").with_payload(7u32).build().unwrap();
        assert!(node.is_leaf());
        assert_eq!(node.payload(), Some(&7));
        assert!(node.parent().is_none());
    }

    #[test]
    fn given_container_spec_with_payload_when_building_then_payload_ignored() {
        let node = NodeSpec::container("c").with_payload(1u32).build().unwrap();
        assert!(node.is_container());
        assert!(node.payload().is_none());
        assert!(node.children().is_empty());
    }
}
