//! Arena-backed hierarchy: node storage, ownership transfer and traversal order.

use generational_arena::Arena;
use tracing::{debug, instrument};

use crate::domain::error::{HierarchyError, HierarchyResult};
use crate::domain::node::{Node, NodeId, NodeKind, NodeSpec};

/// Arena-based tree structure holding any number of independent subtrees.
///
/// Nodes are addressed by [`NodeId`]. A node without an owner is a root; any
/// root may be passed to the traversal operations. Ownership moves only through
/// [`attach`](Self::attach) and [`detach`](Self::detach), and both check their
/// preconditions before touching the arena, so a failed call changes nothing.
#[derive(Debug)]
pub struct Hierarchy<P> {
    /// Arena storage for all nodes
    arena: Arena<Node<P>>,
    /// Detached nodes, in the order they became detached
    roots: Vec<NodeId>,
    /// Maximum tree height accepted by `attach`, None for unbounded
    max_depth: Option<usize>,
}

impl<P> Default for Hierarchy<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Hierarchy<P> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            max_depth: None,
        }
    }

    /// Hierarchy whose trees may not grow taller than `max_depth` levels.
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            ..Self::new()
        }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    // ------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------

    #[instrument(level = "trace", skip_all)]
    pub fn new_leaf(&mut self, label: impl Into<String>, payload: P) -> NodeId {
        self.store(Node::new(label.into(), NodeKind::Leaf(payload)))
    }

    #[instrument(level = "trace", skip_all)]
    pub fn new_container(&mut self, label: impl Into<String>) -> NodeId {
        self.store(Node::new(label.into(), NodeKind::Container))
    }

    /// Insert a node described by a `NodeSpec`, validating it first.
    #[instrument(level = "trace", skip_all, fields(label = spec.label()))]
    pub fn insert(&mut self, spec: NodeSpec<P>) -> HierarchyResult<NodeId> {
        let node = spec.build()?;
        Ok(self.store(node))
    }

    fn store(&mut self, node: Node<P>) -> NodeId {
        let id = NodeId(self.arena.insert(node));
        self.roots.push(id);
        id
    }

    // ------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------

    pub fn node(&self, id: NodeId) -> HierarchyResult<&Node<P>> {
        self.arena.get(id.0).ok_or(HierarchyError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn label(&self, id: NodeId) -> HierarchyResult<&str> {
        Ok(self.node(id)?.label())
    }

    /// Read-only view of the children in insertion order; empty for leaves.
    pub fn children(&self, id: NodeId) -> HierarchyResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    pub fn parent(&self, id: NodeId) -> HierarchyResult<Option<NodeId>> {
        Ok(self.node(id)?.parent())
    }

    pub fn payload(&self, id: NodeId) -> HierarchyResult<Option<&P>> {
        Ok(self.node(id)?.payload())
    }

    /// Detached nodes, each heading its own tree.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of live nodes across all trees.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Whether `ancestor` is `id` itself or lies on the path from `id` to its root.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> HierarchyResult<bool> {
        let mut current = Some(id);
        while let Some(idx) = current {
            if idx == ancestor {
                return Ok(true);
            }
            current = self.node(idx)?.parent;
        }
        Ok(false)
    }

    /// Level of a node within its tree; roots are at level 1.
    pub fn level(&self, id: NodeId) -> HierarchyResult<usize> {
        let mut level = 1;
        let mut current = self.node(id)?.parent;
        while let Some(idx) = current {
            level += 1;
            current = self.node(idx)?.parent;
        }
        Ok(level)
    }

    /// Height of the subtree rooted at `id`; a lone node has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: NodeId) -> HierarchyResult<usize> {
        Ok(self
            .iter(id)?
            .map(|(_, depth, _)| depth)
            .max()
            .unwrap_or(0))
    }

    /// Labels of all leaves below `id`, in traversal order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_labels(&self, id: NodeId) -> HierarchyResult<Vec<String>> {
        Ok(self
            .iter(id)?
            .filter(|(_, _, node)| node.is_leaf())
            .map(|(_, _, node)| node.label().to_string())
            .collect())
    }

    /// Pre-order, depth-first, left-to-right iterator starting at `id`.
    pub fn iter(&self, id: NodeId) -> HierarchyResult<PreOrderIterator<'_, P>> {
        self.node(id)?;
        Ok(PreOrderIterator::new(self, id))
    }

    /// Post-order iterator starting at `id`: children before their container.
    pub fn iter_postorder(&self, id: NodeId) -> HierarchyResult<PostOrderIterator<'_, P>> {
        self.node(id)?;
        Ok(PostOrderIterator::new(self, id))
    }

    // ------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------

    /// Append `child` to the end of `container`'s children, moving ownership.
    ///
    /// # Errors
    /// * `NodeNotFound` if either handle is stale.
    /// * `NotAContainer` if `container` is a leaf.
    /// * `CycleDetected` if `child` is `container` or one of its ancestors.
    /// * `AlreadyOwned` if `child` has an owner; detach it first.
    /// * `DepthExceeded` if the hierarchy has a depth bound that would be crossed.
    #[instrument(level = "debug", skip(self))]
    pub fn attach(&mut self, container: NodeId, child: NodeId) -> HierarchyResult<()> {
        let parent_node = self.node(container)?;
        let child_node = self.node(child)?;

        if !parent_node.is_container() {
            return Err(HierarchyError::NotAContainer(parent_node.label().to_string()));
        }
        if self.is_ancestor_or_self(child, container)? {
            return Err(HierarchyError::CycleDetected {
                container: parent_node.label().to_string(),
                child: child_node.label().to_string(),
            });
        }
        if let Some(owner) = child_node.parent {
            return Err(HierarchyError::AlreadyOwned {
                child: child_node.label().to_string(),
                owner: self.label(owner)?.to_string(),
            });
        }
        if let Some(max) = self.max_depth {
            let depth = self.level(container)? + self.depth(child)?;
            if depth > max {
                return Err(HierarchyError::DepthExceeded { max, depth });
            }
        }

        // all preconditions hold, handles are known to be live
        if let Some(node) = self.arena.get_mut(child.0) {
            node.parent = Some(container);
        }
        if let Some(node) = self.arena.get_mut(container.0) {
            node.children.push(child);
        }
        self.roots.retain(|&root| root != child);
        debug!(%container, %child, "attached");
        Ok(())
    }

    /// Remove the child at `index` from `container` and hand it back as a root.
    ///
    /// The remaining siblings keep their relative order. The detached subtree
    /// stays intact and may be attached elsewhere.
    #[instrument(level = "debug", skip(self))]
    pub fn detach(&mut self, container: NodeId, index: usize) -> HierarchyResult<NodeId> {
        let parent_node = self.node(container)?;
        if !parent_node.is_container() {
            return Err(HierarchyError::NotAContainer(parent_node.label().to_string()));
        }
        let len = parent_node.children.len();
        if index >= len {
            return Err(HierarchyError::IndexOutOfRange {
                container: parent_node.label().to_string(),
                index,
                len,
            });
        }

        let child = match self.arena.get_mut(container.0) {
            Some(node) => node.children.remove(index),
            None => return Err(HierarchyError::NodeNotFound(container)),
        };
        if let Some(node) = self.arena.get_mut(child.0) {
            node.parent = None;
        }
        self.roots.push(child);
        debug!(%container, %child, index, "detached");
        Ok(child)
    }

    /// Drop a detached node together with everything beneath it.
    ///
    /// Returns the number of nodes removed. Owned nodes must be detached first.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, id: NodeId) -> HierarchyResult<usize> {
        let node = self.node(id)?;
        if let Some(owner) = node.parent {
            return Err(HierarchyError::AlreadyOwned {
                child: node.label().to_string(),
                owner: self.label(owner)?.to_string(),
            });
        }

        let doomed: Vec<NodeId> = self.iter_postorder(id)?.map(|(idx, _)| idx).collect();
        for idx in &doomed {
            self.arena.remove(idx.0);
        }
        self.roots.retain(|&root| root != id);
        debug!(%id, removed = doomed.len(), "discarded");
        Ok(doomed.len())
    }
}

/// Pre-order iterator yielding `(id, depth, node)`; the start node has depth 1.
pub struct PreOrderIterator<'a, P> {
    hierarchy: &'a Hierarchy<P>,
    stack: Vec<(NodeId, usize)>,
}

impl<'a, P> PreOrderIterator<'a, P> {
    fn new(hierarchy: &'a Hierarchy<P>, start: NodeId) -> Self {
        Self {
            hierarchy,
            stack: vec![(start, 1)],
        }
    }
}

impl<'a, P> Iterator for PreOrderIterator<'a, P> {
    type Item = (NodeId, usize, &'a Node<P>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.stack.pop() {
            if let Some(node) = self.hierarchy.arena.get(current.0) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current, depth, node));
            }
        }
        None
    }
}

/// Post-order iterator yielding `(id, node)`.
pub struct PostOrderIterator<'a, P> {
    hierarchy: &'a Hierarchy<P>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, P> PostOrderIterator<'a, P> {
    fn new(hierarchy: &'a Hierarchy<P>, start: NodeId) -> Self {
        Self {
            hierarchy,
            stack: vec![(start, false)],
        }
    }
}

impl<'a, P> Iterator for PostOrderIterator<'a, P> {
    type Item = (NodeId, &'a Node<P>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.hierarchy.arena.get(current.0) {
                if visited {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
