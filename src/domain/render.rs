/*
Tree display via termtree.

The tree is assembled bottom-up from a post-order walk so that building it
does not recurse once per level. `termtree::Tree` drops recursively, so levels
below `RENDER_DEPTH_LIMIT` collapse into a single `…` leaf.
 */
use std::collections::HashMap;

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::Hierarchy;
use crate::domain::error::HierarchyResult;
use crate::domain::node::{Node, NodeId};

/// Deepest level drawn by [`TreeRender`]; the root is level 1.
pub const RENDER_DEPTH_LIMIT: usize = 256;

const COLLAPSED: &str = "…";

pub trait TreeRender<P> {
    /// Render the subtree at `id`, one line per node, using `format` for labels.
    ///
    /// Containers at [`RENDER_DEPTH_LIMIT`] that still have children get one
    /// `…` leaf in place of their descendants.
    fn to_tree_string_with<F>(&self, id: NodeId, format: F) -> HierarchyResult<Tree<String>>
    where
        F: Fn(&Node<P>) -> String;

    fn to_tree_string(&self, id: NodeId) -> HierarchyResult<Tree<String>> {
        self.to_tree_string_with(id, |node| node.label().to_string())
    }
}

impl<P> TreeRender<P> for Hierarchy<P> {
    #[instrument(level = "debug", skip(self, format))]
    fn to_tree_string_with<F>(&self, id: NodeId, format: F) -> HierarchyResult<Tree<String>>
    where
        F: Fn(&Node<P>) -> String,
    {
        let depths: HashMap<NodeId, usize> = self
            .iter(id)?
            .map(|(idx, depth, _)| (idx, depth))
            .collect();

        let mut built: HashMap<NodeId, Tree<String>> = HashMap::new();
        for (idx, node) in self.iter_postorder(id)? {
            let depth = depths.get(&idx).copied().unwrap_or(1);
            if depth > RENDER_DEPTH_LIMIT {
                continue;
            }
            let leaves: Vec<_> = if depth == RENDER_DEPTH_LIMIT && !node.children().is_empty() {
                vec![Tree::new(COLLAPSED.to_string())]
            } else {
                node.children()
                    .iter()
                    .filter_map(|child| built.remove(child))
                    .collect()
            };
            built.insert(idx, Tree::new(format(node)).with_leaves(leaves));
        }
        Ok(built
            .remove(&id)
            .unwrap_or_else(|| Tree::new(String::new())))
    }
}
