//! Uniform operations over a hierarchy.
//!
//! An operation is an opaque value handed to every leaf payload in traversal
//! order. The engine never looks inside it; it only decides who gets called,
//! in which order, and how the individual results are collected.

use tracing::{debug, instrument, trace};

use crate::domain::arena::Hierarchy;
use crate::domain::error::{HierarchyError, HierarchyResult};
use crate::domain::node::{NodeId, NodeKind};

/// Leaf-level contribution to an operation of type `Op`.
pub trait Capability<Op: ?Sized> {
    type Output;
    type Error: Into<Box<dyn std::error::Error + Send + Sync>>;

    fn perform(&self, label: &str, op: &Op) -> Result<Self::Output, Self::Error>;
}

impl<Op: ?Sized, C: Capability<Op> + ?Sized> Capability<Op> for Box<C> {
    type Output = C::Output;
    type Error = C::Error;

    fn perform(&self, label: &str, op: &Op) -> Result<Self::Output, Self::Error> {
        (**self).perform(label, op)
    }
}

/// Result contributed by one node during a traversal.
#[derive(Debug)]
pub struct Outcome<O> {
    pub node: NodeId,
    pub label: String,
    /// Depth below the node the traversal started at (start = 1)
    pub depth: usize,
    /// True for entries contributed by a container decoration
    pub decorated: bool,
    pub result: HierarchyResult<O>,
}

impl<O> Outcome<O> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// All results of one traversal, in traversal order.
///
/// Leaf failures do not stop the traversal; they are kept alongside the
/// successes so callers see the whole tree.
#[derive(Debug)]
pub struct Outcomes<O> {
    entries: Vec<Outcome<O>>,
}

impl<O> Default for Outcomes<O> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<O> Outcomes<O> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.entries.iter().all(Outcome::is_ok)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outcome<O>> {
        self.entries.iter()
    }

    /// Successful outputs in traversal order.
    pub fn values(&self) -> Vec<&O> {
        self.entries
            .iter()
            .filter_map(|entry| entry.result.as_ref().ok())
            .collect()
    }

    /// Failed entries as `(label, error)` in traversal order.
    pub fn failures(&self) -> Vec<(&str, &HierarchyError)> {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.result {
                Err(e) => Some((entry.label.as_str(), e)),
                Ok(_) => None,
            })
            .collect()
    }

    /// All outputs, or the first failure in traversal order.
    pub fn into_result(self) -> HierarchyResult<Vec<O>> {
        self.entries.into_iter().map(|entry| entry.result).collect()
    }

    fn push(&mut self, entry: Outcome<O>) {
        self.entries.push(entry);
    }
}

impl<O> IntoIterator for Outcomes<O> {
    type Item = Outcome<O>;
    type IntoIter = std::vec::IntoIter<Outcome<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, O> IntoIterator for &'a Outcomes<O> {
    type Item = &'a Outcome<O>;
    type IntoIter = std::slice::Iter<'a, Outcome<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<P> Hierarchy<P> {
    /// Run `op` on every leaf below `id` in pre-order, collecting every result.
    ///
    /// The outer error only reports a stale `id`; leaf failures are recorded
    /// as [`HierarchyError::LeafOperationFailed`] entries.
    pub fn perform<Op>(&self, id: NodeId, op: &Op) -> HierarchyResult<Outcomes<P::Output>>
    where
        Op: ?Sized,
        P: Capability<Op>,
    {
        self.perform_with(id, op, |_, _| None)
    }

    /// Like [`perform`](Self::perform), but each container visited may
    /// contribute an entry ahead of its children via `decorate(label, depth)`.
    #[instrument(level = "debug", skip(self, op, decorate))]
    pub fn perform_with<Op, F>(
        &self,
        id: NodeId,
        op: &Op,
        mut decorate: F,
    ) -> HierarchyResult<Outcomes<P::Output>>
    where
        Op: ?Sized,
        P: Capability<Op>,
        F: FnMut(&str, usize) -> Option<P::Output>,
    {
        let mut outcomes = Outcomes::default();
        for (node_id, depth, node) in self.iter(id)? {
            match node.kind() {
                NodeKind::Leaf(payload) => {
                    let result = payload
                        .perform(node.label(), op)
                        .map_err(|e| HierarchyError::leaf_failed(node.label(), e));
                    if let Err(e) = &result {
                        debug!(node = %node_id, error = %e, "leaf failed");
                    }
                    outcomes.push(Outcome {
                        node: node_id,
                        label: node.label().to_string(),
                        depth,
                        decorated: false,
                        result,
                    });
                }
                NodeKind::Container => {
                    if let Some(output) = decorate(node.label(), depth) {
                        outcomes.push(Outcome {
                            node: node_id,
                            label: node.label().to_string(),
                            depth,
                            decorated: true,
                            result: Ok(output),
                        });
                    }
                }
            }
        }
        trace!(entries = outcomes.len(), "performed");
        Ok(outcomes)
    }

    /// Fold successful leaf outputs in traversal order, stopping at the first
    /// leaf failure.
    #[instrument(level = "debug", skip(self, op, init, f))]
    pub fn fold<Op, B, F>(&self, id: NodeId, op: &Op, init: B, mut f: F) -> HierarchyResult<B>
    where
        Op: ?Sized,
        P: Capability<Op>,
        F: FnMut(B, P::Output) -> B,
    {
        let mut acc = init;
        for (_, _, node) in self.iter(id)? {
            if let NodeKind::Leaf(payload) = node.kind() {
                let output = payload
                    .perform(node.label(), op)
                    .map_err(|e| HierarchyError::leaf_failed(node.label(), e))?;
                acc = f(acc, output);
            }
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Square;

    #[derive(Debug)]
    struct Number(i64);

    impl Capability<Square> for Number {
        type Output = i64;
        type Error = String;

        fn perform(&self, label: &str, _op: &Square) -> Result<i64, String> {
            if self.0 < 0 {
                return Err(format!("{} is negative", label));
            }
            Ok(self.0 * self.0)
        }
    }

    #[test]
    fn given_mixed_results_when_performing_then_failures_do_not_truncate() {
        let mut h = Hierarchy::new();
        let root = h.new_container("root");
        for (label, n) in [("a", 2), ("b", -1), ("c", 3)] {
            let leaf = h.new_leaf(label, Number(n));
            h.attach(root, leaf).unwrap();
        }

        let outcomes = h.perform(root, &Square).unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(!outcomes.is_success());
        assert_eq!(outcomes.values(), vec![&4, &9]);
        let failures = outcomes.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "b");
        assert!(matches!(
            failures[0].1,
            HierarchyError::LeafOperationFailed { label, .. } if label == "b"
        ));
        assert!(outcomes.into_result().is_err());
    }

    #[test]
    fn given_leaf_when_performing_directly_then_single_result() {
        let mut h = Hierarchy::new();
        let leaf = h.new_leaf("solo", Number(5));

        let values = h.perform(leaf, &Square).unwrap().into_result().unwrap();

        assert_eq!(values, vec![25]);
    }

    #[test]
    fn given_empty_container_when_performing_then_no_results() {
        let mut h: Hierarchy<Number> = Hierarchy::new();
        let root = h.new_container("root");
        let outcomes = h.perform(root, &Square).unwrap();
        assert!(outcomes.is_empty());
        assert!(outcomes.is_success());
    }

    #[test]
    fn given_failing_leaf_when_folding_then_first_failure_returned() {
        let mut h = Hierarchy::new();
        let root = h.new_container("root");
        let ok = h.new_leaf("ok", Number(2));
        let bad = h.new_leaf("bad", Number(-2));
        h.attach(root, ok).unwrap();
        h.attach(root, bad).unwrap();

        assert!(h.fold(root, &Square, 0, |acc, v| acc + v).is_err());
        assert_eq!(h.fold(ok, &Square, 0, |acc, v| acc + v).unwrap(), 4);
    }

    #[test]
    fn given_boxed_payloads_when_performing_then_dispatches_through_box() {
        let mut h: Hierarchy<Box<dyn Capability<Square, Output = i64, Error = String>>> =
            Hierarchy::new();
        let root = h.new_container("root");
        let leaf = h.new_leaf("boxed", Box::new(Number(4)));
        h.attach(root, leaf).unwrap();

        let values = h.perform(root, &Square).unwrap().into_result().unwrap();

        assert_eq!(values, vec![16]);
    }
}
