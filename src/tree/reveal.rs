use std::collections::VecDeque;
use log::debug;
use crate::error::{MateError, Result};
use crate::tree::node::{NodeId, TreeNode};

/// Incremental reveal of a solved tree.
///
/// The root and its children start visible. Hidden nodes are revealed one at a
/// time in breadth-first order; revealing a node queues its children. A new
/// solve means a new `RevealState`.
#[derive(Clone, Debug)]
pub struct RevealState {
    tree: TreeNode,
    pending: VecDeque<NodeId>,
}

impl RevealState {
    pub fn new(mut tree: TreeNode) -> Self {
        tree.visible = true;
        let mut pending = VecDeque::new();
        for (i, child) in tree.children.iter_mut().enumerate() {
            child.visible = true;
            let id = NodeId::root().child(i);
            pending.extend((0..child.children.len()).map(|j| id.child(j)));
        }
        Self { tree, pending }
    }

    pub fn tree(&self) -> &TreeNode { &self.tree }

    pub fn into_tree(self) -> TreeNode { self.tree }

    pub fn pending_len(&self) -> usize { self.pending.len() }

    pub fn is_exhausted(&self) -> bool { self.pending.is_empty() }

    /// Reveal the next hidden node in breadth-first order and return its id.
    pub fn expand_next(&mut self) -> Result<NodeId> {
        while let Some(id) = self.pending.pop_front() {
            let node = self.tree.get_mut(&id).ok_or_else(|| MateError::UnknownNode(id.to_string()))?;
            let already = node.visible;
            node.visible = true;
            self.pending.extend((0..node.children.len()).map(|j| id.child(j)));
            // Nodes shown through toggle_children do not consume a step.
            if !already {
                debug!("revealed {}", id);
                return Ok(id);
            }
        }
        Err(MateError::ExpansionExhausted)
    }

    /// Reveal every node; returns how many were hidden before.
    pub fn expand_all(&mut self) -> usize {
        self.pending.clear();
        self.tree.set_visible_recursive(true)
    }

    /// Show all children of `id` unless its first child is already visible, in which case hide them.
    /// Returns the new visibility of the children.
    pub fn toggle_children(&mut self, id: &NodeId) -> Result<bool> {
        let node = self.tree.get_mut(id).ok_or_else(|| MateError::UnknownNode(id.to_string()))?;
        let show = !node.children.first().map_or(false, |c| c.visible);
        for c in &mut node.children { c.visible = show; }
        Ok(show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::Side;

    // root -> a -> (a0 -> a00), b
    fn sample() -> TreeNode {
        let mut a00 = TreeNode::leaf("a00".into(), Side::White, 0);
        a00.mv = Some("m4".into());
        let mut a0 = TreeNode::leaf("a0".into(), Side::Black, 0);
        a0.mv = Some("m3".into());
        a0.children.push(a00);
        let mut a = TreeNode::leaf("a".into(), Side::White, 0);
        a.mv = Some("m1".into());
        a.children.push(a0);
        let mut b = TreeNode::leaf("b".into(), Side::White, 0);
        b.mv = Some("m2".into());
        let mut root = TreeNode::leaf("root".into(), Side::Black, 0);
        root.children = vec![a, b];
        root
    }

    #[test]
    fn starts_with_root_and_children_visible() {
        let st = RevealState::new(sample());
        assert_eq!(st.tree().visible_count(), 3);
        assert_eq!(st.pending_len(), 1);
    }

    #[test]
    fn expand_next_walks_breadth_first_then_exhausts() {
        let mut st = RevealState::new(sample());
        assert_eq!(st.expand_next().unwrap().to_string(), "root-0-0");
        assert_eq!(st.expand_next().unwrap().to_string(), "root-0-0-0");
        assert_eq!(st.expand_next(), Err(MateError::ExpansionExhausted));
        assert_eq!(st.tree().visible_count(), 5);
    }

    #[test]
    fn expand_all_is_idempotent() {
        let mut st = RevealState::new(sample());
        assert_eq!(st.expand_all(), 2);
        let once = st.tree().clone();
        assert_eq!(st.expand_all(), 0);
        assert_eq!(st.tree(), &once);
        assert!(st.is_exhausted());
    }

    #[test]
    fn toggle_hides_and_shows_children() {
        let mut st = RevealState::new(sample());
        assert!(!st.toggle_children(&NodeId::root()).unwrap());
        assert_eq!(st.tree().visible_count(), 1);
        assert!(st.toggle_children(&NodeId::root()).unwrap());
        assert!(st.toggle_children(&"root-7".parse().unwrap()).is_err());
    }

    #[test]
    fn toggled_nodes_are_skipped_by_expand_next() {
        let mut st = RevealState::new(sample());
        st.toggle_children(&NodeId::root().child(0)).unwrap();
        assert_eq!(st.expand_next().unwrap().to_string(), "root-0-0-0");
    }
}
