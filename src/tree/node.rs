use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use cozy_chess::Color;
use serde::{Deserialize, Serialize};
use crate::error::MateError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl From<Color> for Side {
    fn from(c: Color) -> Self {
        if c == Color::White { Side::White } else { Side::Black }
    }
}

impl Side {
    pub fn flip(self) -> Side {
        match self { Side::White => Side::Black, Side::Black => Side::White }
    }
}

/// One position reached during a solve.
///
/// `score` is always from the point of view of the side to move at the root.
/// Children are kept in the order the search visited them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(rename = "move")]
    pub mv: Option<String>,
    pub position: String,
    pub score: i32,
    pub side_to_move: Side,
    pub visible: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(position: String, side_to_move: Side, score: i32) -> Self {
        Self { mv: None, position, score, side_to_move, visible: false, children: Vec::new() }
    }

    pub fn is_capture(&self) -> bool {
        self.mv.as_deref().map_or(false, crate::board::san::is_capture_san)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Number of plies along the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.children.iter().map(|c| 1 + c.height()).max().unwrap_or(0)
    }

    pub fn visible_count(&self) -> usize {
        usize::from(self.visible) + self.children.iter().map(TreeNode::visible_count).sum::<usize>()
    }

    pub fn get(&self, id: &NodeId) -> Option<&TreeNode> {
        let mut node = self;
        for &i in id.path() { node = node.children.get(i)?; }
        Some(node)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut TreeNode> {
        let mut node = self;
        for &i in id.path() { node = node.children.get_mut(i)?; }
        Some(node)
    }

    /// Ids of every node, breadth-first, root included.
    pub fn bfs_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.node_count());
        let mut queue = VecDeque::from([(NodeId::root(), self)]);
        while let Some((id, node)) = queue.pop_front() {
            for (i, child) in node.children.iter().enumerate() {
                queue.push_back((id.child(i), child));
            }
            out.push(id);
        }
        out
    }

    pub fn set_visible_recursive(&mut self, visible: bool) -> usize {
        let mut changed = usize::from(self.visible != visible);
        self.visible = visible;
        for c in &mut self.children { changed += c.set_visible_recursive(visible); }
        changed
    }

    /// Same moves, positions and scores, ignoring visibility.
    pub fn same_shape(&self, other: &TreeNode) -> bool {
        self.mv == other.mv
            && self.position == other.position
            && self.score == other.score
            && self.children.len() == other.children.len()
            && self.children.iter().zip(&other.children).all(|(a, b)| a.same_shape(b))
    }

    /// True if every path of `self` also exists in `other`.
    pub fn is_subtree_of(&self, other: &TreeNode) -> bool {
        self.position == other.position
            && self.children.iter().all(|c| {
                other.children.iter().any(|o| o.mv == c.mv && c.is_subtree_of(o))
            })
    }
}

/// Child-index path from the root, printed as `root`, `root-0`, `root-0-2`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Vec<usize>);

impl NodeId {
    pub fn root() -> Self { NodeId(Vec::new()) }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        NodeId(path)
    }

    pub fn path(&self) -> &[usize] { &self.0 }

    pub fn depth(&self) -> usize { self.0.len() }

    pub fn is_root(&self) -> bool { self.0.is_empty() }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for i in &self.0 { write!(f, "-{}", i)?; }
        Ok(())
    }
}

impl FromStr for NodeId {
    type Err = MateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        if parts.next() != Some("root") { return Err(MateError::UnknownNode(s.to_string())); }
        parts
            .map(|p| p.parse::<usize>().map_err(|_| MateError::UnknownNode(s.to_string())))
            .collect::<Result<Vec<_>, _>>()
            .map(NodeId)
    }
}
