use serde::{Deserialize, Serialize};
use crate::tree::node::{NodeId, Side, TreeNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Start,
    White,
    Black,
}

/// What a renderer needs for one visible node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayNode {
    pub id: String,
    pub name: String,
    pub score: i32,
    /// Side that played `name`; `Start` for the root.
    pub turn: Turn,
    /// The child a rational player would pick here, if any.
    pub next_move: Option<String>,
    pub children: Vec<DisplayNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    pub score: i32,
    pub turn: Turn,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

// Maximize on the root side's turns; otherwise minimize, preferring captures.
fn recommended(node: &TreeNode, root_side: Side) -> Option<String> {
    let best = if node.side_to_move == root_side {
        node.children.iter().reduce(|best, c| if c.score > best.score { c } else { best })
    } else {
        node.children.iter().reduce(|best, c| {
            match (c.is_capture(), best.is_capture()) {
                (true, false) => c,
                (false, true) => best,
                _ => if c.score < best.score { c } else { best },
            }
        })
    };
    best.and_then(|c| c.mv.clone())
}

fn project(node: &TreeNode, id: NodeId, root_side: Side) -> Option<DisplayNode> {
    if !node.visible { return None; }
    let turn = if id.is_root() {
        Turn::Start
    } else {
        match node.side_to_move.flip() { Side::White => Turn::White, Side::Black => Turn::Black }
    };
    let children = node.children.iter().enumerate()
        .filter_map(|(i, c)| project(c, id.child(i), root_side))
        .collect();
    Some(DisplayNode {
        id: id.to_string(),
        name: node.mv.clone().unwrap_or_else(|| "Start".to_string()),
        score: node.score,
        turn,
        next_move: recommended(node, root_side),
        children,
    })
}

/// Project the visible part of `tree`. Hidden nodes drop out together with their subtrees.
pub fn to_display_tree(tree: &TreeNode) -> Option<DisplayNode> {
    project(tree, NodeId::root(), tree.side_to_move)
}

impl DisplayNode {
    pub fn node_count(&self) -> usize { 1 + self.children.iter().map(DisplayNode::node_count).sum::<usize>() }

    pub fn to_flow(&self) -> FlowGraph {
        let mut g = FlowGraph::default();
        self.push_flow(None, &mut g);
        g
    }

    fn push_flow(&self, parent: Option<&str>, g: &mut FlowGraph) {
        g.nodes.push(FlowNode { id: self.id.clone(), label: self.name.clone(), score: self.score, turn: self.turn });
        if let Some(p) = parent {
            g.edges.push(FlowEdge { id: format!("e-{}-{}", p, self.id), source: p.to_string(), target: self.id.clone() });
        }
        for c in &self.children { c.push_flow(Some(&self.id), g); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(mv: &str, side: Side, score: i32) -> TreeNode {
        let mut n = TreeNode::leaf(mv.to_string(), side, score);
        n.mv = Some(mv.to_string());
        n
    }

    fn sample() -> TreeNode {
        let mut root = TreeNode::leaf("root".into(), Side::White, 5);
        root.visible = true;
        let mut a = child("Ra6", Side::Black, 5);
        a.visible = true;
        a.children = vec![child("Kb8", Side::White, 7), child("bxa6", Side::White, 9)];
        let mut b = child("Rb1", Side::Black, 2);
        b.visible = true;
        root.children = vec![a, b];
        root
    }

    #[test]
    fn hidden_subtrees_are_pruned() {
        let d = to_display_tree(&sample()).unwrap();
        assert_eq!(d.node_count(), 3);
        assert_eq!(d.id, "root");
        assert_eq!(d.name, "Start");
        assert_eq!(d.turn, Turn::Start);
        assert_eq!(d.children[0].id, "root-0");
        assert_eq!(d.children[0].turn, Turn::White);
    }

    #[test]
    fn recommendation_maximizes_for_root_side() {
        let d = to_display_tree(&sample()).unwrap();
        assert_eq!(d.next_move.as_deref(), Some("Ra6"));
    }

    #[test]
    fn recommendation_prefers_captures_when_minimizing() {
        // bxa6 scores worse for the defender but is a capture.
        let d = to_display_tree(&sample()).unwrap();
        assert_eq!(d.children[0].next_move.as_deref(), Some("bxa6"));
        assert_eq!(d.children[1].next_move, None);
    }

    #[test]
    fn flow_graph_has_one_edge_per_non_root_node() {
        let mut t = sample();
        t.set_visible_recursive(true);
        let flow = to_display_tree(&t).unwrap().to_flow();
        assert_eq!(flow.nodes.len(), 5);
        assert_eq!(flow.edges.len(), 4);
        assert_eq!(flow.edges[1].id, "e-root-0-root-0-0");
        assert_eq!(flow.nodes[2].label, "Kb8");
    }

    #[test]
    fn invisible_root_projects_to_nothing() {
        let mut t = sample();
        t.visible = false;
        assert!(to_display_tree(&t).is_none());
    }
}
