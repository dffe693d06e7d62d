pub mod annotate;
pub mod display;
pub mod node;
pub mod reveal;

pub use annotate::{extract_annotated_lines, line_arrows, line_positions, AnnotatedLine, Arrow, ArrowColor};
pub use display::{to_display_tree, DisplayNode, FlowEdge, FlowGraph, FlowNode, Turn};
pub use node::{NodeId, Side, TreeNode};
pub use reveal::RevealState;
