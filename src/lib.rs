// Forced-mate search with a revealable game tree for visualization
pub mod board;
pub mod error;
pub mod problems;
pub mod search;
pub mod tree;

pub use error::{MateError, Result};
pub use search::{solve, solve_position, solve_with, SearchParams, Solution};
pub use tree::{extract_annotated_lines, to_display_tree, NodeId, RevealState, TreeNode};
