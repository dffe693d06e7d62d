//! Error taxonomy for the mate solver.
//!
//! A search that finds no forced mate is not an error: it is reported through
//! [`crate::search::mate::Solution::found`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MateError {
    /// The input position could not be parsed or is not a legal position.
    #[error("invalid position '{fen}': {reason}")]
    InvalidPosition { fen: String, reason: String },

    /// The oracle rejected a move that was expected to be legal.
    #[error("illegal move {san} in position '{fen}'")]
    IllegalMove { san: String, fen: String },

    /// A solve was requested for zero moves, or for more than the search can score.
    #[error("mate depth must be between 1 and 250 moves, got {0}")]
    InvalidDepth(u32),

    /// The breadth-first reveal queue is empty.
    #[error("no more nodes to expand")]
    ExpansionExhausted,

    /// A node id does not address any node of the tree.
    #[error("no tree node with id {0}")]
    UnknownNode(String),
}

pub type Result<T> = std::result::Result<T, MateError>;
