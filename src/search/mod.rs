pub mod cache;
pub mod eval;
pub mod mate;
pub mod ordering;

pub use mate::{solve, solve_position, solve_with, SearchParams, SearchResult, SearchStats, Searcher, Solution};
