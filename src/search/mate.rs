use cozy_chess::Color;
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use crate::board::{MoveInfo, Position};
use crate::error::{MateError, Result};
use crate::search::cache::{Bound, Entry, MateCache};
use crate::search::eval::{is_winning_mate, mate_score, material_eval};
use crate::search::ordering::order_moves;
use crate::tree::{Side, TreeNode};

const INF: i32 = i32::MAX;
// Keeps 2n - 1 plies representable and mate scores positive.
const MAX_MOVES: u32 = 250;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Mate within this many moves of the side to move.
    pub moves: u32,
    pub alpha_beta: bool,
    pub order_moves: bool,
    pub use_cache: bool,
    pub threads: usize,
}

impl SearchParams {
    pub fn minimax(moves: u32) -> Self {
        Self { moves, threads: 1, ..Self::default() }
    }

    pub fn alpha_beta(moves: u32) -> Self {
        Self { alpha_beta: true, ..Self::minimax(moves) }
    }

    /// Alpha-beta with move ordering and the transposition cache.
    pub fn enhanced(moves: u32) -> Self {
        Self { order_moves: true, use_cache: true, ..Self::alpha_beta(moves) }
    }

    pub fn max_ply(&self) -> u32 { self.moves.max(1).saturating_mul(2) - 1 }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub cache_hits: u64,
    pub cache_entries: usize,
}

impl SearchStats {
    fn absorb(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.cache_hits += other.cache_hits;
        self.cache_entries += other.cache_entries;
    }
}

/// Raw output of the recursion: minimax score, forcing continuation and explored subtree.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub score: i32,
    /// `None` when the best line ends without mate; `Some([])` at a checkmate node.
    pub continuation: Option<Vec<String>>,
    pub tree: TreeNode,
}

#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub found: bool,
    pub line: Option<Vec<String>>,
    pub score: i32,
    pub max_ply: u32,
    pub tree: TreeNode,
    pub stats: SearchStats,
}

pub struct Searcher {
    params: SearchParams,
    root: Color,
    max_ply: u32,
    cache: Option<MateCache>,
    nodes: u64,
    // Counters of root-split workers.
    workers: SearchStats,
}

impl Searcher {
    pub fn new(params: SearchParams) -> Result<Self> {
        if params.moves == 0 || params.moves > MAX_MOVES { return Err(MateError::InvalidDepth(params.moves)); }
        Ok(Self::worker(params, Color::White, params.max_ply()))
    }

    fn worker(params: SearchParams, root: Color, max_ply: u32) -> Self {
        let cache = if params.use_cache { Some(MateCache::new()) } else { None };
        Self { params, root, max_ply, cache, nodes: 0, workers: SearchStats::default() }
    }

    pub fn max_ply(&self) -> u32 { self.max_ply }

    pub fn stats(&self) -> SearchStats {
        let mut st = SearchStats {
            nodes: self.nodes,
            cache_hits: self.cache.as_ref().map_or(0, |c| c.hits()),
            cache_entries: self.cache.as_ref().map_or(0, |c| c.len()),
        };
        st.absorb(self.workers);
        st
    }

    /// Search `pos` for the side to move. Each call starts from an empty cache.
    pub fn search_position(&mut self, pos: &Position) -> SearchResult {
        self.root = pos.side_to_move();
        self.nodes = 0;
        self.workers = SearchStats::default();
        if let Some(c) = self.cache.as_mut() { c.clear(); }
        if self.params.threads > 1 {
            self.search_root_parallel(pos)
        } else {
            self.search(pos, 0, -INF, INF, true)
        }
    }

    fn candidate_moves(&self, pos: &Position) -> Vec<MoveInfo> {
        let moves = pos.legal_moves();
        if self.params.order_moves { order_moves(moves) } else { moves }
    }

    fn store(&mut self, key: String, res: &SearchResult, bound: Bound) {
        if let Some(cache) = self.cache.as_mut() {
            cache.put(key, Entry { score: res.score, continuation: res.continuation.clone(), tree: res.tree.clone(), bound });
        }
    }

    fn mate_node(&mut self, m: &MoveInfo, child: &Position, ply: u32) -> TreeNode {
        self.nodes += 1;
        let score = mate_score(ply, child.side_to_move(), self.root);
        let mut node = TreeNode::leaf(child.fen(), Side::from(child.side_to_move()), score);
        node.mv = Some(m.san.clone());
        node
    }

    fn search(&mut self, pos: &Position, ply: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> SearchResult {
        self.nodes += 1;
        let key = pos.fen();
        if let Some(cache) = self.cache.as_mut() {
            if let Some(e) = cache.probe(&key, alpha, beta) {
                trace!("cache hit at ply {}: {}", ply, key);
                return SearchResult { score: e.score, continuation: e.continuation, tree: e.tree };
            }
        }

        let side = Side::from(pos.side_to_move());
        if pos.is_checkmate() {
            let score = mate_score(ply, pos.side_to_move(), self.root);
            return SearchResult { score, continuation: Some(Vec::new()), tree: TreeNode::leaf(key, side, score) };
        }
        if ply >= self.max_ply || pos.is_game_over() {
            let score = material_eval(pos.board(), self.root);
            let res = SearchResult { score, continuation: None, tree: TreeNode::leaf(key.clone(), side, score) };
            self.store(key, &res, Bound::Exact);
            return res;
        }

        let (orig_alpha, orig_beta) = (alpha, beta);
        let mut best = if maximizing { -INF } else { INF };
        let mut continuation: Option<Vec<String>> = None;
        let mut node = TreeNode::leaf(key.clone(), side, 0);

        for m in self.candidate_moves(pos) {
            let child_pos = match pos.play(&m) {
                Ok(p) => p,
                Err(e) => { warn!("dropping branch {} at ply {}: {}", m.san, ply, e); continue; }
            };

            // An immediate mate is the best this node can do for the side to move.
            if m.gives_mate {
                let mate = self.mate_node(&m, &child_pos, ply + 1);
                node.score = mate.score;
                node.children.push(mate);
                let res = SearchResult { score: node.score, continuation: Some(vec![m.san]), tree: node };
                self.store(key, &res, Bound::Exact);
                return res;
            }

            let mut child = self.search(&child_pos, ply + 1, alpha, beta, !maximizing);
            child.tree.mv = Some(m.san.clone());
            let improves = if maximizing { child.score > best } else { child.score < best };
            if improves {
                best = child.score;
                continuation = child.continuation.map(|rest| {
                    let mut line = Vec::with_capacity(rest.len() + 1);
                    line.push(m.san.clone());
                    line.extend(rest);
                    line
                });
            }
            node.children.push(child.tree);

            if self.params.alpha_beta {
                if maximizing { alpha = alpha.max(best); } else { beta = beta.min(best); }
                if beta <= alpha { break; }
            }
        }

        if node.children.is_empty() {
            // Every branch was dropped; fall back to the static score and do not memoize.
            let score = material_eval(pos.board(), self.root);
            node.score = score;
            return SearchResult { score, continuation: None, tree: node };
        }

        node.score = best;
        let res = SearchResult { score: best, continuation, tree: node };
        self.store(key, &res, Bound::classify(best, orig_alpha, orig_beta));
        res
    }

    // Root split: every root move gets a full-window search in its own worker
    // with an isolated cache. Reduction runs in move order, so the choice matches
    // the sequential search.
    fn search_root_parallel(&mut self, pos: &Position) -> SearchResult {
        if pos.is_game_over() || self.max_ply == 0 {
            return self.search(pos, 0, -INF, INF, true);
        }
        self.nodes += 1;

        let mut children: Vec<(MoveInfo, Position)> = Vec::new();
        let mut mate: Option<(MoveInfo, Position)> = None;
        for m in self.candidate_moves(pos) {
            match pos.play(&m) {
                Ok(p) if m.gives_mate => { mate = Some((m, p)); break; }
                Ok(p) => children.push((m, p)),
                Err(e) => warn!("dropping root branch {}: {}", m.san, e),
            }
        }

        let (params, root, max_ply) = (self.params, self.root, self.max_ply);
        let results: Vec<(SearchResult, SearchStats)> = children.par_iter().map(|(m, p)| {
            let mut w = Searcher::worker(params, root, max_ply);
            let mut r = w.search(p, 1, -INF, INF, false);
            r.tree.mv = Some(m.san.clone());
            (r, w.stats())
        }).collect();

        let mut node = TreeNode::leaf(pos.fen(), Side::from(pos.side_to_move()), 0);
        let mut best = -INF;
        let mut continuation: Option<Vec<String>> = None;
        for ((m, _), (r, st)) in children.iter().zip(results) {
            self.workers.absorb(st);
            if r.score > best {
                best = r.score;
                continuation = r.continuation.map(|rest| std::iter::once(m.san.clone()).chain(rest).collect());
            }
            node.children.push(r.tree);
        }
        debug!("root split: {} workers, {} nodes, {} cache hits", children.len(), self.workers.nodes, self.workers.cache_hits);

        if let Some((m, p)) = mate {
            let mate = self.mate_node(&m, &p, 1);
            best = mate.score;
            continuation = Some(vec![m.san]);
            node.children.push(mate);
        }
        if node.children.is_empty() {
            best = material_eval(pos.board(), self.root);
        }
        node.score = best;
        SearchResult { score: best, continuation, tree: node }
    }
}

/// Solve "mate in `moves`" for the side to move in `fen` with the enhanced search.
pub fn solve(fen: &str, moves: u32) -> Result<Solution> {
    solve_with(fen, SearchParams::enhanced(moves))
}

pub fn solve_with(fen: &str, params: SearchParams) -> Result<Solution> {
    let pos = Position::from_fen(fen)?;
    solve_position(&pos, params)
}

pub fn solve_position(pos: &Position, params: SearchParams) -> Result<Solution> {
    let mut searcher = Searcher::new(params)?;
    debug!("solving mate in {} (max ply {}) with {:?}: {}", params.moves, searcher.max_ply(), params, pos.fen());
    let t0 = Instant::now();
    let res = searcher.search_position(pos);
    let stats = searcher.stats();
    let max_ply = searcher.max_ply();

    let found = res.continuation.as_ref().map_or(false, |c| !c.is_empty()) && is_winning_mate(res.score, max_ply);
    let line = if found { res.continuation } else { None };
    let mut tree = res.tree;
    tree.visible = true;
    for c in &mut tree.children { c.visible = true; }

    info!(
        "mate in {}: found={} score={} nodes={} cache_hits={} tree_nodes={} elapsed={:.3}s",
        params.moves, found, res.score, stats.nodes, stats.cache_hits, tree.node_count(), t0.elapsed().as_secs_f64()
    );
    Ok(Solution { found, line, score: res.score, max_ply, tree, stats })
}
