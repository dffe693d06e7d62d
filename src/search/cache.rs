use std::collections::HashMap;
use crate::tree::TreeNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

impl Bound {
    /// Classify a fail-soft result against the window it was searched with.
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Bound {
        if score <= alpha { Bound::Upper } else if score >= beta { Bound::Lower } else { Bound::Exact }
    }
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub score: i32,
    pub continuation: Option<Vec<String>>,
    pub tree: TreeNode,
    pub bound: Bound,
}

impl Entry {
    /// Whether this entry can stand in for a search with window `(alpha, beta)`.
    pub fn usable(&self, alpha: i32, beta: i32) -> bool {
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => self.score >= beta,
            Bound::Upper => self.score <= alpha,
        }
    }
}

/// Per-solve transposition cache keyed by full FEN.
///
/// The FEN carries side to move and the move counters, so within one solve a
/// key always names the same board at the same ply from the root. A cache must
/// never outlive the solve that filled it.
#[derive(Default)]
pub struct MateCache {
    entries: HashMap<String, Entry>,
    hits: u64,
}

impl MateCache {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, key: &str) -> Option<&Entry> { self.entries.get(key) }

    pub fn probe(&mut self, key: &str, alpha: i32, beta: i32) -> Option<Entry> {
        let e = self.entries.get(key).filter(|e| e.usable(alpha, beta))?.clone();
        self.hits += 1;
        Some(e)
    }

    pub fn put(&mut self, key: String, e: Entry) {
        // Never let a bound overwrite an exact result for the same key.
        if let Some(cur) = self.entries.get(&key) {
            if cur.bound == Bound::Exact && e.bound != Bound::Exact { return; }
        }
        self.entries.insert(key, e);
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn hits(&self) -> u64 { self.hits }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}
