//! Move ordering for the mate search.
//!
//! Mating moves first, then captures by captured-piece value, then promotions,
//! then everything else. The sort is stable, so ties keep the oracle's
//! enumeration order.

use std::cmp::Reverse;
use crate::board::MoveInfo;
use crate::search::eval::piece_value;

pub fn order_key(m: &MoveInfo) -> (bool, Reverse<i32>, bool) {
    let captured = m.captured.map(piece_value).unwrap_or(0);
    (!m.gives_mate, Reverse(captured), !m.is_promotion())
}

pub fn order_moves(mut moves: Vec<MoveInfo>) -> Vec<MoveInfo> {
    moves.sort_by_key(order_key);
    moves
}
