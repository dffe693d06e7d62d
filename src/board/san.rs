//! Standard Algebraic Notation for cozy-chess moves.

use cozy_chess::{Piece, Square};
use crate::board::cozy::square_name;

pub struct SanMove<'a> {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    pub promotion: Option<Piece>,
    /// Origins of other legal moves of the same piece type to the same square.
    pub others: &'a [Square],
    pub check: bool,
    pub mate: bool,
}

pub fn piece_letter(piece: Piece) -> Option<char> {
    match piece {
        Piece::Pawn => None,
        Piece::Knight => Some('N'),
        Piece::Bishop => Some('B'),
        Piece::Rook => Some('R'),
        Piece::Queen => Some('Q'),
        Piece::King => Some('K'),
    }
}

fn suffix(check: bool, mate: bool) -> &'static str {
    if mate { "#" } else if check { "+" } else { "" }
}

pub fn castle(king_to: Square, check: bool, mate: bool) -> String {
    let side = if square_name(king_to).starts_with('g') { "O-O" } else { "O-O-O" };
    format!("{}{}", side, suffix(check, mate))
}

fn disambiguation(from: Square, others: &[Square]) -> String {
    if others.is_empty() { return String::new(); }
    let name = square_name(from);
    let (file, rank) = (&name[0..1], &name[1..2]);
    let shares_file = others.iter().any(|o| square_name(*o).starts_with(file));
    if !shares_file { return file.to_string(); }
    let shares_rank = others.iter().any(|o| &square_name(*o)[1..2] == rank);
    if !shares_rank { return rank.to_string(); }
    name
}

pub fn render(m: SanMove<'_>) -> String {
    let mut out = String::with_capacity(8);
    match piece_letter(m.piece) {
        Some(letter) => {
            out.push(letter);
            out.push_str(&disambiguation(m.from, m.others));
        }
        None => {
            if m.capture { out.push_str(&square_name(m.from)[0..1]); }
        }
    }
    if m.capture { out.push('x'); }
    out.push_str(&square_name(m.to));
    if let Some(p) = m.promotion.and_then(piece_letter) {
        out.push('=');
        out.push(p);
    }
    out.push_str(suffix(m.check, m.mate));
    out
}

/// Drops check, mate and commentary marks so that `Rf8`, `Rf8+` and `Rf8#!` compare equal.
pub fn strip_annotations(san: &str) -> &str {
    san.trim().trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'))
}

pub fn is_capture_san(san: &str) -> bool { san.contains('x') }
