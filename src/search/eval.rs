use cozy_chess::{Board, Color, Piece};

// Pawn units; kings carry no material value.
const PAWN: i32 = 1;
const KNIGHT: i32 = 3;
const BISHOP: i32 = 3;
const ROOK: i32 = 5;
const QUEEN: i32 = 9;

/// Mate scores are `MATE_BASE - ply`; any material balance stays far below this.
pub const MATE_BASE: i32 = 1000;

pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => 0,
    }
}

fn count_piece(board: &Board, color: Color, piece: Piece) -> i32 {
    let bb = board.colors(color) & board.pieces(piece);
    bb.len() as i32
}

// Side-agnostic material: positive means White has more material.
pub fn material_side_agnostic(board: &Board) -> i32 {
    let mut score = 0;
    for &piece in &[Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        score += (count_piece(board, Color::White, piece) - count_piece(board, Color::Black, piece)) * piece_value(piece);
    }
    score
}

/// Material balance from the point of view of `root`, the side that started the search.
pub fn material_eval(board: &Board, root: Color) -> i32 {
    let base = material_side_agnostic(board);
    if root == Color::White { base } else { -base }
}

/// Score of a checkmate reached `ply` half-moves below the root.
pub fn mate_score(ply: u32, mated: Color, root: Color) -> i32 {
    let magnitude = MATE_BASE - ply as i32;
    if mated == root { -magnitude } else { magnitude }
}

/// True when `score` is a win by mate for the root side within `max_ply` plies.
pub fn is_winning_mate(score: i32, max_ply: u32) -> bool {
    score >= MATE_BASE - max_ply as i32
}
