use cozy_chess::{Board as CozyBoard, Color, File, Move, Piece, Square};
use crate::board::san;
use crate::error::{MateError, Result};

/// A legal move together with everything the search and the tree need to know about it.
#[derive(Clone, Debug)]
pub struct MoveInfo {
    pub mv: Move,
    pub san: String,
    pub from: Square,
    // King destination for castling, not the rook square cozy-chess encodes.
    pub to: Square,
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
    pub gives_check: bool,
    pub gives_mate: bool,
}

impl MoveInfo {
    pub fn is_capture(&self) -> bool { self.captured.is_some() }
    pub fn is_promotion(&self) -> bool { self.promotion.is_some() }
}

#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

pub(crate) fn square_name(sq: Square) -> String { format!("{}", sq) }

// 0 for dark squares, 1 for light squares.
fn square_shade(sq: Square) -> u8 {
    let name = square_name(sq);
    let b = name.as_bytes();
    ((b[0] - b'a') + (b[1] - b'1') + 1) % 2
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        CozyBoard::from_fen(fen.trim(), false)
            .map(|b| Self { board: b })
            .map_err(|e| MateError::InvalidPosition { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    /// Canonical key: the full FEN, including clocks, castling and en-passant rights.
    pub fn fen(&self) -> String { format!("{}", self.board) }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    fn raw_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { moves.extend(ml); false });
        moves
    }

    pub fn legal_moves_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| { ct += moves.len(); false });
        ct
    }

    pub fn is_check(&self) -> bool { !self.board.checkers().is_empty() }

    pub fn is_checkmate(&self) -> bool { self.is_check() && self.legal_moves_count() == 0 }

    pub fn is_stalemate(&self) -> bool { !self.is_check() && self.legal_moves_count() == 0 }

    pub fn is_fifty_move_draw(&self) -> bool { self.board.halfmove_clock() >= 100 }

    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() { return false; }
        let knights = b.pieces(Piece::Knight);
        let bishops = b.pieces(Piece::Bishop);
        if knights.len() + bishops.len() <= 1 { return true; }
        if !knights.is_empty() { return false; }
        // Bishops only: drawn when they all stand on the same shade.
        let mut shades = bishops.into_iter().map(square_shade);
        match shades.next() {
            Some(first) => shades.all(|s| s == first),
            None => true,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.legal_moves_count() == 0 || self.is_fifty_move_draw() || self.is_insufficient_material()
    }

    /// Legal moves in cozy-chess enumeration order.
    pub fn legal_moves(&self) -> Vec<MoveInfo> {
        let raw = self.raw_moves();
        raw.iter().filter_map(|&m| self.describe(m, &raw)).collect()
    }

    fn describe(&self, mv: Move, siblings: &[Move]) -> Option<MoveInfo> {
        let stm = self.side_to_move();
        let piece = self.board.piece_on(mv.from)?;
        let castle = piece == Piece::King && self.board.colors(stm).has(mv.to);
        let (to, captured) = if castle {
            let kingside = square_name(mv.to).as_bytes()[0] > square_name(mv.from).as_bytes()[0];
            let file = if kingside { File::G } else { File::C };
            (Square::new(file, mv.from.rank()), None)
        } else if piece == Piece::Pawn && self.board.piece_on(mv.to).is_none()
            && square_name(mv.from).as_bytes()[0] != square_name(mv.to).as_bytes()[0] {
            (mv.to, Some(Piece::Pawn))
        } else {
            (mv.to, self.board.piece_on(mv.to))
        };

        let mut child = self.board.clone();
        child.play(mv);
        let child = Position { board: child };
        let gives_check = child.is_check();
        let gives_mate = gives_check && child.legal_moves_count() == 0;

        let san = if castle {
            san::castle(to, gives_check, gives_mate)
        } else {
            let others: Vec<Square> = siblings.iter()
                .filter(|o| o.to == mv.to && o.from != mv.from && self.board.piece_on(o.from) == Some(piece))
                .map(|o| o.from)
                .collect();
            san::render(san::SanMove {
                piece,
                from: mv.from,
                to,
                capture: captured.is_some(),
                promotion: mv.promotion,
                others: &others,
                check: gives_check,
                mate: gives_mate,
            })
        };

        Some(MoveInfo { mv, san, from: mv.from, to, captured, promotion: mv.promotion, gives_check, gives_mate })
    }

    pub fn try_play(&self, mv: Move) -> Result<Position> {
        if !self.board.is_legal(mv) {
            return Err(MateError::IllegalMove { san: format!("{}", mv), fen: self.fen() });
        }
        let mut board = self.board.clone();
        board.play(mv);
        Ok(Position { board })
    }

    pub fn play(&self, info: &MoveInfo) -> Result<Position> { self.try_play(info.mv) }

    pub fn find_san(&self, san_str: &str) -> Option<MoveInfo> {
        let wanted = san::strip_annotations(san_str);
        self.legal_moves().into_iter().find(|m| san::strip_annotations(&m.san) == wanted)
    }

    pub fn play_san(&self, san_str: &str) -> Result<Position> {
        match self.find_san(san_str) {
            Some(info) => self.play(&info),
            None => Err(MateError::IllegalMove { san: san_str.to_string(), fen: self.fen() }),
        }
    }
}
