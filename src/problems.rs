/// A named mate problem for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Problem {
    pub name: &'static str,
    pub fen: &'static str,
    pub moves: u32,
}

pub const MATE_IN_TWO: [Problem; 3] = [
    Problem { name: "Mate in 2 - Problem 1", fen: "kbK5/pp6/1P6/8/8/8/8/R7 w - - 0 1", moves: 2 },
    Problem { name: "Mate in 2 - Problem 2", fen: "8/p4p2/Q7/3P4/1p1kB3/1K4N1/5R2/8 w - - 0 1", moves: 2 },
    Problem { name: "Mate in 2 - Problem 3", fen: "2b3N1/8/1r2pN1b/1p2kp2/1P1R4/8/4K3/6Q1 w - - 0 1", moves: 2 },
];

pub fn default_problem() -> Problem { MATE_IN_TWO[0] }

pub fn problem(index: usize) -> Option<Problem> { MATE_IN_TWO.get(index).copied() }
