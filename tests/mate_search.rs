use matetree::board::Position;
use matetree::search::eval::MATE_BASE;
use matetree::tree::line_positions;
use matetree::{problems, solve, solve_with, MateError, SearchParams};
use pretty_assertions::assert_eq;

const BACK_RANK: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

fn replay(fen: &str, line: &[String]) -> Position {
    let mut pos = Position::from_fen(fen).expect("valid fen");
    for san in line { pos = pos.play_san(san).expect("line replays"); }
    pos
}

#[test]
fn finds_back_rank_mate_in_one() {
    let sol = solve(BACK_RANK, 1).unwrap();
    assert!(sol.found, "Ra8# should be found");
    assert_eq!(sol.line, Some(vec!["Ra8#".to_string()]));
    assert_eq!(sol.score, MATE_BASE - 1);
    assert_eq!(sol.max_ply, 1);
    assert!(sol.tree.visible);
}

#[test]
fn rook_check_that_is_not_mate_is_not_reported() {
    // Rf8+ is answered by Kxf8.
    let sol = solve("6k1/8/8/8/8/8/6PP/5RK1 w - - 0 1", 1).unwrap();
    assert!(!sol.found);
    assert_eq!(sol.line, None);
}

#[test]
fn startpos_has_no_mate_in_one() {
    let sol = solve(&Position::startpos().fen(), 1).unwrap();
    assert!(!sol.found);
    assert_eq!(sol.line, None);
    assert_eq!(sol.score, 0);
    assert_eq!(sol.tree.children.len(), 20);
}

#[test]
fn default_problem_is_mate_in_two() {
    let p = problems::default_problem();
    let sol = solve(p.fen, p.moves).unwrap();
    assert!(sol.found);
    let line = sol.line.clone().expect("line");
    assert_eq!(line.len(), 3);
    assert!(line[2].ends_with('#'), "last move should mate: {:?}", line);
    assert!(replay(p.fen, &line).is_checkmate());
    assert_eq!(sol.score, MATE_BASE - 3);

    let fens = line_positions(&Position::from_fen(p.fen).unwrap(), &line).unwrap();
    assert_eq!(fens.len(), 4);
    assert_eq!(fens[0], p.fen);
}

#[test]
fn faster_mates_score_higher() {
    let quick = solve(BACK_RANK, 2).unwrap();
    let slow = solve(problems::default_problem().fen, 2).unwrap();
    assert!(quick.found && slow.found);
    assert_eq!(quick.line.as_ref().map(|l| l.len()), Some(1));
    assert!(quick.score > slow.score, "{} vs {}", quick.score, slow.score);
}

#[test]
fn black_to_move_mates_too() {
    let sol = solve("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", 1).unwrap();
    assert!(sol.found);
    assert_eq!(sol.line, Some(vec!["Ra1#".to_string()]));
}

#[test]
fn repeated_solves_are_identical() {
    let fen = problems::default_problem().fen;
    let a = solve(fen, 2).unwrap();
    let b = solve(fen, 2).unwrap();
    assert_eq!(a.line, b.line);
    assert_eq!(a.score, b.score);
    assert_eq!(a.tree, b.tree);
}

#[test]
fn bad_inputs_are_errors() {
    match solve("not a fen", 2) {
        Err(MateError::InvalidPosition { fen, .. }) => assert_eq!(fen, "not a fen"),
        other => panic!("expected InvalidPosition, got {:?}", other.map(|s| s.found)),
    }
    assert_eq!(solve_with(BACK_RANK, SearchParams::enhanced(0)).err(), Some(MateError::InvalidDepth(0)));
    assert_eq!(solve_with(BACK_RANK, SearchParams::enhanced(u32::MAX)).err(), Some(MateError::InvalidDepth(u32::MAX)));
    assert_eq!(SearchParams::enhanced(u32::MAX).max_ply(), u32::MAX - 1);
}

#[test]
fn built_in_problems_parse() {
    for p in problems::MATE_IN_TWO.iter() {
        assert!(Position::from_fen(p.fen).is_ok(), "{} does not parse", p.name);
        assert_eq!(p.moves, 2);
    }
    assert!(problems::problem(3).is_none());
}

#[test]
fn checkmated_root_is_not_a_win() {
    let sol = solve("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1", 2).unwrap();
    assert!(!sol.found);
    assert_eq!(sol.line, None);
    assert_eq!(sol.score, -MATE_BASE);
    assert!(sol.tree.children.is_empty());
}

#[test]
fn stalemated_root_scores_material() {
    // Black to move has no legal moves and is not in check.
    let sol = solve("k7/8/1Q6/8/8/8/8/K7 b - - 0 1", 2).unwrap();
    assert!(!sol.found);
    assert_eq!(sol.line, None);
    assert_eq!(sol.score, -9);
    assert!(sol.tree.children.is_empty());
}

#[test]
fn stalemating_reply_is_a_leaf_before_the_depth_limit() {
    let sol = solve_with("k7/8/1Q6/8/8/8/8/K7 w - - 0 1", SearchParams::minimax(2)).unwrap();
    let kb2 = sol.tree.children.iter()
        .find(|c| c.mv.as_deref() == Some("Kb2"))
        .expect("Kb2 is searched");
    assert!(kb2.children.is_empty(), "stalemate must not be expanded");
    assert_eq!(kb2.score, 9);
    assert!(Position::from_fen(&kb2.position).unwrap().is_stalemate());
}
