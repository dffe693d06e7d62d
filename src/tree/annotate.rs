//! Move annotations (arrows) for line playback.

use log::warn;
use serde::{Deserialize, Serialize};
use crate::board::cozy::square_name;
use crate::board::Position;
use crate::error::{MateError, Result};
use crate::tree::node::TreeNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowColor {
    /// A move by the side that started the search.
    RootSide,
    Opponent,
}

impl ArrowColor {
    /// Colour of the move played at `ply` (1-based) below the root.
    pub fn for_ply(ply: usize) -> Self {
        if ply % 2 == 1 { ArrowColor::RootSide } else { ArrowColor::Opponent }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrow {
    pub from: String,
    pub to: String,
    pub color: ArrowColor,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedLine {
    pub arrows: Vec<Arrow>,
    /// FEN after replaying the arrows from the root.
    pub position: String,
}

fn arrow_for(pos: &Position, san: &str, ply: usize) -> Option<(Arrow, Position)> {
    let info = pos.find_san(san)?;
    let next = pos.play(&info).ok()?;
    let arrow = Arrow { from: square_name(info.from), to: square_name(info.to), color: ArrowColor::for_ply(ply) };
    Some((arrow, next))
}

fn collect(node: &TreeNode, pos: &Position, max_depth: usize, path: &mut Vec<Arrow>, out: &mut Vec<AnnotatedLine>) {
    if path.len() == max_depth {
        out.push(AnnotatedLine { arrows: path.clone(), position: pos.fen() });
        return;
    }
    for child in &node.children {
        let Some(san) = child.mv.as_deref() else { continue };
        match arrow_for(pos, san, path.len() + 1) {
            Some((arrow, next)) => {
                path.push(arrow);
                collect(child, &next, max_depth, path, out);
                path.pop();
            }
            None => warn!("dropping path through {} from {}", san, pos.fen()),
        }
    }
}

/// One entry per root-to-node path of exactly `max_depth` plies, in depth-first order.
/// Paths that cannot be replayed are dropped whole.
pub fn extract_annotated_lines(tree: &TreeNode, max_depth: usize) -> Result<Vec<AnnotatedLine>> {
    let start = Position::from_fen(&tree.position)?;
    let mut out = Vec::new();
    collect(tree, &start, max_depth, &mut Vec::with_capacity(max_depth), &mut out);
    Ok(out)
}

/// FENs along `line`, starting with `start` itself.
pub fn line_positions(start: &Position, line: &[String]) -> Result<Vec<String>> {
    let mut fens = Vec::with_capacity(line.len() + 1);
    fens.push(start.fen());
    let mut cur = start.clone();
    for san in line {
        cur = cur.play_san(san)?;
        fens.push(cur.fen());
    }
    Ok(fens)
}

/// Arrows for the first `steps` moves of `line`.
pub fn line_arrows(start: &Position, line: &[String], steps: usize) -> Result<Vec<Arrow>> {
    let mut arrows = Vec::new();
    let mut cur = start.clone();
    for (i, san) in line.iter().take(steps).enumerate() {
        let info = cur.find_san(san).ok_or_else(|| MateError::IllegalMove { san: san.clone(), fen: cur.fen() })?;
        arrows.push(Arrow { from: square_name(info.from), to: square_name(info.to), color: ArrowColor::for_ply(i + 1) });
        cur = cur.play(&info)?;
    }
    Ok(arrows)
}
