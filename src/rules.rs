//! Suicide detection, capture resolution and ko-point derivation.
//!
//! These work on a bare [`Board`]; turn order and the active ko point are
//! the business of [`crate::position::Position`]. Hypothetical placements
//! are always made on a scratch copy of the board.

use crate::board::{Board, Cell, Color, Point};

/// Would `color` playing at the empty point `pt` leave its own group with
/// no liberties while capturing nothing?
///
/// Returns `false` for off-board points; bounds are checked by the caller.
pub fn is_suicide(board: &Board, pt: Point, color: Color) -> bool {
    let mut scratch = board.clone();
    if !scratch.set(pt, color.into()) {
        return false;
    }

    if !scratch.liberties_of(&scratch.group_at(pt)).is_empty() {
        return false;
    }

    // A placement without liberties is still legal if it takes an opponent
    // group's last liberty.
    let opponent = color.opp();
    for n in scratch.neighbors(pt) {
        if scratch.color_at(n) == Some(opponent) && scratch.liberty_count_at(n) == 0 {
            return false;
        }
    }
    true
}

/// Remove every group of `color` that has no liberties.
///
/// The whole board is scanned once, so several disjoint groups starved by a
/// single placement are all removed. Returns the number of stones removed,
/// counting each group once.
pub fn capture_stones(board: &mut Board, color: Color) -> u32 {
    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut dead: Vec<Point> = Vec::new();

    for pt in board.points() {
        if visited[pt.0 * size + pt.1] || board.color_at(pt) != Some(color) {
            continue;
        }
        let group = board.group_at(pt);
        for &(r, c) in &group {
            visited[r * size + c] = true;
        }
        if board.liberties_of(&group).is_empty() {
            dead.extend(group);
        }
    }

    for &pt in &dead {
        board.set(pt, Cell::Empty);
    }
    dead.len() as u32
}

/// Find the ko point created by `mover` playing at `pt`, which has just
/// captured exactly one stone.
///
/// Probes each now-empty neighbor of `pt` in neighbor order: the first one
/// where the opponent could legally play and recapture exactly the stone at
/// `pt` (and nothing else) is the ko point.
pub fn ko_point_after(board: &Board, pt: Point, mover: Color) -> Option<Point> {
    let opponent = mover.opp();
    board
        .neighbors(pt)
        .into_iter()
        .filter(|&n| board.is_empty_at(n))
        .find(|&n| {
            if is_suicide(board, n, opponent) {
                return false;
            }
            let mut scratch = board.clone();
            scratch.set(n, opponent.into());
            capture_stones(&mut scratch, mover) == 1 && scratch.is_empty_at(pt)
        })
}
