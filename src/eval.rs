//! Single-ply heuristic evaluation of a candidate move.
//!
//! A candidate is scored by playing it on a clone of the position and
//! combining five heuristics:
//!
//! 1. Capture - opponent groups next to the move left short of liberties
//! 2. Liberty - liberties of our own group after the move
//! 3. Territory - empty points within a small Manhattan radius
//! 4. Defense - weak own groups the move touches (before the move)
//! 5. Pattern - line penalties and connection bonus (before the move)
//!
//! Capture, liberty and territory are weighted by the difficulty tier;
//! defense and pattern always count at full weight.

use crate::board::{Board, Color, Point};
use crate::constants::{
    CAPTURE_ATARI_BONUS, CAPTURE_THREAT_BONUS, CONNECTION_BONUS, DEFENSE_BONUS,
    DEFENSE_LIBERTY_LIMIT, EDGE_PENALTY, INFLUENCE_RADIUS, LIBERTY_ATARI, LIBERTY_OK,
    LIBERTY_SAFE, LIBERTY_SHORT, SECOND_LINE_PENALTY,
};
use crate::difficulty::DifficultyConfig;
use crate::error::EvalError;
use crate::position::Position;

/// Unweighted heuristic components of a move.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveScore {
    pub capture: f64,
    pub liberty: f64,
    pub territory: f64,
    pub defense: f64,
    pub pattern: f64,
}

impl MoveScore {
    pub fn weighted(&self, config: &DifficultyConfig) -> f64 {
        self.capture * config.capture_weight
            + self.liberty * config.liberty_weight
            + self.territory * config.territory_weight
            + self.defense
            + self.pattern
    }
}

/// Score `pt` for `player` and return the weighted total.
pub fn evaluate_move(
    pos: &Position,
    pt: Point,
    player: Color,
    config: &DifficultyConfig,
) -> Result<f64, EvalError> {
    Ok(score_breakdown(pos, pt, player)?.weighted(config))
}

/// Compute the individual heuristic scores of `player` playing `pt`.
///
/// The move is simulated on a clone; `pos` is never modified.
pub fn score_breakdown(pos: &Position, pt: Point, player: Color) -> Result<MoveScore, EvalError> {
    let mut after = pos.clone();
    after.set_to_move(player);
    after
        .play(pt)
        .map_err(|reason| EvalError::Rejected { point: pt, reason })?;

    if after.board().color_at(pt) != Some(player) {
        return Err(EvalError::StoneMissing(pt));
    }

    let before = pos.board();
    let board = after.board();
    Ok(MoveScore {
        capture: capture_score(board, pt, player),
        liberty: liberty_score(board, pt),
        territory: territory_score(board, pt),
        defense: defense_score(before, pt, player),
        pattern: pattern_score(before, pt, player),
    })
}

/// Reward opponent neighbor groups left in (or one move from) atari.
///
/// Every neighbor is counted, so a group touching the move twice scores twice.
fn capture_score(board: &Board, pt: Point, player: Color) -> f64 {
    let opponent = player.opp();
    let mut score = 0.0;
    for n in board.neighbors(pt) {
        if board.color_at(n) != Some(opponent) {
            continue;
        }
        let group = board.group_at(n);
        let libs = board.liberties_of(&group).len();
        let size = group.len() as f64;
        if libs <= 1 {
            score += CAPTURE_ATARI_BONUS * size;
        } else if libs == 2 {
            score += CAPTURE_THREAT_BONUS * size;
        }
    }
    score
}

fn liberty_score(board: &Board, pt: Point) -> f64 {
    match board.liberty_count_at(pt) {
        0 => 0.0,
        1 => LIBERTY_ATARI,
        2 => LIBERTY_SHORT,
        3 => LIBERTY_OK,
        _ => LIBERTY_SAFE,
    }
}

/// Sum of `1 / (d + 1)` over empty points at Manhattan distance `d <= 3`.
fn territory_score(board: &Board, (row, col): Point) -> f64 {
    let r = INFLUENCE_RADIUS;
    let size = board.size();
    let mut score = 0.0;
    for nr in row.saturating_sub(r)..=(row + r).min(size - 1) {
        for nc in col.saturating_sub(r)..=(col + r).min(size - 1) {
            let distance = nr.abs_diff(row) + nc.abs_diff(col);
            if distance <= r && board.is_empty_at((nr, nc)) {
                score += 1.0 / (distance as f64 + 1.0);
            }
        }
    }
    score
}

/// Reward touching own groups with few liberties (pre-move board).
fn defense_score(board: &Board, pt: Point, player: Color) -> f64 {
    let mut score = 0.0;
    for n in board.neighbors(pt) {
        if board.color_at(n) != Some(player) {
            continue;
        }
        let group = board.group_at(n);
        if board.liberties_of(&group).len() <= DEFENSE_LIBERTY_LIMIT {
            score += DEFENSE_BONUS * group.len() as f64;
        }
    }
    score
}

/// Line penalties and connection bonus (pre-move board).
fn pattern_score(board: &Board, (row, col): Point, player: Color) -> f64 {
    let last = board.size() - 1;
    let mut score = 0.0;

    if row == 0 || col == 0 || row == last || col == last {
        score += EDGE_PENALTY;
    }
    // Both penalties apply on boards small enough for the lines to overlap.
    let second = |x: usize| x == 1 || (last >= 1 && x == last - 1);
    if second(row) || second(col) {
        score += SECOND_LINE_PENALTY;
    }

    let friends = board
        .neighbors((row, col))
        .into_iter()
        .filter(|&n| board.color_at(n) == Some(player))
        .count();
    score + CONNECTION_BONUS * friends as f64
}
