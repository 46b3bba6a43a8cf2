//! Move selection for the automated opponent.
//!
//! Selection is a single ply:
//! - enumerate legal candidates for the player to move
//! - in the opening, restrict them to a small book of corner points
//! - otherwise score every candidate with [`crate::eval`] and rank them
//! - draw from a short list of the best with difficulty-dependent randomness
//!
//! The caller's [`Position`] is only read. Every simulated move is played
//! on a clone, so an abandoned selection leaves the live game untouched.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::board::{Color, Point};
use crate::constants::{
    OPENING_MOVES, PASS_EMPTY_FRACTION, PASS_EMPTY_MIN, PASS_PROBE_MOVES, PASS_SCORE_THRES,
    SHORTLIST_DIVISOR, SHORTLIST_MAX,
};
use crate::difficulty::{Difficulty, DifficultyConfig};
use crate::eval::evaluate_move;
use crate::position::Position;

/// The opponent's decision for its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Play(Point),
    Pass,
}

/// Source of the randomness used when picking from the short list.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
    /// Uniform index in `0..len`; `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

impl RandomSource for fastrand::Rng {
    fn next_f64(&mut self) -> f64 {
        self.f64()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }
}

/// Legal points for `player`, row-major.
pub fn candidate_moves(pos: &Position, player: Color) -> Vec<Point> {
    pos.legal_moves(player)
}

/// The twelve corner and near-corner opening points of a board, built from
/// the offsets 2, 3, size-3 and size-4. Points that fall off small boards
/// are dropped.
pub fn opening_points(size: usize) -> Vec<Point> {
    let s = size as isize;
    let raw: [(isize, isize); 12] = [
        (3, 3),
        (3, s - 4),
        (s - 4, 3),
        (s - 4, s - 4),
        (2, 3),
        (3, 2),
        (2, s - 4),
        (3, s - 3),
        (s - 3, 3),
        (s - 4, 2),
        (s - 3, s - 4),
        (s - 4, s - 3),
    ];
    raw.into_iter()
        .filter(|&(r, c)| (0..s).contains(&r) && (0..s).contains(&c))
        .map(|(r, c)| (r as usize, c as usize))
        .collect()
}

/// Candidates that are opening points, in candidate order.
pub fn opening_moves(pos: &Position, candidates: &[Point]) -> Vec<Point> {
    let book = opening_points(pos.size());
    candidates
        .iter()
        .copied()
        .filter(|pt| book.contains(pt))
        .collect()
}

/// Score every candidate and sort best first.
///
/// Candidates whose evaluation faults are logged and left out. The sort is
/// stable, so equal scores keep candidate order.
pub fn rank_moves(
    pos: &Position,
    candidates: &[Point],
    player: Color,
    config: &DifficultyConfig,
) -> Vec<(Point, f64)> {
    let mut scored: Vec<(Point, f64)> = candidates
        .iter()
        .filter_map(|&pt| match evaluate_move(pos, pt, player, config) {
            Ok(score) => Some((pt, score)),
            Err(e) => {
                warn!(?pt, error = %e, "skipping candidate that failed evaluation");
                None
            }
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored
}

/// Length of the short list for a pool of `n` moves.
pub fn shortlist_len(n: usize) -> usize {
    SHORTLIST_MAX.min((n / SHORTLIST_DIVISOR).max(1))
}

/// Should the player to move give up its turn?
pub fn should_pass(pos: &Position, config: &DifficultyConfig) -> bool {
    let player = pos.to_move();
    should_pass_with(pos, player, &candidate_moves(pos, player), config)
}

fn should_pass_with(
    pos: &Position,
    player: Color,
    candidates: &[Point],
    config: &DifficultyConfig,
) -> bool {
    if candidates.is_empty() {
        return true;
    }

    let empty = pos.board().empty_count();
    if empty < PASS_EMPTY_MIN {
        return true;
    }

    let total = pos.size() * pos.size();
    if (empty as f64) / (total as f64) < PASS_EMPTY_FRACTION {
        // Faulting probes are skipped; if all fault the best stays -inf.
        let best = candidates
            .iter()
            .take(PASS_PROBE_MOVES)
            .filter_map(|&pt| evaluate_move(pos, pt, player, config).ok())
            .fold(f64::NEG_INFINITY, f64::max);
        if best < PASS_SCORE_THRES {
            return true;
        }
    }

    false
}

/// Choose the next move for the player to move.
pub fn select_move<R: RandomSource>(
    pos: &Position,
    config: &DifficultyConfig,
    rng: &mut R,
) -> Move {
    let player = pos.to_move();
    let candidates = candidate_moves(pos, player);

    if should_pass_with(pos, player, &candidates, config) {
        debug!(%player, "opponent passes");
        return Move::Pass;
    }

    let pool: Vec<Point> = {
        let book = if pos.move_count() < OPENING_MOVES {
            opening_moves(pos, &candidates)
        } else {
            Vec::new()
        };
        if book.is_empty() {
            let ranked = rank_moves(pos, &candidates, player, config);
            if ranked.is_empty() {
                warn!(%player, "no candidate could be evaluated, passing");
                return Move::Pass;
            }
            ranked.into_iter().map(|(pt, _)| pt).collect()
        } else {
            book
        }
    };

    let shortlist = &pool[..shortlist_len(pool.len())];
    let pick = if rng.next_f64() < config.random_factor {
        shortlist[rng.next_index(shortlist.len())]
    } else {
        shortlist[0]
    };
    debug!(%player, ?pick, pool = pool.len(), "opponent selected move");
    Move::Play(pick)
}

/// An automated player: a difficulty tier plus its random source.
#[derive(Debug, Clone)]
pub struct Opponent<R = fastrand::Rng> {
    config: DifficultyConfig,
    rng: R,
}

impl Opponent<fastrand::Rng> {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty.config(), fastrand::Rng::new())
    }

    /// Reproducible opponent for a given seed.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty.config(), fastrand::Rng::with_seed(seed))
    }
}

impl<R: RandomSource> Opponent<R> {
    pub fn with_rng(config: DifficultyConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    pub fn select_move(&mut self, pos: &Position) -> Move {
        select_move(pos, &self.config, &mut self.rng)
    }

    pub fn should_pass(&self, pos: &Position) -> bool {
        should_pass(pos, &self.config)
    }
}
