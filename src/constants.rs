//! Constants for board geometry, heuristic scores, and move selection.
//!
//! This module contains all the fixed tuning values of the engine. The
//! per-difficulty weights live in [`crate::difficulty`]; everything here is
//! shared by every tier.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN) used when a caller does not choose one.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Largest board the GTP front end can address (letters A-Z without I).
pub const MAX_GTP_BOARD_SIZE: usize = 25;

/// Consecutive passes that end the game.
pub const PASSES_TO_END: u32 = 2;

// =============================================================================
// Capture Heuristic
// =============================================================================

/// Per-stone bonus for an adjacent opponent group left with at most one liberty.
pub const CAPTURE_ATARI_BONUS: f64 = 10.0;

/// Per-stone bonus for an adjacent opponent group left with two liberties.
pub const CAPTURE_THREAT_BONUS: f64 = 5.0;

// =============================================================================
// Liberty Heuristic
// =============================================================================

/// Own group with four or more liberties after the move.
pub const LIBERTY_SAFE: f64 = 3.0;

/// Own group with exactly three liberties.
pub const LIBERTY_OK: f64 = 1.0;

/// Own group with exactly two liberties.
pub const LIBERTY_SHORT: f64 = -1.0;

/// Own group left in atari (self-atari).
pub const LIBERTY_ATARI: f64 = -5.0;

// =============================================================================
// Territory Heuristic
// =============================================================================

/// Manhattan radius of the local influence count.
pub const INFLUENCE_RADIUS: usize = 3;

// =============================================================================
// Defense Heuristic
// =============================================================================

/// Own neighbor groups with this many liberties or fewer are worth defending.
pub const DEFENSE_LIBERTY_LIMIT: usize = 2;

/// Per-stone bonus for reinforcing a weak own group.
pub const DEFENSE_BONUS: f64 = 8.0;

// =============================================================================
// Pattern Heuristic
// =============================================================================

/// Penalty for playing on the first line.
pub const EDGE_PENALTY: f64 = -2.0;

/// Penalty for playing on the second line.
pub const SECOND_LINE_PENALTY: f64 = -1.0;

/// Bonus per orthogonal neighbor holding an own stone.
pub const CONNECTION_BONUS: f64 = 2.0;

// =============================================================================
// Move Selection
// =============================================================================

/// The opening book applies while fewer than this many turns were played.
pub const OPENING_MOVES: usize = 10;

/// Upper bound on the short list drawn from.
pub const SHORTLIST_MAX: usize = 5;

/// Candidates per short-list slot (`pool / 3`).
pub const SHORTLIST_DIVISOR: usize = 3;

// =============================================================================
// Pass Decision
// =============================================================================

/// Always pass when fewer empty points than this remain.
pub const PASS_EMPTY_MIN: usize = 10;

/// Below this empty fraction the opponent probes a few moves before playing.
pub const PASS_EMPTY_FRACTION: f64 = 0.15;

/// Number of candidates probed in the endgame pass check.
pub const PASS_PROBE_MOVES: usize = 3;

/// Endgame probes scoring below this make the opponent pass.
pub const PASS_SCORE_THRES: f64 = 1.0;
