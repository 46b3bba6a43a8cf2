//! Game state and the move/pass state machine.
//!
//! This module provides the core game logic for Go, including:
//! - Turn alternation and move history
//! - Legality checking (occupancy, suicide, ko)
//! - Capture bookkeeping per color
//! - Pass handling and game-end detection
//!
//! A [`Position`] is mutated in place by [`Position::apply_move`] and
//! [`Position::pass_turn`]. Anything that needs to look ahead (the opponent,
//! the ko probe) works on a clone and throws it away.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Cell, Color, Point};
use crate::constants::PASSES_TO_END;
use crate::error::MoveError;
use crate::rules;

/// Stones captured, indexed by the capturing color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    fn add(&mut self, color: Color, count: u32) {
        match color {
            Color::Black => self.black += count,
            Color::White => self.white += count,
        }
    }
}

/// One entry of the move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Play(Point, Color),
    Pass,
}

/// Whether moves are still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ongoing,
    Ended,
}

/// A Go game in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    board: Board,
    to_move: Color,
    captures: Captures,
    history: Vec<Turn>,
    /// Point the player to move may not play on this turn
    ko: Option<Point>,
    passes: u32,
    ended: bool,
}

impl Position {
    /// Start a game on an empty `size`x`size` board with Black to move.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        Self::from_board(Board::new(size), Color::Black)
    }

    /// Start from an arbitrary stone layout, e.g. a problem setup or an
    /// imported snapshot. History, captures and ko start out empty.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        Position {
            board,
            to_move,
            captures: Captures::default(),
            history: Vec::new(),
            ko: None,
            passes: 0,
            ended: false,
        }
    }

    /// Restore the counters a snapshot carries. Used by snapshot import.
    pub(crate) fn with_counters(
        mut self,
        captures: Captures,
        passes: u32,
        ended: bool,
        ko: Option<Point>,
    ) -> Self {
        self.captures = captures;
        self.passes = passes;
        self.ended = ended;
        self.ko = ko;
        self
    }

    // -- Accessors --

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Number of turns played so far, passes included.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn ko(&self) -> Option<Point> {
        self.ko
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.passes
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn stage(&self) -> Stage {
        if self.ended {
            Stage::Ended
        } else {
            Stage::Ongoing
        }
    }

    /// Hand the move to `color` without recording a turn. Simulations use
    /// this to look at the board from the acting player's side.
    pub(crate) fn set_to_move(&mut self, color: Color) {
        self.to_move = color;
    }

    // -- Rules --

    /// See [`rules::is_suicide`].
    pub fn is_suicide(&self, pt: Point, color: Color) -> bool {
        rules::is_suicide(&self.board, pt, color)
    }

    /// True iff `pt` is the active ko point.
    pub fn violates_ko(&self, pt: Point) -> bool {
        self.ko == Some(pt)
    }

    /// Remove all dead groups of `color`; see [`rules::capture_stones`].
    pub fn capture_stones(&mut self, color: Color) -> u32 {
        rules::capture_stones(&mut self.board, color)
    }

    /// Could `color` place a stone at `pt` right now, ignoring whose turn it is?
    pub fn is_legal(&self, pt: Point, color: Color) -> bool {
        self.board.is_empty_at(pt) && !self.is_suicide(pt, color) && !self.violates_ko(pt)
    }

    /// Every empty point that is neither suicide for `color` nor the ko
    /// point, in row-major order.
    pub fn legal_moves(&self, color: Color) -> Vec<Point> {
        self.board
            .points()
            .filter(|&pt| self.is_legal(pt, color))
            .collect()
    }

    /// Check a move for the player to move without playing it.
    pub fn check_move(&self, pt: Point) -> Result<(), MoveError> {
        if self.ended {
            return Err(MoveError::GameOver);
        }
        match self.board.get(pt) {
            None => return Err(MoveError::OutOfBounds),
            Some(Cell::Empty) => {}
            Some(_) => return Err(MoveError::Occupied),
        }
        if self.is_suicide(pt, self.to_move) {
            return Err(MoveError::Suicide);
        }
        if self.violates_ko(pt) {
            return Err(MoveError::Ko);
        }
        Ok(())
    }

    /// Play a stone for the player to move.
    ///
    /// Returns the number of stones captured. On error nothing changes.
    pub fn play(&mut self, pt: Point) -> Result<u32, MoveError> {
        self.check_move(pt)?;

        let color = self.to_move;
        let opponent = color.opp();

        self.ko = None;
        self.board.set(pt, color.into());

        let captured = self.capture_stones(opponent);
        self.captures.add(color, captured);

        if captured == 1 {
            self.ko = rules::ko_point_after(&self.board, pt, color);
        }

        self.passes = 0;
        self.history.push(Turn::Play(pt, color));
        self.to_move = opponent;

        debug!(?pt, %color, captured, ko = ?self.ko, "move applied");
        Ok(captured)
    }

    /// Play a stone on behalf of `color`, which must be the player to move.
    pub fn play_as(&mut self, pt: Point, color: Color) -> Result<u32, MoveError> {
        if self.ended {
            return Err(MoveError::GameOver);
        }
        if color != self.to_move {
            return Err(MoveError::OutOfTurn);
        }
        self.play(pt)
    }

    /// Apply a move and report only whether it was accepted.
    ///
    /// When `requesting` is given it must be the player to move.
    pub fn apply_move(&mut self, pt: Point, requesting: Option<Color>) -> bool {
        match requesting {
            Some(color) => self.play_as(pt, color).is_ok(),
            None => self.play(pt).is_ok(),
        }
    }

    /// Pass for the player to move.
    ///
    /// The second consecutive pass ends the game; the turn still changes
    /// hands. Returns `false` without doing anything once the game is over.
    pub fn pass_turn(&mut self) -> bool {
        if self.ended {
            return false;
        }
        self.history.push(Turn::Pass);
        self.ko = None;
        self.passes += 1;
        if self.passes >= PASSES_TO_END {
            self.ended = true;
            debug!("game ended: both players passed consecutively");
        }
        self.to_move = self.to_move.opp();
        true
    }

    /// Return to the initial state, keeping the board size.
    pub fn reset(&mut self) {
        *self = Position::new(self.size());
    }
}
