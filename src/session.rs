//! One game against the automated opponent.
//!
//! A [`Session`] owns its [`Position`] and exposes the operations a front
//! end needs: human moves, automated moves, passes, new game, reset and
//! state export. Automated moves never fail: anything that goes wrong while
//! choosing or applying one turns into a pass.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::board::{Color, Point};
use crate::difficulty::Difficulty;
use crate::error::MoveError;
use crate::opponent::{Move, select_move};
use crate::position::Position;
use crate::snapshot::Snapshot;

/// Result of asking the opponent to move.
#[derive(Debug, Clone, PartialEq)]
pub struct AiOutcome {
    /// The opponent passed (by choice or as a fail-safe)
    pub passed: bool,
    /// The point played, if any
    pub played: Option<Point>,
    pub message: Option<String>,
    pub state: Snapshot,
}

pub struct Session {
    pos: Position,
    difficulty: Difficulty,
    rng: fastrand::Rng,
    /// Wall-clock bound for choosing an automated move
    timeout: Option<Duration>,
}

impl Session {
    pub fn new(size: usize, difficulty: Difficulty) -> Self {
        Self {
            pos: Position::new(size),
            difficulty,
            rng: fastrand::Rng::new(),
            timeout: None,
        }
    }

    /// Make automated moves reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Give up on an automated move (and pass) after `limit`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn state(&self) -> Snapshot {
        self.pos.snapshot()
    }

    /// Replace the game with a fresh one of the given size.
    pub fn new_game(&mut self, size: usize) -> Snapshot {
        self.pos = Position::new(size);
        info!(size, "new game");
        self.state()
    }

    /// Restart the current game, keeping its size.
    pub fn reset(&mut self) -> Snapshot {
        self.pos.reset();
        info!(size = self.pos.size(), "game reset");
        self.state()
    }

    /// Human move for the player to move. A rejected move changes nothing.
    pub fn play(&mut self, pt: Point) -> Result<Snapshot, MoveError> {
        self.pos.play(pt)?;
        Ok(self.state())
    }

    /// Human move on behalf of `color`; rejected with
    /// [`MoveError::OutOfTurn`] unless `color` is to move.
    pub fn play_as(&mut self, pt: Point, color: Color) -> Result<Snapshot, MoveError> {
        self.pos.play_as(pt, color)?;
        Ok(self.state())
    }

    /// Pass for the player to move. Ignored once the game has ended.
    pub fn pass(&mut self) -> Snapshot {
        self.pos.pass_turn();
        self.state()
    }

    /// Let the opponent play for the side to move.
    pub fn ai_move(&mut self) -> AiOutcome {
        if self.pos.is_ended() {
            return AiOutcome {
                passed: false,
                played: None,
                message: Some("Game has ended".to_string()),
                state: self.state(),
            };
        }

        let played = match self.choose() {
            Some(Move::Play(pt)) => match self.pos.play(pt) {
                Ok(_) => Some(pt),
                Err(e) => {
                    warn!(?pt, error = %e, "opponent chose an illegal move, passing instead");
                    None
                }
            },
            Some(Move::Pass) => None,
            None => {
                warn!(difficulty = %self.difficulty, "opponent did not answer in time, passing");
                None
            }
        };

        if played.is_none() {
            self.pos.pass_turn();
        }
        AiOutcome {
            passed: played.is_none(),
            played,
            message: None,
            state: self.state(),
        }
    }

    /// Run the selection, on a worker thread when a timeout is set.
    ///
    /// `None` means the worker ran out of time or died; it is abandoned and
    /// only ever saw a clone of the position.
    fn choose(&mut self) -> Option<Move> {
        let config = self.difficulty.config();
        let Some(limit) = self.timeout else {
            return Some(select_move(&self.pos, &config, &mut self.rng));
        };

        let pos = self.pos.clone();
        let seed = self.rng.u64(..);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut rng = fastrand::Rng::with_seed(seed);
            // The receiver is gone if we already timed out.
            let _ = tx.send(select_move(&pos, &config, &mut rng));
        });
        rx.recv_timeout(limit).ok()
    }
}
