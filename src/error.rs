//! Error types for move application, evaluation and snapshot import.

use std::fmt;

use crate::board::Point;

/// Reason a move was rejected. The position is never modified on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The game already ended with two consecutive passes
    GameOver,
    /// The requesting player is not the one to move
    OutOfTurn,
    /// Point is not on the board
    OutOfBounds,
    /// Point is not empty
    Occupied,
    /// Move would leave its own group without liberties and capture nothing
    Suicide,
    /// Move retakes a single-stone ko immediately
    Ko,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => write!(f, "illegal move: game has ended"),
            MoveError::OutOfTurn => write!(f, "illegal move: out of turn"),
            MoveError::OutOfBounds => write!(f, "illegal move: point not on board"),
            MoveError::Occupied => write!(f, "illegal move: point not empty"),
            MoveError::Suicide => write!(f, "illegal move: suicide"),
            MoveError::Ko => write!(f, "illegal move: retakes ko"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Fault raised while scoring a single candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// The simulated placement was refused by the rules engine
    Rejected { point: Point, reason: MoveError },
    /// The simulated stone is missing from the board after placement
    StoneMissing(Point),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Rejected { point, reason } => {
                write!(f, "cannot simulate {point:?}: {reason}")
            }
            EvalError::StoneMissing(point) => {
                write!(f, "simulated stone at {point:?} vanished")
            }
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Rejected { reason, .. } => Some(reason),
            EvalError::StoneMissing(_) => None,
        }
    }
}

/// A snapshot that does not describe a valid game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// `board_size` is zero or disagrees with the grid
    BadSize { declared: usize, rows: usize },
    /// A row has the wrong number of cells
    RaggedRow { row: usize, len: usize },
    /// The stored ko point is off the board or occupied
    BadKo(Point),
    /// `game_ended` disagrees with `consecutive_passes`
    BadPasses { passes: u32, ended: bool },
    /// JSON could not be parsed
    Json(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::BadSize { declared, rows } => {
                write!(f, "board_size {declared} does not match {rows} rows")
            }
            SnapshotError::RaggedRow { row, len } => {
                write!(f, "row {row} has {len} cells")
            }
            SnapshotError::BadKo(pt) => write!(f, "ko point {pt:?} is not an empty point"),
            SnapshotError::BadPasses { passes, ended } => {
                write!(f, "game_ended {ended} with {passes} consecutive passes")
            }
            SnapshotError::Json(msg) => write!(f, "invalid snapshot json: {msg}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e.to_string())
    }
}
