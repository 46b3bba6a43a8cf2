//! Go-Opponent: a Go rules engine with a heuristic automated opponent.
//!
//! This crate implements the rules of Go (captures, suicide, simple ko,
//! passing) on a square board of any size, plus a single-ply opponent that
//! scores candidate moves with a handful of heuristics and picks among the
//! best ones with a difficulty-dependent amount of randomness.
//!
//! ## Modules
//!
//! - [`constants`] - Heuristic weights and game parameters
//! - [`board`] - 2D board, stones, neighbors, groups and liberties
//! - [`rules`] - Suicide, capture and ko detection on a bare board
//! - [`position`] - Game state and the move/pass state machine
//! - [`snapshot`] - Serializable view of a game
//! - [`difficulty`] - Difficulty tiers and their scoring weights
//! - [`eval`] - Heuristic evaluation of a candidate move
//! - [`opponent`] - Move selection and the pass decision
//! - [`session`] - A game against the opponent with fail-safe automated moves
//! - [`gtp`] - Go Text Protocol front end
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use go_opponent::difficulty::Difficulty;
//! use go_opponent::opponent::{Move, Opponent};
//! use go_opponent::position::Position;
//!
//! // Create a new game and play a move
//! let mut pos = Position::new(9);
//! pos.play((4, 4)).unwrap();
//!
//! // Ask the opponent for a reply
//! let mut opponent = Opponent::seeded(Difficulty::Hard, 42);
//! match opponent.select_move(&pos) {
//!     Move::Play(pt) => println!("opponent plays {pt:?}"),
//!     Move::Pass => println!("opponent passes"),
//! }
//! ```

pub mod board;
pub mod constants;
pub mod difficulty;
pub mod error;
pub mod eval;
pub mod gtp;
pub mod opponent;
pub mod position;
pub mod rules;
pub mod session;
pub mod snapshot;

pub use board::{Board, Cell, Color, Point};
pub use difficulty::{Difficulty, DifficultyConfig};
pub use error::{EvalError, MoveError, SnapshotError};
pub use opponent::{Move, Opponent};
pub use position::Position;
pub use session::Session;
pub use snapshot::Snapshot;
