//! Serializable export of a [`Position`].
//!
//! The JSON shape matches what front ends consume:
//!
//! ```json
//! {
//!   "board": [[0, 1, 2], ...],
//!   "current_player": 1,
//!   "captured_stones": {"black": 0, "white": 0},
//!   "board_size": 19,
//!   "game_ended": false,
//!   "consecutive_passes": 0
//! }
//! ```
//!
//! An active ko point is exported as `"ko_point": [row, col]` and omitted
//! otherwise, so imports reproduce move legality exactly.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Color, Point};
use crate::constants::PASSES_TO_END;
use crate::error::SnapshotError;
use crate::position::{Captures, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Vec<Vec<Cell>>,
    pub current_player: Color,
    pub captured_stones: Captures,
    pub board_size: usize,
    pub game_ended: bool,
    pub consecutive_passes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ko_point: Option<Point>,
}

impl Snapshot {
    pub fn to_json(&self) -> String {
        // Plain data with string keys only; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(s: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Position {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board().rows(),
            current_player: self.to_move(),
            captured_stones: self.captures(),
            board_size: self.size(),
            game_ended: self.is_ended(),
            consecutive_passes: self.consecutive_passes(),
            ko_point: self.ko(),
        }
    }

    /// Rebuild a position from a snapshot. The move history is not part of
    /// a snapshot and starts out empty.
    pub fn from_snapshot(snap: &Snapshot) -> Result<Self, SnapshotError> {
        if snap.board_size == 0 || snap.board.len() != snap.board_size {
            return Err(SnapshotError::BadSize {
                declared: snap.board_size,
                rows: snap.board.len(),
            });
        }
        if let Some((row, cells)) = snap
            .board
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != snap.board_size)
        {
            return Err(SnapshotError::RaggedRow {
                row,
                len: cells.len(),
            });
        }
        let board = Board::from_rows(&snap.board).ok_or(SnapshotError::BadSize {
            declared: snap.board_size,
            rows: snap.board.len(),
        })?;
        if snap.game_ended != (snap.consecutive_passes >= PASSES_TO_END) {
            return Err(SnapshotError::BadPasses {
                passes: snap.consecutive_passes,
                ended: snap.game_ended,
            });
        }
        if let Some(ko) = snap.ko_point {
            if !board.is_empty_at(ko) {
                return Err(SnapshotError::BadKo(ko));
            }
        }

        Ok(Position::from_board(board, snap.current_player).with_counters(
            snap.captured_stones,
            snap.consecutive_passes,
            snap.game_ended,
            snap.ko_point,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_codes() {
        let mut pos = Position::new(3);
        pos.play((0, 0)).unwrap();
        pos.play((2, 2)).unwrap();
        let json = pos.snapshot().to_json();
        assert_eq!(
            json,
            r#"{"board":[[1,0,0],[0,0,0],[0,0,2]],"current_player":1,"captured_stones":{"black":0,"white":0},"board_size":3,"game_ended":false,"consecutive_passes":0}"#
        );
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut pos = Position::new(5);
        pos.play((1, 1)).unwrap();
        pos.pass_turn();
        let restored = Position::from_snapshot(&pos.snapshot()).unwrap();
        assert_eq!(restored.board(), pos.board());
        assert_eq!(restored.to_move(), pos.to_move());
        assert_eq!(restored.consecutive_passes(), 1);
        assert!(restored.history().is_empty());
    }

    #[test]
    fn test_from_json_without_ko_field() {
        let json = r#"{"board":[[0,2],[1,0]],"current_player":2,"captured_stones":{"black":3,"white":1},"board_size":2,"game_ended":true,"consecutive_passes":2}"#;
        let snap = Snapshot::from_json(json).unwrap();
        let pos = Position::from_snapshot(&snap).unwrap();
        assert_eq!(pos.to_move(), Color::White);
        assert_eq!(pos.captures().black, 3);
        assert!(pos.is_ended());
        assert_eq!(pos.ko(), None);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let mut snap = Position::new(3).snapshot();
        snap.board_size = 4;
        assert!(matches!(
            Position::from_snapshot(&snap),
            Err(SnapshotError::BadSize { declared: 4, rows: 3 })
        ));

        let mut snap = Position::new(3).snapshot();
        snap.board[1].pop();
        assert_eq!(
            Position::from_snapshot(&snap),
            Err(SnapshotError::RaggedRow { row: 1, len: 2 })
        );

        assert!(matches!(
            Snapshot::from_json(r#"{"board":[[7]],"current_player":1}"#),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_inconsistent_passes() {
        let mut snap = Position::new(3).snapshot();
        snap.consecutive_passes = 2;
        assert_eq!(
            Position::from_snapshot(&snap),
            Err(SnapshotError::BadPasses {
                passes: 2,
                ended: false
            })
        );

        snap.consecutive_passes = 1;
        snap.game_ended = true;
        assert_eq!(
            Position::from_snapshot(&snap),
            Err(SnapshotError::BadPasses {
                passes: 1,
                ended: true
            })
        );
    }

    #[test]
    fn test_rejects_occupied_ko() {
        let mut pos = Position::new(3);
        pos.play((0, 0)).unwrap();
        let mut snap = pos.snapshot();
        snap.ko_point = Some((0, 0));
        assert_eq!(
            Position::from_snapshot(&snap),
            Err(SnapshotError::BadKo((0, 0)))
        );
    }
}
