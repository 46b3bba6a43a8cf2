//! Square Go board with group and liberty analysis.
//!
//! Points are `(row, col)` pairs with row 0 at the top. Groups and liberty
//! sets are derived on demand by flood fill; nothing about them is cached.

use std::fmt;

use arrayvec::ArrayVec;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// A point on the board as `(row, col)`.
pub type Point = (usize, usize);

/// Stone color of a player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Color {
    Black = 1,
    White = 2,
}

impl Color {
    pub fn opp(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Color::Black),
            2 => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Content of a single intersection. The integer codes are part of the
/// snapshot format.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Black = 1,
    White = 2,
}

impl Cell {
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Black),
            2 => Some(Cell::White),
            _ => None,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

/// An NxN grid of cells stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "board size must be at least 1");
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Build a board from rows of cells. Returns `None` unless the rows form
    /// a non-empty square.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, (row, col): Point) -> usize {
        row * self.size + col
    }

    pub fn on_board(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    /// The cell at `pt`, or `None` when `pt` is off the board.
    pub fn get(&self, pt: Point) -> Option<Cell> {
        if !self.on_board(pt) {
            return None;
        }
        Some(self.cells[self.idx(pt)])
    }

    /// Overwrite a cell. Returns `false` (and does nothing) off the board.
    pub fn set(&mut self, pt: Point, cell: Cell) -> bool {
        if !self.on_board(pt) {
            return false;
        }
        let i = self.idx(pt);
        self.cells[i] = cell;
        true
    }

    pub fn is_empty_at(&self, pt: Point) -> bool {
        self.get(pt) == Some(Cell::Empty)
    }

    /// Stone color at `pt`, `None` for empty or off-board points.
    pub fn color_at(&self, pt: Point) -> Option<Color> {
        self.get(pt).and_then(Cell::color)
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| (row, col)))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.size).map(<[Cell]>::to_vec).collect()
    }

    /// In-bounds orthogonal neighbors in the order right, left, down, up.
    pub fn neighbors(&self, (row, col): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if col + 1 < self.size {
            result.push((row, col + 1));
        }
        if col > 0 {
            result.push((row, col - 1));
        }
        if row + 1 < self.size {
            result.push((row + 1, col));
        }
        if row > 0 {
            result.push((row - 1, col));
        }
        result
    }

    /// Flood-fill the group containing `pt`.
    ///
    /// Returns an empty vector for empty or off-board points. Uses an explicit
    /// stack, so large boards cannot overflow the call stack.
    pub fn group_at(&self, pt: Point) -> Vec<Point> {
        let Some(color) = self.color_at(pt) else {
            return Vec::new();
        };

        let mut visited = vec![false; self.cells.len()];
        let mut group = Vec::new();
        let mut stack = vec![pt];

        while let Some(p) = stack.pop() {
            let i = self.idx(p);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            group.push(p);
            for n in self.neighbors(p) {
                if !visited[self.idx(n)] && self.color_at(n) == Some(color) {
                    stack.push(n);
                }
            }
        }
        group
    }

    /// Empty points adjacent to any member of `group`, without duplicates.
    pub fn liberties_of(&self, group: &[Point]) -> Vec<Point> {
        let mut seen = vec![false; self.cells.len()];
        let mut libs = Vec::new();
        for &p in group {
            for n in self.neighbors(p) {
                let i = self.idx(n);
                if !seen[i] && self.cells[i] == Cell::Empty {
                    seen[i] = true;
                    libs.push(n);
                }
            }
        }
        libs
    }

    /// Liberty count of the group at `pt` (0 for empty points).
    pub fn liberty_count_at(&self, pt: Point) -> usize {
        self.liberties_of(&self.group_at(pt)).len()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                let ch = match cell {
                    Cell::Black => 'X',
                    Cell::White => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, pt: Point, color: Color) {
        assert!(board.set(pt, color.into()));
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(9);
        assert_eq!(board.size(), 9);
        assert_eq!(board.empty_count(), 81);
        assert!(board.points().all(|p| board.is_empty_at(p)));
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn test_zero_size_panics() {
        Board::new(0);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut board = Board::new(5);
        assert_eq!(board.get((5, 0)), None);
        assert_eq!(board.get((0, 5)), None);
        assert!(!board.set((7, 7), Cell::Black));
    }

    #[test]
    fn test_neighbor_order() {
        let board = Board::new(9);
        let ns: Vec<Point> = board.neighbors((4, 4)).into_iter().collect();
        assert_eq!(ns, vec![(4, 5), (4, 3), (5, 4), (3, 4)]);
    }

    #[test]
    fn test_corner_and_edge_neighbors() {
        let board = Board::new(9);
        assert_eq!(board.neighbors((0, 0)).len(), 2);
        assert_eq!(board.neighbors((0, 4)).len(), 3);
        assert_eq!(board.neighbors((8, 8)).len(), 2);
        assert_eq!(Board::new(1).neighbors((0, 0)).len(), 0);
    }

    #[test]
    fn test_single_stone_liberties() {
        let mut board = Board::new(9);
        place(&mut board, (4, 4), Color::Black);
        assert_eq!(board.liberty_count_at((4, 4)), 4);
    }

    #[test]
    fn test_corner_stone_liberties() {
        let mut board = Board::new(9);
        place(&mut board, (0, 0), Color::Black);
        assert_eq!(board.liberty_count_at((0, 0)), 2);
    }

    #[test]
    fn test_shared_liberties_counted_once() {
        let mut board = Board::new(9);
        place(&mut board, (4, 4), Color::Black);
        place(&mut board, (4, 5), Color::Black);
        assert_eq!(board.liberty_count_at((4, 4)), 6);
        assert_eq!(board.liberty_count_at((4, 5)), 6);
    }

    #[test]
    fn test_group_stops_at_other_color() {
        let mut board = Board::new(9);
        place(&mut board, (4, 4), Color::Black);
        place(&mut board, (4, 5), Color::Black);
        place(&mut board, (4, 6), Color::White);
        place(&mut board, (5, 5), Color::Black);

        let mut group = board.group_at((4, 4));
        group.sort();
        assert_eq!(group, vec![(4, 4), (4, 5), (5, 5)]);
        assert_eq!(board.group_at((4, 6)), vec![(4, 6)]);
    }

    #[test]
    fn test_empty_point_has_no_group() {
        let board = Board::new(9);
        assert!(board.group_at((4, 4)).is_empty());
        assert!(board.group_at((20, 20)).is_empty());
        assert_eq!(board.liberty_count_at((4, 4)), 0);
    }

    #[test]
    fn test_from_rows_requires_square() {
        let ok = Board::from_rows(&[vec![Cell::Empty, Cell::Black], vec![Cell::White, Cell::Empty]]);
        assert_eq!(ok.map(|b| b.size()), Some(2));
        assert!(Board::from_rows(&[vec![Cell::Empty], vec![Cell::Empty, Cell::Empty]]).is_none());
        assert!(Board::from_rows(&[]).is_none());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3);
        place(&mut board, (0, 0), Color::Black);
        place(&mut board, (2, 1), Color::White);
        assert_eq!(board.to_string(), "X . . \n. . . \n. O . \n");
    }

    #[test]
    fn test_codes() {
        assert_eq!(Cell::from_code(2), Some(Cell::White));
        assert_eq!(Cell::from_code(3), None);
        assert_eq!(Color::from_code(0), None);
        assert_eq!(Color::Black.opp(), Color::White);
        assert_eq!(Cell::from(Color::White).code(), 2);
    }
}
