//! Playfield grid: fixed rows x cols of cells, row-clear detection and compaction.

use crate::shapes::{TetrominoKind, MAX_SHAPE_SIZE};
use std::collections::VecDeque;

/// Fewest rows in which every standard shape fits at its spawn position.
pub const MIN_BOARD_ROWS: usize = 2;
use thiserror::Error;

/// Single cell. Empty cells are always settled; only a piece's own cells are transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Occupied by the falling piece; rewritten every render pass.
    Active(TetrominoKind),
    /// Permanently locked.
    Settled(TetrominoKind),
}

impl Cell {
    #[inline]
    pub fn kind(self) -> Option<TetrominoKind> {
        match self {
            Self::Empty => None,
            Self::Active(k) | Self::Settled(k) => Some(k),
        }
    }

    #[inline]
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Active(_))
    }

    /// Settled and non-empty: blocks pieces and counts toward a full row.
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, Self::Settled(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {cols}x{rows})")]
    ZeroDimension { cols: usize, rows: usize },
    #[error("grid is {cols} columns wide; at least {min} are needed to spawn pieces")]
    TooNarrow { cols: usize, min: usize },
    #[error("grid is {rows} rows tall; at least {min} are needed to spawn pieces")]
    TooShort { rows: usize, min: usize },
}

/// Playfield: rows[0] is the top row. Dimensions never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    rows: VecDeque<Vec<Cell>>,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Result<Self, GridError> {
        if cols == 0 || rows == 0 {
            return Err(GridError::ZeroDimension { cols, rows });
        }
        Ok(Self::blank(cols, rows))
    }

    /// Grid large enough for the board engine to spawn any catalog shape.
    pub fn for_board(cols: usize, rows: usize) -> Result<Self, GridError> {
        let grid = Self::new(cols, rows)?;
        if cols < MAX_SHAPE_SIZE {
            return Err(GridError::TooNarrow {
                cols,
                min: MAX_SHAPE_SIZE,
            });
        }
        if rows < MIN_BOARD_ROWS {
            return Err(GridError::TooShort {
                rows,
                min: MIN_BOARD_ROWS,
            });
        }
        Ok(grid)
    }

    pub(crate) fn blank(cols: usize, rows: usize) -> Self {
        Self {
            width: cols,
            height: rows,
            rows: (0..rows).map(|_| vec![Cell::Empty; cols]).collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Out-of-range writes are dropped.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Reset every transient (`Active`) cell to empty.
    pub fn clear_active(&mut self) {
        for cell in self.rows.iter_mut().flatten() {
            if !cell.is_settled() {
                *cell = Cell::Empty;
            }
        }
    }

    /// True if every cell in row `y` is settled and non-empty.
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().filter(|c| c.is_solid()).count() == self.width)
    }

    /// Clear complete rows and compact the grid.
    ///
    /// Returns the cleared row indices in top-to-bottom scan order. Each cleared
    /// row is bubbled to the top by adjacent swaps, so every row above it drops
    /// by exactly one (row 0 included).
    pub fn resolve_completed_rows(&mut self) -> Vec<usize> {
        let cleared: Vec<usize> = (0..self.height)
            .filter(|&y| self.is_row_complete(y))
            .collect();

        for &y in &cleared {
            self.rows[y].fill(Cell::Empty);
        }
        // Top-to-bottom order keeps later indices valid: swaps only touch rows above.
        for &y in &cleared {
            for k in (1..=y).rev() {
                self.rows.swap(k, k - 1);
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::TetrominoKind::{I, O, T};

    fn fill_row(g: &mut Grid, y: usize, kind: TetrominoKind) {
        for x in 0..g.width() {
            g.set(x, y, Cell::Settled(kind));
        }
    }

    #[test]
    fn zero_dimensions_fail_fast() {
        assert_eq!(
            Grid::new(0, 20),
            Err(GridError::ZeroDimension { cols: 0, rows: 20 })
        );
        assert!(Grid::new(10, 0).is_err());
        assert_eq!(
            Grid::for_board(3, 20),
            Err(GridError::TooNarrow { cols: 3, min: 4 })
        );
        assert_eq!(
            Grid::for_board(10, 1),
            Err(GridError::TooShort { rows: 1, min: 2 })
        );
        assert!(Grid::for_board(4, 2).is_ok());
    }

    #[test]
    fn empty_is_settled_active_is_not() {
        assert!(Cell::Empty.is_settled());
        assert!(!Cell::Empty.is_solid());
        assert!(!Cell::Active(T).is_settled());
        assert!(Cell::Settled(T).is_solid());
        assert_eq!(Cell::Active(O).kind(), Some(O));
    }

    #[test]
    fn out_of_range_access_is_none() {
        let mut g = Grid::new(4, 3).unwrap();
        assert_eq!(g.get(4, 0), None);
        assert_eq!(g.get(0, 3), None);
        g.set(9, 9, Cell::Settled(I));
        assert!(g.rows().flatten().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn active_cells_do_not_complete_rows() {
        let mut g = Grid::new(4, 2).unwrap();
        for x in 0..4 {
            g.set(x, 1, Cell::Active(I));
        }
        assert!(!g.is_row_complete(1));
        assert!(g.resolve_completed_rows().is_empty());
        g.clear_active();
        assert!(g.rows().flatten().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn single_clear_shifts_everything_above_including_top_row() {
        let mut g = Grid::new(4, 4).unwrap();
        g.set(0, 0, Cell::Settled(T));
        g.set(1, 1, Cell::Settled(O));
        fill_row(&mut g, 3, I);

        assert_eq!(g.resolve_completed_rows(), vec![3]);
        assert_eq!(g.get(0, 1), Some(Cell::Settled(T)));
        assert_eq!(g.get(1, 2), Some(Cell::Settled(O)));
        assert!(g.row(0).unwrap().iter().all(|c| *c == Cell::Empty));
        assert!(!g.is_row_complete(3));
    }

    #[test]
    fn non_adjacent_clears_compact_correctly() {
        // rows: 0 marker A, 1 full, 2 marker B, 3 full, 4 marker C
        let mut g = Grid::new(3, 5).unwrap();
        g.set(0, 0, Cell::Settled(T));
        fill_row(&mut g, 1, I);
        g.set(1, 2, Cell::Settled(O));
        fill_row(&mut g, 3, I);
        g.set(2, 4, Cell::Settled(T));

        assert_eq!(g.resolve_completed_rows(), vec![1, 3]);
        assert!(g.row(0).unwrap().iter().all(|c| *c == Cell::Empty));
        assert!(g.row(1).unwrap().iter().all(|c| *c == Cell::Empty));
        assert_eq!(g.get(0, 2), Some(Cell::Settled(T)));
        assert_eq!(g.get(1, 3), Some(Cell::Settled(O)));
        assert_eq!(g.get(2, 4), Some(Cell::Settled(T)));
    }
}
