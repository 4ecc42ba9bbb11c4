//! A positioned, rotatable tetromino that validates its own moves against a grid.

use crate::grid::{Cell, Grid};
use crate::shapes::{Matrix, TetrominoKind};

/// Outcome of a collision test. Anything but `None` means the attempt was rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    None,
    /// A cell left the grid horizontally.
    Side,
    /// A cell left the grid vertically, or overlaps a settled block.
    Block,
}

impl Collision {
    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

/// Current piece: kind, top-left of its bounding matrix, and rotation index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: TetrominoKind,
    pub x: i32,
    pub y: i32,
    rotation: usize,
}

impl Piece {
    pub fn new(kind: TetrominoKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: 0,
        }
    }

    /// Start in a given rotation state, wrapped into range.
    pub fn with_rotation(kind: TetrominoKind, x: i32, y: i32, rotation: usize) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: rotation % kind.rotation_count(),
        }
    }

    /// Rotation index, always in `[0, rotation_count)`.
    #[inline]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[inline]
    pub fn matrix(&self) -> Matrix {
        self.kind.matrix(self.rotation)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.kind.width()
    }

    /// Grid coordinates of every occupied cell, rows outer, columns inner.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix().iter().enumerate().flat_map(move |(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &bit)| bit != 0)
                .map(move |(dx, _)| (self.x + dx as i32, self.y + dy as i32))
        })
    }

    /// First violation wins: vertical out-of-range is `Block`, horizontal is
    /// `Side`, overlap with a settled non-empty cell is `Block`.
    pub fn check_collision(&self, grid: &Grid) -> Collision {
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        for (x, y) in self.cells() {
            if y < 0 || y >= h {
                return Collision::Block;
            }
            if x < 0 || x >= w {
                return Collision::Side;
            }
            if grid
                .get(x as usize, y as usize)
                .is_some_and(Cell::is_solid)
            {
                return Collision::Block;
            }
        }
        Collision::None
    }

    /// Translate by `(dx, dy)`; on collision the position is restored.
    pub fn attempt_move(&mut self, grid: &Grid, dx: i32, dy: i32) -> Collision {
        self.force_move(dx, dy);
        let collision = self.check_collision(grid);
        if !collision.is_none() {
            self.force_move(-dx, -dy);
        }
        collision
    }

    /// Step the rotation index by `direction` (+1 cw, -1 ccw). No wall kicks:
    /// a colliding rotation is rejected and the old index restored.
    pub fn attempt_rotate(&mut self, grid: &Grid, direction: i32) -> Collision {
        let previous = self.rotation;
        self.rotation = wrap_rotation(self.rotation, direction, self.kind.rotation_count());
        let collision = self.check_collision(grid);
        if !collision.is_none() {
            self.rotation = previous;
        }
        collision
    }

    /// Unchecked translation, for placement and preview-to-playfield transfer.
    #[inline]
    pub fn force_move(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Write occupied cells into the grid, as `Settled` or `Active`.
    /// Cells outside the grid are skipped; callers lock only after a collision check.
    pub fn write_to_grid(&self, grid: &mut Grid, settled: bool) {
        let cell = if settled {
            Cell::Settled(self.kind)
        } else {
            Cell::Active(self.kind)
        };
        for (x, y) in self.cells() {
            if x >= 0 && y >= 0 {
                grid.set(x as usize, y as usize, cell);
            }
        }
    }
}

/// `(rotation + direction) mod count`, normalized to non-negative.
fn wrap_rotation(rotation: usize, direction: i32, count: usize) -> usize {
    let count = count as i32;
    (rotation as i32 + direction).rem_euclid(count) as usize
}
