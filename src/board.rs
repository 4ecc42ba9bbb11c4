//! Board engine: owns the grid and the current/next piece; spawns, descends,
//! clears rows, scores and detects game over.
//!
//! The engine is synchronous and has no notion of time. The driver calls
//! [`Board::advance_one_step`] once per tick and forwards the five player
//! commands; side effects for the outside world are queued as [`Sound`]s.

use crate::grid::{Grid, GridError};
use crate::piece::{Collision, Piece};
use crate::shapes::{MAX_SHAPE_SIZE, TetrominoKind};
use crate::source::{PieceSource, RandomSource};
use tracing::{debug, info, warn};

/// Row of the queued piece inside its preview slot.
pub const PREVIEW_ROW: i32 = 1;
/// Vertical offset applied when a queued piece enters the playfield.
pub const SPAWN_LIFT: i32 = -1;

/// Named events for the audio sink. No payload beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    ClearRow,
    Drop,
    GameOver,
}

/// Points for clearing `rows` rows in one lock.
pub fn line_clear_points(rows: usize) -> u32 {
    match rows {
        0 => 0,
        1 => 40,
        2 => 100,
        3 => 300,
        4 => 1200,
        // Unreachable with tetrominoes.
        _ => 1_000_000,
    }
}

#[derive(Debug)]
pub struct Board<S: PieceSource = RandomSource> {
    grid: Grid,
    current: Piece,
    next: Piece,
    score: u32,
    lines_cleared: u32,
    pieces_placed: u32,
    game_over: bool,
    sounds: Vec<Sound>,
    last_cleared: Vec<usize>,
    source: S,
}

impl Board<RandomSource> {
    /// Board with uniform random pieces; `seed` makes the sequence reproducible.
    pub fn random(cols: usize, rows: usize, seed: Option<u64>) -> Result<Self, GridError> {
        let source = seed.map_or_else(RandomSource::from_entropy, RandomSource::seeded);
        Self::new(cols, rows, source)
    }
}

impl<S: PieceSource> Board<S> {
    pub fn new(cols: usize, rows: usize, source: S) -> Result<Self, GridError> {
        Ok(Self::from_grid(Grid::for_board(cols, rows)?, source))
    }

    /// Start from an existing grid (settled cells are kept) and spawn the first piece.
    pub fn from_grid(grid: Grid, mut source: S) -> Self {
        let current = Self::queued(source.next_kind());
        let next = Self::queued(source.next_kind());
        let mut board = Self {
            grid,
            current,
            next,
            score: 0,
            lines_cleared: 0,
            pieces_placed: 0,
            game_over: false,
            sounds: Vec::new(),
            last_cleared: Vec::new(),
            source,
        };
        board.enter_playfield();
        board
    }

    /// A fresh piece parked in the preview slot.
    fn queued(kind: TetrominoKind) -> Piece {
        let mut piece = Piece::new(kind, 0, 0);
        piece.force_move(0, PREVIEW_ROW);
        piece
    }

    /// Column where a piece of `width` spawns.
    #[inline]
    pub fn spawn_column(&self, width: usize) -> i32 {
        (self.grid.width() / 2) as i32 - (width / 2) as i32
    }

    /// Move the freshly promoted piece from its preview slot to the spawn
    /// position and test it there.
    fn enter_playfield(&mut self) {
        let dx = self.spawn_column(self.current.width()) - self.current.x;
        self.current.force_move(dx, SPAWN_LIFT);
        debug!(
            kind = ?self.current.kind,
            x = self.current.x,
            y = self.current.y,
            next = ?self.next.kind,
            "spawned piece"
        );

        if !self.current.attempt_move(&self.grid, 0, 0).is_none() {
            self.game_over = true;
            self.sounds.push(Sound::GameOver);
            info!(
                score = self.score,
                lines = self.lines_cleared,
                pieces = self.pieces_placed,
                "game over: spawn position blocked"
            );
        }
    }

    /// Lock the current piece, clear rows, promote the queued piece and queue a new one.
    pub fn advance_to_next_piece(&mut self) {
        if self.game_over {
            return;
        }
        self.current.write_to_grid(&mut self.grid, true);
        self.pieces_placed += 1;
        debug!(kind = ?self.current.kind, x = self.current.x, y = self.current.y, "locked piece");
        self.resolve_completed_rows();

        let fresh = Self::queued(self.source.next_kind());
        self.current = std::mem::replace(&mut self.next, fresh);
        self.enter_playfield();
    }

    /// Clear complete rows and award points. Returns the number of rows cleared.
    fn resolve_completed_rows(&mut self) -> usize {
        let cleared = self.grid.resolve_completed_rows();
        let count = cleared.len();
        if count > 0 {
            let points = line_clear_points(count);
            self.score = self.score.saturating_add(points);
            self.lines_cleared += count as u32;
            self.sounds.push(Sound::ClearRow);
            info!(rows = ?cleared, points, score = self.score, "cleared rows");
        }
        self.last_cleared = cleared;
        count
    }

    /// One gravity tick: move down, or lock and spawn when blocked.
    pub fn advance_one_step(&mut self) -> Collision {
        if self.game_over {
            return Collision::Block;
        }
        let collision = self.current.attempt_move(&self.grid, 0, 1);
        match collision {
            Collision::None => {}
            Collision::Block => self.advance_to_next_piece(),
            Collision::Side => {
                warn!(kind = ?self.current.kind, x = self.current.x, y = self.current.y,
                    "side collision on a vertical move");
            }
        }
        collision
    }

    /// Player commands are ignored (reported as `Block`) once the game is over.
    pub fn move_left(&mut self) -> Collision {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> Collision {
        self.shift(1)
    }

    fn shift(&mut self, dx: i32) -> Collision {
        if self.game_over {
            return Collision::Block;
        }
        self.current.attempt_move(&self.grid, dx, 0)
    }

    pub fn rotate_cw(&mut self) -> Collision {
        self.rotate(1)
    }

    pub fn rotate_ccw(&mut self) -> Collision {
        self.rotate(-1)
    }

    fn rotate(&mut self, direction: i32) -> Collision {
        if self.game_over {
            return Collision::Block;
        }
        self.current.attempt_rotate(&self.grid, direction)
    }

    /// Drop until blocked, then lock and spawn immediately. Returns rows fallen.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }
        let mut fallen = 0;
        while self.current.attempt_move(&self.grid, 0, 1).is_none() {
            fallen += 1;
        }
        self.sounds.push(Sound::Drop);
        self.advance_to_next_piece();
        fallen
    }

    /// Drain queued sound events, oldest first.
    pub fn take_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.sounds)
    }

    /// Rows cleared by the most recent lock (top-to-bottom, pre-compaction indices).
    pub fn last_cleared_rows(&self) -> &[usize] {
        &self.last_cleared
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    #[inline]
    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn current(&self) -> &Piece {
        &self.current
    }

    #[inline]
    pub fn next(&self) -> &Piece {
        &self.next
    }

    /// Settled cells plus the current piece as transient cells, for rendering.
    /// After game over the blocked piece is left out.
    pub fn render_grid(&self) -> Grid {
        let mut grid = self.grid.clone();
        grid.clear_active();
        if !self.game_over {
            self.current.write_to_grid(&mut grid, false);
        }
        grid
    }

    /// The preview slot with the queued piece drawn in it.
    pub fn preview_grid(&self) -> Grid {
        let mut grid = Grid::blank(MAX_SHAPE_SIZE, MAX_SHAPE_SIZE);
        self.next.write_to_grid(&mut grid, false);
        grid
    }
}
