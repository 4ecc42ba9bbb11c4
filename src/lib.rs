//! Blockfall: a falling-block puzzle engine with a terminal front end.
//!
//! The engine ([`board`], [`grid`], [`piece`], [`shapes`], [`source`]) is
//! synchronous and terminal-agnostic; [`app`] and [`ui`] drive it with
//! crossterm and ratatui.

pub mod app;
pub mod audio;
pub mod board;
pub mod config;
pub mod grid;
pub mod input;
pub mod piece;
pub mod shapes;
pub mod source;
pub mod theme;
pub mod ui;

pub use board::{Board, Sound};
pub use config::GameConfig;
pub use grid::{Cell, Grid, GridError};
pub use piece::{Collision, Piece};
pub use shapes::TetrominoKind;
