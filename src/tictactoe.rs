//! Tic-tac-toe game engine
//!
//! Pure functions over an immutable 3×3 board: move application, legal-move
//! enumeration, and terminal-state detection. This module has no dependency
//! on the learning code; the agent drives it to generate episodes.

pub mod board;
pub mod lines;

pub use board::{Board, Cell, GameStatus, Player};
pub use lines::{LineAnalyzer, WINNING_LINES};
