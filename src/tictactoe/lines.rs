//! Winning line analysis for tic-tac-toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in tic-tac-toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Find the winner, if any, scanning lines in a fixed order.
    ///
    /// The first matching line in [`WINNING_LINES`] decides the result. In
    /// legal play at most one player can hold a completed line, so the
    /// enumeration order only matters for determinism.
    pub fn winner(cells: &[Cell; 9]) -> Option<Player> {
        for line in &WINNING_LINES {
            let first = cells[line[0]];
            if first != Cell::Empty && line.iter().all(|&idx| cells[idx] == first) {
                return first.to_player();
            }
        }
        None
    }
}
