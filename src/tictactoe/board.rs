//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{BOARD_SIZE, StateKey};

/// A cell on the tic-tac-toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Parse a player token ("X" or "O", case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPlayerString`] for anything else.
    pub fn parse(s: &str) -> Result<Player, crate::Error> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(Player::X),
            "O" => Ok(Player::O),
            _ => Err(crate::Error::InvalidPlayerString {
                player: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Outcome classification for a board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// A player holds a completed winning line
    Won(Player),
    /// The board is full with no winning line
    Draw,
    /// The game is still undecided
    InProgress,
}

impl GameStatus {
    /// Check whether the position is terminal (won or drawn)
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// An immutable 3×3 board.
///
/// This type implements `Copy` for efficiency since it's only 9 bytes. Moves
/// never mutate in place; [`Board::apply_move`] returns a new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; 9],
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Helper: Parse 9 cells from a slice of characters.
    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; 9], crate::Error> {
        if chars.len() != BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Ok(cells)
    }

    /// Helper: Count pieces on the board.
    fn count_pieces(cells: &[Cell; 9]) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Create a board from a string representation.
    ///
    /// The string must contain 9 cell characters after whitespace is filtered
    /// out (`'X'`, `'O'`, `'.'`, or `'_'` for empty). Piece counts must be
    /// consistent with X-first play.
    ///
    /// # Errors
    ///
    /// Returns an error if the board part is not 9 characters, any character
    /// is not a valid cell, or the piece counts differ by more than one.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        let cells = Self::parse_cells(&cleaned, s)?;

        let count = Self::count_pieces(&cells);
        if count.x != count.o && count.x != count.o + 1 {
            return Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }

        Ok(Board { cells })
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all legal move positions in ascending index order
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check if the board has no empty cells
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Apply a move and return a new board, leaving this one unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if `position` is out of
    /// bounds, or [`crate::Error::OccupiedCell`] if the target cell is not
    /// empty. Both indicate a caller bug rather than runtime happenstance.
    #[must_use = "apply_move returns a new board; the original is unchanged"]
    pub fn apply_move(&self, position: usize, player: Player) -> Result<Board, crate::Error> {
        if position >= BOARD_SIZE {
            return Err(crate::Error::InvalidPosition { position });
        }

        if !self.is_empty(position) {
            return Err(crate::Error::OccupiedCell { position });
        }

        let mut next = *self;
        next.cells[position] = player.to_cell();
        Ok(next)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        super::lines::LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        super::lines::LineAnalyzer::winner(&self.cells)
    }

    /// Classify the position: won, drawn, or still in progress
    pub fn status(&self) -> GameStatus {
        if let Some(winner) = self.winner() {
            GameStatus::Won(winner)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Derive the side to move from piece counts.
    ///
    /// X moves first, so equal counts mean X to move and X ahead by one means
    /// O to move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPieceCounts`] for counts unreachable in
    /// legal play.
    pub fn player_to_move(&self) -> Result<Player, crate::Error> {
        let count = Self::count_pieces(&self.cells);
        if count.x == count.o {
            Ok(Player::X)
        } else if count.x == count.o + 1 {
            Ok(Player::O)
        } else {
            Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            })
        }
    }

    /// Swap X and O pieces, leaving empty cells untouched.
    #[must_use = "swap_players returns a new board; the original is unchanged"]
    pub fn swap_players(&self) -> Self {
        let mut swapped = *self;
        for cell in &mut swapped.cells {
            *cell = match cell {
                Cell::X => Cell::O,
                Cell::O => Cell::X,
                Cell::Empty => Cell::Empty,
            };
        }
        swapped
    }

    /// Get the canonical string key for use in the value table
    pub fn state_key(&self) -> StateKey {
        StateKey::from_encoding(self.cells.iter().map(|&c| c.to_char()).collect())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        for i in 0..9 {
            assert_eq!(board.cells[i], Cell::Empty);
        }
        assert_eq!(board.status(), GameStatus::InProgress);
        assert_eq!(board.available_moves().len(), 9);
    }

    #[test]
    fn test_apply_move_is_pure() {
        let board = Board::new();
        let next = board.apply_move(4, Player::X).unwrap();

        assert_eq!(board.cells[4], Cell::Empty);
        assert_eq!(next.cells[4], Cell::X);

        // Only index 4 differs
        for i in 0..9 {
            if i != 4 {
                assert_eq!(board.cells[i], next.cells[i]);
            }
        }
    }

    #[test]
    fn test_apply_move_rejects_out_of_bounds() {
        let board = Board::new();
        let err = board.apply_move(9, Player::X).unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_apply_move_rejects_occupied_cell() {
        let board = Board::new().apply_move(4, Player::X).unwrap();
        let err = board.apply_move(4, Player::O).unwrap_err();
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    fn test_available_moves_ascending() {
        let board = Board::from_string("X...O....").unwrap();
        assert_eq!(board.available_moves(), vec![1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_win_detection_row() {
        // X completes the top row at position 2
        let board = Board::from_string("XX...OO..").unwrap();
        let finished = board.apply_move(2, Player::X).unwrap();

        assert_eq!(finished.status(), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_draw_detection() {
        let board = Board::from_string("XOXXOOOXX").unwrap();
        assert!(board.is_full());
        assert_eq!(board.status(), GameStatus::Draw);
    }

    #[test]
    fn test_status_symmetric_under_relabeling() {
        let board = Board::from_string("XX...OO..")
            .unwrap()
            .apply_move(2, Player::X)
            .unwrap();
        let swapped = board.swap_players();

        assert_eq!(board.status(), GameStatus::Won(Player::X));
        assert_eq!(swapped.status(), GameStatus::Won(Player::O));
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("XOX......").unwrap();
        assert_eq!(board.cells[0], Cell::X);
        assert_eq!(board.cells[1], Cell::O);
        assert_eq!(board.cells[2], Cell::X);

        assert!(Board::from_string("XO").is_err());
        assert!(Board::from_string("XOZ......").is_err());
    }

    #[test]
    fn test_from_string_rejects_bad_counts() {
        let err = Board::from_string("XXX......").unwrap_err();
        assert!(err.to_string().contains("piece counts"));
    }

    #[test]
    fn test_player_to_move() {
        assert_eq!(Board::new().player_to_move().unwrap(), Player::X);

        let board = Board::from_string("X........").unwrap();
        assert_eq!(board.player_to_move().unwrap(), Player::O);

        let board = Board::from_string("XO.......").unwrap();
        assert_eq!(board.player_to_move().unwrap(), Player::X);
    }

    #[test]
    fn test_state_key() {
        assert_eq!(Board::new().state_key().as_str(), ".........");

        let board = Board::from_string("XO.......").unwrap();
        assert_eq!(board.state_key().as_str(), "XO.......");
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XOX.O.X..").unwrap();
        let display = format!("{board}");
        assert!(display.contains("XOX"));
        assert!(display.contains(".O."));
        assert!(display.contains("X.."));
    }
}
