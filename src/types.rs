//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board size constant for tic-tac-toe.
pub const BOARD_SIZE: usize = 9;

/// A validated board state key.
///
/// A state key is the canonical, order-preserving encoding of a board: one
/// character per cell (`'X'`, `'O'`, or `'.'` for an empty cell), in index
/// order. Two boards with identical cell contents always map to the same
/// key, and the key is the only identity notion the value table knows about.
///
/// # Examples
///
/// ```
/// use qoxo::tictactoe::Board;
/// use qoxo::types::StateKey;
///
/// let key = Board::new().state_key();
/// assert_eq!(key.as_str(), ".........");
///
/// // Parse from a string (validates the format)
/// let key = StateKey::parse("XO.......").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Parse and validate a state key from a string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardLength`] if the string is not
    /// exactly nine characters, or [`crate::Error::InvalidCellCharacter`] if
    /// any character is not `'X'`, `'O'`, or `'.'`.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        for (i, &c) in chars.iter().enumerate() {
            if !matches!(c, 'X' | 'O' | '.') {
                return Err(crate::Error::InvalidCellCharacter {
                    character: c,
                    position: i,
                    context: s.to_string(),
                });
            }
        }

        Ok(StateKey(s.to_string()))
    }

    /// Create from an encoding known to be valid (for internal use).
    pub(crate) fn from_encoding(encoding: String) -> Self {
        StateKey(encoding)
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Q-learning hyperparameters, fixed for the lifetime of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Exploration rate ε
    pub epsilon: f64,
}

impl Hyperparameters {
    /// Create a validated set of hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidHyperparameter`] if any value is not
    /// finite or falls outside `[0, 1]`.
    pub fn new(alpha: f64, gamma: f64, epsilon: f64) -> Result<Self, crate::Error> {
        Self::validate("alpha", alpha)?;
        Self::validate("gamma", gamma)?;
        Self::validate("epsilon", epsilon)?;
        Ok(Hyperparameters {
            alpha,
            gamma,
            epsilon,
        })
    }

    fn validate(name: &'static str, value: f64) -> Result<(), crate::Error> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(crate::Error::InvalidHyperparameter { name, value })
        }
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Hyperparameters {
            alpha: 0.5,
            gamma: 0.9,
            epsilon: 0.1,
        }
    }
}

/// Terminal reward values for self-play episodes.
pub mod reward {
    /// Reward credited to the winning side.
    pub const WIN: f64 = 1.0;

    /// Reward for a drawn game (both sides).
    pub const DRAW: f64 = 0.0;

    /// Reward credited to the losing side.
    pub const LOSS: f64 = -1.0;
}
