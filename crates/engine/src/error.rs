//! Error types for board operations

use thiserror::Error;

/// Errors raised by the board while parsing positions or replaying moves
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// FEN string could not be parsed
    #[error("Invalid FEN: {reason}")]
    InvalidFen { reason: String },

    /// Square text is not in "a1".."h8"
    #[error("Invalid square: {text}")]
    InvalidSquare { text: String },

    /// Move text does not match any legal move in the position
    #[error("Illegal or unknown move: {text}")]
    IllegalMove { text: String },

    /// `undo_last_move` called with an empty history
    #[error("No moves to undo")]
    NoMoveToUndo,
}

/// Result type alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;
