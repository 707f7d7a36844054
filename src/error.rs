//! Error types.
//!
//! Illegal inputs never abort a game: the turn controller answers them with a
//! [`Rejection`] and leaves its state untouched (apart from clearing a
//! selection where the rules say so).

use thiserror::Error;

use crate::board::Square;

/// Why the turn controller refused an input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The game has ended; only a reset is accepted.
    #[error("the game is over")]
    GameOver,
    /// The AI is about to move; human input is locked out until it does.
    #[error("waiting for the AI to move")]
    AiMovePending,
    /// `request_ai_move` was called while a human is on turn.
    #[error("it is not the AI's turn")]
    NotAiTurn,
    /// Coordinates outside the 8x8 grid.
    #[error("({row},{col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    /// Nothing to select on that square.
    #[error("no piece on {0}")]
    EmptySquare(Square),
    /// The piece belongs to the player not on turn.
    #[error("the piece on {0} belongs to the opponent")]
    NotOwnPiece(Square),
    /// Another piece has a capture available and must be used instead.
    #[error("a capture is available and must be taken")]
    CaptureRequired,
    /// A destination was submitted without a selected piece.
    #[error("no piece is selected")]
    NoSelection,
    /// The piece on this square must keep capturing before anything else.
    #[error("the piece on {0} must continue capturing")]
    ChainInProgress(Square),
}

/// Errors parsing a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} has {len} squares, expected 8")]
    RowWidth { row: usize, len: usize },
    #[error("unknown glyph {glyph:?} at ({row},{col})")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("piece on light square ({row},{col})")]
    LightSquare { row: usize, col: usize },
}
