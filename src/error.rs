//! Error types for the engine API

use thiserror::Error;

use crate::rules::ForbiddenKind;

/// Errors returned by fallible engine calls.
///
/// Predicates such as [`crate::is_legal_move`] never error; they report
/// bad input as `false`. Only operations that hand back a position or
/// parse outside input return these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: u8, col: u8 },

    #[error("move ({row}, {col}) is forbidden for black: {kind}")]
    Forbidden {
        row: u8,
        col: u8,
        kind: ForbiddenKind,
    },

    #[error("board must have 19 rows, found {found}")]
    RowCount { found: usize },

    #[error("board row {row} must have 19 cells, found {found}")]
    RowLength { row: usize, found: usize },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("invalid search options: {0}")]
    InvalidOptions(String),
}
