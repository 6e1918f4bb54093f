//! Error types surfaced by move parsing and position setup.
//!
//! Both families are recoverable: a failed parse never yields a partially
//! built `Board` or `Move`. Illegal-but-well-formed moves are not errors;
//! they are simply absent from `Board::legal_moves`.

/// Failure to turn caller input into a move on a given board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Text did not parse, or names no piece that can reach the destination.
    #[error("invalid move '{input}': {reason}")]
    InvalidMove { input: String, reason: String },

    /// Several pieces of the named kind reach the destination.
    #[error("ambiguous move '{input}': {candidates} pieces can reach {destination}")]
    AmbiguousMove {
        input: String,
        destination: String,
        candidates: usize,
    },
}

impl MoveError {
    pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> Self {
        MoveError::InvalidMove {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

pub type MoveResult<T> = Result<T, MoveError>;

/// Failure to build a board from a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),

    #[error("invalid {field} field in FEN: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),

    #[error("FEN has extra trailing fields")]
    TrailingFields,
}

pub type LayoutResult<T> = Result<T, LayoutError>;

/// Failure of a multi-threaded perft run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PerftError {
    #[error("perft worker for {0} panicked")]
    WorkerPanicked(String),
}
