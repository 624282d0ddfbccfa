use thiserror::Error;

/// Errors surfaced across the engine boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The position description could not be parsed. The position under
    /// construction is discarded; no partially filled state escapes.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// No legal move in the current position matches the given text.
    /// Applying a move by notation must never silently do nothing.
    #[error("no legal move matches '{0}'")]
    UnmatchedMove(String),
}
