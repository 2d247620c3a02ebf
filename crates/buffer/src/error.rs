//! Buffer and editor errors

use selection::{Position, Selection};
use thiserror::Error;

/// Mutation engine failure; the matrix is left untouched when returned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("Position {position} is outside the buffer")]
    OutOfBounds { position: Position },
    #[error("Modifications overlap: {first} and {second}")]
    OverlappingEdit { first: Selection, second: Selection },
}

/// Editor capability failure
#[derive(Debug, Clone, Error)]
pub enum EditorError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("Host I/O failed: {0}")]
    HostIo(String),
}
