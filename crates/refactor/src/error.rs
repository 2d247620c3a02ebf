//! Refactoring errors

use buffer::{EditorError, ErrorReason};
use thiserror::Error;
use treesitter::ParseError;

#[derive(Debug, Error)]
pub enum RefactorError {
    #[error("Parse failure: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("Unknown refactoring: {0}")]
    UnknownRefactoring(String),
    #[error("Nothing to refactor: {0}")]
    NotApplicable(ErrorReason),
}

impl RefactorError {
    /// Reason shown to the user
    pub fn reason(&self) -> ErrorReason {
        match self {
            Self::Parse(error) => ErrorReason::CodeParsingFailed(error.to_string()),
            Self::Editor(error) => ErrorReason::WriteFailed(error.to_string()),
            Self::UnknownRefactoring(id) => ErrorReason::UnknownRefactoring(id.clone()),
            Self::NotApplicable(reason) => reason.clone(),
        }
    }
}
