//! Modifications

use selection::{Position, Selection};
use serde::{Deserialize, Serialize};

/// Replacement of a range of the pre-edit buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    /// Text to put in place of the range
    pub code: String,
    /// Range to replace
    pub selection: Selection,
}

impl Modification {
    pub fn new(code: impl Into<String>, selection: Selection) -> Self {
        Self {
            code: code.into(),
            selection,
        }
    }

    /// Create an insertion
    pub fn insert(position: Position, code: impl Into<String>) -> Self {
        Self::new(code, Selection::cursor_at_position(position))
    }

    /// Create a deletion
    pub fn delete(selection: Selection) -> Self {
        Self::new(String::new(), selection)
    }
}
