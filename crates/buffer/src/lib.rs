//! # Foxkit Buffer
//!
//! Editor capability consumed by refactorings, and the in-memory buffer that
//! defines how replacements are committed.

pub mod editor;
pub mod error;
pub mod fixture;
pub mod highlight;
pub mod in_memory;
pub mod matrix;
pub mod modification;

pub use editor::{
    Choice, CodeReference, ComputeModifications, ConfirmPositions, DelegateResult, Editor,
    EditorCommand, ErrorReason, SelectedPosition,
};
pub use error::{BufferError, EditorError};
pub use fixture::Fixture;
pub use highlight::{HighlightGroup, HighlightRegistry};
pub use in_memory::InMemoryEditor;
pub use matrix::CodeMatrix;
pub use modification::Modification;
pub use selection::{Position, Selection};
