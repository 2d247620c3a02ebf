//! Editor capability
//!
//! What refactorings need from a host editor. Every method that may perform
//! host I/O is async; callers await them one at a time. Mutating methods
//! take `&mut self`, so a buffer has a single writer at any time.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use selection::{Position, Selection};
use serde::{Deserialize, Serialize};

use crate::{EditorError, Modification};

/// Computes modifications from the text read out of a selection
pub type ComputeModifications<'a> = Box<dyn FnOnce(String) -> Vec<Modification> + Send + 'a>;

/// Called with the positions the user confirmed
pub type ConfirmPositions<'a> = Box<dyn FnOnce(Vec<SelectedPosition>) + Send + 'a>;

#[async_trait]
pub trait Editor: Send + Sync {
    /// Current full text
    fn code(&self) -> String;

    /// Current cursor or selection
    fn selection(&self) -> Selection;

    /// Replace the whole text
    async fn write(&mut self, code: &str, new_cursor: Option<Position>) -> Result<(), EditorError>;

    /// Read `selection`, compute modifications from it, then commit them all
    /// against the pre-edit coordinates.
    ///
    /// The cursor moves to `new_cursor` when given and stays put otherwise.
    async fn read_then_write(
        &mut self,
        selection: Selection,
        compute: ComputeModifications<'_>,
        new_cursor: Option<Position>,
    ) -> Result<(), EditorError>;

    /// Replace the text of another file
    async fn write_in(&mut self, path: &Path, code: &str) -> Result<(), EditorError>;

    /// Text of another file
    async fn code_of(&self, path: &Path) -> Result<String, EditorError>;

    async fn workspace_files(&self) -> Result<Vec<PathBuf>, EditorError>;

    /// Hand a command over to the host
    async fn delegate(&mut self, command: EditorCommand) -> DelegateResult;

    async fn show_error(&self, reason: ErrorReason);

    async fn ask_user_choice(&mut self, choices: Vec<Choice>, placeholder: Option<&str>) -> Option<Choice>;

    async fn ask_user_input(&mut self, default: Option<String>) -> Option<String>;

    async fn move_cursor_to(&mut self, position: Position);

    /// Places referring to the symbol under `selection`
    async fn get_selection_references(&self, selection: Selection) -> Result<Vec<CodeReference>, EditorError>;

    /// Let the user reorder `params`; `on_confirm` receives the result
    async fn ask_for_positions(&mut self, params: Vec<SelectedPosition>, on_confirm: ConfirmPositions<'_>);

    /// Highlight `source` together with `bindings`, returning the color index
    fn highlight(&mut self, source: Selection, bindings: Vec<Selection>) -> usize;

    fn remove_highlight(&mut self, source: Selection);

    fn remove_all_highlights(&mut self);

    /// Highlighted source whose group contains `selection`
    fn find_highlight(&self, selection: Selection) -> Option<Selection>;
}

/// Command a host may perform natively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorCommand {
    RenameSymbol,
}

impl EditorCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RenameSymbol => "editor.action.rename",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateResult {
    Ok,
    NotSupported,
}

/// Why a user action could not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorReason {
    DidNotFindIfElseToFlip,
    DidNotFindArrowFunctionToAddBraces,
    DidNotFindBracesToRemove,
    DidNotFindStringToConvert,
    DidNotFindExpressionToNegate,
    DidNotFindConcatenationToConvert,
    UnknownRefactoring(String),
    CodeParsingFailed(String),
    WriteFailed(String),
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DidNotFindIfElseToFlip => write!(f, "I didn't find an if/else to flip"),
            Self::DidNotFindArrowFunctionToAddBraces => {
                write!(f, "I didn't find an arrow function to add braces to")
            }
            Self::DidNotFindBracesToRemove => write!(f, "I didn't find braces that can be removed"),
            Self::DidNotFindStringToConvert => {
                write!(f, "I didn't find a string to convert into a template literal")
            }
            Self::DidNotFindExpressionToNegate => write!(f, "I didn't find an expression to negate"),
            Self::DidNotFindConcatenationToConvert => {
                write!(f, "I didn't find a string concatenation to convert")
            }
            Self::UnknownRefactoring(id) => write!(f, "Unknown refactoring: {id}"),
            Self::CodeParsingFailed(details) => write!(f, "I couldn't parse the code: {details}"),
            Self::WriteFailed(details) => write!(f, "I couldn't write the changes: {details}"),
        }
    }
}

/// An option offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Location of a reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeReference {
    pub path: PathBuf,
    pub selection: Selection,
}

/// A positional item (e.g. a parameter) the user may move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPosition {
    pub label: String,
    pub start_at: usize,
    pub end_at: usize,
}

impl SelectedPosition {
    pub fn new(label: impl Into<String>, start_at: usize, end_at: usize) -> Self {
        Self {
            label: label.into(),
            start_at,
            end_at,
        }
    }
}
