//! Code actions

use async_trait::async_trait;
use buffer::Editor;
use serde::{Deserialize, Serialize};
use treesitter::AstProvider;

use crate::discovery::DiscoveryVisitor;
use crate::RefactorError;

/// A refactoring offered at the current selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeAction {
    /// Refactoring id
    pub id: String,
    /// Label shown to the user
    pub title: String,
    pub kind: CodeActionKind,
    /// Preferred action (shown prominently)
    pub is_preferred: bool,
}

impl CodeAction {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: CodeActionKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            is_preferred: false,
        }
    }

    /// Set as preferred
    pub fn preferred(mut self) -> Self {
        self.is_preferred = true;
        self
    }
}

/// Code action kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeActionKind {
    QuickFix,
    Refactor,
    RefactorExtract,
    RefactorInline,
    RefactorRewrite,
}

impl CodeActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuickFix => "quickfix",
            Self::Refactor => "refactor",
            Self::RefactorExtract => "refactor.extract",
            Self::RefactorInline => "refactor.inline",
            Self::RefactorRewrite => "refactor.rewrite",
        }
    }
}

/// A registered refactoring
///
/// Discovery builds one visitor per pass; a visitor claims a node by
/// calling [`DiscoveryState::on_match`](crate::discovery::DiscoveryState::on_match).
#[async_trait]
pub trait Refactoring: Send + Sync {
    /// Stable identifier
    fn id(&self) -> &'static str;

    /// Default label
    fn title(&self) -> &'static str;

    fn kind(&self) -> CodeActionKind {
        CodeActionKind::RefactorRewrite
    }

    fn is_preferred(&self) -> bool {
        false
    }

    /// Discovery visitor
    fn visitor(&self) -> DiscoveryVisitor<'_>;

    /// Apply the refactoring at the editor's current selection
    async fn execute(&self, editor: &mut dyn Editor, ast: &dyn AstProvider) -> Result<(), RefactorError>;

    fn action(&self) -> CodeAction {
        let action = CodeAction::new(self.id(), self.title(), self.kind());
        if self.is_preferred() { action.preferred() } else { action }
    }
}
