//! # Foxkit Refactor
//!
//! Refactoring engine: finds which refactorings apply at a selection and
//! executes them through the [`Editor`] capability.
//!
//! ```no_run
//! use std::sync::Arc;
//! use buffer::InMemoryEditor;
//! use refactor::RefactorService;
//! use treesitter::{Language, Parser};
//!
//! # async fn run() -> Result<(), refactor::RefactorError> {
//! let service = RefactorService::builtin(Arc::new(Parser::new(Language::TypeScript)?));
//! let mut editor = InMemoryEditor::new("if ([cursor]ok) { a(); } else { b(); }");
//!
//! for action in service.code_actions_for(&editor) {
//!     println!("{}", action.title);
//! }
//! service.execute("flip-if-else", &mut editor).await?;
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod builtin;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod type_checker;
pub mod visitor;

use std::sync::Arc;

use buffer::{Editor, ErrorReason};
use parking_lot::RwLock;
use selection::Selection;
use treesitter::AstProvider;

pub use actions::{CodeAction, CodeActionKind, Refactoring};
pub use config::RefactorConfig;
pub use discovery::{DiscoveryState, DiscoveryVisitor};
pub use error::RefactorError;
pub use logging::LogLevel;
pub use type_checker::{NoTypeChecker, TypeChecker};
pub use visitor::{dispatch, traverse, Handler, NodePath, Visitor, VisitorKey};

/// Refactoring service
pub struct RefactorService {
    /// Registered refactorings, in registration order
    refactorings: Vec<Arc<dyn Refactoring>>,
    parser: Arc<dyn AstProvider>,
    type_checker: Arc<dyn TypeChecker>,
    config: RwLock<RefactorConfig>,
}

impl RefactorService {
    pub fn new(parser: Arc<dyn AstProvider>) -> Self {
        Self {
            refactorings: Vec::new(),
            parser,
            type_checker: Arc::new(NoTypeChecker),
            config: RwLock::new(RefactorConfig::default()),
        }
    }

    /// Service with every built-in refactoring registered
    pub fn builtin(parser: Arc<dyn AstProvider>) -> Self {
        let mut service = Self::new(parser);
        service.refactorings.extend(builtin::all());
        service
    }

    pub fn with_type_checker(mut self, type_checker: Arc<dyn TypeChecker>) -> Self {
        self.type_checker = type_checker;
        self
    }

    pub fn with_config(self, config: RefactorConfig) -> Self {
        *self.config.write() = config;
        self
    }

    /// Register a refactoring
    pub fn register<R: Refactoring + 'static>(&mut self, refactoring: R) {
        self.refactorings.push(Arc::new(refactoring));
    }

    pub fn configure(&self, config: RefactorConfig) {
        *self.config.write() = config;
    }

    pub fn config(&self) -> RefactorConfig {
        self.config.read().clone()
    }

    pub fn refactorings(&self) -> impl Iterator<Item = &dyn Refactoring> {
        self.refactorings.iter().map(|refactoring| refactoring.as_ref())
    }

    fn find(&self, id: &str) -> Option<&Arc<dyn Refactoring>> {
        self.refactorings.iter().find(|refactoring| refactoring.id() == id)
    }

    /// Refactorings applicable at `selection`.
    ///
    /// Fails only when `code` does not parse.
    pub fn discover(&self, code: &str, selection: Selection) -> Result<Vec<CodeAction>, RefactorError> {
        let tree = self.parser.parse(code)?;
        let config = self.config();

        let candidates: Vec<_> = self
            .refactorings
            .iter()
            .filter(|refactoring| config.is_enabled(refactoring.id()))
            .cloned()
            .collect();

        let mut actions = discovery::discover(&tree, code, selection, &candidates, self.type_checker.clone());
        for action in &mut actions {
            action.is_preferred = config.is_preferred(&action.id, action.is_preferred);
        }
        Ok(actions)
    }

    /// Like [`discover`](Self::discover), with unparsable code offering nothing
    pub fn code_actions(&self, code: &str, selection: Selection) -> Vec<CodeAction> {
        match self.discover(code, selection) {
            Ok(actions) => actions,
            Err(error) => {
                tracing::debug!(%error, "No refactorings for unparsable code");
                Vec::new()
            }
        }
    }

    /// Refactorings applicable at the editor's current selection
    pub fn code_actions_for(&self, editor: &dyn Editor) -> Vec<CodeAction> {
        self.code_actions(&editor.code(), editor.selection())
    }

    /// Execute refactoring `id` at the editor's current selection.
    ///
    /// Failures are shown to the user through the editor, then returned.
    pub async fn execute(&self, id: &str, editor: &mut dyn Editor) -> Result<(), RefactorError> {
        let enabled = self.config.read().is_enabled(id);
        let Some(refactoring) = self.find(id).filter(|_| enabled).cloned() else {
            editor.show_error(ErrorReason::UnknownRefactoring(id.to_string())).await;
            return Err(RefactorError::UnknownRefactoring(id.to_string()));
        };

        tracing::debug!(refactoring = id, selection = %editor.selection(), "Executing refactoring");
        match refactoring.execute(editor, self.parser.as_ref()).await {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(refactoring = id, %error, "Refactoring failed");
                editor.show_error(error.reason()).await;
                Err(error)
            }
        }
    }
}
