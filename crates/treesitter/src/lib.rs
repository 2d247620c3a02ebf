//! # Foxkit Treesitter
//!
//! Syntax tree parsing using tree-sitter, as consumed by the refactoring
//! engine.
//!
//! ## Features
//!
//! - JavaScript / TypeScript parsing, with trees containing syntax errors
//!   reported as [`ParseError`] rather than handed to callers
//! - Document-order traversal with enter/exit events
//! - Node categories (`Function`, `Statement`, ...) resolved from a static table
//! - Byte columns converted to character positions in one place
//!
//! ```no_run
//! use treesitter::{AstProvider, Language, Parser};
//!
//! let parser = Parser::new(Language::JavaScript).unwrap();
//! let tree = parser.parse("const a = 1;").unwrap();
//! println!("{}", tree.root_node().kind());
//! ```

pub mod category;
pub mod language;
pub mod parser;

use selection::Position;
use thiserror::Error;

pub use category::{is_type, NodeCategory};
pub use language::Language;
pub use parser::{position_at, Node, Parser, TraverseEvent, Tree};

/// Parse failure
///
/// Signaled distinctly from "no match": callers of discovery treat it as
/// "no refactorings available".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Language not available: {0}")]
    LanguageUnavailable(&'static str),
    #[error("Parser rejected language: {0}")]
    IncompatibleLanguage(String),
    #[error("Parsing was aborted")]
    Aborted,
    #[error("{message} at {position}")]
    Syntax { message: String, position: Position },
}

/// AST provider consumed by the refactoring engine
pub trait AstProvider: Send + Sync {
    /// Parse source code; any syntax error fails the whole parse
    fn parse(&self, code: &str) -> Result<Tree, ParseError>;

    /// Does `kind` belong to `category`?
    fn is_type(&self, kind: &str, category: NodeCategory) -> bool {
        category::is_type(kind, category)
    }
}

/// Syntax error
#[derive(Debug, Clone)]
pub struct SyntaxError {
    /// Error message
    pub message: String,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
    /// Character position of the error
    pub position: Position,
}

/// Find all syntax errors in tree
pub fn find_errors(tree: &Tree, source: &str) -> Vec<SyntaxError> {
    let mut errors = Vec::new();
    let mut cursor = tree.walk();

    loop {
        let node = cursor.node();

        if node.is_error() || node.is_missing() {
            let message = if node.is_missing() {
                format!("Missing {}", node.kind())
            } else {
                "Syntax error".to_string()
            };

            errors.push(SyntaxError {
                message,
                start: node.start_byte(),
                end: node.end_byte(),
                position: node.start_position(source),
            });
        }

        // Only descend where errors are known to live
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }

        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return errors;
            }
        }
    }
}
