//! Parser wrapper

use parking_lot::Mutex;
use selection::{Position, Selection};

use crate::{find_errors, AstProvider, Language, ParseError};

/// Tree-sitter parser wrapper
pub struct Parser {
    inner: Mutex<tree_sitter::Parser>,
    language: Language,
}

impl Parser {
    /// Create a new parser for language
    pub fn new(language: Language) -> Result<Self, ParseError> {
        let ts_language = language
            .ts_language()
            .ok_or(ParseError::LanguageUnavailable(language.id()))?;

        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&ts_language)
            .map_err(|e| ParseError::IncompatibleLanguage(e.to_string()))?;

        Ok(Self {
            inner: Mutex::new(inner),
            language,
        })
    }

    /// Get language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Parse without rejecting trees that contain error nodes
    pub fn inner_parse(&self, source: &str) -> Result<Tree, ParseError> {
        let mut parser = self.inner.lock();
        // A previous parse may have been interrupted
        parser.reset();
        parser
            .parse(source, None)
            .map(|inner| Tree { inner })
            .ok_or(ParseError::Aborted)
    }
}

impl AstProvider for Parser {
    fn parse(&self, code: &str) -> Result<Tree, ParseError> {
        let tree = self.inner_parse(code)?;

        if tree.root_node().has_error() {
            let first = find_errors(&tree, code).into_iter().next();
            let (message, position) = match first {
                Some(error) => (error.message, error.position),
                None => ("Syntax error".to_string(), Position::zero()),
            };
            tracing::trace!(%position, "parse failed: {}", message);
            return Err(ParseError::Syntax { message, position });
        }

        Ok(tree)
    }
}

/// Syntax tree
#[derive(Debug)]
pub struct Tree {
    inner: tree_sitter::Tree,
}

/// Traversal event, emitted for named nodes only
#[derive(Debug, Clone, Copy)]
pub enum TraverseEvent<'a> {
    Enter(Node<'a>),
    Exit(Node<'a>),
}

impl Tree {
    /// Get root node
    pub fn root_node(&self) -> Node<'_> {
        Node {
            inner: self.inner.root_node(),
        }
    }

    /// Walk the tree
    pub fn walk(&self) -> TreeCursor<'_> {
        TreeCursor {
            inner: self.inner.walk(),
        }
    }

    /// Visit every named node in document order.
    ///
    /// A node's `Enter` comes before any of its descendants, its `Exit` after
    /// all of them. The first error returned by `f` stops the walk.
    pub fn traverse<'t, E>(
        &'t self,
        mut f: impl FnMut(TraverseEvent<'t>) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut cursor = self.inner.walk();

        loop {
            let node = cursor.node();
            if node.is_named() {
                f(TraverseEvent::Enter(Node { inner: node }))?;
            }

            if cursor.goto_first_child() {
                continue;
            }

            loop {
                let node = cursor.node();
                if node.is_named() {
                    f(TraverseEvent::Exit(Node { inner: node }))?;
                }

                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return Ok(());
                }
            }
        }
    }
}

/// Syntax node
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Node<'a> {
    pub(crate) inner: tree_sitter::Node<'a>,
}

impl<'a> Node<'a> {
    /// Get node kind (type)
    pub fn kind(&self) -> &'static str {
        self.inner.kind()
    }

    /// Unique id within its tree
    pub fn id(&self) -> usize {
        self.inner.id()
    }

    /// Is this a named node?
    pub fn is_named(&self) -> bool {
        self.inner.is_named()
    }

    /// Is this an error node?
    pub fn is_error(&self) -> bool {
        self.inner.is_error()
    }

    /// Is this a missing node?
    pub fn is_missing(&self) -> bool {
        self.inner.is_missing()
    }

    /// Does this node or a descendant contain errors?
    pub fn has_error(&self) -> bool {
        self.inner.has_error()
    }

    /// Get start byte offset
    pub fn start_byte(&self) -> usize {
        self.inner.start_byte()
    }

    /// Get end byte offset
    pub fn end_byte(&self) -> usize {
        self.inner.end_byte()
    }

    /// Get start position in characters
    pub fn start_position(&self, source: &str) -> Position {
        position_at(source, self.inner.start_byte(), self.inner.start_position())
    }

    /// Get end position in characters
    pub fn end_position(&self, source: &str) -> Position {
        position_at(source, self.inner.end_byte(), self.inner.end_position())
    }

    /// Source range covered by this node
    pub fn selection(&self, source: &str) -> Selection {
        Selection::new(self.start_position(source), self.end_position(source))
    }

    /// Get parent node
    pub fn parent(&self) -> Option<Node<'a>> {
        self.inner.parent().map(|n| Node { inner: n })
    }

    /// Get child count
    pub fn child_count(&self) -> usize {
        self.inner.child_count()
    }

    /// Get child by index
    pub fn child(&self, index: usize) -> Option<Node<'a>> {
        self.inner.child(index).map(|n| Node { inner: n })
    }

    /// Get named child by index
    pub fn named_child(&self, index: usize) -> Option<Node<'a>> {
        self.inner.named_child(index).map(|n| Node { inner: n })
    }

    /// Get child by field name
    pub fn child_by_field_name(&self, field: &str) -> Option<Node<'a>> {
        self.inner.child_by_field_name(field).map(|n| Node { inner: n })
    }

    /// Named children, in order
    pub fn named_children(&self) -> Vec<Node<'a>> {
        let mut cursor = self.inner.walk();
        self.inner
            .named_children(&mut cursor)
            .map(|n| Node { inner: n })
            .collect()
    }

    /// Get node text
    pub fn text<'b>(&self, source: &'b str) -> &'b str {
        &source[self.start_byte()..self.end_byte()]
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("start", &self.start_byte())
            .field("end", &self.end_byte())
            .finish()
    }
}

/// Tree cursor for traversal
pub struct TreeCursor<'a> {
    inner: tree_sitter::TreeCursor<'a>,
}

impl<'a> TreeCursor<'a> {
    /// Get current node
    pub fn node(&self) -> Node<'a> {
        Node {
            inner: self.inner.node(),
        }
    }

    /// Go to first child
    pub fn goto_first_child(&mut self) -> bool {
        self.inner.goto_first_child()
    }

    /// Go to next sibling
    pub fn goto_next_sibling(&mut self) -> bool {
        self.inner.goto_next_sibling()
    }

    /// Go to parent
    pub fn goto_parent(&mut self) -> bool {
        self.inner.goto_parent()
    }
}

/// Convert a tree-sitter point at byte offset `byte` to a character position.
///
/// Tree-sitter rows are already 0-indexed but its columns count bytes; the
/// buffer model counts characters. Only the line holding `byte` is scanned.
pub fn position_at(source: &str, byte: usize, point: tree_sitter::Point) -> Position {
    let line_start = byte.saturating_sub(point.column);
    let character = source
        .get(line_start..byte)
        .map_or(point.column, |prefix| prefix.chars().count());

    Position::new(point.row as u32, character as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Tree {
        Parser::new(Language::JavaScript)
            .unwrap()
            .parse(source)
            .unwrap()
    }

    #[test]
    fn test_position_counts_characters() {
        let source = "let s = \"héllo\";\nlet t = 1;";
        let point = tree_sitter::Point { row: 0, column: 15 };
        // "é" is two bytes
        assert_eq!(position_at(source, 15, point), Position::new(0, 14));

        let point = tree_sitter::Point { row: 1, column: 4 };
        assert_eq!(position_at(source, 22, point), Position::new(1, 4));
    }

    #[test]
    fn test_positions_on_long_source() {
        let source = "let x = 1;\n".repeat(5000) + "let é = 2;";
        let tree = parse(&source);
        let last = tree.root_node().named_child(5000).unwrap();

        assert_eq!(last.selection(&source), Selection::from_coordinates((5000, 0), (5000, 10)));
    }

    #[test]
    fn test_node_selection() {
        let source = "a;\nfoo(\n  bar\n);";
        let tree = parse(source);
        let statement = tree.root_node().named_child(1).unwrap();

        assert_eq!(statement.kind(), "expression_statement");
        assert_eq!(
            statement.selection(source),
            Selection::from_coordinates((1, 0), (3, 2))
        );
    }

    #[test]
    fn test_traverse_enter_exit_order() {
        let tree = parse("a + b;");
        let mut events = Vec::new();

        tree.traverse(|event| {
            events.push(match event {
                TraverseEvent::Enter(node) => format!("+{}", node.kind()),
                TraverseEvent::Exit(node) => format!("-{}", node.kind()),
            });
            Ok::<_, ()>(())
        })
        .unwrap();

        assert_eq!(
            events,
            [
                "+program",
                "+expression_statement",
                "+binary_expression",
                "+identifier",
                "-identifier",
                "+identifier",
                "-identifier",
                "-binary_expression",
                "-expression_statement",
                "-program",
            ]
        );
    }

    #[test]
    fn test_traverse_stops_on_error() {
        let tree = parse("a; b; c;");
        let mut seen = 0;

        let result = tree.traverse(|event| {
            if let TraverseEvent::Enter(node) = event {
                if node.kind() == "identifier" {
                    seen += 1;
                    if seen == 2 {
                        return Err("stop");
                    }
                }
            }
            Ok(())
        });

        assert_eq!(result, Err("stop"));
        assert_eq!(seen, 2);
    }
}
