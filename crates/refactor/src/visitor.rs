//! Visitors over syntax trees
//!
//! A [`Visitor`] maps node kinds, or node categories, to callbacks. Lookup
//! tries an exact kind first, then the first category (in declaration order)
//! containing the node's kind. No match is not an error.

use selection::Selection;
use treesitter::{is_type, Node, NodeCategory, TraverseEvent, Tree};

/// A node together with the source it was parsed from
#[derive(Debug, Clone, Copy)]
pub struct NodePath<'t> {
    node: Node<'t>,
    source: &'t str,
}

impl<'t> NodePath<'t> {
    pub fn new(node: Node<'t>, source: &'t str) -> Self {
        Self { node, source }
    }

    pub fn node(&self) -> Node<'t> {
        self.node
    }

    pub fn source(&self) -> &'t str {
        self.source
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    pub fn is(&self, kind: &str) -> bool {
        self.node.kind() == kind
    }

    pub fn text(&self) -> &'t str {
        self.node.text(self.source)
    }

    pub fn selection(&self) -> Selection {
        self.node.selection(self.source)
    }

    pub fn parent(&self) -> Option<NodePath<'t>> {
        self.node.parent().map(|node| NodePath::new(node, self.source))
    }

    /// Child stored under a grammar field
    pub fn field(&self, name: &str) -> Option<NodePath<'t>> {
        self.node
            .child_by_field_name(name)
            .map(|node| NodePath::new(node, self.source))
    }

    pub fn named_children(&self) -> Vec<NodePath<'t>> {
        self.node
            .named_children()
            .into_iter()
            .map(|node| NodePath::new(node, self.source))
            .collect()
    }

    /// Named descendants in document order, excluding this node
    pub fn descendants(&self) -> Vec<NodePath<'t>> {
        let mut found = Vec::new();
        let mut stack: Vec<NodePath<'t>> = self.named_children().into_iter().rev().collect();

        while let Some(path) = stack.pop() {
            stack.extend(path.named_children().into_iter().rev());
            found.push(path);
        }

        found
    }

    /// Text of the binary/unary operator, if any
    pub fn operator(&self) -> Option<&'static str> {
        self.node.child_by_field_name("operator").map(|op| op.kind())
    }
}

/// Callback invoked on a matched node
pub type Callback<'v, S> = Box<dyn FnMut(&NodePath<'_>, &mut S) -> anyhow::Result<()> + 'v>;

/// What a visitor entry is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitorKey {
    Kind(&'static str),
    Category(NodeCategory),
}

/// Callbacks of one visitor entry
pub enum Handler<'v, S> {
    /// Shorthand for an enter-only handler
    Enter(Callback<'v, S>),
    Hooks {
        enter: Option<Callback<'v, S>>,
        exit: Option<Callback<'v, S>>,
    },
}

/// Ordered table of handlers
pub struct Visitor<'v, S> {
    entries: Vec<(VisitorKey, Handler<'v, S>)>,
}

impl<'v, S> Visitor<'v, S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Call `f` when entering nodes of `kind`
    pub fn on(
        self,
        kind: &'static str,
        f: impl FnMut(&NodePath<'_>, &mut S) -> anyhow::Result<()> + 'v,
    ) -> Self {
        self.with(VisitorKey::Kind(kind), Handler::Enter(Box::new(f)))
    }

    /// Call `f` when entering nodes of any kind in `category`
    pub fn on_category(
        self,
        category: NodeCategory,
        f: impl FnMut(&NodePath<'_>, &mut S) -> anyhow::Result<()> + 'v,
    ) -> Self {
        self.with(VisitorKey::Category(category), Handler::Enter(Box::new(f)))
    }

    pub fn with(mut self, key: VisitorKey, handler: Handler<'v, S>) -> Self {
        self.entries.push((key, handler));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handler for `kind`: exact kind first, then the first matching category
    fn resolve(&mut self, kind: &str) -> Option<&mut Handler<'v, S>> {
        let index = self
            .entries
            .iter()
            .position(|(key, _)| matches!(key, VisitorKey::Kind(k) if *k == kind))
            .or_else(|| {
                self.entries
                    .iter()
                    .position(|(key, _)| matches!(key, VisitorKey::Category(c) if is_type(kind, *c)))
            })?;

        Some(&mut self.entries[index].1)
    }
}

impl<S> Default for Visitor<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Invoke the handler resolved for `path`.
///
/// An enter shorthand is called once; hooks have their enter then exit
/// callbacks called in turn. Returns whether a handler was resolved.
pub fn dispatch<S>(
    visitor: &mut Visitor<'_, S>,
    path: &NodePath<'_>,
    state: &mut S,
) -> anyhow::Result<bool> {
    let Some(handler) = visitor.resolve(path.kind()) else {
        return Ok(false);
    };

    match handler {
        Handler::Enter(f) => f(path, state)?,
        Handler::Hooks { enter, exit } => {
            for f in [enter, exit].into_iter().flatten() {
                f(path, state)?;
            }
        }
    }

    Ok(true)
}

/// Run `visitor` over a whole tree, calling enter callbacks before a node's
/// descendants and exit callbacks after them.
pub fn traverse<S>(
    tree: &Tree,
    source: &str,
    visitor: &mut Visitor<'_, S>,
    state: &mut S,
) -> anyhow::Result<()> {
    tree.traverse(|event| {
        let (node, entering) = match event {
            TraverseEvent::Enter(node) => (node, true),
            TraverseEvent::Exit(node) => (node, false),
        };
        let path = NodePath::new(node, source);

        let callback = match visitor.resolve(path.kind()) {
            Some(Handler::Enter(f)) if entering => Some(f),
            Some(Handler::Hooks { enter, .. }) if entering => enter.as_mut(),
            Some(Handler::Hooks { exit, .. }) if !entering => exit.as_mut(),
            _ => None,
        };

        match callback {
            Some(f) => f(&path, state),
            None => Ok(()),
        }
    })
}

/// Deepest node, in document order, accepted by `predicate`
pub fn find_innermost<'t>(
    tree: &'t Tree,
    source: &'t str,
    mut predicate: impl FnMut(&NodePath<'t>) -> bool,
) -> Option<NodePath<'t>> {
    let mut found = None;

    let walked = tree.traverse(|event| {
        if let TraverseEvent::Enter(node) = event {
            let path = NodePath::new(node, source);
            if predicate(&path) {
                found = Some(path);
            }
        }
        Ok::<(), std::convert::Infallible>(())
    });
    if let Err(never) = walked {
        match never {}
    }

    found
}
