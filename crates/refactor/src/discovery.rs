//! Refactoring discovery
//!
//! Every candidate's visitor is offered every named node of the tree. A
//! candidate is available once any node claims it; failures inside a
//! candidate's visitor only disqualify that candidate for that node.

use std::collections::HashMap;
use std::sync::Arc;

use selection::{Position, Selection};
use treesitter::{TraverseEvent, Tree};

use crate::actions::{CodeAction, Refactoring};
use crate::type_checker::TypeChecker;
use crate::visitor::{dispatch, NodePath, Visitor};

/// Visitor run during discovery
pub type DiscoveryVisitor<'v> = Visitor<'v, DiscoveryState>;

/// State handed to discovery visitors
pub struct DiscoveryState {
    selection: Selection,
    code: Arc<str>,
    type_checker: Arc<dyn TypeChecker>,
    matched: Option<Option<String>>,
}

impl DiscoveryState {
    pub fn new(selection: Selection, code: Arc<str>, type_checker: Arc<dyn TypeChecker>) -> Self {
        Self {
            selection,
            code,
            type_checker,
            matched: None,
        }
    }

    /// Selection discovery runs against
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Type at `position` of the code being inspected
    pub fn type_at(&self, position: Position) -> anyhow::Result<Option<String>> {
        self.type_checker.type_at(&self.code, position)
    }

    /// Claim the current node, optionally with a label replacing the default title
    pub fn on_match(&mut self, label: Option<String>) {
        self.matched = Some(label);
    }

    pub fn is_matched(&self) -> bool {
        self.matched.is_some()
    }

    fn take_match(&mut self) -> Option<Option<String>> {
        self.matched.take()
    }
}

/// Refactorings applicable to `selection`, in the order they were first
/// claimed. A later claim carrying a label updates the title.
pub fn discover(
    tree: &Tree,
    source: &str,
    selection: Selection,
    candidates: &[Arc<dyn Refactoring>],
    type_checker: Arc<dyn TypeChecker>,
) -> Vec<CodeAction> {
    let code: Arc<str> = Arc::from(source);
    let mut found: Vec<CodeAction> = Vec::new();
    let mut claimed: HashMap<&'static str, usize> = HashMap::new();
    let mut visitors: Vec<_> = candidates.iter().map(|candidate| candidate.visitor()).collect();

    let walked = tree.traverse(|event| {
        let TraverseEvent::Enter(node) = event else {
            return Ok::<(), std::convert::Infallible>(());
        };
        let path = NodePath::new(node, source);

        for (candidate, visitor) in candidates.iter().zip(visitors.iter_mut()) {
            let mut state = DiscoveryState::new(selection, code.clone(), type_checker.clone());

            if let Err(error) = dispatch(visitor, &path, &mut state) {
                tracing::debug!(refactoring = candidate.id(), kind = path.kind(), %error, "Visitor failed");
                continue;
            }

            let Some(label) = state.take_match() else {
                continue;
            };

            match claimed.get(candidate.id()) {
                Some(&index) => {
                    if let Some(label) = label {
                        found[index].title = label;
                    }
                }
                None => {
                    let mut action = candidate.action();
                    if let Some(label) = label {
                        action.title = label;
                    }
                    claimed.insert(candidate.id(), found.len());
                    found.push(action);
                }
            }
        }

        Ok(())
    });
    if let Err(never) = walked {
        match never {}
    }

    tracing::trace!(count = found.len(), %selection, "Discovered refactorings");
    found
}
