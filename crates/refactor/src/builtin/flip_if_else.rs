use async_trait::async_trait;
use buffer::{Editor, ErrorReason, Modification};
use selection::Selection;
use treesitter::AstProvider;

use super::negate;
use crate::actions::Refactoring;
use crate::discovery::DiscoveryVisitor;
use crate::visitor::{find_innermost, NodePath};
use crate::RefactorError;

/// Swap the branches of an if/else and negate its condition
pub struct FlipIfElse;

/// Statement of the `else` branch, unless it chains another `if`
fn else_statement<'t>(path: &NodePath<'t>) -> Option<NodePath<'t>> {
    let alternative = path.field("alternative")?;
    let statement = alternative.named_children().into_iter().find(|child| !child.is("comment"))?;
    (!statement.is("if_statement")).then_some(statement)
}

fn is_flippable(path: &NodePath<'_>, selection: Selection) -> bool {
    path.is("if_statement") && selection.is_inside(&path.selection()) && else_statement(path).is_some()
}

fn plan(code: &str, selection: Selection, ast: &dyn AstProvider) -> Result<(Selection, Vec<Modification>), RefactorError> {
    let tree = ast.parse(code)?;
    let not_found = || RefactorError::NotApplicable(ErrorReason::DidNotFindIfElseToFlip);

    let statement = find_innermost(&tree, code, |path| is_flippable(path, selection)).ok_or_else(not_found)?;
    let test = statement
        .field("condition")
        .and_then(|condition| condition.named_children().first().copied())
        .ok_or_else(not_found)?;
    let consequence = statement.field("consequence").ok_or_else(not_found)?;
    let alternative = else_statement(&statement).ok_or_else(not_found)?;

    let modifications = vec![
        Modification::new(negate(&test), test.selection()),
        Modification::new(alternative.text(), consequence.selection()),
        Modification::new(consequence.text(), alternative.selection()),
    ];
    Ok((statement.selection(), modifications))
}

#[async_trait]
impl Refactoring for FlipIfElse {
    fn id(&self) -> &'static str {
        "flip-if-else"
    }

    fn title(&self) -> &'static str {
        "Flip if/else"
    }

    fn visitor(&self) -> DiscoveryVisitor<'_> {
        DiscoveryVisitor::new().on("if_statement", |path, state| {
            if is_flippable(path, state.selection()) {
                state.on_match(None);
            }
            Ok(())
        })
    }

    async fn execute(&self, editor: &mut dyn Editor, ast: &dyn AstProvider) -> Result<(), RefactorError> {
        let (scope, modifications) = plan(&editor.code(), editor.selection(), ast)?;
        editor
            .read_then_write(scope, Box::new(move |_: String| modifications), None)
            .await?;
        Ok(())
    }
}
