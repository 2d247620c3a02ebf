use async_trait::async_trait;
use buffer::{Editor, ErrorReason, Modification};
use selection::Selection;
use treesitter::AstProvider;

use super::indentation_of;
use crate::actions::Refactoring;
use crate::discovery::DiscoveryVisitor;
use crate::visitor::{find_innermost, NodePath};
use crate::RefactorError;

/// Turn an arrow function's expression body into a block returning it
pub struct AddBracesToArrowFunction;

fn has_expression_body(path: &NodePath<'_>, selection: Selection) -> bool {
    path.is("arrow_function")
        && selection.is_inside(&path.selection())
        && path.field("body").is_some_and(|body| !body.is("statement_block"))
}

fn plan(code: &str, selection: Selection, ast: &dyn AstProvider) -> Result<Modification, RefactorError> {
    let tree = ast.parse(code)?;
    let not_found = || RefactorError::NotApplicable(ErrorReason::DidNotFindArrowFunctionToAddBraces);

    let function = find_innermost(&tree, code, |path| has_expression_body(path, selection)).ok_or_else(not_found)?;
    let body = function.field("body").ok_or_else(not_found)?;
    let indentation = indentation_of(code, function.selection().start().line);

    let block = format!("{{\n{indentation}  return {};\n{indentation}}}", body.text());
    Ok(Modification::new(block, body.selection()))
}

#[async_trait]
impl Refactoring for AddBracesToArrowFunction {
    fn id(&self) -> &'static str {
        "add-braces-to-arrow-function"
    }

    fn title(&self) -> &'static str {
        "Add braces to arrow function"
    }

    fn visitor(&self) -> DiscoveryVisitor<'_> {
        DiscoveryVisitor::new().on("arrow_function", |path, state| {
            if has_expression_body(path, state.selection()) {
                state.on_match(None);
            }
            Ok(())
        })
    }

    async fn execute(&self, editor: &mut dyn Editor, ast: &dyn AstProvider) -> Result<(), RefactorError> {
        let modification = plan(&editor.code(), editor.selection(), ast)?;
        let scope = modification.selection;
        editor
            .read_then_write(scope, Box::new(move |_: String| vec![modification]), None)
            .await?;
        Ok(())
    }
}
