use async_trait::async_trait;
use buffer::{Editor, ErrorReason, Modification};
use selection::Selection;
use treesitter::AstProvider;

use crate::actions::Refactoring;
use crate::discovery::DiscoveryVisitor;
use crate::visitor::{find_innermost, NodePath};
use crate::RefactorError;

/// Turn an arrow function body made of a single `return` into an expression
pub struct RemoveBracesFromArrowFunction;

/// Value returned by the only statement of the body
fn single_returned_value<'t>(path: &NodePath<'t>) -> Option<NodePath<'t>> {
    let body = path.field("body").filter(|body| body.is("statement_block"))?;
    match body.named_children().as_slice() {
        [statement] if statement.is("return_statement") => statement.named_children().first().copied(),
        _ => None,
    }
}

fn has_removable_braces(path: &NodePath<'_>, selection: Selection) -> bool {
    path.is("arrow_function") && selection.is_inside(&path.selection()) && single_returned_value(path).is_some()
}

fn plan(code: &str, selection: Selection, ast: &dyn AstProvider) -> Result<Modification, RefactorError> {
    let tree = ast.parse(code)?;
    let not_found = || RefactorError::NotApplicable(ErrorReason::DidNotFindBracesToRemove);

    let function = find_innermost(&tree, code, |path| has_removable_braces(path, selection)).ok_or_else(not_found)?;
    let body = function.field("body").ok_or_else(not_found)?;
    let value = single_returned_value(&function).ok_or_else(not_found)?;

    let expression = match value.kind() {
        "object" | "sequence_expression" => format!("({})", value.text()),
        _ => value.text().to_string(),
    };
    Ok(Modification::new(expression, body.selection()))
}

#[async_trait]
impl Refactoring for RemoveBracesFromArrowFunction {
    fn id(&self) -> &'static str {
        "remove-braces-from-arrow-function"
    }

    fn title(&self) -> &'static str {
        "Remove braces from arrow function"
    }

    fn visitor(&self) -> DiscoveryVisitor<'_> {
        DiscoveryVisitor::new().on("arrow_function", |path, state| {
            if has_removable_braces(path, state.selection()) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::testing::run;

    #[tokio::test]
    async fn test_remove_braces() {
        let code = run(
            &RemoveBracesFromArrowFunction,
            "const getTotal = ([cursor]a, b) => {\n  return a + b;\n};",
        )
        .await
        .unwrap();

        assert_eq!(code, "const getTotal = (a, b) => a + b;");
    }

    #[tokio::test]
    async fn test_returned_object_is_parenthesized() {
        let code = run(
            &RemoveBracesFromArrowFunction,
            "const make = [cursor]() => {\n  return { a: 1 };\n};",
        )
        .await
        .unwrap();

        assert_eq!(code, "const make = () => ({ a: 1 });");
    }

    #[tokio::test]
    async fn test_several_statements() {
        let err = run(
            &RemoveBracesFromArrowFunction,
            "const f = [cursor]() => {\n  log();\n  return 1;\n};",
        )
        .await
        .unwrap_err();

        assert_eq!(err.reason(), ErrorReason::DidNotFindBracesToRemove);
    }

    #[tokio::test]
    async fn test_bare_return() {
        let err = run(&RemoveBracesFromArrowFunction, "const f = [cursor]() => {\n  return;\n};")
            .await
            .unwrap_err();

        assert_eq!(err.reason(), ErrorReason::DidNotFindBracesToRemove);
    }
}
