use async_trait::async_trait;
use buffer::{Editor, ErrorReason, Modification};
use selection::Selection;
use treesitter::{AstProvider, NodeCategory};

use super::{flipped_logical, is_logical, negate, negated_comparison};
use crate::actions::Refactoring;
use crate::discovery::DiscoveryVisitor;
use crate::visitor::{find_innermost, NodePath};
use crate::RefactorError;

/// Rewrite a comparison or logical expression as the negation of its
/// negation, keeping its value. An enclosing `!(...)` is absorbed instead.
pub struct NegateExpression;

fn is_negatable(path: &NodePath<'_>, selection: Selection) -> bool {
    path.is("binary_expression")
        && path
            .operator()
            .is_some_and(|operator| negated_comparison(operator).is_some() || flipped_logical(operator).is_some())
        && selection.is_inside(&path.selection())
}

/// `!(path)` enclosing the expression, if any
fn enclosing_negation<'t>(path: &NodePath<'t>) -> Option<NodePath<'t>> {
    let parenthesized = path.parent().filter(|parent| parent.is("parenthesized_expression"))?;
    parenthesized
        .parent()
        .filter(|unary| unary.is("unary_expression") && unary.operator() == Some("!"))
}

/// Negation of `path` standing in for `unary` needs parentheses to keep its grouping
fn needs_parentheses(path: &NodePath<'_>, unary: &NodePath<'_>) -> bool {
    let Some(parent) = unary.parent() else {
        return false;
    };
    match parent.kind() {
        "binary_expression" => is_logical(path) || !is_logical(&parent),
        "unary_expression" | "await_expression" | "member_expression" | "subscript_expression"
        | "call_expression" => true,
        _ => false,
    }
}

/// Replaced range and replacement
fn rewrite(path: &NodePath<'_>) -> (Selection, String) {
    let negated = negate(path);
    match enclosing_negation(path) {
        Some(unary) if needs_parentheses(path, &unary) => (unary.selection(), format!("({negated})")),
        Some(unary) => (unary.selection(), negated),
        None => (path.selection(), format!("!({negated})")),
    }
}

fn plan(code: &str, selection: Selection, ast: &dyn AstProvider) -> Result<Modification, RefactorError> {
    let tree = ast.parse(code)?;
    let expression = find_innermost(&tree, code, |path| is_negatable(path, selection))
        .ok_or(RefactorError::NotApplicable(ErrorReason::DidNotFindExpressionToNegate))?;

    let (scope, replacement) = rewrite(&expression);
    Ok(Modification::new(replacement, scope))
}

#[async_trait]
impl Refactoring for NegateExpression {
    fn id(&self) -> &'static str {
        "negate-expression"
    }

    fn title(&self) -> &'static str {
        "Negate the expression"
    }

    fn visitor(&self) -> DiscoveryVisitor<'_> {
        DiscoveryVisitor::new().on_category(NodeCategory::Expression, |path, state| {
            if is_negatable(path, state.selection()) {
                let (_, replacement) = rewrite(path);
                state.on_match(Some(format!("Negate the expression ({replacement})")));
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
    async fn test_negate_comparison() {
        let code = run(&NegateExpression, "if (a [cursor]> 1) {}").await.unwrap();

        assert_eq!(code, "if (!(a <= 1)) {}");
    }

    #[tokio::test]
    async fn test_negate_absorbs_enclosing_not() {
        let code = run(&NegateExpression, "if (!(a [cursor]> 1)) {}").await.unwrap();

        assert_eq!(code, "if (a <= 1) {}");
    }

    #[tokio::test]
    async fn test_absorbed_negation_keeps_grouping() {
        let code = run(&NegateExpression, "const ok = !(a && [cursor]b) && c;").await.unwrap();
        assert_eq!(code, "const ok = (!a || !b) && c;");

        let code = run(&NegateExpression, "const ok = !(a [cursor]> 1) || c;").await.unwrap();
        assert_eq!(code, "const ok = a <= 1 || c;");
    }

    #[tokio::test]
    async fn test_negate_logical() {
        let code = run(&NegateExpression, "const ok = a && [cursor]b;").await.unwrap();

        assert_eq!(code, "const ok = !(!a || !b);");
    }

    #[tokio::test]
    async fn test_negate_innermost() {
        let code = run(&NegateExpression, "const ok = a === 1 || [cursor]b < 2;")
            .await
            .unwrap();

        assert_eq!(code, "const ok = a === 1 || !(b >= 2);");
    }

    #[tokio::test]
    async fn test_nothing_to_negate() {
        let err = run(&NegateExpression, "const sum = a [cursor]+ b;").await.unwrap_err();

        assert_eq!(err.reason(), ErrorReason::DidNotFindExpressionToNegate);
    }
}
