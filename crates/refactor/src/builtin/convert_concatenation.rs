use async_trait::async_trait;
use buffer::{Editor, ErrorReason, Modification};
use selection::Selection;
use treesitter::AstProvider;

use super::template_content;
use crate::actions::Refactoring;
use crate::discovery::DiscoveryVisitor;
use crate::visitor::{find_innermost, NodePath};
use crate::RefactorError;

/// Turn a `+` chain building a string into a single template literal
pub struct ConvertConcatenationToTemplate;

fn is_concatenation(path: &NodePath<'_>) -> bool {
    path.is("binary_expression") && path.operator() == Some("+")
}

/// Outermost `+` of a chain containing `selection`
fn is_chain_root(path: &NodePath<'_>, selection: Selection) -> bool {
    is_concatenation(path)
        && selection.is_inside(&path.selection())
        && !path.parent().is_some_and(|parent| is_concatenation(&parent))
}

/// Operands of a `+` chain, left to right.
///
/// Additions before the first string literal are numeric, so that prefix
/// stays a single operand.
fn operands<'t>(path: &NodePath<'t>) -> Vec<NodePath<'t>> {
    let (Some(left), Some(right)) = (path.field("left"), path.field("right")) else {
        return vec![*path];
    };
    if !is_concatenation(path) {
        return vec![*path];
    }

    let mut operands = operands(&left);
    if !operands.iter().any(is_string_literal) {
        operands = vec![left];
    }
    operands.push(right);
    operands
}

fn is_string_literal(path: &NodePath<'_>) -> bool {
    path.is("string") || path.is("template_string")
}

fn to_template(operands: &[NodePath<'_>]) -> String {
    let mut template = String::from("`");
    for operand in operands {
        match operand.kind() {
            "string" => template.push_str(&template_content(operand.text())),
            "template_string" => {
                let text = operand.text();
                template.push_str(text.strip_prefix('`').and_then(|t| t.strip_suffix('`')).unwrap_or(text));
            }
            _ => {
                template.push_str("${");
                template.push_str(operand.text());
                template.push('}');
            }
        }
    }
    template.push('`');
    template
}

fn plan(code: &str, selection: Selection, ast: &dyn AstProvider) -> Result<Modification, RefactorError> {
    let tree = ast.parse(code)?;
    let chain = find_innermost(&tree, code, |path| is_chain_root(path, selection))
        .ok_or(RefactorError::NotApplicable(ErrorReason::DidNotFindConcatenationToConvert))?;

    Ok(Modification::new(to_template(&operands(&chain)), chain.selection()))
}

#[async_trait]
impl Refactoring for ConvertConcatenationToTemplate {
    fn id(&self) -> &'static str {
        "convert-concatenation-to-template"
    }

    fn title(&self) -> &'static str {
        "Convert concatenation to template literal"
    }

    fn is_preferred(&self) -> bool {
        true
    }

    /// Offered when a chain has a string literal operand, or when the type
    /// checker says the left-most operand is a string
    fn visitor(&self) -> DiscoveryVisitor<'_> {
        DiscoveryVisitor::new().on("binary_expression", |path, state| {
            if !is_chain_root(path, state.selection()) {
                return Ok(());
            }

            let operands = operands(path);
            let is_string = operands.iter().any(is_string_literal)
                || match operands.first() {
                    Some(first) => state.type_at(first.selection().start())?.as_deref() == Some("string"),
                    None => false,
                };

            if is_string {
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
    async fn test_convert_concatenation() {
        let code = run(
            &ConvertConcatenationToTemplate,
            r#"const msg = "Hello " + [cursor]name + "!";"#,
        )
        .await
        .unwrap();

        assert_eq!(code, "const msg = `Hello ${name}!`;");
    }

    #[tokio::test]
    async fn test_convert_with_template_operand() {
        let code = run(
            &ConvertConcatenationToTemplate,
            "const path = [cursor]`${root}/` + dir + '/' + file;",
        )
        .await
        .unwrap();

        assert_eq!(code, "const path = `${root}/${dir}/${file}`;");
    }

    #[tokio::test]
    async fn test_convert_keeps_call_operands() {
        let code = run(
            &ConvertConcatenationToTemplate,
            r#"log("count: " + [cursor]items.length + " of " + total());"#,
        )
        .await
        .unwrap();

        assert_eq!(code, "log(`count: ${items.length} of ${total()}`);");
    }

    #[tokio::test]
    async fn test_leading_numeric_addition_stays_grouped() {
        let code = run(&ConvertConcatenationToTemplate, r#"const s = 1 + 2 + [cursor]"a";"#)
            .await
            .unwrap();
        assert_eq!(code, "const s = `${1 + 2}a`;");

        let code = run(&ConvertConcatenationToTemplate, r#"const s = 1 + [cursor]"a" + 2;"#)
            .await
            .unwrap();
        assert_eq!(code, "const s = `${1}a${2}`;");
    }

    #[tokio::test]
    async fn test_no_concatenation() {
        let err = run(&ConvertConcatenationToTemplate, "const a = [cursor]b * c;")
            .await
            .unwrap_err();

        assert_eq!(err.reason(), ErrorReason::DidNotFindConcatenationToConvert);
    }
}
