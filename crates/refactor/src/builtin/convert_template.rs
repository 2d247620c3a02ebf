use async_trait::async_trait;
use buffer::{Editor, ErrorReason, Modification};
use selection::Selection;
use treesitter::AstProvider;

use super::template_content;
use crate::actions::Refactoring;
use crate::discovery::DiscoveryVisitor;
use crate::visitor::{find_innermost, NodePath};
use crate::RefactorError;

/// Turn a quoted string literal into a template literal
pub struct ConvertToTemplateLiteral;

/// Strings whose syntax position only accepts plain literals
fn is_in_literal_only_position(path: &NodePath<'_>) -> bool {
    let Some(parent) = path.parent() else {
        return false;
    };

    match parent.kind() {
        "import_statement" | "export_statement" | "jsx_attribute" | "import_require_clause" => true,
        "pair" | "public_field_definition" | "method_definition" => parent
            .field(if parent.is("pair") { "key" } else { "name" })
            .is_some_and(|key| key.node().id() == path.node().id()),
        _ => false,
    }
}

fn is_convertible(path: &NodePath<'_>, selection: Selection) -> bool {
    path.is("string") && selection.is_inside(&path.selection()) && !is_in_literal_only_position(path)
}

fn find_string(code: &str, selection: Selection, ast: &dyn AstProvider) -> Result<Selection, RefactorError> {
    let tree = ast.parse(code)?;
    find_innermost(&tree, code, |path| is_convertible(path, selection))
        .map(|string| string.selection())
        .ok_or(RefactorError::NotApplicable(ErrorReason::DidNotFindStringToConvert))
}

#[async_trait]
impl Refactoring for ConvertToTemplateLiteral {
    fn id(&self) -> &'static str {
        "convert-to-template-literal"
    }

    fn title(&self) -> &'static str {
        "Convert to template literal"
    }

    fn visitor(&self) -> DiscoveryVisitor<'_> {
        DiscoveryVisitor::new().on("string", |path, state| {
            if is_convertible(path, state.selection()) {
                state.on_match(None);
            }
            Ok(())
        })
    }

    async fn execute(&self, editor: &mut dyn Editor, ast: &dyn AstProvider) -> Result<(), RefactorError> {
        let string = find_string(&editor.code(), editor.selection(), ast)?;
        editor
            .read_then_write(
                string,
                Box::new(move |literal: String| {
                    vec![Modification::new(format!("`{}`", template_content(&literal)), string)]
                }),
                None,
            )
            .await?;
        Ok(())
    }
}
