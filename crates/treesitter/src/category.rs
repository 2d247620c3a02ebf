//! Node categories
//!
//! Groups concrete node kinds of the JavaScript/TypeScript grammars under
//! supertype-like names, so a visitor can ask for "any function" instead of
//! listing `arrow_function`, `function_declaration`, and the rest.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Category of syntax nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Function,
    Statement,
    Expression,
    Loop,
    Conditional,
    Literal,
    Declaration,
    Block,
}

impl NodeCategory {
    pub const ALL: [NodeCategory; 8] = [
        NodeCategory::Function,
        NodeCategory::Statement,
        NodeCategory::Expression,
        NodeCategory::Loop,
        NodeCategory::Conditional,
        NodeCategory::Literal,
        NodeCategory::Declaration,
        NodeCategory::Block,
    ];

    /// Concrete kinds in this category
    pub fn members(&self) -> &'static [&'static str] {
        match self {
            Self::Function => &[
                "arrow_function",
                "function_declaration",
                "function_expression",
                "function",
                "generator_function",
                "generator_function_declaration",
                "method_definition",
            ],
            Self::Statement => &[
                "expression_statement",
                "if_statement",
                "for_statement",
                "for_in_statement",
                "while_statement",
                "do_statement",
                "return_statement",
                "break_statement",
                "continue_statement",
                "throw_statement",
                "try_statement",
                "switch_statement",
                "labeled_statement",
                "empty_statement",
                "debugger_statement",
                "statement_block",
                "lexical_declaration",
                "variable_declaration",
                "function_declaration",
                "generator_function_declaration",
                "class_declaration",
                "import_statement",
                "export_statement",
            ],
            Self::Expression => &[
                "identifier",
                "this",
                "super",
                "binary_expression",
                "unary_expression",
                "update_expression",
                "assignment_expression",
                "augmented_assignment_expression",
                "ternary_expression",
                "parenthesized_expression",
                "call_expression",
                "new_expression",
                "member_expression",
                "subscript_expression",
                "await_expression",
                "yield_expression",
                "sequence_expression",
                "arrow_function",
                "function_expression",
                "function",
                "generator_function",
                "class",
                "object",
                "array",
                "string",
                "template_string",
                "number",
                "regex",
                "true",
                "false",
                "null",
                "undefined",
                "as_expression",
                "non_null_expression",
                "satisfies_expression",
            ],
            Self::Loop => &[
                "for_statement",
                "for_in_statement",
                "while_statement",
                "do_statement",
            ],
            Self::Conditional => &["if_statement", "ternary_expression", "switch_statement"],
            Self::Literal => &[
                "string",
                "template_string",
                "number",
                "regex",
                "true",
                "false",
                "null",
                "undefined",
            ],
            Self::Declaration => &[
                "function_declaration",
                "generator_function_declaration",
                "class_declaration",
                "lexical_declaration",
                "variable_declaration",
                "interface_declaration",
                "type_alias_declaration",
                "enum_declaration",
            ],
            Self::Block => &["statement_block", "class_body", "switch_body", "program"],
        }
    }
}

/// kind -> categories, built once
static MEMBERSHIP: Lazy<HashMap<&'static str, Vec<NodeCategory>>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, Vec<NodeCategory>> = HashMap::new();
    for category in NodeCategory::ALL {
        for &kind in category.members() {
            table.entry(kind).or_default().push(category);
        }
    }
    table
});

/// Does the concrete `kind` belong to `category`?
pub fn is_type(kind: &str, category: NodeCategory) -> bool {
    MEMBERSHIP
        .get(kind)
        .is_some_and(|categories| categories.contains(&category))
}

/// All categories containing `kind`
pub fn categories_of(kind: &str) -> &'static [NodeCategory] {
    MEMBERSHIP.get(kind).map(Vec::as_slice).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_category() {
        for kind in ["arrow_function", "function_declaration", "method_definition"] {
            assert!(is_type(kind, NodeCategory::Function), "{kind}");
        }
        assert!(!is_type("call_expression", NodeCategory::Function));
    }

    #[test]
    fn test_kind_in_several_categories() {
        let categories = categories_of("if_statement");
        assert!(categories.contains(&NodeCategory::Statement));
        assert!(categories.contains(&NodeCategory::Conditional));
        assert!(!categories.contains(&NodeCategory::Expression));
    }

    #[test]
    fn test_unknown_kind() {
        assert!(categories_of("not_a_kind").is_empty());
        assert!(!is_type("not_a_kind", NodeCategory::Statement));
    }
}
