//! Built-in refactorings

mod add_braces;
mod convert_concatenation;
mod convert_template;
mod flip_if_else;
mod negate_expression;
mod remove_braces;

use std::sync::Arc;

pub use add_braces::AddBracesToArrowFunction;
pub use convert_concatenation::ConvertConcatenationToTemplate;
pub use convert_template::ConvertToTemplateLiteral;
pub use flip_if_else::FlipIfElse;
pub use negate_expression::NegateExpression;
pub use remove_braces::RemoveBracesFromArrowFunction;

use crate::actions::Refactoring;
use crate::visitor::NodePath;

/// Every built-in refactoring, in registration order
pub fn all() -> Vec<Arc<dyn Refactoring>> {
    vec![
        Arc::new(FlipIfElse),
        Arc::new(AddBracesToArrowFunction),
        Arc::new(RemoveBracesFromArrowFunction),
        Arc::new(ConvertToTemplateLiteral),
        Arc::new(NegateExpression),
        Arc::new(ConvertConcatenationToTemplate),
    ]
}

/// Leading whitespace of `line`
fn indentation_of(code: &str, line: u32) -> String {
    code.lines()
        .nth(line as usize)
        .map(|text| text.chars().take_while(|c| c.is_whitespace()).collect())
        .unwrap_or_default()
}

fn negated_comparison(operator: &str) -> Option<&'static str> {
    match operator {
        "===" => Some("!=="),
        "!==" => Some("==="),
        "==" => Some("!="),
        "!=" => Some("=="),
        "<" => Some(">="),
        ">=" => Some("<"),
        ">" => Some("<="),
        "<=" => Some(">"),
        _ => None,
    }
}

fn flipped_logical(operator: &str) -> Option<&'static str> {
    match operator {
        "&&" => Some("||"),
        "||" => Some("&&"),
        _ => None,
    }
}

fn is_logical(path: &NodePath<'_>) -> bool {
    path.is("binary_expression") && path.operator().and_then(flipped_logical).is_some()
}

/// Source of the logical negation of `path`.
///
/// Comparisons get their operator inverted, `&&`/`||` are rewritten with
/// De Morgan's laws and a leading `!` is dropped.
fn negate(path: &NodePath<'_>) -> String {
    match path.kind() {
        "true" => "false".to_string(),
        "false" => "true".to_string(),
        "binary_expression" => {
            let parts = (path.field("left"), path.operator(), path.field("right"));
            if let (Some(left), Some(operator), Some(right)) = parts {
                if let Some(negated) = negated_comparison(operator) {
                    return format!("{} {} {}", left.text(), negated, right.text());
                }
                if let Some(flipped) = flipped_logical(operator) {
                    return format!("{} {} {}", negate_operand(&left), flipped, negate_operand(&right));
                }
            }
            format!("!({})", path.text())
        }
        "unary_expression" if path.operator() == Some("!") => match negated_operand(path) {
            Some(operand) => operand.text().to_string(),
            None => format!("!{}", path.text()),
        },
        "identifier" | "this" | "member_expression" | "subscript_expression" | "call_expression"
        | "parenthesized_expression" => format!("!{}", path.text()),
        _ => format!("!({})", path.text()),
    }
}

/// Expression under a `!`, with its parentheses stripped
fn negated_operand<'t>(path: &NodePath<'t>) -> Option<NodePath<'t>> {
    let argument = path.field("argument")?;
    if !argument.is("parenthesized_expression") {
        return Some(argument);
    }
    Some(argument.named_children().first().copied().unwrap_or(argument))
}

/// Binds looser than `&&`, or cannot be mixed with it unparenthesized
fn binds_loosely(path: &NodePath<'_>) -> bool {
    match path.kind() {
        "binary_expression" => matches!(path.operator(), Some("&&" | "||" | "??")),
        "ternary_expression" | "assignment_expression" | "augmented_assignment_expression"
        | "sequence_expression" | "arrow_function" | "yield_expression" => true,
        _ => false,
    }
}

/// Negation of an operand of `&&`/`||`, parenthesized when precedence needs it
fn negate_operand(path: &NodePath<'_>) -> String {
    let negated = negate(path);
    let loose = match path.kind() {
        "unary_expression" if path.operator() == Some("!") => {
            negated_operand(path).is_some_and(|operand| binds_loosely(&operand))
        }
        _ => is_logical(path),
    };
    if loose { format!("({negated})") } else { negated }
}

/// Content of a quoted string literal, ready for a template literal
fn template_content(literal: &str) -> String {
    let Some(quote) = literal.chars().next() else {
        return String::new();
    };
    let inner = literal
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .unwrap_or(literal);

    let mut content = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) if next == quote => content.push(next),
                Some(next) => {
                    content.push('\\');
                    content.push(next);
                }
                None => content.push('\\'),
            },
            '`' => content.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => content.push_str("\\$"),
            _ => content.push(c),
        }
    }
    content
}


#[cfg(test)]
mod tests {
    use super::*;
    use treesitter::{AstProvider, Language, Parser, Tree};

    fn expression<'t>(tree: &'t Tree, source: &'t str) -> NodePath<'t> {
        let statement = NodePath::new(tree.root_node(), source).named_children()[0];
        statement.named_children()[0]
    }

    fn negated(source: &str) -> String {
        let tree = Parser::new(Language::JavaScript).unwrap().parse(source).unwrap();
        negate(&expression(&tree, source))
    }

    #[test]
    fn test_negate() {
        assert_eq!(negated("a === b;"), "a !== b");
        assert_eq!(negated("a >= 1;"), "a < 1");
        assert_eq!(negated("!isValid;"), "isValid");
        assert_eq!(negated("!(a && b);"), "a && b");
        assert_eq!(negated("isValid;"), "!isValid");
        assert_eq!(negated("true;"), "false");
        assert_eq!(negated("a + b;"), "!(a + b)");
    }

    #[test]
    fn test_negate_de_morgan() {
        assert_eq!(negated("a && b > 1;"), "!a || b <= 1");
        assert_eq!(negated("a || b && c;"), "!a && (!b || !c)");
    }

    #[test]
    fn test_negate_keeps_grouping_of_unwrapped_operands() {
        assert_eq!(negated("!(a || b) || c;"), "(a || b) && !c");
        assert_eq!(negated("c && !(a ? b : d);"), "!c || (a ? b : d)");
        assert_eq!(negated("!(a > b) && c;"), "a > b || !c");
        assert_eq!(negated("!!a || b;"), "!a && !b");
    }

    #[test]
    fn test_template_content() {
        assert_eq!(template_content("\"Hello\""), "Hello");
        assert_eq!(template_content(r"'it\'s'"), "it's");
        assert_eq!(template_content(r#""say \"hi\"""#), r#"say "hi""#);
        assert_eq!(template_content("\"a`b\""), "a\\`b");
        assert_eq!(template_content("\"${x}\""), "\\${x}");
        assert_eq!(template_content(r#""line\n""#), r"line\n");
    }

    #[test]
    fn test_indentation_of() {
        let code = "function f() {\n    return 1;\n}";
        assert_eq!(indentation_of(code, 1), "    ");
        assert_eq!(indentation_of(code, 0), "");
        assert_eq!(indentation_of(code, 9), "");
    }

    #[test]
    fn test_all_ids_are_unique() {
        let refactorings = all();
        let mut ids: Vec<_> = refactorings.iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), refactorings.len());
    }
}
