//! Per-method metrics

use crate::model::MethodRecord;
use crate::parsing::ParsedFile;
use crate::syntax::{descendants, line_span};
use tree_sitter::Node;

/// Builds the record for one `method_declaration` node.
#[must_use]
pub fn compute_method_record(parsed: &ParsedFile, method: Node) -> MethodRecord {
    let name = method
        .child_by_field_name("name")
        .map(|n| parsed.text(n).to_string())
        .unwrap_or_default();

    MethodRecord {
        name,
        parameter_count: parameter_nodes(method).len(),
        line_count: method.child_by_field_name("body").map_or(0, line_span),
        cyclomatic_complexity: compute_cyclomatic_complexity(method),
    }
}

/// Formal parameters including a trailing varargs parameter.
/// A receiver parameter (`Foo this`) is not a parameter.
pub fn parameter_nodes(method: Node) -> Vec<Node> {
    let Some(params) = method.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut cursor = params.walk();
    params
        .named_children(&mut cursor)
        .filter(|c| matches!(c.kind(), "formal_parameter" | "spread_parameter"))
        .collect()
}

/// Type node of a `formal_parameter` or `spread_parameter`.
pub fn parameter_type(param: Node) -> Option<Node> {
    if let Some(ty) = param.child_by_field_name("type") {
        return Some(ty);
    }
    // spread_parameter has no field names: modifiers? type '...' declarator
    let mut cursor = param.walk();
    param
        .named_children(&mut cursor)
        .find(|c| !matches!(c.kind(), "modifiers" | "variable_declarator"))
}

/// Decision points + 1.
pub fn compute_cyclomatic_complexity(node: Node) -> usize {
    1 + count_decision_points(node)
}

fn count_decision_points(node: Node) -> usize {
    descendants(node).filter(|n| is_decision_point(n.kind())).count()
}

// `&&` and `||` are not decision points, nor is the for-each loop.
fn is_decision_point(kind: &str) -> bool {
    matches!(
        kind,
        "if_statement"
            | "for_statement"
            | "while_statement"
            | "do_statement"
            | "switch_label"
            | "ternary_expression"
            | "catch_clause"
    )
}
