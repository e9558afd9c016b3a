//! Java syntax-tree helpers shared by both analysis passes

use crate::parsing::ParsedFile;
use tree_sitter::{Node, TreeCursor};

pub const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

pub fn is_type_declaration(kind: &str) -> bool {
    TYPE_DECLARATION_KINDS.contains(&kind)
}

pub fn is_comment(kind: &str) -> bool {
    matches!(kind, "line_comment" | "block_comment" | "comment")
}

/// Top-level type declarations in source order.
pub fn top_level_types(root: Node) -> Vec<Node> {
    let mut cursor = root.walk();
    root.children(&mut cursor)
        .filter(|c| is_type_declaration(c.kind()))
        .collect()
}

/// Declared package, or an empty string for the default package.
pub fn package_name(parsed: &ParsedFile) -> String {
    let root = parsed.tree.root_node();
    let mut cursor = root.walk();
    root.children(&mut cursor)
        .find(|c| c.kind() == "package_declaration")
        .and_then(dotted_name_child)
        .map(|n| compact(parsed.text(n)))
        .unwrap_or_default()
}

/// Dotted names of every import declaration, in source order.
/// `import a.b.*;` yields `a.b`; static imports yield the member path.
pub fn import_names(parsed: &ParsedFile) -> Vec<String> {
    let root = parsed.tree.root_node();
    let mut cursor = root.walk();
    root.children(&mut cursor)
        .filter(|c| c.kind() == "import_declaration")
        .filter_map(dotted_name_child)
        .map(|n| compact(parsed.text(n)))
        .collect()
}

fn dotted_name_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
}

/// Simple name of a type node: no type arguments, last segment of a scoped name.
pub fn simple_type_name<'a>(parsed: &'a ParsedFile, node: Node) -> Option<&'a str> {
    match node.kind() {
        "type_identifier" | "identifier" => Some(parsed.text(node)),
        "generic_type" => {
            let mut cursor = node.walk();
            let base = node
                .named_children(&mut cursor)
                .find(|c| matches!(c.kind(), "type_identifier" | "scoped_type_identifier"));
            base.and_then(|b| simple_type_name(parsed, b))
        }
        "scoped_type_identifier" => {
            let mut cursor = node.walk();
            let last = node
                .named_children(&mut cursor)
                .filter(|c| c.kind() == "type_identifier")
                .last();
            last.map(|n| parsed.text(n))
        }
        "annotated_type" => {
            let mut cursor = node.walk();
            let inner = node
                .named_children(&mut cursor)
                .find(|c| !matches!(c.kind(), "annotation" | "marker_annotation"));
            inner.and_then(|n| simple_type_name(parsed, n))
        }
        _ => None,
    }
}

/// Inclusive number of lines spanned by `node`.
pub fn line_span(node: Node) -> usize {
    node.end_position().row - node.start_position().row + 1
}

/// Every node below `node` in pre-order, excluding `node` itself.
///
/// Walks with a single cursor, so arbitrarily deep trees (long operator
/// chains) do not grow the thread stack.
pub fn descendants(node: Node<'_>) -> Descendants<'_> {
    Descendants {
        cursor: node.walk(),
        finished: false,
    }
}

pub struct Descendants<'tree> {
    cursor: TreeCursor<'tree>,
    finished: bool,
}

impl<'tree> Iterator for Descendants<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Node<'tree>> {
        if self.finished {
            return None;
        }
        if self.cursor.goto_first_child() {
            return Some(self.cursor.node());
        }
        loop {
            // depth() is relative to the node the cursor started on
            if self.cursor.depth() == 0 {
                self.finished = true;
                return None;
            }
            if self.cursor.goto_next_sibling() {
                return Some(self.cursor.node());
            }
            self.cursor.goto_parent();
        }
    }
}

fn compact(text: &str) -> String {
    text.split_whitespace().collect()
}
