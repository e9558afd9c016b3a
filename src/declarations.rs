//! Declaration analysis: one `ClassRecord` per top-level type declaration.
//!
//! ## Dependency sources
//!
//! Every candidate name goes through the `Resolver`. Candidates come from:
//! - the superclass, implemented interfaces and extended interfaces
//! - declared field types
//! - method return types (other than `void`) and parameter types
//! - the receiver text of every qualified method call inside a method
//! - every type identifier inside a method (locals, casts, `new`, generic
//!   arguments, `throws`), except names introduced by type parameters
//!
//! ## Comment ratio
//!
//! Sum of the inclusive line spans of all comments inside the declaration,
//! over the declaration's own inclusive line span, as a rounded percentage.
//! A comment in front of the declaration (its Javadoc) lies outside the
//! declaration node and is not counted.

use crate::method_metrics::{compute_method_record, parameter_nodes, parameter_type};
use crate::model::ClassRecord;
use crate::parsing::ParsedFile;
use crate::resolve::{ImportMap, Resolver};
use crate::syntax::{
    descendants, import_names, is_comment, line_span, package_name, simple_type_name, top_level_types,
};
use tree_sitter::Node;

/// Per-file state for resolving names found in the file's declarations.
struct FileContext<'p, 'r> {
    parsed: &'p ParsedFile,
    package: String,
    imports: ImportMap,
    resolver: &'r Resolver<'r>,
}

impl FileContext<'_, '_> {
    fn resolve(&self, candidate: &str) -> Option<String> {
        self.resolver.resolve(candidate, &self.imports)
    }

    fn resolve_node(&self, node: Node) -> Option<String> {
        self.resolve(self.parsed.text(node))
    }
}

/// Analyzes every top-level type declaration of one file, in declaration order.
#[must_use]
pub fn analyze_parsed_file(parsed: &ParsedFile, resolver: &Resolver<'_>) -> Vec<ClassRecord> {
    let ctx = FileContext {
        parsed,
        package: package_name(parsed),
        imports: ImportMap::from_imports(import_names(parsed)),
        resolver,
    };

    top_level_types(parsed.tree.root_node())
        .into_iter()
        .map(|decl| analyze_declaration(&ctx, decl))
        .collect()
}

fn analyze_declaration(ctx: &FileContext<'_, '_>, decl: Node) -> ClassRecord {
    let name = decl
        .child_by_field_name("name")
        .map(|n| ctx.parsed.text(n))
        .unwrap_or_default();
    let mut record = ClassRecord::new(
        &ctx.package,
        name,
        ctx.parsed.path.clone(),
        decl.start_position().row + 1,
    );
    record.is_interface = decl.kind() == "interface_declaration";
    record.comment_ratio = compute_comment_ratio(decl);

    for supertype in supertype_nodes(decl) {
        if let Some(simple) = simple_type_name(ctx.parsed, supertype) {
            record.add_dependency(ctx.resolve(simple));
        }
    }

    for member in member_nodes(decl) {
        match member.kind() {
            "field_declaration" | "constant_declaration" => collect_field(ctx, member, &mut record),
            "method_declaration" => collect_method(ctx, member, &mut record),
            _ => {}
        }
    }

    record
}

fn collect_field(ctx: &FileContext<'_, '_>, field: Node, record: &mut ClassRecord) {
    let declared_type = field.child_by_field_name("type");
    let mut cursor = field.walk();
    for declarator in field.children_by_field_name("declarator", &mut cursor) {
        if let Some(name) = declarator.child_by_field_name("name") {
            record.fields.push(ctx.parsed.text(name).to_string());
        }
        if let Some(ty) = declared_type {
            record.add_dependency(ctx.resolve_node(ty));
        }
    }
}

fn collect_method(ctx: &FileContext<'_, '_>, method: Node, record: &mut ClassRecord) {
    record.methods.push(compute_method_record(ctx.parsed, method));

    if let Some(return_type) = method.child_by_field_name("type")
        && return_type.kind() != "void_type"
    {
        record.add_dependency(ctx.resolve_node(return_type));
    }

    for param in parameter_nodes(method) {
        if let Some(ty) = parameter_type(param) {
            record.add_dependency(ctx.resolve_node(ty));
        }
    }

    for candidate in reference_candidates(ctx.parsed, method) {
        record.add_dependency(ctx.resolve(&candidate));
    }
}

/// Receiver texts of qualified calls and type identifiers under `node`.
/// Whitespace runs in a receiver collapse to one space.
fn reference_candidates(parsed: &ParsedFile, node: Node) -> Vec<String> {
    descendants(node)
        .filter_map(|n| match n.kind() {
            "method_invocation" => n
                .child_by_field_name("object")
                .map(|receiver| normalize_whitespace(parsed.text(receiver))),
            "type_identifier" if !n.parent().is_some_and(|p| p.kind() == "type_parameter") => {
                Some(parsed.text(n).to_string())
            }
            _ => None,
        })
        .collect()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Type nodes named in `extends` / `implements` clauses of the declaration.
fn supertype_nodes(decl: Node) -> Vec<Node> {
    let mut types = Vec::new();
    if let Some(superclass) = decl.child_by_field_name("superclass") {
        let mut cursor = superclass.walk();
        types.extend(superclass.named_children(&mut cursor));
    }

    let mut cursor = decl.walk();
    for child in decl.children(&mut cursor) {
        if matches!(child.kind(), "super_interfaces" | "extends_interfaces") {
            types.extend(type_list_entries(child));
        }
    }
    types
}

fn type_list_entries(clause: Node) -> Vec<Node> {
    let mut cursor = clause.walk();
    let Some(list) = clause.named_children(&mut cursor).find(|c| c.kind() == "type_list") else {
        return Vec::new();
    };
    let mut cursor = list.walk();
    list.named_children(&mut cursor).collect()
}

/// Direct members of the declaration body. Enum members after the constants
/// live in a nested `enum_body_declarations` node.
fn member_nodes(decl: Node) -> Vec<Node> {
    let Some(body) = decl.child_by_field_name("body") else {
        return Vec::new();
    };
    let mut members = Vec::new();
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        if child.kind() == "enum_body_declarations" {
            let mut inner = child.walk();
            members.extend(child.named_children(&mut inner));
        } else {
            members.push(child);
        }
    }
    members
}

/// Rounded percentage of `decl`'s lines covered by comments inside it, capped at 100.
pub fn compute_comment_ratio(decl: Node) -> usize {
    let total_lines = line_span(decl);
    if total_lines == 0 {
        return 0;
    }
    let comment_lines = count_comment_lines(decl);
    let ratio = (comment_lines as f64 * 100.0 / total_lines as f64).round() as usize;
    ratio.min(100)
}

fn count_comment_lines(node: Node) -> usize {
    descendants(node)
        .filter(|n| is_comment(n.kind()))
        .map(line_span)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DuplicateNamePolicy, ResolutionMode};
    use crate::symbols::SymbolTable;
    use crate::test_utils::parse_java_source;

    fn analyze_with(table: &SymbolTable, mode: ResolutionMode, code: &str) -> Vec<ClassRecord> {
        let parsed = parse_java_source(code);
        let resolver = Resolver::new(table, mode, DuplicateNamePolicy::LastWins);
        analyze_parsed_file(&parsed, &resolver)
    }

    fn analyze(code: &str) -> Vec<ClassRecord> {
        analyze_with(&SymbolTable::default(), ResolutionMode::Lenient, code)
    }

    fn deps(record: &ClassRecord) -> Vec<&str> {
        record.dependencies.iter().map(String::as_str).collect()
    }

    #[test]
    fn simple_class_record() {
        let records = analyze("package a; class Foo { int x; void bar(int y) { if (y > 0) { } } }");
        assert_eq!(records.len(), 1);
        let foo = &records[0];
        assert_eq!(foo.package_name, "a");
        assert_eq!(foo.class_name, "Foo");
        assert!(!foo.is_interface);
        assert_eq!(foo.fields, vec!["x"]);
        assert_eq!(foo.methods.len(), 1);
        assert_eq!(foo.methods[0].name, "bar");
        assert_eq!(foo.methods[0].parameter_count, 1);
        assert_eq!(foo.methods[0].cyclomatic_complexity, 2);
        assert!(foo.dependencies.is_empty());
        assert_eq!(foo.comment_ratio, 0);
    }

    #[test]
    fn declaration_kinds() {
        let records = analyze("interface I {}\nenum E { A }\nrecord R(int v) {}\n@interface Ann {}\nclass C {}");
        let flags: Vec<(&str, bool)> = records
            .iter()
            .map(|r| (r.class_name.as_str(), r.is_interface))
            .collect();
        assert_eq!(
            flags,
            vec![("I", true), ("E", false), ("R", false), ("Ann", false), ("C", false)]
        );
    }

    #[test]
    fn inheritance_dependencies_use_imports() {
        let records = analyze(
            "package p2;\nimport p1.A;\nimport q.Marker;\nclass B extends A implements Marker, Comparable<B> {}",
        );
        assert_eq!(deps(&records[0]), vec!["Comparable", "p1.A", "q.Marker"]);
    }

    #[test]
    fn interface_extends_are_dependencies() {
        let mut table = SymbolTable::default();
        table.insert("Base".into(), "core".into());
        let records = analyze_with(&table, ResolutionMode::Lenient, "interface Api extends Base, java.io.Closeable {}");
        assert_eq!(deps(&records[0]), vec!["Closeable", "core.Base"]);
        assert!(records[0].is_interface);
    }

    #[test]
    fn fields_in_declaration_order_with_types() {
        let code = "import java.util.List;\nclass A { List<Widget> items, spare; int count; String name; static final int MAX = 3; }";
        let records = analyze(code);
        assert_eq!(records[0].fields, vec!["items", "spare", "count", "name", "MAX"]);
        assert_eq!(deps(&records[0]), vec!["java.util.List"]);
    }

    #[test]
    fn interface_constants_are_fields() {
        let records = analyze("interface Limits { int MAX = 10; Duration TIMEOUT = null; }");
        assert_eq!(records[0].fields, vec!["MAX", "TIMEOUT"]);
        assert_eq!(deps(&records[0]), vec!["Duration"]);
    }

    #[test]
    fn method_signature_dependencies() {
        let code = r#"
import java.util.Map;
class Service {
    Map<String, Order> find(Customer c, int limit, Filter... filters) { return null; }
    void run() { }
}
"#;
        let records = analyze(code);
        let d = deps(&records[0]);
        assert!(d.contains(&"java.util.Map"));
        assert!(d.contains(&"Customer"));
        assert!(d.contains(&"Filter"));
        // generic arguments of the return type are found by the in-method walk
        assert!(d.contains(&"Order"));
        assert!(!d.contains(&"void"));
        assert!(!d.contains(&"String"));
    }

    #[test]
    fn call_receivers_and_body_types() {
        let code = r#"
import java.util.ArrayList;
import java.util.Collections;
class Worker {
    void work(java.util.List<Integer> xs) throws java.io.IOException {
        ArrayList<Job> jobs = new ArrayList<>();
        Collections.sort(xs);
        helper.assist();
        this.work(xs);
        Object o = (Task) null;
    }
}
"#;
        let records = analyze(code);
        let d = deps(&records[0]);
        assert!(d.contains(&"java.util.ArrayList"));
        assert!(d.contains(&"java.util.Collections"));
        assert!(d.contains(&"Job"));
        assert!(d.contains(&"Task"));
        assert!(d.contains(&"IOException"));
        assert!(!d.iter().any(|x| x.contains("helper") || x.contains("this")));
    }

    #[test]
    fn type_parameters_are_not_dependencies_but_bounds_are() {
        let code = "class A { <T extends Shape> T pick(T a) { return a; } }";
        let records = analyze_with(&SymbolTable::default(), ResolutionMode::Lenient, code);
        let d = deps(&records[0]);
        assert!(d.contains(&"Shape"));
        // uses of T still look like a capitalized type name
        assert!(d.contains(&"T"));
        let strict = analyze_with(&SymbolTable::default(), ResolutionMode::Strict, code);
        assert!(strict[0].dependencies.is_empty());
    }

    #[test]
    fn repeated_references_are_deduplicated() {
        let code = "class A { Widget a; Widget b; Widget make(Widget w) { Widget x = new Widget(); return x; } }";
        let records = analyze(code);
        assert_eq!(deps(&records[0]), vec!["Widget"]);
    }

    #[test]
    fn self_reference_is_kept() {
        let records = analyze("package n; class Node { Node next; }");
        assert_eq!(deps(&records[0]), vec!["Node"]);
        let mut table = SymbolTable::default();
        table.insert("Node".into(), "n".into());
        let resolved = analyze_with(&table, ResolutionMode::Lenient, "package n; class Node { Node next; }");
        assert_eq!(deps(&resolved[0]), vec!["n.Node"]);
    }

    #[test]
    fn nested_types_are_not_records_and_their_methods_are_not_counted() {
        let code = "class Outer { void a() { } static class Inner { int hidden; void b() { } } }";
        let records = analyze(code);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].methods.len(), 1);
        assert!(records[0].fields.is_empty());
    }

    #[test]
    fn constructors_are_not_methods() {
        let records = analyze("class A { A(int x) { } void m() { } }");
        let names: Vec<&str> = records[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["m"]);
    }

    #[test]
    fn enum_members_after_constants() {
        let code = "enum Color implements Named { RED, GREEN; private int code; int code() { return code; } }";
        let records = analyze(code);
        assert_eq!(records[0].fields, vec!["code"]);
        assert_eq!(records[0].methods.len(), 1);
        assert_eq!(deps(&records[0]), vec!["Named"]);
    }

    #[test]
    fn comment_ratio_counts_inner_comments_only() {
        let code = "/** class doc\n * outside\n */\nclass A {\n    // one\n    int x;\n    /* two\n       three */\n    void f() { }\n}\n";
        // class spans 7 lines (4..=10); comments cover 1 + 2 lines
        let records = analyze(code);
        assert_eq!(records[0].comment_ratio, 43);
    }

    #[test]
    fn comment_ratio_includes_nested_declarations() {
        let code = "class Outer {\n    static class Inner {\n        // c\n        int x;\n    }\n}\n";
        let records = analyze(code);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].comment_ratio, 17);
    }

    #[test]
    fn receiver_text_keeps_single_spaces() {
        let code = "class A { void f() { Foo.of(a,   b).run(); Bar\n        .make()\n        .go(); } }";
        let records = analyze(code);
        let d = deps(&records[0]);
        assert!(d.contains(&"Foo.of(a, b)"), "{d:?}");
        assert!(d.contains(&"Foo"));
        assert!(d.contains(&"Bar .make()"), "{d:?}");
    }

    #[test]
    fn long_concatenation_is_analyzed() {
        let terms: Vec<String> = (0..20_000).map(|i| format!("\"s{i}\"")).collect();
        let code = format!(
            "class Big {{\n    // text\n    String f() {{ return Widget.name() + {}; }}\n}}\n",
            terms.join(" + ")
        );
        let records = analyze(&code);
        assert_eq!(records[0].methods[0].cyclomatic_complexity, 1);
        assert_eq!(deps(&records[0]), vec!["Widget"]);
        assert_eq!(records[0].comment_ratio, 25);
    }

    #[test]
    fn comment_ratio_zero_without_comments() {
        let records = analyze("class A {\n  int x;\n}\n");
        assert_eq!(records[0].comment_ratio, 0);
    }

    #[test]
    fn comment_ratio_is_capped() {
        let records = analyze("class A { /* a */ /* b */ }");
        assert_eq!(records[0].comment_ratio, 100);
    }

    #[test]
    fn records_carry_source_position() {
        let records = analyze("package p;\n\nclass A {}\nclass B {}\n");
        assert_eq!(records[0].line, 3);
        assert_eq!(records[1].line, 4);
        assert_eq!(records[1].path, std::path::PathBuf::from("Test.java"));
    }
}
