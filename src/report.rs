//! Report rendering and output

use crate::config::ReportFormat;
use crate::graph::{CouplingRow, DependencyGraph, collect_coupling};
use crate::model::ClassRecord;
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

const RULE: &str = "------------------";
pub const NO_DEPENDENCIES: &str = "No class dependencies detected";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub format: ReportFormat,
    pub coupling: bool,
}

/// Run-wide aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_classes: usize,
    pub total_methods: usize,
    /// Mean over all methods of all classes; 0 without methods.
    pub average_complexity: f64,
    /// Mean over all classes; 0 without classes.
    pub average_comment_ratio: f64,
}

#[must_use]
pub fn summarize(classes: &[ClassRecord]) -> Summary {
    let total_classes = classes.len();
    let total_methods: usize = classes.iter().map(|c| c.methods.len()).sum();
    let total_complexity: usize = classes.iter().map(ClassRecord::total_complexity).sum();
    let total_ratio: usize = classes.iter().map(|c| c.comment_ratio).sum();

    Summary {
        total_classes,
        total_methods,
        average_complexity: mean(total_complexity, total_methods),
        average_comment_ratio: mean(total_ratio, total_classes),
    }
}

fn mean(total: usize, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total as f64 / count as f64 }
}

pub fn render(classes: &[ClassRecord], options: &ReportOptions) -> Result<String, ReportError> {
    match options.format {
        ReportFormat::Text => Ok(render_text(classes, options)),
        ReportFormat::Json => render_json(classes, options),
    }
}

#[must_use]
pub fn render_text(classes: &[ClassRecord], options: &ReportOptions) -> String {
    let mut out = String::new();
    out.push_str("==============================\n");
    out.push_str("  Java Project Analysis Report\n");
    out.push_str("==============================\n\n");

    write_class_summary(&mut out, classes);
    write_method_statistics(&mut out, classes);
    write_dependencies(&mut out, classes);
    write_metrics_summary(&mut out, &summarize(classes));
    if options.coupling {
        write_coupling(&mut out, classes);
    }
    out
}

fn write_class_summary(out: &mut String, classes: &[ClassRecord]) {
    let _ = writeln!(out, "1. Class / Interface Summary\n{RULE}");
    for c in classes {
        let _ = writeln!(
            out,
            "{} {}   [{} fields, {} methods, comment ratio {}%]",
            c.kind_label(),
            c.qualified_name(),
            c.fields.len(),
            c.methods.len(),
            c.comment_ratio
        );
    }
    out.push('\n');
}

fn write_method_statistics(out: &mut String, classes: &[ClassRecord]) {
    let _ = writeln!(out, "2. Method Statistics\n{RULE}");
    for c in classes {
        let _ = writeln!(out, "{} ({} methods):", c.qualified_name(), c.methods.len());
        let _ = writeln!(
            out,
            "Class cyclomatic complexity: {}       comment ratio: {}%",
            c.total_complexity(),
            c.comment_ratio
        );
        for m in &c.methods {
            let _ = writeln!(out, "  method: {}", m.name);
            let _ = writeln!(out, "    parameters: {}", m.parameter_count);
            let _ = writeln!(out, "    lines: {}", m.line_count);
            let _ = writeln!(out, "    cyclomatic complexity: {}", m.cyclomatic_complexity);
            out.push('\n');
        }
    }
    out.push('\n');
}

fn write_dependencies(out: &mut String, classes: &[ClassRecord]) {
    let _ = writeln!(out, "3. Class Dependencies\n{RULE}");
    let mut any = false;
    for c in classes.iter().filter(|c| !c.dependencies.is_empty()) {
        any = true;
        let _ = writeln!(out, "{} depends on:", c.qualified_name());
        for dep in &c.dependencies {
            let _ = writeln!(out, "  -> {dep}");
        }
        out.push('\n');
    }
    if !any {
        let _ = writeln!(out, "{NO_DEPENDENCIES}\n");
    }
}

fn write_metrics_summary(out: &mut String, summary: &Summary) {
    let _ = writeln!(out, "4. Metrics Summary\n{RULE}");
    let _ = writeln!(out, "Total classes: {}", summary.total_classes);
    let _ = writeln!(out, "Total methods: {}", summary.total_methods);
    let _ = writeln!(out, "Average cyclomatic complexity: {:.1}", summary.average_complexity);
    let _ = writeln!(out, "Average comment ratio: {:.1}%", summary.average_comment_ratio);
}

fn write_coupling(out: &mut String, classes: &[ClassRecord]) {
    let graph = DependencyGraph::from_classes(classes);
    let _ = writeln!(out, "\n5. Coupling\n{RULE}");
    for row in collect_coupling(&graph, classes) {
        let m = &row.metrics;
        let _ = writeln!(
            out,
            "{}   [fan-in {}, fan-out {}, instability {:.2}, transitive {}]",
            row.class_name, m.fan_in, m.fan_out, m.instability, m.transitive_deps
        );
    }
    let cycles = graph.find_cycles().cycles;
    if cycles.is_empty() {
        let _ = writeln!(out, "No dependency cycles detected");
    } else {
        for cycle in cycles {
            let _ = writeln!(out, "Cycle: {}", cycle.join(" -> "));
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    classes: &'a [ClassRecord],
    summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    coupling: Option<Vec<CouplingRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cycles: Option<Vec<Vec<String>>>,
}

pub fn render_json(classes: &[ClassRecord], options: &ReportOptions) -> Result<String, ReportError> {
    let (coupling, cycles) = if options.coupling {
        let graph = DependencyGraph::from_classes(classes);
        (
            Some(collect_coupling(&graph, classes)),
            Some(graph.find_cycles().cycles),
        )
    } else {
        (None, None)
    };
    let report = JsonReport {
        classes,
        summary: summarize(classes),
        coupling,
        cycles,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

pub fn write_report(path: &Path, content: &str) -> Result<(), ReportError> {
    std::fs::write(path, content).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MethodRecord;

    fn method(name: &str, cc: usize) -> MethodRecord {
        MethodRecord { name: name.into(), parameter_count: 1, line_count: 3, cyclomatic_complexity: cc }
    }

    fn sample() -> Vec<ClassRecord> {
        let mut a = ClassRecord::new("p1", "A", PathBuf::from("A.java"), 1);
        a.fields.push("x".into());
        a.methods.push(method("run", 2));
        a.methods.push(method("stop", 1));
        a.comment_ratio = 20;
        let mut b = ClassRecord::new("p2", "B", PathBuf::from("B.java"), 1);
        b.is_interface = true;
        b.dependencies.insert("p1.A".into());
        b.dependencies.insert("Ext".into());
        b.comment_ratio = 45;
        vec![a, b]
    }

    #[test]
    fn summary_of_empty_run_is_zero() {
        let s = summarize(&[]);
        assert_eq!(s, Summary { total_classes: 0, total_methods: 0, average_complexity: 0.0, average_comment_ratio: 0.0 });
    }

    #[test]
    fn summary_averages() {
        let s = summarize(&sample());
        assert_eq!(s.total_classes, 2);
        assert_eq!(s.total_methods, 2);
        assert!((s.average_complexity - 1.5).abs() < 1e-9);
        assert!((s.average_comment_ratio - 32.5).abs() < 1e-9);
    }

    #[test]
    fn text_report_sections_in_order() {
        let text = render_text(&sample(), &ReportOptions::default());
        let positions: Vec<usize> = [
            "1. Class / Interface Summary",
            "2. Method Statistics",
            "3. Class Dependencies",
            "4. Metrics Summary",
        ]
        .iter()
        .map(|h| text.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!text.contains("5. Coupling"));
    }

    #[test]
    fn text_report_content() {
        let text = render_text(&sample(), &ReportOptions::default());
        assert!(text.contains("class p1.A   [1 fields, 2 methods, comment ratio 20%]"));
        assert!(text.contains("interface p2.B   [0 fields, 0 methods, comment ratio 45%]"));
        assert!(text.contains("Class cyclomatic complexity: 3"));
        assert!(text.contains("  method: run\n    parameters: 1\n    lines: 3\n    cyclomatic complexity: 2\n"));
        assert!(text.contains("p2.B depends on:\n  -> Ext\n  -> p1.A\n"));
        assert!(!text.contains("p1.A depends on"));
        assert!(text.contains("Average cyclomatic complexity: 1.5"));
        assert!(text.contains("Average comment ratio: 32.5%"));
        assert!(!text.contains(NO_DEPENDENCIES));
    }

    #[test]
    fn empty_report_has_fallback_and_zeros() {
        let text = render_text(&[], &ReportOptions::default());
        assert!(text.contains(NO_DEPENDENCIES));
        assert!(text.contains("Total classes: 0"));
        assert!(text.contains("Total methods: 0"));
        assert!(text.contains("Average cyclomatic complexity: 0.0"));
        assert!(text.contains("Average comment ratio: 0.0%"));
    }

    #[test]
    fn coupling_section_lists_cycles() {
        let mut classes = sample();
        classes[0].dependencies.insert("p2.B".into());
        let opts = ReportOptions { coupling: true, ..ReportOptions::default() };
        let text = render_text(&classes, &opts);
        assert!(text.contains("5. Coupling"));
        assert!(text.contains("p1.A   [fan-in 1, fan-out 1, instability 0.50, transitive 2]"));
        assert!(text.contains("Cycle: p1.A -> p2.B"));
    }

    #[test]
    fn json_report_round_trips_values() {
        let opts = ReportOptions { format: ReportFormat::Json, coupling: false };
        let json = render(&sample(), &opts).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["total_classes"], 2);
        assert_eq!(value["classes"][1]["dependencies"][1], "p1.A");
        assert_eq!(value["classes"][0]["methods"][0]["cyclomatic_complexity"], 2);
        assert!(value.get("coupling").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn json_report_tolerates_non_utf8_paths() {
        use std::os::unix::ffi::OsStrExt;
        let path = PathBuf::from(std::ffi::OsStr::from_bytes(b"src/Bad\xffName.java"));
        let classes = vec![ClassRecord::new("p", "A", path, 1)];
        let opts = ReportOptions { format: ReportFormat::Json, coupling: false };
        let json = render(&classes, &opts).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["classes"][0]["path"], "src/Bad\u{FFFD}Name.java");
    }

    #[test]
    fn write_report_to_missing_directory_fails() {
        let err = write_report(Path::new("/nonexistent/dir/report.txt"), "x").unwrap_err();
        assert!(matches!(err, ReportError::Write { .. }));
    }

    #[test]
    fn write_report_creates_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("report.txt");
        write_report(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }
}
