//! classmeter - class metrics and dependency report for Java source trees

// Pipeline
pub mod analyze;
pub mod discovery;
pub mod parsing;
pub mod run;
pub mod shell;

// Analysis
pub mod declarations;
pub mod method_metrics;
pub mod model;
pub mod resolve;
pub mod symbols;
pub mod syntax;

// Output and settings
pub mod config;
pub mod defaults;
pub mod graph;
pub mod report;

#[cfg(test)]
mod test_utils;

pub use analyze::{Analysis, AnalyzeError, analyze_directory, analyze_files};
pub use config::{Config, DuplicateNamePolicy, ReportFormat, ResolutionMode};
pub use declarations::analyze_parsed_file;
pub use defaults::default_config_toml;
pub use discovery::{find_java_files, is_valid_directory};
pub use graph::{ClassGraphMetrics, CouplingRow, CycleInfo, DependencyGraph, collect_coupling};
pub use model::{ClassRecord, MethodRecord};
pub use parsing::{ParseError, ParsedFile, create_parser, parse_file, parse_files, parse_source};
pub use report::{ReportError, ReportOptions, Summary, render, render_json, render_text, summarize, write_report};
pub use resolve::{ImportMap, Resolver};
pub use run::{ReportOutcome, RunError, generate_report};
pub use shell::run_shell;
pub use symbols::SymbolTable;
