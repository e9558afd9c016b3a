//! Analyze a directory and write the report in one step.

use crate::analyze::{AnalyzeError, analyze_directory};
use crate::config::Config;
use crate::report::{ReportError, ReportOptions, render, write_report};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOutcome {
    pub classes: usize,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

/// Nothing is written when the analysis itself fails.
pub fn generate_report(source: &Path, output: &Path, config: &Config) -> Result<ReportOutcome, RunError> {
    let analysis = analyze_directory(source, config)?;
    let options = ReportOptions {
        format: config.report_format,
        coupling: config.coupling_section,
    };
    let content = render(&analysis.classes, &options)?;
    write_report(output, &content)?;
    info!(output = %output.display(), "report written");

    Ok(ReportOutcome {
        classes: analysis.classes.len(),
        files_scanned: analysis.files_scanned,
        files_skipped: analysis.files_skipped,
    })
}
