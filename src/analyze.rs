//! Two-pass analysis of a source tree.
//!
//! Pass 1 builds the symbol table from every parsed file. Pass 2 analyzes
//! declarations against that table, which is only borrowed immutably.
//! Both passes run per file in parallel; results keep file-discovery order.

use crate::config::Config;
use crate::declarations::analyze_parsed_file;
use crate::discovery::{find_java_files, is_valid_directory};
use crate::model::ClassRecord;
use crate::parsing::{ParseError, ParsedFile, parse_files};
use crate::resolve::Resolver;
use crate::symbols::SymbolTable;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("source directory does not exist or is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),
    #[error(transparent)]
    Parser(#[from] ParseError),
}

#[derive(Debug, Default)]
pub struct Analysis {
    /// File-discovery order, then declaration order within each file.
    pub classes: Vec<ClassRecord>,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

pub fn analyze_directory(root: &Path, config: &Config) -> Result<Analysis, AnalyzeError> {
    if !is_valid_directory(root) {
        return Err(AnalyzeError::InvalidRoot(root.to_path_buf()));
    }

    let t0 = Instant::now();
    let files = find_java_files(root, config.respect_gitignore);
    debug!(files = files.len(), elapsed = ?t0.elapsed(), "discovery");

    analyze_files(&files, config)
}

/// Analyzes an explicit file list. Files that fail to read or parse are
/// logged and skipped.
pub fn analyze_files(files: &[PathBuf], config: &Config) -> Result<Analysis, AnalyzeError> {
    let t0 = Instant::now();
    let (parsed, files_skipped) = parse_all(files)?;
    let t1 = Instant::now();

    let symbols = SymbolTable::build(&parsed);
    let t2 = Instant::now();

    let resolver = Resolver::new(&symbols, config.resolution_mode, config.duplicate_names);
    let classes = analyze_parsed_files(&parsed, &resolver);
    let t3 = Instant::now();

    debug!(
        parse = ?t1.duration_since(t0),
        symbols = ?t2.duration_since(t1),
        declarations = ?t3.duration_since(t2),
        "analysis phases"
    );
    info!(
        files = parsed.len(),
        skipped = files_skipped,
        types = symbols.len(),
        classes = classes.len(),
        "analysis complete"
    );

    Ok(Analysis { classes, files_scanned: parsed.len(), files_skipped })
}

fn parse_all(files: &[PathBuf]) -> Result<(Vec<ParsedFile>, usize), ParseError> {
    let mut parsed = Vec::with_capacity(files.len());
    let mut skipped = 0;
    for result in parse_files(files)? {
        match result {
            Ok(p) => parsed.push(p),
            Err(e) => {
                warn!("Skipping file: {e}");
                skipped += 1;
            }
        }
    }
    Ok((parsed, skipped))
}

/// Pass 2 over already-parsed files.
pub fn analyze_parsed_files(parsed: &[ParsedFile], resolver: &Resolver<'_>) -> Vec<ClassRecord> {
    let per_file: Vec<Vec<ClassRecord>> = parsed
        .par_iter()
        .map(|p| analyze_parsed_file(p, resolver))
        .collect();
    per_file.into_iter().flatten().collect()
}
