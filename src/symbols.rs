//! Global symbol table: short type name to declaring package.
//!
//! Built from every parsed file before any declaration is analyzed, then
//! only read. A short name declared in several packages keeps all of its
//! candidates in discovery order; the caller picks the tie-break.

use crate::config::DuplicateNamePolicy;
use crate::parsing::ParsedFile;
use crate::syntax::{package_name, top_level_types};
use rayon::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    packages: HashMap<String, Vec<String>>,
}

impl SymbolTable {
    /// Collects declarations from every file in parallel, then folds them in
    /// file order so the table does not depend on scheduling.
    pub fn build(parsed_files: &[ParsedFile]) -> Self {
        let per_file: Vec<Vec<(String, String)>> =
            parsed_files.par_iter().map(declared_types).collect();

        let mut table = Self::default();
        for (name, package) in per_file.into_iter().flatten() {
            table.insert(name, package);
        }
        table
    }

    pub fn insert(&mut self, short_name: String, package: String) {
        let candidates = self.packages.entry(short_name).or_default();
        // Re-declaring in a known package moves it to the back: it is the latest.
        candidates.retain(|p| *p != package);
        candidates.push(package);
    }

    /// Declaring package for `short_name` under `policy`.
    pub fn lookup(&self, short_name: &str, policy: DuplicateNamePolicy) -> Option<&str> {
        let candidates = self.packages.get(short_name)?;
        match policy {
            DuplicateNamePolicy::LastWins => candidates.last().map(String::as_str),
            DuplicateNamePolicy::Ambiguous if candidates.len() == 1 => {
                candidates.first().map(String::as_str)
            }
            DuplicateNamePolicy::Ambiguous => None,
        }
    }

    /// Every package that declares `short_name`, oldest first.
    pub fn candidates(&self, short_name: &str) -> &[String] {
        self.packages.get(short_name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// `(short name, package)` for each top-level type in the file.
fn declared_types(parsed: &ParsedFile) -> Vec<(String, String)> {
    let package = package_name(parsed);
    top_level_types(parsed.tree.root_node())
        .into_iter()
        .filter_map(|decl| decl.child_by_field_name("name"))
        .map(|name| (parsed.text(name).to_string(), package.clone()))
        .collect()
}
