#![allow(dead_code)]

use classmeter::{Analysis, ClassRecord};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

pub fn classmeter_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_classmeter"))
}

/// Small two-package project with one unparsable file.
pub fn fake_java_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fake_java")
}

/// Writes `(relative path, source)` pairs into a fresh temporary directory.
pub fn java_tree(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, source) in files {
        let path = tmp.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, source).unwrap();
    }
    tmp
}

pub fn class_named<'a>(analysis: &'a Analysis, qualified: &str) -> &'a ClassRecord {
    analysis
        .classes
        .iter()
        .find(|c| c.qualified_name() == qualified)
        .unwrap_or_else(|| panic!("no class {qualified}"))
}

pub fn dependencies(class: &ClassRecord) -> Vec<&str> {
    class.dependencies.iter().map(String::as_str).collect()
}
