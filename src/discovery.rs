//! File discovery and traversal

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

pub const JAVA_EXTENSION: &str = "java";

/// True when `path` exists and is a directory.
pub fn is_valid_directory(path: &Path) -> bool {
    path.is_dir()
}

/// Finds all Java files under the given root directory.
///
/// Entries are visited in file-name order within each directory, so the
/// result is stable for a given snapshot of the tree. `.gitignore` rules
/// are honored when `respect_gitignore` is set.
pub fn find_java_files(root: &Path, respect_gitignore: bool) -> Vec<PathBuf> {
    find_files_by_extension(root, JAVA_EXTENSION, respect_gitignore)
}

fn find_files_by_extension(root: &Path, ext: &str, respect_gitignore: bool) -> Vec<PathBuf> {
    WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore)
        .git_exclude(respect_gitignore)
        .ignore(respect_gitignore)
        .parents(respect_gitignore)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(move |entry| entry.path().extension().is_some_and(|e| e == ext))
        .map(ignore::DirEntry::into_path)
        .collect()
}
