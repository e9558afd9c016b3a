use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tree_sitter::{Parser, Tree};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to initialize Java parser")]
    ParserInit,
    #[error("Failed to parse Java code in {}", path.display())]
    ParseFailed { path: PathBuf },
    #[error("syntax error in {} at line {line}", path.display())]
    Syntax { path: PathBuf, line: usize },
}

pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
}

impl ParsedFile {
    pub fn text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

pub fn create_parser() -> Result<Parser, ParseError> {
    let mut parser = Parser::new();
    let language = tree_sitter_java::LANGUAGE;
    parser
        .set_language(&language.into())
        .map_err(|_| ParseError::ParserInit)?;
    Ok(parser)
}

pub fn parse_file(parser: &mut Parser, path: &Path) -> Result<ParsedFile, ParseError> {
    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(parser, path, source)
}

/// Parses already-loaded source. A tree containing ERROR or MISSING nodes is
/// rejected: partial trees would yield partial metrics.
pub fn parse_source(
    parser: &mut Parser,
    path: &Path,
    source: String,
) -> Result<ParsedFile, ParseError> {
    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| ParseError::ParseFailed { path: path.to_path_buf() })?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(ParseError::Syntax {
            path: path.to_path_buf(),
            line: first_error_line(root).unwrap_or(1),
        });
    }

    Ok(ParsedFile {
        path: path.to_path_buf(),
        source,
        tree,
    })
}

/// Follows the first erroneous child down to an ERROR or MISSING node.
fn first_error_line(root: tree_sitter::Node) -> Option<usize> {
    let mut node = root;
    loop {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position().row + 1);
        }
        let mut cursor = node.walk();
        node = node.children(&mut cursor).find(tree_sitter::Node::has_error)?;
    }
}

/// Parses every path in parallel. The result vector is index-aligned with `paths`.
pub fn parse_files(paths: &[PathBuf]) -> Result<Vec<Result<ParsedFile, ParseError>>, ParseError> {
    enum ParserSlot {
        Ready(Parser),
        Failed,
    }

    // Fail fast instead of reporting the same init error once per file.
    create_parser()?;

    Ok(paths
        .par_iter()
        // One parser per rayon worker, reused across that worker's files.
        .map_init(
            || create_parser().map_or_else(|_| ParserSlot::Failed, ParserSlot::Ready),
            |slot, path| match slot {
                ParserSlot::Ready(parser) => parse_file(parser, path),
                ParserSlot::Failed => Err(ParseError::ParserInit),
            },
        )
        .collect())
}
