//! Test utilities for parsing Java source code in tests.

use crate::parsing::{ParsedFile, create_parser, parse_source};
use std::path::Path;

/// Parse Java source code from a string into a `ParsedFile`.
pub fn parse_java_source(code: &str) -> ParsedFile {
    parse_java_named("Test.java", code)
}

pub fn parse_java_named(name: &str, code: &str) -> ParsedFile {
    let mut parser = create_parser().unwrap();
    parse_source(&mut parser, Path::new(name), code.to_string()).unwrap()
}
