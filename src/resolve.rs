//! Short type name resolution
//!
//! Resolution is lexical and best-effort. For a candidate name, first match wins:
//! 1. generic arguments are stripped (`List<Foo>` becomes `List`)
//! 2. built-in types resolve to nothing
//! 3. the file's imports
//! 4. the global symbol table
//! 5. lenient mode only: any capitalized name is kept unqualified
//! 6. otherwise nothing

use crate::config::{DuplicateNamePolicy, ResolutionMode};
use crate::model::qualify;
use crate::symbols::SymbolTable;
use std::collections::HashMap;

/// Primitive keywords, their wrappers, `String`, `Object` and `void`.
pub const BUILTIN_TYPES: &[&str] = &[
    "void", "boolean", "byte", "char", "short", "int", "long", "float", "double",
    "Boolean", "Byte", "Character", "Short", "Integer", "Long", "Float", "Double",
    "String", "Object",
];

pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Simple name to fully-qualified name, from one file's import declarations.
#[derive(Debug, Default, Clone)]
pub struct ImportMap {
    entries: HashMap<String, String>,
}

impl ImportMap {
    /// Later imports of the same simple name replace earlier ones.
    pub fn from_imports<I, S>(imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = Self::default();
        for import in imports {
            map.insert(import.into());
        }
        map
    }

    pub fn insert(&mut self, full_name: String) {
        let simple = full_name.rsplit('.').next().unwrap_or(&full_name).to_string();
        self.entries.insert(simple, full_name);
    }

    pub fn get(&self, simple_name: &str) -> Option<&str> {
        self.entries.get(simple_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves names against a frozen symbol table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    symbols: &'a SymbolTable,
    mode: ResolutionMode,
    duplicates: DuplicateNamePolicy,
}

impl<'a> Resolver<'a> {
    pub fn new(symbols: &'a SymbolTable, mode: ResolutionMode, duplicates: DuplicateNamePolicy) -> Self {
        Self { symbols, mode, duplicates }
    }

    /// Fully-qualified name for `candidate`, or `None` when it is a built-in
    /// or does not look like a type.
    pub fn resolve(&self, candidate: &str, imports: &ImportMap) -> Option<String> {
        let name = strip_type_arguments(candidate);
        if name.is_empty() || is_builtin_type(name) {
            return None;
        }
        if let Some(full) = imports.get(name) {
            return Some(full.to_string());
        }
        if let Some(package) = self.symbols.lookup(name, self.duplicates) {
            return Some(qualify(package, name));
        }
        match self.mode {
            ResolutionMode::Lenient if name.starts_with(char::is_uppercase) => Some(name.to_string()),
            _ => None,
        }
    }
}

/// `Map<K, V>` becomes `Map`.
pub fn strip_type_arguments(name: &str) -> &str {
    name.split('<').next().unwrap_or(name).trim()
}
