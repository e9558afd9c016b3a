//! Per-declaration metric records

use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodRecord {
    pub name: String,
    pub parameter_count: usize,
    /// Inclusive line span of the body; 0 for abstract and interface methods.
    pub line_count: usize,
    pub cyclomatic_complexity: usize,
}

/// Metrics for one top-level type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    pub package_name: String,
    pub class_name: String,
    pub is_interface: bool,
    pub fields: Vec<String>,
    pub methods: Vec<MethodRecord>,
    /// Percentage of the declaration's lines covered by comments, 0..=100.
    pub comment_ratio: usize,
    pub dependencies: BTreeSet<String>,
    /// Serialized lossily so a non-UTF-8 path cannot fail the JSON report.
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    /// 1-based line of the declaration start.
    pub line: usize,
}

impl ClassRecord {
    pub fn new(package_name: &str, class_name: &str, path: PathBuf, line: usize) -> Self {
        Self {
            package_name: package_name.to_string(),
            class_name: class_name.to_string(),
            is_interface: false,
            fields: Vec::new(),
            methods: Vec::new(),
            comment_ratio: 0,
            dependencies: BTreeSet::new(),
            path,
            line,
        }
    }

    /// `package.Class`, or just `Class` in the default package.
    pub fn qualified_name(&self) -> String {
        qualify(&self.package_name, &self.class_name)
    }

    pub fn kind_label(&self) -> &'static str {
        if self.is_interface { "interface" } else { "class" }
    }

    /// Sum of the cyclomatic complexity of every method.
    pub fn total_complexity(&self) -> usize {
        self.methods.iter().map(|m| m.cyclomatic_complexity).sum()
    }

    pub fn add_dependency(&mut self, dependency: Option<String>) {
        if let Some(dep) = dependency {
            self.dependencies.insert(dep);
        }
    }
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}
