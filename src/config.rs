//! Configuration management for classmeter

use crate::defaults::CONFIG_FILE_NAME;
use std::path::Path;
use tracing::warn;

/// How names that are neither imported nor declared in the scanned tree are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Capitalized unknown names are reported unqualified.
    #[default]
    Lenient,
    /// Unknown names are dropped.
    Strict,
}

impl ResolutionMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lenient" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

/// Tie-break for a short type name declared in more than one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateNamePolicy {
    /// The declaration discovered last wins.
    #[default]
    LastWins,
    /// The name is not resolved through the symbol table at all.
    Ambiguous,
}

impl DuplicateNamePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "last-wins" => Some(Self::LastWins),
            "ambiguous" => Some(Self::Ambiguous),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub resolution_mode: ResolutionMode,
    pub duplicate_names: DuplicateNamePolicy,
    pub respect_gitignore: bool,
    pub report_format: ReportFormat,
    pub coupling_section: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution_mode: ResolutionMode::default(),
            duplicate_names: DuplicateNamePolicy::default(),
            respect_gitignore: crate::defaults::discovery::RESPECT_GITIGNORE,
            report_format: ReportFormat::default(),
            coupling_section: crate::defaults::report::COUPLING,
        }
    }
}

impl Config {
    /// Load config from files, with later files overriding earlier ones.
    /// Loads from: ~/.classmeterconfig, ./.classmeterconfig
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(home) = std::env::var_os("HOME") {
            let home_config = Path::new(&home).join(CONFIG_FILE_NAME);
            if let Ok(content) = std::fs::read_to_string(&home_config) {
                config.merge_from_toml(&content);
            }
        }

        // Local config overrides home config
        if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_NAME) {
            config.merge_from_toml(&content);
        }

        config
    }

    /// Load config from a specific file path
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::default();

        if let Ok(content) = std::fs::read_to_string(path) {
            config.merge_from_toml(&content);
        } else {
            warn!("Could not read config file: {}", path.display());
        }

        config
    }

    /// Merge values from a TOML string into this config.
    /// Malformed documents, unknown values and wrong types leave fields untouched.
    pub fn merge_from_toml(&mut self, content: &str) {
        let table = match content.parse::<toml::Table>() {
            Ok(table) => table,
            Err(e) => {
                warn!("Ignoring malformed config: {e}");
                return;
            }
        };

        if let Some(resolution) = table.get("resolution").and_then(|v| v.as_table()) {
            self.apply_resolution(resolution);
        }
        if let Some(discovery) = table.get("discovery").and_then(|v| v.as_table())
            && let Some(v) = get_bool(discovery, "respect_gitignore")
        {
            self.respect_gitignore = v;
        }
        if let Some(report) = table.get("report").and_then(|v| v.as_table()) {
            self.apply_report(report);
        }
    }

    fn apply_resolution(&mut self, table: &toml::Table) {
        if let Some(v) = get_str(table, "mode").and_then(ResolutionMode::parse) {
            self.resolution_mode = v;
        }
        if let Some(v) = get_str(table, "duplicate_names").and_then(DuplicateNamePolicy::parse) {
            self.duplicate_names = v;
        }
    }

    fn apply_report(&mut self, table: &toml::Table) {
        if let Some(v) = get_str(table, "format").and_then(ReportFormat::parse) {
            self.report_format = v;
        }
        if let Some(v) = get_bool(table, "coupling") {
            self.coupling_section = v;
        }
    }
}

fn get_str<'a>(table: &'a toml::Table, key: &str) -> Option<&'a str> {
    table.get(key).and_then(|v| v.as_str())
}

fn get_bool(table: &toml::Table, key: &str) -> Option<bool> {
    table.get(key).and_then(toml::Value::as_bool)
}
