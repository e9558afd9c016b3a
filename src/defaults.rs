pub mod resolution {
    pub const MODE: &str = "lenient";
    pub const DUPLICATE_NAMES: &str = "last-wins";
}

pub mod discovery {
    pub const RESPECT_GITIGNORE: bool = false;
}

pub mod report {
    pub const FORMAT: &str = "text";
    pub const COUPLING: bool = false;
}

/// File name looked up in the home directory and the working directory.
pub const CONFIG_FILE_NAME: &str = ".classmeterconfig";

pub fn default_config_toml() -> String {
    format!(
        r#"[resolution]
# "lenient" reports unknown capitalized names as-is, "strict" drops them
mode = "{mode}"
# "last-wins" or "ambiguous" for a short name declared in several packages
duplicate_names = "{dups}"

[discovery]
# true skips files excluded by .gitignore and .ignore
respect_gitignore = {gitignore}

[report]
# "text" or "json"
format = "{format}"
coupling = {coupling}
"#,
        mode = resolution::MODE,
        dups = resolution::DUPLICATE_NAMES,
        gitignore = discovery::RESPECT_GITIGNORE,
        format = report::FORMAT,
        coupling = report::COUPLING,
    )
}
