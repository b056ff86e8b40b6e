//! Configuration file handling for mwbkit.
//!
//! Looks for `.config/mwbkit.toml` in the current directory or any parent
//! directory.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// Location of the config file, relative to a project directory.
pub const CONFIG_PATH: &str = ".config/mwbkit.toml";

/// Generation settings.
///
/// ```toml
/// indent_width = 4
/// include_tables = ["users", "posts"]
/// exclude_tables = ["migrations"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spaces per indentation level in generated code.
    pub indent_width: usize,
    /// When non-empty, only these tables are generated.
    pub include_tables: Vec<String>,
    /// Tables that are never generated.
    pub exclude_tables: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: 4,
            include_tables: Vec::new(),
            exclude_tables: Vec::new(),
        }
    }
}

impl Config {
    /// Whether `table` passes the include and exclude lists.
    pub fn selects(&self, table: &str) -> bool {
        let included =
            self.include_tables.is_empty() || self.include_tables.iter().any(|t| t == table);
        included && !self.exclude_tables.iter().any(|t| t == table)
    }
}

/// Load configuration from `.config/mwbkit.toml`, searching up the directory
/// tree from the current directory.
pub fn load() -> Result<(Config, Utf8PathBuf), ConfigError> {
    let cwd = std::env::current_dir().map_err(ConfigError::Io)?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| ConfigError::NonUtf8Path(path.display().to_string()))?;
    load_from(&cwd)
}

/// Load configuration starting from a specific directory.
pub fn load_from(start: &Utf8Path) -> Result<(Config, Utf8PathBuf), ConfigError> {
    let config_path = find_config_file(start)?;
    let content = std::fs::read_to_string(&config_path).map_err(ConfigError::Io)?;
    let config = from_str(&content)?;
    Ok((config, config_path))
}

/// Parse configuration text.
pub fn from_str(content: &str) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Find `.config/mwbkit.toml` by searching up the directory tree.
fn find_config_file(start: &Utf8Path) -> Result<Utf8PathBuf, ConfigError> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_PATH);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(ConfigError::NotFound);
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no .config/mwbkit.toml found in the start directory or any parent")]
    NotFound,

    #[error("failed to read .config/mwbkit.toml: {0}")]
    Io(#[source] std::io::Error),

    #[error("failed to parse .config/mwbkit.toml: {0}")]
    Parse(String),

    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),
}
