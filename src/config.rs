use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::changelog::DEFAULT_OTHER_TYPES;
use crate::domain::Version;
use crate::error::{AutoversionError, Result};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "autoversion.toml";

/// Represents the complete configuration for autoversion.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub version: VersionConfig,
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

/// Returns the commit types listed under the "Other" changelog category.
fn default_other_types() -> Vec<String> {
    DEFAULT_OTHER_TYPES.iter().map(|t| t.to_string()).collect()
}

fn default_initial_version() -> String {
    "0.0.0".to_string()
}

/// Changelog file and rendering settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_changelog_file")]
    pub file: String,

    #[serde(default = "default_other_types")]
    pub other_types: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            file: default_changelog_file(),
            other_types: default_other_types(),
        }
    }
}

/// Version settings used when no `--last` version is given.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    #[serde(default = "default_initial_version")]
    pub initial: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            initial: default_initial_version(),
        }
    }
}

impl Config {
    /// Parse `[version] initial`
    pub fn initial_version(&self) -> Result<Version> {
        Version::parse(&self.version.initial)
            .map_err(|e| AutoversionError::config(format!("[version] initial: {}", e)))
    }

    /// Changelog path from `[changelog] file`
    pub fn changelog_path(&self) -> PathBuf {
        PathBuf::from(&self.changelog.file)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autoversion.toml` in current directory
/// 3. `autoversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Errors
/// A file that exists but cannot be read or parsed is a `Config` error.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => match find_config_file() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let config_str = fs::read_to_string(&path)
        .map_err(|e| AutoversionError::config(format!("{}: {}", path.display(), e)))?;
    let config: Config = toml::from_str(&config_str)
        .map_err(|e| AutoversionError::config(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
