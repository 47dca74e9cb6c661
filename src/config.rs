use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Returns the default set of branches that carry no branch suffix.
fn default_primary_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

/// Returns the default for the trailing counter in date-based names.
fn default_always_include_number() -> bool {
    true
}

/// Optional settings loaded from a `release.toml` file.
///
/// Every key is optional; command-line flags override file values, and the
/// file overrides built-in defaults.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FileConfig {
    #[serde(default)]
    pub remote: Option<String>,

    #[serde(default)]
    pub ssh_key: Option<PathBuf>,

    #[serde(default = "default_primary_branches")]
    pub primary_branches: Vec<String>,

    #[serde(default = "default_always_include_number")]
    pub always_include_number: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            remote: None,
            ssh_key: None,
            primary_branches: default_primary_branches(),
            always_include_number: default_always_include_number(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in current directory
/// 3. `release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(FileConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_file_config(config_path: Option<&Path>) -> Result<FileConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| ReleaseError::config(format!("cannot read {}: {}", path.display(), e)))?
    } else if Path::new("./release.toml").exists() {
        fs::read_to_string("./release.toml")
            .map_err(|e| ReleaseError::config(format!("cannot read ./release.toml: {}", e)))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("release.toml");
        if config_path.exists() {
            fs::read_to_string(&config_path).map_err(|e| {
                ReleaseError::config(format!("cannot read {}: {}", config_path.display(), e))
            })?
        } else {
            return Ok(FileConfig::default());
        }
    } else {
        return Ok(FileConfig::default());
    };

    toml::from_str(&config_str).map_err(|e| ReleaseError::config(e.to_string()))
}

/// Tagger identity for annotated tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Both name and email are present
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }

    /// Neither name nor email is present
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }
}

/// Resolves the tagger identity from flags, falling back to git config.
///
/// A non-empty flag wins for its field; otherwise `user.name` / `user.email`
/// from the default git configuration are used when available. Missing
/// values stay empty, which downstream code treats as "no identity given".
pub fn resolve_identity(user_flag: &str, email_flag: &str) -> Identity {
    let global = git2::Config::open_default().ok();

    let lookup = |key: &str| -> String {
        global
            .as_ref()
            .and_then(|cfg| cfg.get_string(key).ok())
            .unwrap_or_default()
    };

    let name = if user_flag.is_empty() {
        lookup("user.name")
    } else {
        user_flag.to_string()
    };
    let email = if email_flag.is_empty() {
        lookup("user.email")
    } else {
        email_flag.to_string()
    };

    Identity { name, email }
}
