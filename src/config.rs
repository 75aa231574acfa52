// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for cm-forms
//!
//! Configuration is optional. Without a file every field takes its default,
//! and command-line flags override whatever the file says.

use crate::error::{CmFormsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config files looked for in the working directory, in order
pub const CONFIG_CANDIDATES: &[&str] = &["cm-forms.toml", ".cm-forms.yml", ".cm-forms.yaml"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Report only, never write fixed files
    #[serde(default)]
    pub dry_run: bool,

    /// Report format (text, json, sarif)
    #[serde(default = "default_format")]
    pub format: String,

    /// File extensions picked up when scanning directories
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names skipped when scanning
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dry_run: false,
            format: default_format(),
            extensions: default_extensions(),
            exclude: default_exclude(),
            log: LogConfig::default(),
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        "target".to_string(),
        "dist".to_string(),
        "build".to_string(),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Load configuration from a path; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if path.extension().map(|e| e == "toml").unwrap_or(false) {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    validate(&config)?;
    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// First existing candidate in `dir`, if any
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.exists())
}

fn validate(config: &Config) -> Result<()> {
    if config.extensions.is_empty() {
        return Err(CmFormsError::Config(
            "extensions must list at least one file extension".to_string(),
        ));
    }
    if config.format.parse::<crate::report::OutputFormat>().is_err() {
        return Err(CmFormsError::Config(format!(
            "unknown report format: {}",
            config.format
        )));
    }
    Ok(())
}
