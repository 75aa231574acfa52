// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for cm-forms

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CmFormsError>;

#[derive(Error, Debug)]
pub enum CmFormsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
