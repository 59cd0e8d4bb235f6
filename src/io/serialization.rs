// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preferences serialization and deserialization.
//!
//! This module reads and writes the application configuration in YAML
//! and JSON formats, picking the format from the file extension.

use crate::config::AppConfig;
use crate::error::{LabelError, Result};
use std::path::Path;

/// Serialization format of a preferences file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(LabelError::config(format!(
                "Unsupported file extension: {:?}",
                extension
            ))),
        }
    }
}

/// Export preferences, YAML or JSON by extension.
pub fn export_config(data: &AppConfig, path: &Path) -> Result<()> {
    let text = match ConfigFormat::from_path(path)? {
        ConfigFormat::Yaml => {
            serde_yaml::to_string(data).map_err(|e| LabelError::config(e.to_string()))?
        }
        ConfigFormat::Json => {
            serde_json::to_string_pretty(data).map_err(|e| LabelError::config(e.to_string()))?
        }
    };
    std::fs::write(path, text)?;
    Ok(())
}

/// Import preferences, YAML or JSON by extension.
pub fn import_config(path: &Path) -> Result<AppConfig> {
    let format = ConfigFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    parse_config(&text, format)
}

/// Parse preferences text in the given format.
pub fn parse_config(text: &str, format: ConfigFormat) -> Result<AppConfig> {
    match format {
        ConfigFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| LabelError::config(e.to_string()))
        }
        ConfigFormat::Json => {
            serde_json::from_str(text).map_err(|e| LabelError::config(e.to_string()))
        }
    }
}
