// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! User preferences.
//!
//! Preferences are read at startup from the file named by `KPLABEL_CONFIG`,
//! or from `kplabel.yaml` / `kplabel.json` in the working directory. Every
//! field is optional in the file.

use crate::error::Result;
use crate::io::serialization;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit preferences file.
pub const CONFIG_ENV_VAR: &str = "KPLABEL_CONFIG";

/// Files checked in the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["kplabel.yaml", "kplabel.json"];

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter string understood by env_logger.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where annotation files go. Defaults to the opened image directory.
    pub save_directory: Option<PathBuf>,

    /// Image directory opened at startup
    pub initial_directory: Option<PathBuf>,

    /// Longest side of gallery thumbnails, in pixels
    pub thumbnail_size: u32,

    /// Start with auto-box enabled
    pub auto_box: bool,

    /// Log verbosity when RUST_LOG is not set
    pub log_level: LogLevel,

    /// Initial window size
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_directory: None,
            initial_directory: None,
            thumbnail_size: 100,
            auto_box: false,
            log_level: LogLevel::default(),
            window_size: [1280.0, 720.0],
        }
    }
}

impl AppConfig {
    /// Load preferences from the environment-selected or default file.
    ///
    /// Returns defaults when no file exists.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_from(explicit.as_deref(), Path::new("."))
    }

    /// Load from `explicit` if given, else look in `dir` for a default file.
    pub fn load_from(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return serialization::import_config(path);
        }

        for name in DEFAULT_CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                return serialization::import_config(&path);
            }
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(None, dir.path()).unwrap();
        assert_eq!(config.thumbnail_size, 100);
        assert!(!config.auto_box);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_finds_default_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("kplabel.json"), r#"{"thumbnail_size": 48}"#).unwrap();

        let config = AppConfig::load_from(None, dir.path()).unwrap();
        assert_eq!(config.thumbnail_size, 48);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(AppConfig::load_from(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.as_filter(), "warn");
        assert_eq!(LogLevel::default().as_filter(), "info");
    }
}
