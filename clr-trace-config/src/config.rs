//! `TraceConfig`: rendering options loaded from `config.yaml`.
//!
//! Covers:
//! - field defaults (serde `default = "..."` functions)
//! - `load` / `load_from` / `save_to` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_dir`, `config_path`)
//! - semantic validation

use crate::error::ConfigError;
use crate::types::LogLevel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_frame_prefix() -> String {
    "   at ".to_string()
}

fn default_line_separator() -> String {
    "\n".to_string()
}

fn default_true() -> bool {
    true
}

fn default_system_namespace_prefix() -> String {
    "System.".to_string()
}

// ---------------------------------------------------------------------------
// TraceConfig
// ---------------------------------------------------------------------------

/// Rendering options for enhanced stack traces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Prefix written in front of every rendered frame.
    #[serde(default = "default_frame_prefix")]
    pub frame_prefix: String,

    /// Separator placed between rendered frames (never after the last one).
    #[serde(default = "default_line_separator")]
    pub line_separator: String,

    /// Append ` in {file}:line {n}` to each frame.
    #[serde(default = "default_true")]
    pub include_line_info: bool,

    /// Keep frames whose routine is marked hidden-in-trace.
    #[serde(default)]
    pub show_hidden_frames: bool,

    /// Full-name prefix of framework types rendered by their simple name.
    #[serde(default = "default_system_namespace_prefix")]
    pub system_namespace_prefix: String,

    /// Verbosity of the debug sink.
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            frame_prefix: default_frame_prefix(),
            line_separator: default_line_separator(),
            include_line_info: true,
            show_hidden_frames: false,
            system_namespace_prefix: default_system_namespace_prefix(),
            log_level: LogLevel::default(),
        }
    }
}

impl TraceConfig {
    /// Load configuration from the default path, or defaults if no file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if !config_path.exists() {
            log::info!("No config file found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load and validate configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        Ok(Self::from_yaml_str(&contents)?)
    }

    /// Parse and validate configuration from a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: TraceConfig = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check field values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_separator.is_empty() {
            return Err(ConfigError::Validation(
                "line_separator must not be empty".to_string(),
            ));
        }
        if self.system_namespace_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "system_namespace_prefix must not be blank".to_string(),
            ));
        }
        if !self.system_namespace_prefix.ends_with('.') {
            return Err(ConfigError::Validation(format!(
                "system_namespace_prefix '{}' must end with '.'",
                self.system_namespace_prefix
            )));
        }
        Ok(())
    }

    /// Get the configuration file path (`~/.config/clr-trace/config.yaml`).
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory.
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("clr-trace")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("clr-trace")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = TraceConfig::default();
        assert_eq!(config.frame_prefix, "   at ");
        assert_eq!(config.line_separator, "\n");
        assert!(config.include_line_info);
        assert!(!config.show_hidden_frames);
        assert_eq!(config.system_namespace_prefix, "System.");
        assert_eq!(config.log_level, LogLevel::Off);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TraceConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, TraceConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let yaml = "show_hidden_frames: true\nlog_level: debug\nline_separator: \"\\r\\n\"\n";
        let config = TraceConfig::from_yaml_str(yaml).unwrap();
        assert!(config.show_hidden_frames);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.line_separator, "\r\n");
        assert_eq!(config.frame_prefix, "   at ");
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = TraceConfig::from_yaml_str("include_line_info: [not, a, bool]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_rejects_empty_separator() {
        let err = TraceConfig::from_yaml_str("line_separator: \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validation_rejects_prefix_without_dot() {
        let config = TraceConfig {
            system_namespace_prefix: "System".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must end with '.'"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.yaml");

        let config = TraceConfig {
            include_line_info: false,
            log_level: LogLevel::Trace,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = TraceConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("yaml.tmp").exists());
    }

    #[test]
    fn test_load_missing_file_reports_io_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = TraceConfig::load_from(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_config_path_ends_with_file_name() {
        let path = TraceConfig::config_path();
        assert!(path.ends_with("clr-trace/config.yaml"));
    }
}
