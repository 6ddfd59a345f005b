//! # Configuration loader
//!
//! Reads the optional TOML file into plain data. Bounds checking happens
//! later, when the settings go through `MonitorConfigBuilder::build`.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use cw_core::MonitorSettings;

/// Top-level shape of the config file.
///
/// ```toml
/// [monitor]
/// debounce_ms = 100
/// poll_interval_ms = 500
/// duplicate_filtering = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub monitor: MonitorSettings,
}

/// Load configuration from a TOML file.
///
/// Missing tables and keys fall back to defaults; values are not validated.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML of the
/// expected shape.
pub fn load_config(config_path: &Path) -> anyhow::Result<FileConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content).context("Failed to parse config as TOML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_monitor_table() {
        let temp_file = write_config(
            r#"
            [monitor]
            debounce_ms = 250
            poll_interval_ms = 1000
            duplicate_filtering = false
        "#,
        );

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.monitor.debounce_ms, 250);
        assert_eq!(config.monitor.poll_interval_ms, 1000);
        assert!(!config.monitor.duplicate_filtering);
    }

    #[test]
    fn test_load_config_defaults_missing_values() {
        let temp_file = write_config("# nothing configured\n");

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config, FileConfig::default());
        assert_eq!(config.monitor.debounce_ms, 100);
        assert_eq!(config.monitor.poll_interval_ms, 500);
    }

    #[test]
    fn test_load_config_does_not_validate_bounds() {
        let temp_file = write_config(
            r#"
            [monitor]
            poll_interval_ms = 10
        "#,
        );

        let config = load_config(temp_file.path()).unwrap();

        // rejected later by the builder, not here
        assert_eq!(config.monitor.poll_interval_ms, 10);
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let missing = PathBuf::from("/this/path/does/not/exist/clipwatch.toml");

        let err = load_config(&missing).unwrap_err();

        assert!(
            err.to_string().contains("Failed to read config file"),
            "Expected IO error message, got: {err}"
        );
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let temp_file = write_config("[monitor\ndebounce_ms = ");

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }
}
