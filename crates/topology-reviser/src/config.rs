//! Runtime configuration, loaded from an optional TOML file and layered
//! over built-in defaults — the same `Default` + nested-struct shape the
//! workspace's storage subsystem uses for its own configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Complete reviser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviserConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Default for ReviserConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ReviserConfig {
    /// Loads a config from a TOML file, falling back to built-in
    /// defaults for any field the file omits.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: ReviserConfig = toml::from_str(&text)?;
        Ok(config)
    }
}

/// Where the per-subsystem JSON input files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// One JSON-encoded `SubsystemInput` per path, assembled by C1 in
    /// this order (§6.1).
    pub subsystem_files: Vec<String>,
    /// State/ISO/NG-region polygon catalog file, if attribution against
    /// real polygons is desired. `None` attributes everything `"UNKNOWN"`.
    pub catalog_file: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            subsystem_files: Vec::new(),
            catalog_file: None,
        }
    }
}

/// Where and how the revised graph is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "revised_graph.json".to_string(),
            pretty: true,
        }
    }
}

/// Logging verbosity, forwarded to `tracing_subscriber`'s `EnvFilter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_output_path() {
        let config = ReviserConfig::default();
        assert_eq!(config.output.path, "revised_graph.json");
        assert!(config.input.subsystem_files.is_empty());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let toml_text = r#"
            [output]
            path = "custom.json"
        "#;
        let config: ReviserConfig = toml::from_str(toml_text).unwrap();
        assert_eq!(config.output.path, "custom.json");
        assert!(config.output.pretty);
        assert_eq!(config.logging.level, "info");
    }
}
