// crates/huddle-cli/src/config.rs
//
// Runtime configuration for the Huddle CLI.
// Loaded from a TOML file or populated with sensible defaults.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use huddle_consensus::EngineConfig;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct HuddleConfig {
    /// Path to the JSON preference snapshot. A leading `~` is expanded.
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Largest group the engine will process.
    #[serde(default = "default_max_group_size")]
    pub max_group_size: usize,

    /// Wall-clock bound on reading a group's preferences, in milliseconds.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_path() -> String {
    "~/.huddle/preferences.json".to_string()
}

fn default_max_group_size() -> usize {
    64
}

fn default_fetch_timeout_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HuddleConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            max_group_size: default_max_group_size(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            log_level: default_log_level(),
        }
    }
}

impl HuddleConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: HuddleConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Snapshot path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        expand_tilde(&self.data_path)
    }

    /// Engine limits derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_group_size: self.max_group_size,
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
        }
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = HuddleConfig::from_toml("").unwrap();
        assert_eq!(config.max_group_size, 64);
        assert_eq!(config.fetch_timeout_ms, 5000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn fields_override_defaults() {
        let config = HuddleConfig::from_toml(
            r#"
            data_path = "/srv/huddle/prefs.json"
            max_group_size = 12
            fetch_timeout_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/srv/huddle/prefs.json"));
        let engine = config.engine_config();
        assert_eq!(engine.max_group_size, 12);
        assert_eq!(engine.fetch_timeout, Duration::from_millis(250));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(HuddleConfig::from_toml("max_group_size = \"lots\"").is_err());
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.json"), home.join("x.json"));
        }
        assert_eq!(expand_tilde("/abs/x.json"), PathBuf::from("/abs/x.json"));
    }
}
