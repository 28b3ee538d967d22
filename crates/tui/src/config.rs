use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "adboard";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdboardConfig {
    /// How long the "copied" indicator stays on a field.
    pub copy_feedback_ms: u64,
    /// Length of the simulated enhancement.
    pub enhance_ms: u64,
    pub toast_ms: u64,
    /// Event poll interval of the terminal loop.
    pub tick_ms: u64,
    pub logging_enabled: bool,
    pub log_filter: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for AdboardConfig {
    fn default() -> Self {
        Self {
            copy_feedback_ms: 2000,
            enhance_ms: 1500,
            toast_ms: 3000,
            tick_ms: 50,
            logging_enabled: true,
            log_filter: "info".to_string(),
            log_dir: None,
        }
    }
}

pub(crate) fn parse_bool_like(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AdboardConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Defaults, then the config file, then environment overrides.
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(filter) = lookup("ADBOARD_LOG").filter(|value| !value.trim().is_empty()) {
            self.log_filter = filter;
        }
        if let Some(dir) = lookup("ADBOARD_LOG_DIR").filter(|value| !value.trim().is_empty()) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(disabled) = lookup("ADBOARD_NO_LOG").as_deref().and_then(parse_bool_like) {
            self.logging_enabled = !disabled;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("copy_feedback_ms", self.copy_feedback_ms),
            ("enhance_ms", self.enhance_ms),
            ("toast_ms", self.toast_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be greater than 0")));
            }
        }
        if !(10..=1000).contains(&self.tick_ms) {
            return Err(ConfigError::Invalid(format!(
                "tick_ms must be between 10 and 1000, got {}",
                self.tick_ms
            )));
        }
        Ok(())
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    pub fn enhance_duration(&self) -> Duration {
        Duration::from_millis(self.enhance_ms)
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn resolved_log_dir(&self) -> PathBuf {
        if let Some(dir) = self.log_dir.as_ref() {
            return dir.clone();
        }
        dirs::data_local_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::{AdboardConfig, ConfigError};
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn defaults_match_fixed_delays() {
        let config = AdboardConfig::default();
        assert_eq!(config.copy_feedback().as_millis(), 2000);
        assert_eq!(config.enhance_duration().as_millis(), 1500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "enhance_ms = 900\nlog_filter = \"debug\"").expect("write");
        let config = AdboardConfig::from_file(file.path()).expect("parse");
        assert_eq!(config.enhance_ms, 900);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.copy_feedback_ms, 2000);
        assert!(config.logging_enabled);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        let error = AdboardConfig::load(Some(&missing)).expect_err("missing file");
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "enhance_ms = \"soon\"").expect("write");
        let error = AdboardConfig::from_file(file.path()).expect_err("bad type");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_apply_on_top_of_file_values() {
        let env: HashMap<&str, &str> = [
            ("ADBOARD_LOG", "adboard_tui=trace"),
            ("ADBOARD_LOG_DIR", "/var/tmp/adboard"),
            ("ADBOARD_NO_LOG", "yes"),
        ]
        .into_iter()
        .collect();
        let mut config = AdboardConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|value| value.to_string()));
        assert_eq!(config.log_filter, "adboard_tui=trace");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/tmp/adboard")));
        assert!(!config.logging_enabled);
        assert_eq!(config.resolved_log_dir(), PathBuf::from("/var/tmp/adboard"));
    }

    #[test]
    fn unparseable_bool_env_is_ignored() {
        let mut config = AdboardConfig::default();
        config.apply_env_overrides(|key| (key == "ADBOARD_NO_LOG").then(|| "maybe".to_string()));
        assert!(config.logging_enabled);
    }

    #[test]
    fn zero_durations_and_bad_tick_are_rejected() {
        let config = AdboardConfig {
            enhance_ms: 0,
            ..AdboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = AdboardConfig {
            tick_ms: 5,
            ..AdboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
