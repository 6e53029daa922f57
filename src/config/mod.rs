//! Browser configuration.
//!
//! Read from YAML; every field is optional:
//!
//! ```yaml
//! quick_max_minutes: 30
//! debounce_ms: 300
//! favorites_path: /var/lib/recipes/favorites.json
//! ```

use crate::debounce::DEFAULT_QUIET_PERIOD;
use crate::pipeline::{PipelineOptions, DEFAULT_QUICK_MAX_MINUTES};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::io;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserConfig {
    /// Upper bound, inclusive, for the quick filter
    pub quick_max_minutes: u32,
    /// Search input quiet period in milliseconds
    pub debounce_ms: u64,
    /// Where favorites are persisted; kept in memory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_path: Option<Utf8PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        BrowserConfig {
            quick_max_minutes: DEFAULT_QUICK_MAX_MINUTES,
            debounce_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
            favorites_path: None,
        }
    }
}

impl BrowserConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads configuration from `path`. A missing file yields defaults.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_yaml_str(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path, "No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            quick_max_minutes: self.quick_max_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BrowserConfig::default();
        assert_eq!(config.quick_max_minutes, 30);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert!(config.favorites_path.is_none());
        assert_eq!(config.pipeline_options(), PipelineOptions::default());
    }

    #[test]
    fn test_partial_yaml() {
        let config = BrowserConfig::from_yaml_str(indoc! {r#"
            quick_max_minutes: 15
            favorites_path: /var/lib/recipes/favorites.json
        "#})
        .unwrap();

        assert_eq!(config.quick_max_minutes, 15);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(
            config.favorites_path.as_deref(),
            Some(Utf8Path::new("/var/lib/recipes/favorites.json"))
        );
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(BrowserConfig::from_yaml_str("").unwrap(), BrowserConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            BrowserConfig::from_yaml_str("debounce_ms: soon"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            BrowserConfig::from_yaml_str("debounce: 10"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("browser.yaml")).unwrap();

        assert_eq!(BrowserConfig::load(&path).unwrap(), BrowserConfig::default());

        std::fs::write(&path, "debounce_ms: 150\n").unwrap();
        assert_eq!(
            BrowserConfig::load(&path).unwrap().debounce(),
            Duration::from_millis(150)
        );
    }
}
