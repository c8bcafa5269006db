//! User configuration read from a TOML file.
//!
//! Every key is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! theme = "dark"
//! toast_duration_ms = 2800
//!
//! [window]
//! width = 960.0
//! height = 860.0
//!
//! [logging]
//! level = "info,contract_core=debug"
//! file = "contract-wizard.log"
//! stdout = true
//! ```

use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use contract_core::toast::DEFAULT_TOAST_DURATION;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 860.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Any `EnvFilter` directive; `RUST_LOG` wins when unset.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            file: None,
            stdout: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ThemeChoice,
    pub toast_duration_ms: u64,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::default(),
            toast_duration_ms: DEFAULT_TOAST_DURATION.as_millis() as u64,
            window: WindowConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl UiConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path`, or the defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

/// `<app name>.toml` in the working directory.
pub fn default_config_path(app_name: &str) -> PathBuf {
    PathBuf::from(format!("{app_name}.toml"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = UiConfig::from_toml_str("").unwrap();

        assert_eq!(config, UiConfig::default());
        assert_eq!(config.toast_duration(), Duration::from_millis(2800));
        assert!(config.logging.stdout);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = UiConfig::from_toml_str(
            r#"
            theme = "dark"

            [window]
            width = 1200.0

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.theme, ThemeChoice::Dark);
        assert_eq!(config.window.width, 1200.0);
        assert_eq!(config.window.height, 860.0);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.toast_duration_ms, 2800);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(UiConfig::from_toml_str(r#"theme = "sepia""#).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            UiConfig::load_or_default(Path::new("no/such/dir/ContractWizard.toml")).unwrap();

        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn load_reports_path_on_read_failure() {
        let error = UiConfig::load(Path::new("no/such/dir/ContractWizard.toml")).unwrap_err();

        assert!(error.to_string().contains("no/such/dir/ContractWizard.toml"));
    }

    #[test]
    fn default_path_uses_app_name() {
        assert_eq!(
            default_config_path("ContractWizard"),
            PathBuf::from("ContractWizard.toml")
        );
    }
}
