//! Configuration for a transformation run.
//!
//! Values are layered, highest priority first:
//! 1. Environment variables prefixed with `SCOREPREP_` (nested keys use `__`,
//!    e.g. `SCOREPREP_LOGGING__LEVEL=debug`)
//! 2. An optional TOML file
//! 3. Built-in defaults
//!
//! Only the binary calls [`TransformationConfig::load`]; library code takes a
//! config value and never reads the environment itself.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the persisted preprocessor.
pub const DEFAULT_PREPROCESSOR_PATH: &str = "artifacts/preprocessor.pkl";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationConfig {
    /// Where the fitted preprocessor is written.
    pub preprocessor_path: PathBuf,
    pub logging: LoggingConfig,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            preprocessor_path: PathBuf::from(DEFAULT_PREPROCESSOR_PATH),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging sink settings used by [`init_logging`](crate::logging::init_logging).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive for the console, e.g. `info` or `scoreprep=debug`.
    pub level: String,
    /// Emit JSON lines on the console instead of human-readable text.
    pub json: bool,
    /// Directory for a timestamped log file. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_dir: Some(PathBuf::from("logs")),
        }
    }
}

impl TransformationConfig {
    /// Load configuration from defaults, an optional TOML file and the environment.
    ///
    /// An explicitly named file that does not exist is an error.
    pub fn load(config_file: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file {} does not exist",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("SCOREPREP_").split("__"));

        figment.extract().map_err(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransformationConfig::default();
        assert_eq!(
            config.preprocessor_path,
            PathBuf::from("artifacts/preprocessor.pkl")
        );
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.logging.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoreprep.toml");
        std::fs::write(
            &path,
            r#"
preprocessor_path = "out/model/preprocessor.bin"

[logging]
json = true
"#,
        )
        .unwrap();

        let config = TransformationConfig::load(Some(&path)).unwrap();
        assert_eq!(
            config.preprocessor_path,
            PathBuf::from("out/model/preprocessor.bin")
        );
        assert!(config.logging.json);
        // Unset keys keep their defaults.
        assert_eq!(config.logging.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TransformationConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_rejects_bad_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[logging]\njson = \"sometimes\"\n").unwrap();

        assert!(TransformationConfig::load(Some(&path)).is_err());
    }
}
