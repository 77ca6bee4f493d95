//! Configuration loader
//!
//! `defaults/pysubset.default.toml` is embedded into the binary so the documented defaults and
//! the runtime behavior cannot drift apart. User files and command line settings are layered on
//! top with [Loader] before deserializing into [PysubsetConfig].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::pysubset::level::Level;

const DEFAULT_TOML: &str = include_str!("../../defaults/pysubset.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct PysubsetConfig {
    pub validation: ValidationConfig,
    pub execution: ExecutionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    pub subset: Level,
}

/// How programs are cross-checked against the reference interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecutionConfig {
    pub enabled: bool,
    pub interpreter: String,
    pub input_extension: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interpreter: "python3".to_string(),
            input_extension: "in".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

/// Looked up in the working directory when no configuration file is named explicitly.
pub const LOCAL_CONFIG_FILE: &str = "pysubset.toml";

/// Layers, lowest priority first: embedded defaults, TOML files in the order added, overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Layer a configuration file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a configuration file if it exists.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Check against `level` whatever the files say.
    pub fn with_subset(self, level: Level) -> Result<Self, ConfigError> {
        self.set_override("validation.subset", level.to_string())
    }

    /// Skip the interpreter run whatever the files say.
    pub fn without_execution(self) -> Result<Self, ConfigError> {
        self.set_override("execution.enabled", false)
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<PysubsetConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<PysubsetConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.validation.subset, Level::L3);
        assert_eq!(config.execution, ExecutionConfig::default());
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("validation.subset", "P1")
            .expect("override to apply")
            .set_override("execution.enabled", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.validation.subset, Level::L1);
        assert!(!config.execution.enabled);
    }

    #[test]
    fn typed_overrides_beat_files() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[validation]\nsubset = \"L3\"\n[execution]\nenabled = true").unwrap();

        let config = Loader::new()
            .with_file(file.path())
            .with_subset(Level::L0)
            .and_then(Loader::without_execution)
            .and_then(Loader::build)
            .expect("config to build");
        assert_eq!(config.validation.subset, Level::L0);
        assert!(!config.execution.enabled);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        assert!(Loader::new()
            .with_file("/nonexistent/pysubset.toml")
            .build()
            .is_err());
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[execution]\ninterpreter = \"pypy3\"").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.execution.interpreter, "pypy3");
        assert_eq!(config.execution.input_extension, "in");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/pysubset.toml")
            .build()
            .unwrap();
        assert_eq!(config.validation.subset, Level::L3);
    }
}
