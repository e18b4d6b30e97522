//! Configuration loading
//!
//! `defaults/tmdl.default.toml` is embedded into the binary so that documented defaults
//! and runtime behavior stay in sync. Callers layer user files and single-key overrides on
//! top of it with [`Loader`] before deserializing into [`TmdlConfig`].

use crate::tmdl::formats::SerializeOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/tmdl.default.toml");

/// Top-level configuration of the tmdl toolchain.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdlConfig {
    pub formatting: FormattingConfig,
    pub inspect: InspectConfig,
    pub check: CheckConfig,
    pub logging: LoggingConfig,
}

/// Mirrors the knobs exposed by the serializer.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    pub blank_line_between_children: bool,
}

impl FormattingConfig {
    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            blank_line_between_children: self.blank_line_between_children,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub default_format: String,
    pub show_warnings: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    pub fail_on_warnings: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. A missing file is an error at build time.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may be absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<TmdlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TmdlConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.formatting.blank_line_between_children);
        assert_eq!(config.inspect.default_format, "treeviz");
        assert!(!config.check.fail_on_warnings);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("check.fail_on_warnings", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.check.fail_on_warnings);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[formatting]\nblank_line_between_children = false").expect("write");
        let config = Loader::new().with_file(file.path()).build().expect("config");
        assert!(!config.formatting.serialize_options().blank_line_between_children);
        // untouched sections keep their defaults
        assert_eq!(config.inspect.default_format, "treeviz");
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/definitely/not/here.toml").build();
        assert!(result.is_err());
        let optional = Loader::new()
            .with_optional_file("/definitely/not/here.toml")
            .build();
        assert!(optional.is_ok());
    }
}
