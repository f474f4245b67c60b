//! Configuration file support for rpsl-resolve
//!
//! Loads and validates resolver configuration from TOML files. Values given
//! on the command line are applied on top with [`ResolveConfig::apply_overrides`].

use crate::emitter::EmitterKind;
use crate::error::{ResolveError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emitter name
    #[serde(default = "default_emitter")]
    pub emitter: String,

    /// Emitter parameters
    #[serde(default)]
    pub arguments: BTreeMap<String, String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `rpsl_policy=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Complete rpsl-resolve configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_emitter() -> String {
    EmitterKind::Text.name().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            emitter: default_emitter(),
            arguments: BTreeMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ResolveConfig {
    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| {
                ResolveError::Configuration(format!(
                    "Failed to parse config file {}: {}",
                    path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Runs before logging is initialised.
                eprintln!(
                    "rpsl-resolve: Config file {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(ResolveError::file(path, e)),
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies command line values on top of the file configuration.
    ///
    /// Arguments are merged key by key; a repeated key takes the command line value.
    pub fn apply_overrides(
        &mut self,
        emitter: Option<String>,
        arguments: impl IntoIterator<Item = (String, String)>,
        log_level: Option<String>,
    ) {
        if let Some(emitter) = emitter {
            if !emitter.eq_ignore_ascii_case(&self.output.emitter) {
                // Arguments from the file belong to the emitter it names.
                self.output.arguments.clear();
            }
            self.output.emitter = emitter;
        }
        self.output.arguments.extend(arguments);
        if let Some(level) = log_level {
            self.logging.level = level;
        }
    }

    /// The configured emitter kind.
    pub fn emitter_kind(&self) -> Result<EmitterKind> {
        EmitterKind::from_name(&self.output.emitter)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.emitter_kind()?;

        if self.logging.level.trim().is_empty() {
            return Err(ResolveError::Configuration(
                "logging level must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Parses one `key=value` emitter parameter.
pub fn parse_key_value(text: &str) -> std::result::Result<(String, String), String> {
    match text.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = ResolveConfig::default();
        assert_eq!(config.output.emitter, "text");
        assert!(config.output.arguments.is_empty());
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
[output]
emitter = "json"

[output.arguments]
pretty = "true"
"#;
        let config = ResolveConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.output.emitter, "json");
        assert_eq!(config.output.arguments.get("pretty").map(String::as_str), Some("true"));
        // Unspecified values should use defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ResolveConfig::default();
        config.output.arguments.insert("aut-num".to_string(), "AS1".to_string());
        let toml_str = toml::to_string(&config).unwrap();
        assert_eq!(ResolveConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_validate_unknown_emitter() {
        let mut config = ResolveConfig::default();
        config.output.emitter = "bird".to_string();
        assert!(matches!(
            config.validate(),
            Err(ResolveError::UnknownEmitter(name)) if name == "bird"
        ));
    }

    #[test]
    fn test_validate_empty_level() {
        let mut config = ResolveConfig::default();
        config.logging.level = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ResolveError::Configuration(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = ResolveConfig::default();
        config.output.arguments.insert("aut-num".to_string(), "AS1".to_string());

        config.apply_overrides(None, [("aut-num".to_string(), "AS2".to_string())], None);
        assert_eq!(config.output.arguments["aut-num"], "AS2");

        config.apply_overrides(
            Some("json".to_string()),
            [("pretty".to_string(), "false".to_string())],
            Some("debug".to_string()),
        );
        assert_eq!(config.output.emitter, "json");
        assert_eq!(
            config.output.arguments,
            BTreeMap::from([("pretty".to_string(), "false".to_string())])
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("aut-num=AS1"),
            Ok(("aut-num".to_string(), "AS1".to_string()))
        );
        assert_eq!(
            parse_key_value("pretty = true"),
            Ok(("pretty".to_string(), "true".to_string()))
        );
        assert!(parse_key_value("pretty").is_err());
        assert!(parse_key_value("=true").is_err());
    }

    #[test]
    fn test_load_nonexistent_file_defaults() {
        let config = ResolveConfig::load_or_default("/nonexistent/rpsl-resolve.toml").unwrap();
        assert_eq!(config, ResolveConfig::default());
    }
}
