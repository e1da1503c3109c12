//! Configuration system

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Configuration file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Ron,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration trait
///
/// Any serde type with a sensible `Default` can be stored as TOML or RON.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Check values that the type system cannot express
    ///
    /// Called after every successful load.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
        };
        config.validate()?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    ///
    /// A file that exists but does not parse or validate is still an error.
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            log::warn!("No configuration at {}, using defaults", path.display());
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::from_path(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: String,
        rate: f32,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                name: "sample".to_string(),
                rate: 1.0,
            }
        }
    }

    impl Config for Sample {
        fn validate(&self) -> Result<(), ConfigError> {
            if self.rate < 0.0 {
                return Err(ConfigError::Invalid(format!("rate must be >= 0, got {}", self.rate)));
            }
            Ok(())
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("puddle_engine_config_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_toml_and_ron_round_trip() {
        let config = Sample {
            name: "custom".to_string(),
            rate: 2.5,
        };

        for name in ["sample.toml", "sample.ron"] {
            let path = temp_path(name);
            config.save_to_file(&path).unwrap();
            assert_eq!(Sample::load_from_file(&path).unwrap(), config);
            std::fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        assert!(matches!(
            Sample::default().save_to_file(temp_path("sample.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            Sample::load_from_file("sample.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(&path, "rate = 3.0\n").unwrap();

        let config = Sample::load_from_file(&path).unwrap();
        assert_eq!(config.name, "sample");
        assert!((config.rate - 3.0).abs() < f32::EPSILON);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_validation_runs_on_load() {
        let path = temp_path("invalid.toml");
        std::fs::write(&path, "rate = -1.0\n").unwrap();

        assert!(matches!(Sample::load_from_file(&path), Err(ConfigError::Invalid(_))));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = Sample::load_or_default(temp_path("absent.toml")).unwrap();
        assert_eq!(config, Sample::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = temp_path("broken.toml");
        std::fs::write(&path, "rate = = 3\n").unwrap();

        assert!(matches!(Sample::load_or_default(&path), Err(ConfigError::Parse(_))));
        std::fs::remove_file(&path).unwrap();
    }
}
