//! Error types for endpoint configuration loading.

use thiserror::Error;

/// Endpoint configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Unknown file type
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
    /// Config file could not be read
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Invalid glob pattern
    #[error("Invalid config pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Pattern matched no files
    #[error("No config files match: {0}")]
    NoFiles(String),
    /// Endpoint parsed but failed validation
    #[error("Invalid endpoint #{index} ({name}): {reason}")]
    Invalid {
        index: usize,
        name: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error;

    #[rstest]
    fn test_config_error_json_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = ConfigError::from(json_err);
        assert!(error.to_string().contains("JSON parsing error"));
    }

    #[rstest]
    fn test_config_error_yaml_display() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("invalid: yaml: [").unwrap_err();
        let error = ConfigError::from(yaml_err);
        assert!(error.to_string().contains("YAML parsing error"));
    }

    #[rstest]
    #[case("test.txt")]
    #[case("unknown.extension")]
    fn test_config_error_unknown_file_type_display(#[case] path: &str) {
        let display = ConfigError::UnknownFileType(path.to_string()).to_string();
        assert!(display.contains("Unknown file type"));
        assert!(display.contains(path));
    }

    #[rstest]
    fn test_config_error_invalid_display() {
        let error = ConfigError::Invalid {
            index: 2,
            name: "Broken".to_string(),
            reason: "uri must not be empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid endpoint #2 (Broken): uri must not be empty"
        );
    }

    #[rstest]
    fn test_config_error_source() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("invalid: [").unwrap_err();
        assert!(ConfigError::from(yaml_err).source().is_some());

        let io = ConfigError::Io {
            path: "missing.yaml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(io.source().is_some());

        assert!(ConfigError::NoFiles("*.yaml".to_string()).source().is_none());
    }
}
