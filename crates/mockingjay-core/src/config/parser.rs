//! Endpoint file parsing (YAML/JSON) and validation.

use crate::config::error::ConfigError;
use crate::types::Endpoint;
use http::{HeaderName, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Config file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Unknown,
}

/// Get config file type from path extension
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        _ => ConfigFileType::Unknown,
    }
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse config content based on file type
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(path.to_string())),
    }
}

/// Parse and validate a YAML document whose top level is a sequence of endpoints.
pub fn endpoints_from_yaml(content: &str) -> Result<Vec<Endpoint>, ConfigError> {
    let endpoints: Vec<Endpoint> = parse_yaml(content)?;
    validate_endpoints(&endpoints)?;
    Ok(endpoints)
}

/// Parse and validate endpoints, picking the format from `path`.
pub fn parse_endpoints(content: &str, path: &str) -> Result<Vec<Endpoint>, ConfigError> {
    let endpoints: Vec<Endpoint> = parse_config(content, path)?;
    validate_endpoints(&endpoints)?;
    Ok(endpoints)
}

/// Check the invariants serde cannot express.
///
/// Request headers and method tokens are deliberately left alone: an endpoint
/// the checker cannot turn into a request is reported as incompatible there.
pub fn validate_endpoints(endpoints: &[Endpoint]) -> Result<(), ConfigError> {
    for (index, endpoint) in endpoints.iter().enumerate() {
        let invalid = |reason: String| ConfigError::Invalid {
            index,
            name: endpoint.name.clone(),
            reason,
        };

        if endpoint.request.uri.trim().is_empty() {
            return Err(invalid("request uri must not be empty".to_string()));
        }
        if endpoint.request.method.trim().is_empty() {
            return Err(invalid("request method must not be empty".to_string()));
        }
        if StatusCode::from_u16(endpoint.response.code).is_err() {
            return Err(invalid(format!(
                "response code {} is not a valid HTTP status",
                endpoint.response.code
            )));
        }
        for (name, value) in endpoint.response.headers.iter().flatten() {
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(invalid(format!("invalid response header name '{name}'")));
            }
            if HeaderValue::from_str(value).is_err() {
                return Err(invalid(format!(
                    "invalid value for response header '{name}'"
                )));
            }
        }
    }

    Ok(())
}

/// Load endpoints from every file matching `pattern` (a path or glob).
///
/// Files are read in sorted path order and their endpoints concatenated, so
/// declaration order is stable across runs.
pub async fn load_endpoints(pattern: &str) -> Result<Vec<Endpoint>, ConfigError> {
    let mut paths: Vec<PathBuf> = glob::glob(pattern)?.filter_map(Result::ok).collect();
    if paths.is_empty() {
        return Err(ConfigError::NoFiles(pattern.to_string()));
    }
    paths.sort();

    let mut endpoints = Vec::new();
    for path in paths {
        let path = path.to_string_lossy().into_owned();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
        let mut parsed: Vec<Endpoint> = parse_config(&content, &path)?;
        tracing::debug!("Loaded {} endpoint(s) from {}", parsed.len(), path);
        endpoints.append(&mut parsed);
    }

    validate_endpoints(&endpoints)?;
    Ok(endpoints)
}
