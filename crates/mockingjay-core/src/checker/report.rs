//! Per-endpoint outcome of a compatibility check run.

use std::fmt;
use thiserror::Error;
use url::ParseError;

/// Reason a declared endpoint could not be turned into a real request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestBuildError {
    #[error("invalid URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: ParseError,
    },
    #[error("invalid method '{0}'")]
    Method(String),
    #[error("invalid request header '{0}'")]
    Header(String),
    #[error("{0}")]
    Client(String),
}

/// Why a real response was judged incompatible with the declared one.
#[derive(Debug, Error)]
pub enum Incompatibility {
    #[error("cannot build request: {0}")]
    Construction(#[from] RequestBuildError),
    #[error("request failed: {0}")]
    Network(String),
    #[error("expected status {expected} but got {actual}")]
    Status { expected: u16, actual: u16 },
    #[error("{0}")]
    Body(String),
    #[error("expected header '{name}: {expected}' but got {}", describe_actual(.actual))]
    Header {
        name: String,
        expected: String,
        actual: Option<String>,
    },
}

fn describe_actual(actual: &Option<String>) -> String {
    match actual {
        Some(value) => format!("'{value}'"),
        None => "no such header".to_string(),
    }
}

/// Outcome for a single endpoint.
#[derive(Debug)]
pub struct EndpointCheck {
    pub name: String,
    pub method: String,
    pub uri: String,
    /// Empty when the endpoint is compatible
    pub incompatibilities: Vec<Incompatibility>,
}

impl EndpointCheck {
    pub fn is_compatible(&self) -> bool {
        self.incompatibilities.is_empty()
    }
}

impl fmt::Display for EndpointCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_compatible() { "✓" } else { "✗" };
        write!(f, "{mark} {} ({} {})", self.name, self.method, self.uri)?;
        for incompatibility in &self.incompatibilities {
            write!(f, "\n    - {incompatibility}")?;
        }
        Ok(())
    }
}

/// Outcome of one check run, in declaration order.
#[derive(Debug, Default)]
pub struct CompatibilityReport {
    pub checks: Vec<EndpointCheck>,
}

impl CompatibilityReport {
    /// True iff every endpoint is compatible.
    pub fn is_compatible(&self) -> bool {
        self.checks.iter().all(EndpointCheck::is_compatible)
    }

    pub fn incompatible(&self) -> impl Iterator<Item = &EndpointCheck> {
        self.checks.iter().filter(|check| !check.is_compatible())
    }
}

impl fmt::Display for CompatibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            writeln!(f, "{check}")?;
        }
        let failed = self.incompatible().count();
        write!(
            f,
            "{} of {} endpoint(s) compatible",
            self.checks.len() - failed,
            self.checks.len()
        )
    }
}
