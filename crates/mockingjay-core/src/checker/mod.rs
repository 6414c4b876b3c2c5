//! Compatibility checking of declared endpoints against a real service.
//!
//! [`CompatibilityChecker`] replays each declared request against a base URL
//! and compares the real response with the declared one: exact status,
//! structural JSON (or literal text) body, and the declared headers.

pub mod compatibility;
pub mod config;
pub mod report;

pub use compatibility::{build_request, compare_response, CompatibilityChecker, RealResponse};
pub use config::{CheckerConfig, CheckerError, DEFAULT_TIMEOUT};
pub use report::{CompatibilityReport, EndpointCheck, Incompatibility, RequestBuildError};
