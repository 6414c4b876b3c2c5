//! Endpoint configuration: parsing, validation and loading.

pub mod error;
pub mod parser;

pub use error::ConfigError;
pub use parser::{endpoints_from_yaml, load_endpoints, parse_endpoints, validate_endpoints};
