//! Core domain types for declared endpoints.

pub mod endpoint;

pub use endpoint::{Endpoint, EndpointRequest, EndpointResponse};
