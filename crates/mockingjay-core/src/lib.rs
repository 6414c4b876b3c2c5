//! Contract-testing fixture built from declared HTTP endpoints.
//!
//! A list of [`Endpoint`]s, usually loaded with [`config::load_endpoints`],
//! drives two independent components:
//!
//! - [`FakeServer`]: a hyper service answering requests with the declared
//!   responses (404 when nothing matches).
//! - [`CompatibilityChecker`]: replays every declared request against a real
//!   service and reports whether the real responses are compatible.

pub mod checker;
pub mod config;
pub mod endpoints;
pub mod matching;
pub mod server;
pub mod types;

pub use checker::{CheckerConfig, CompatibilityChecker, CompatibilityReport};
pub use config::ConfigError;
pub use endpoints::{EndpointMatcher, MatchRequest};
pub use server::{serve, FakeServer};
pub use types::Endpoint;
