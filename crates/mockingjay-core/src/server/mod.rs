//! Fake HTTP server built from declared endpoints.

pub mod handler;
pub mod serve;

pub use handler::FakeServer;
pub use serve::serve;
