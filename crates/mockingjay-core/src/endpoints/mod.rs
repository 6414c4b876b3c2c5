//! Endpoint lookup.
//!
//! This module provides [`EndpointMatcher`], which finds the declared endpoint
//! answering a [`MatchRequest`].

pub mod matcher;

pub use matcher::{EndpointMatcher, MatchRequest};
