//! Lookup of the declared endpoint answering an inbound request.
//!
//! This module provides `EndpointMatcher`, a read-only view over the parsed
//! endpoint list, and `MatchRequest`, the request shape it matches against.

use crate::matching::{body_matches, header_map_to_hashmap, headers_intersects};
use crate::types::Endpoint;
use bytes::Bytes;
use http::Request;
use std::collections::HashMap;
use std::sync::Arc;

/// HTTP request for endpoint matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRequest {
    /// HTTP method as received
    pub method: String,
    /// Request target (path plus query string)
    pub uri: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Fully read request body
    pub body: Bytes,
}

impl MatchRequest {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

impl From<&Request<Bytes>> for MatchRequest {
    fn from(req: &Request<Bytes>) -> Self {
        let uri = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());

        Self {
            method: req.method().as_str().to_string(),
            uri,
            headers: header_map_to_hashmap(req.headers()),
            body: req.body().clone(),
        }
    }
}

/// Read-only matcher over an immutable endpoint list.
///
/// Cloning is cheap and shares the list, so a matcher can be handed to every
/// connection of a server without locking.
#[derive(Debug, Clone)]
pub struct EndpointMatcher {
    endpoints: Arc<[Endpoint]>,
}

impl EndpointMatcher {
    pub fn new(endpoints: impl Into<Arc<[Endpoint]>>) -> Self {
        Self {
            endpoints: endpoints.into(),
        }
    }

    /// Declared endpoints in declaration order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Find the first endpoint, in declaration order, matching `request`.
    ///
    /// Matching checks method, URI, headers and body in that order. Returns
    /// `None` if nothing matches.
    pub fn find(&self, request: &MatchRequest) -> Option<&Endpoint> {
        self.endpoints
            .iter()
            .find(|endpoint| endpoint_matches_request(endpoint, request))
    }
}

fn endpoint_matches_request(endpoint: &Endpoint, request: &MatchRequest) -> bool {
    let declared = &endpoint.request;

    if !declared.method.eq_ignore_ascii_case(&request.method) {
        return false;
    }

    if declared.uri != request.uri {
        return false;
    }

    if !headers_intersects(Some(&request.headers), declared.headers.as_ref()) {
        return false;
    }

    body_matches(declared.body.as_deref(), &request.body)
}
