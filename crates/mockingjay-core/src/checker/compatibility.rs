//! Replays declared requests against a real service and compares responses.

use crate::checker::config::{CheckerConfig, CheckerError};
use crate::checker::report::{CompatibilityReport, EndpointCheck, Incompatibility, RequestBuildError};
use crate::matching::{compare_bodies, header_map_to_hashmap, header_mismatches};
use crate::types::{Endpoint, EndpointResponse};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use reqwest::{Client, Request};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::Arc;
use url::Url;

/// Response received from the real service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealResponse {
    pub status: u16,
    /// Lower-cased header name → value
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Checks that a real service answers every declared request the way the
/// endpoint declares.
///
/// The checker keeps no state between runs: every call to
/// [`CompatibilityChecker::check`] issues one request per endpoint, in
/// declaration order, without retries.
#[derive(Debug, Clone)]
pub struct CompatibilityChecker {
    endpoints: Arc<[Endpoint]>,
    client: Client,
}

impl CompatibilityChecker {
    pub fn new(endpoints: impl Into<Arc<[Endpoint]>>, client: Client) -> Self {
        Self {
            endpoints: endpoints.into(),
            client,
        }
    }

    pub fn with_config(
        endpoints: impl Into<Arc<[Endpoint]>>,
        config: &CheckerConfig,
    ) -> Result<Self, CheckerError> {
        Ok(Self::new(endpoints, config.build_client()?))
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// True iff every endpoint's real response is compatible.
    ///
    /// Unreachable services and endpoints that cannot be turned into a
    /// request count as incompatible; they never abort the run.
    pub async fn check_compatibility(&self, base_url: &str) -> bool {
        self.check(base_url).await.is_compatible()
    }

    /// Check every endpoint against `base_url` and report each outcome.
    pub async fn check(&self, base_url: &str) -> CompatibilityReport {
        let mut checks = Vec::with_capacity(self.endpoints.len());
        for endpoint in self.endpoints.iter() {
            let check = self.check_endpoint(base_url, endpoint).await;
            if check.is_compatible() {
                tracing::info!("✓ {} is compatible", endpoint.label());
            } else {
                let reasons: Vec<String> = check
                    .incompatibilities
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                tracing::warn!(
                    "✗ {} is incompatible: {}",
                    endpoint.label(),
                    reasons.join("; ")
                );
            }
            checks.push(check);
        }
        CompatibilityReport { checks }
    }

    async fn check_endpoint(&self, base_url: &str, endpoint: &Endpoint) -> EndpointCheck {
        let incompatibilities = match self.exchange(base_url, endpoint).await {
            Ok(real) => compare_response(&endpoint.response, &real),
            Err(incompatibility) => vec![incompatibility],
        };

        EndpointCheck {
            name: endpoint.label(),
            method: endpoint.request.method.clone(),
            uri: endpoint.request.uri.clone(),
            incompatibilities,
        }
    }

    async fn exchange(
        &self,
        base_url: &str,
        endpoint: &Endpoint,
    ) -> Result<RealResponse, Incompatibility> {
        let request = build_request(&self.client, base_url, endpoint)?;
        tracing::debug!("Sending {} {}", request.method(), request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| Incompatibility::Network(error_chain(&err)))?;

        let status = response.status().as_u16();
        let headers = header_map_to_hashmap(response.headers());
        let body = response
            .text()
            .await
            .map_err(|err| Incompatibility::Network(error_chain(&err)))?;

        Ok(RealResponse {
            status,
            headers,
            body,
        })
    }
}

/// Turn a declared request into a real one aimed at `base_url`.
///
/// The target is the plain concatenation of `base_url` and the declared uri.
pub fn build_request(
    client: &Client,
    base_url: &str,
    endpoint: &Endpoint,
) -> Result<Request, RequestBuildError> {
    let declared = &endpoint.request;

    let target = format!("{base_url}{}", declared.uri);
    let url = Url::parse(&target).map_err(|source| RequestBuildError::Url {
        url: target.clone(),
        source,
    })?;

    let method = Method::from_bytes(declared.method.to_uppercase().as_bytes())
        .map_err(|_| RequestBuildError::Method(declared.method.clone()))?;

    let mut headers = HeaderMap::new();
    for (name, value) in declared.headers.iter().flatten() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| RequestBuildError::Header(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| RequestBuildError::Header(name.clone()))?;
        headers.insert(header_name, header_value);
    }

    let mut builder = client.request(method, url).headers(headers);
    if let Some(body) = &declared.body {
        builder = builder.body(body.clone());
    }
    builder
        .build()
        .map_err(|err| RequestBuildError::Client(error_chain(&err)))
}

/// Compare a real response with the declared one.
///
/// Status, body and headers are all evaluated so every difference is
/// reported at once.
pub fn compare_response(declared: &EndpointResponse, real: &RealResponse) -> Vec<Incompatibility> {
    let mut incompatibilities = Vec::new();

    if declared.code != real.status {
        incompatibilities.push(Incompatibility::Status {
            expected: declared.code,
            actual: real.status,
        });
    }

    if let Err(difference) = compare_bodies(&declared.body, &real.body) {
        incompatibilities.push(Incompatibility::Body(difference));
    }

    incompatibilities.extend(
        header_mismatches(Some(&real.headers), declared.headers.as_ref())
            .into_iter()
            .map(|mismatch| Incompatibility::Header {
                name: mismatch.name,
                expected: mismatch.expected,
                actual: mismatch.actual,
            }),
    );

    incompatibilities
}

fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
