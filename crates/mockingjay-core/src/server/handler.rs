//! Fake server request handler.

use crate::endpoints::{EndpointMatcher, MatchRequest};
use crate::types::Endpoint;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, Response, StatusCode};
use http_body::Body;
use http_body_util::{BodyExt, Full};
use hyper::service::Service;
use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// HTTP handler answering requests with the declared endpoint responses.
///
/// `FakeServer` owns no listener. Mount it into any hyper-compatible server
/// through its [`Service`] implementation, or call [`FakeServer::handle`]
/// with an already buffered request. Clones share the same read-only
/// endpoint list.
#[derive(Debug, Clone)]
pub struct FakeServer {
    matcher: EndpointMatcher,
}

impl FakeServer {
    pub fn new(endpoints: impl Into<Arc<[Endpoint]>>) -> Self {
        Self::from_matcher(EndpointMatcher::new(endpoints))
    }

    pub fn from_matcher(matcher: EndpointMatcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &EndpointMatcher {
        &self.matcher
    }

    /// Answer a fully buffered request.
    ///
    /// Writes the declared status, headers and body of the first matching
    /// endpoint, or a 404 naming the request when nothing matches.
    pub fn handle(&self, req: Request<Bytes>) -> Response<Bytes> {
        let request = MatchRequest::from(&req);

        let Some(endpoint) = self.matcher.find(&request) else {
            tracing::debug!("No endpoint matches {} {}", request.method, request.uri);
            return plain_response(
                StatusCode::NOT_FOUND,
                format!("No endpoint matches {} {}\n", request.method, request.uri),
            );
        };

        tracing::debug!(
            "{} {} matched endpoint '{}'",
            request.method,
            request.uri,
            endpoint.label()
        );

        match declared_response(endpoint) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(
                    "Cannot build response for endpoint '{}': {}",
                    endpoint.label(),
                    err
                );
                plain_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Cannot build response for endpoint '{}': {err}\n", endpoint.label()),
                )
            }
        }
    }
}

impl<B> Service<Request<B>> for FakeServer
where
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Display,
{
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        let server = self.clone();
        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let response = match body.collect().await {
                Ok(collected) => server.handle(Request::from_parts(parts, collected.to_bytes())),
                Err(err) => {
                    tracing::warn!("Cannot read request body: {}", err);
                    plain_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Cannot read request body: {err}\n"),
                    )
                }
            };
            Ok(response.map(Full::new))
        })
    }
}

fn declared_response(endpoint: &Endpoint) -> Result<Response<Bytes>, http::Error> {
    let mut builder = Response::builder().status(endpoint.response.code);
    for (name, value) in endpoint.response.headers.iter().flatten() {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.body(Bytes::from(endpoint.response.body.clone()))
}

fn plain_response(status: StatusCode, body: String) -> Response<Bytes> {
    let mut response = Response::new(Bytes::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::endpoints_from_yaml;
    use rstest::rstest;

    const EXAMPLE_YAML: &str = r#"
---
 - name: Test endpoint
   request:
     uri: /hello
     method: GET
   response:
     code: 200
     body: hello, world
     headers:
       content-type: text/plain

 - name: Test endpoint 2
   request:
     uri: /world
     method: DELETE
   response:
     code: 200
     body: hello, world

 - name: Failing endpoint
   request:
     uri: /card
     method: POST
     body: Greetings
   response:
     code: 500
     body: Oh bugger
"#;

    fn create_example_server() -> FakeServer {
        FakeServer::new(endpoints_from_yaml(EXAMPLE_YAML).expect("Should parse"))
    }

    fn request(method: &str, uri: &str, body: &'static str) -> Request<Bytes> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::from_static(body.as_bytes()))
            .expect("Should build request")
    }

    #[rstest]
    fn test_handle_serves_declared_response() {
        let server = create_example_server();

        let response = server.handle(request("GET", "/hello", ""));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), &Bytes::from_static(b"hello, world"));
        assert_eq!(
            response.headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("text/plain"))
        );
    }

    #[rstest]
    fn test_handle_serves_declared_failure() {
        let server = create_example_server();

        let response = server.handle(request("POST", "/card", "Greetings"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body(), &Bytes::from_static(b"Oh bugger"));
    }

    #[rstest]
    #[case("GET", "/nope", "")]
    #[case("POST", "/card", "Salutations")]
    #[case("GET", "/world", "")]
    fn test_handle_not_found(#[case] method: &str, #[case] uri: &str, #[case] body: &'static str) {
        let server = create_example_server();

        let response = server.handle(request(method, uri, body));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let text = String::from_utf8_lossy(response.body());
        assert!(text.contains(uri), "{text}");
    }

    #[tokio::test]
    async fn test_service_collects_body() {
        let server = create_example_server();
        let req = Request::builder()
            .method("POST")
            .uri("/card")
            .body(Full::new(Bytes::from_static(b"Greetings")))
            .expect("Should build request");

        let response = server.call(req).await.expect("Infallible");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Infallible")
            .to_bytes();
        assert_eq!(body, Bytes::from_static(b"Oh bugger"));
    }
}
