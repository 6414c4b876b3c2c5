//! Endpoint contract types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared request/response contract
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Endpoint {
    /// Free-text label used in diagnostics only
    #[serde(default)]
    pub name: String,
    /// Request shape the endpoint answers to
    pub request: EndpointRequest,
    /// Response served by the fake server and expected from the real one
    pub response: EndpointResponse,
}

/// Request half of an endpoint, used as the match key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EndpointRequest {
    /// Request target (path plus optional query string)
    pub uri: String,
    /// HTTP method, compared case-insensitively
    pub method: String,
    /// Required request headers; `None` matches any headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Required request body; `None` or empty matches any body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Response half of an endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EndpointResponse {
    /// HTTP status code
    pub code: u16,
    /// Response body
    #[serde(default)]
    pub body: String,
    /// Response headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

impl Endpoint {
    /// Label used in log lines, falling back to `METHOD uri` when unnamed.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("{} {}", self.request.method, self.request.uri)
        } else {
            self.name.clone()
        }
    }
}

impl EndpointRequest {
    /// Declared body, treating an empty string as absent.
    pub fn declared_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn endpoint(name: &str) -> Endpoint {
        Endpoint {
            name: name.to_string(),
            request: EndpointRequest {
                uri: "/hello".to_string(),
                method: "GET".to_string(),
                headers: None,
                body: None,
            },
            response: EndpointResponse {
                code: 200,
                body: "hello, world".to_string(),
                headers: None,
            },
        }
    }

    #[rstest]
    fn test_endpoint_deserialize_yaml() {
        let yaml = r#"
name: Test endpoint
request:
  uri: /hello
  method: GET
  headers:
    content-type: application/json
  body: foobar
response:
  code: 200
  body: hello, world
  headers:
    content-type: text/plain
"#;
        let endpoint: Endpoint = serde_yaml::from_str(yaml).expect("Should deserialize");

        assert_eq!(endpoint.name, "Test endpoint");
        assert_eq!(endpoint.request.uri, "/hello");
        assert_eq!(endpoint.request.method, "GET");
        assert_eq!(endpoint.request.body.as_deref(), Some("foobar"));
        assert_eq!(
            endpoint
                .request
                .headers
                .as_ref()
                .and_then(|h| h.get("content-type"))
                .map(String::as_str),
            Some("application/json")
        );
        assert_eq!(endpoint.response.code, 200);
        assert_eq!(endpoint.response.body, "hello, world");
    }

    #[rstest]
    fn test_endpoint_optional_fields_default() {
        let yaml = "request:\n  uri: /world\n  method: DELETE\nresponse:\n  code: 204\n";
        let endpoint: Endpoint = serde_yaml::from_str(yaml).expect("Should deserialize");

        assert_eq!(endpoint.name, "");
        assert_eq!(endpoint.request.headers, None);
        assert_eq!(endpoint.request.body, None);
        assert_eq!(endpoint.response.body, "");
        assert_eq!(endpoint.response.headers, None);
    }

    #[rstest]
    #[case("request:\n  method: GET\nresponse:\n  code: 200\n")]
    #[case("request:\n  uri: /a\nresponse:\n  code: 200\n")]
    #[case("request:\n  uri: /a\n  method: GET\n")]
    #[case("request:\n  uri: /a\n  method: GET\n  bdy: x\nresponse:\n  code: 200\n")]
    #[case("nmae: typo\nrequest:\n  uri: /a\n  method: GET\nresponse:\n  code: 200\n")]
    #[case("request:\n  uri: /a\n  method: GET\nresponse:\n  code: 200\n  bdoy: x\n")]
    fn test_endpoint_rejects_malformed_shape(#[case] yaml: &str) {
        assert!(serde_yaml::from_str::<Endpoint>(yaml).is_err());
    }

    #[rstest]
    #[case("Named", "Named")]
    #[case("", "GET /hello")]
    fn test_endpoint_label(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(endpoint(name).label(), expected);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("Greetings"), Some("Greetings"))]
    fn test_declared_body(#[case] body: Option<&str>, #[case] expected: Option<&str>) {
        let mut endpoint = endpoint("x");
        endpoint.request.body = body.map(str::to_string);
        assert_eq!(endpoint.request.declared_body(), expected);
    }
}
