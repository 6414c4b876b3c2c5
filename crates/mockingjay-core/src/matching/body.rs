//! Body matching for inbound requests and body equivalence for responses.

use assert_json_diff::{assert_json_matches_no_panic, CompareMode, Config, NumericMode};
use serde_json::Value;

/// Match an inbound request body against a declared one.
///
/// A declared body of `None` or `""` accepts any inbound body, otherwise the
/// bytes must be equal.
pub fn body_matches(declared: Option<&str>, actual: &[u8]) -> bool {
    match declared {
        None => true,
        Some(d) if d.is_empty() => true,
        Some(d) => d.as_bytes() == actual,
    }
}

/// Compare a declared response body with the one a real server sent.
///
/// When both sides parse as JSON they are compared structurally (object key
/// order and whitespace do not matter, array order does). Numbers are
/// compared by value, so `1`, `1.0` and `1e0` are equal.
/// Any other pair is compared as literal strings. The error carries a
/// human-readable description of the difference.
pub fn compare_bodies(expected: &str, actual: &str) -> Result<(), String> {
    match (
        serde_json::from_str::<Value>(expected),
        serde_json::from_str::<Value>(actual),
    ) {
        (Ok(expected), Ok(actual)) => {
            assert_json_matches_no_panic(&actual, &expected, json_config())
        }
        _ if expected == actual => Ok(()),
        _ => Err(format!("expected body {expected:?} but got {actual:?}")),
    }
}

fn json_config() -> Config {
    Config::new(CompareMode::Strict).numeric_mode(NumericMode::AssumeFloat)
}

pub fn bodies_equivalent(expected: &str, actual: &str) -> bool {
    compare_bodies(expected, actual).is_ok()
}
