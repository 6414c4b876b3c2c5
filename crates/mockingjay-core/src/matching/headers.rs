//! Headers intersection check (case-insensitive keys, exact values).

use http::HeaderMap;
use std::collections::HashMap;

/// Declared header that is absent or different on the other side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMismatch {
    /// Lower-cased header name
    pub name: String,
    pub expected: String,
    pub actual: Option<String>,
}

fn normalize_headers(headers: Option<&HashMap<String, String>>) -> HashMap<String, String> {
    headers
        .map(|h| {
            h.iter()
                .map(|(k, v)| (k.to_lowercase(), v.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Flatten an `http` header map into lower-cased name → value.
///
/// Repeated headers are joined with `", "`. Values that are not valid UTF-8
/// are converted lossily.
pub fn header_map_to_hashmap(headers: &HeaderMap) -> HashMap<String, String> {
    let mut result: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        result
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    result
}

/// List every `subset` header missing from `target` or carrying another value.
///
/// `None` or an empty `subset` imposes no constraint. Mismatches are sorted by
/// header name.
pub fn header_mismatches(
    target: Option<&HashMap<String, String>>,
    subset: Option<&HashMap<String, String>>,
) -> Vec<HeaderMismatch> {
    let subset = match subset {
        None => return Vec::new(),
        Some(s) if s.is_empty() => return Vec::new(),
        Some(s) => normalize_headers(Some(s)),
    };
    let target = normalize_headers(target);

    let mut mismatches: Vec<HeaderMismatch> = subset
        .into_iter()
        .filter_map(|(name, expected)| {
            let actual = target.get(&name);
            if actual == Some(&expected) {
                None
            } else {
                Some(HeaderMismatch {
                    actual: actual.cloned(),
                    name,
                    expected,
                })
            }
        })
        .collect();
    mismatches.sort_by(|a, b| a.name.cmp(&b.name));
    mismatches
}

pub fn headers_intersects(
    target: Option<&HashMap<String, String>>,
    subset: Option<&HashMap<String, String>>,
) -> bool {
    header_mismatches(target, subset).is_empty()
}
