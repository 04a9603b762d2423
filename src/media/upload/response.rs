// SPDX-License-Identifier: MPL-2.0
//! Response inspection helpers.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::application::port::{TransportResponse, UploadError};

/// Looks up a dotted `path` (e.g. `data.files.0.url`) in `value`.
///
/// Numeric segments index into arrays. Returns `None` as soon as a segment
/// is missing.
#[must_use]
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Extracts the uploaded image's URL from `response` at `path`.
///
/// The path is resolved against the response envelope
/// `{ "status": .., "data": body }`.
///
/// # Errors
/// Returns [`UploadError::MissingImageUrl`] unless the path leads to a
/// non-empty string.
pub fn extract_image_url(response: &TransportResponse, path: &str) -> Result<String, UploadError> {
    let envelope = response.envelope();
    match resolve_path(&envelope, path) {
        Some(Value::String(url)) if !url.is_empty() => Ok(url.clone()),
        _ => Err(UploadError::MissingImageUrl),
    }
}

/// Copy of `headers` safe to log: `Authorization` values are replaced.
#[must_use]
pub fn redact_headers(headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(key, value)| {
            if key.eq_ignore_ascii_case("authorization") {
                (key.clone(), "REDACTED".to_string())
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_nested_objects_and_arrays() {
        let value = json!({"data": {"files": [{"url": "a"}, {"url": "b"}]}});
        assert_eq!(resolve_path(&value, "data.files.1.url"), Some(&json!("b")));
        assert_eq!(resolve_path(&value, "data.files.7.url"), None);
        assert_eq!(resolve_path(&value, "data.missing"), None);
        assert_eq!(resolve_path(&value, "data.files.x"), None);
    }

    #[test]
    fn default_path_reads_plain_string_body() {
        let response = TransportResponse::new(200, json!("https://cdn.test/p.png"));
        assert_eq!(
            extract_image_url(&response, "data").as_deref(),
            Ok("https://cdn.test/p.png")
        );
    }

    #[test]
    fn nested_path_reads_field_of_json_body() {
        let response = TransportResponse::new(200, json!({"data": "https://cdn.test/q.png"}));
        assert_eq!(
            extract_image_url(&response, "data.data").as_deref(),
            Ok("https://cdn.test/q.png")
        );
    }

    #[test]
    fn missing_empty_or_non_string_values_are_errors() {
        let response = TransportResponse::new(200, json!({"url": "", "id": 4}));
        for path in ["data.url", "data.id", "data.nope", "data", "status"] {
            assert_eq!(
                extract_image_url(&response, path),
                Err(UploadError::MissingImageUrl),
                "path {path}"
            );
        }
    }

    #[test]
    fn authorization_is_redacted_case_insensitively() {
        let headers = BTreeMap::from([
            ("authorization".to_string(), "Bearer secret".to_string()),
            ("X-Trace".to_string(), "abc".to_string()),
            ("AUTHORIZATION".to_string(), "Basic x".to_string()),
        ]);
        let redacted = redact_headers(&headers);
        assert_eq!(redacted["authorization"], "REDACTED");
        assert_eq!(redacted["AUTHORIZATION"], "REDACTED");
        assert_eq!(redacted["X-Trace"], "abc");
    }
}
