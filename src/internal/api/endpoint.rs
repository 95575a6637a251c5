use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use crate::internal::gateway::{GatewayError, Outcome};

/// Append percent-encoded path segments to a service base URL.
/// A trailing `""` segment produces a trailing slash.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Outcome<String> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| GatewayError::Network(format!("{} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

/// Decode a gateway body into a record, logging the failure like the gateway does.
pub(crate) fn decode<T: DeserializeOwned>(url: &str, value: Value) -> Outcome<T> {
    serde_json::from_value(value).map_err(|e| {
        let err = GatewayError::from(e);
        error!(url, kind = err.kind().as_str(), "API response rejected: {}", err);
        err
    })
}

/// Like [`decode`], but an empty body means an empty list.
pub(crate) fn decode_list<T: DeserializeOwned>(url: &str, value: Value) -> Outcome<Vec<T>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    decode(url, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_segments_onto_bare_host() {
        let base = Url::parse("http://localhost:9002").unwrap();
        assert_eq!(
            endpoint(&base, &["student", "api", "all"]).unwrap(),
            "http://localhost:9002/student/api/all"
        );
    }

    #[test]
    fn keeps_trailing_slash_for_create_routes() {
        let base = Url::parse("http://localhost:9001/").unwrap();
        assert_eq!(
            endpoint(&base, &["college", ""]).unwrap(),
            "http://localhost:9001/college/"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let base = Url::parse("https://records.example.edu/api/").unwrap();
        assert_eq!(
            endpoint(&base, &["student", "7"]).unwrap(),
            "https://records.example.edu/api/student/7"
        );
    }

    #[test]
    fn encodes_names() {
        let base = Url::parse("http://localhost:9002").unwrap();
        assert_eq!(
            endpoint(&base, &["student", "name", "Ana María/2"]).unwrap(),
            "http://localhost:9002/student/name/Ana%20Mar%C3%ADa%2F2"
        );
    }

    #[test]
    fn null_decodes_as_empty_list() {
        let items: Vec<u32> = decode_list("http://x/", Value::Null).unwrap();
        assert!(items.is_empty());
    }
}
