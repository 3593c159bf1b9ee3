//! Check request construction.

use std::collections::BTreeMap;

use pdp_client_sdk::{CheckUrlRequest, User};

use super::backend::BackendMode;
use super::error::DomainError;

/// Build the canonical URL check request. A missing context becomes an
/// empty map, so omitted and empty contexts serialize identically.
#[must_use]
pub fn new_check_url_request(
    user: User,
    url: &str,
    http_method: &str,
    tenant: &str,
    context: Option<BTreeMap<String, String>>,
) -> CheckUrlRequest {
    CheckUrlRequest::new(user, url, http_method, tenant).with_context(context)
}

/// Serialize `request` into the envelope expected by `mode`.
///
/// # Errors
///
/// `EncodeRequest` if serialization fails.
pub fn encode_check_url_request(
    mode: &BackendMode,
    request: &CheckUrlRequest,
) -> Result<Vec<u8>, DomainError> {
    mode.wrap_request(request).map_err(DomainError::EncodeRequest)
}

/// Build and serialize in one step.
///
/// # Errors
///
/// `EncodeRequest` if serialization fails.
pub fn build_check_url_body(
    mode: &BackendMode,
    user: User,
    url: &str,
    http_method: &str,
    tenant: &str,
    context: Option<BTreeMap<String, String>>,
) -> Result<Vec<u8>, DomainError> {
    let request = new_check_url_request(user, url, http_method, tenant, context);
    encode_check_url_request(mode, &request)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    fn sidecar() -> BackendMode {
        BackendMode::sidecar("http://localhost:7766")
    }

    fn opa() -> BackendMode {
        BackendMode::opa("http://localhost:8181")
    }

    #[test]
    fn omitted_and_empty_context_are_identical() {
        let tuples = [
            ("jane", "https://app/docs/1", "GET", "default"),
            ("bob", "/api/v1/users", "DELETE", "acme"),
            ("", "", "", ""),
        ];

        for mode in [sidecar(), opa()] {
            for (user, url, method, tenant) in tuples {
                let omitted =
                    build_check_url_body(&mode, User::new(user), url, method, tenant, None)
                        .unwrap();
                let empty = build_check_url_body(
                    &mode,
                    User::new(user),
                    url,
                    method,
                    tenant,
                    Some(BTreeMap::new()),
                )
                .unwrap();

                assert_eq!(omitted, empty);
            }
        }
    }

    #[test]
    fn omitted_context_serializes_as_empty_object() {
        let body =
            build_check_url_body(&sidecar(), User::new("jane"), "/docs", "GET", "default", None)
                .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["context"], json!({}));
    }

    #[test]
    fn opa_body_is_native_body_under_input() {
        let context = BTreeMap::from([("ip".to_owned(), "10.0.0.1".to_owned())]);
        let user = User::new("jane").email("jane@example.com");

        let native = build_check_url_body(
            &sidecar(),
            user.clone(),
            "/docs/1",
            "POST",
            "acme",
            Some(context.clone()),
        )
        .unwrap();
        let wrapped =
            build_check_url_body(&opa(), user, "/docs/1", "POST", "acme", Some(context)).unwrap();

        let mut expected = b"{\"input\":".to_vec();
        expected.extend_from_slice(&native);
        expected.push(b'}');
        assert_eq!(wrapped, expected);
    }

    #[test]
    fn native_body_has_no_wrapper() {
        let body =
            build_check_url_body(&sidecar(), User::new("jane"), "/docs", "GET", "default", None)
                .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert!(value.get("input").is_none());
        assert_eq!(value["user"]["key"], "jane");
        assert_eq!(value["http_method"], "GET");
    }

    #[test]
    fn context_order_is_stable() {
        let a = BTreeMap::from([
            ("z".to_owned(), "1".to_owned()),
            ("a".to_owned(), "2".to_owned()),
        ]);
        let b = BTreeMap::from([
            ("a".to_owned(), "2".to_owned()),
            ("z".to_owned(), "1".to_owned()),
        ]);

        let body_a =
            build_check_url_body(&sidecar(), User::new("u"), "/", "GET", "t", Some(a)).unwrap();
        let body_b =
            build_check_url_body(&sidecar(), User::new("u"), "/", "GET", "t", Some(b)).unwrap();

        assert_eq!(body_a, body_b);
    }
}
