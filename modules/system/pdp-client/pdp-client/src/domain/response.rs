//! PDP response interpretation.

use pdp_client_sdk::CheckUrlResponse;

use super::backend::BackendMode;
use super::error::DomainError;
use super::transport::TransportResponse;

/// Turn a raw PDP answer into a decoded [`CheckUrlResponse`].
///
/// The status is checked before the body is looked at, so a non-success
/// answer is always an `HttpStatus` error even when its body is unreadable.
///
/// # Errors
///
/// - `HttpStatus` for non-2xx answers, with the body text
/// - `ReadBody` if the body could not be read
/// - `DecodeResponse` if the body does not match the backend's shape
pub fn parse_check_url_response(
    response: TransportResponse,
    mode: &BackendMode,
) -> Result<CheckUrlResponse, DomainError> {
    let status = response.status.as_u16();

    if !response.status.is_success() {
        let body = response
            .body
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default();
        return Err(DomainError::HttpStatus { status, body });
    }

    let body = response
        .body
        .map_err(|source| DomainError::ReadBody { status, source })?;

    mode.unwrap_response(&body)
        .map_err(|source| DomainError::DecodeResponse {
            backend: mode.name(),
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
            source,
        })
}
