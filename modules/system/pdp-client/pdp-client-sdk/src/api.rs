//! Public API trait for the PDP client.

use async_trait::async_trait;

use crate::error::PdpClientError;
use crate::models::{CheckUrlRequest, CheckUrlResponse};

/// Public API trait for URL-based authorization checks against a PDP.
///
/// Implementations talk either to a native sidecar PDP or to an OPA-style
/// rule engine; the backend shape is fixed at construction time and is not
/// visible to callers.
///
/// ```ignore
/// let allowed = pdp.check_url(request).await?;
/// ```
#[async_trait]
pub trait PdpClient: Send + Sync {
    /// Check whether `request.user` may perform `request.http_method` on `request.url`.
    ///
    /// Returns `Ok(true)` only when the PDP explicitly reports `allow: true`.
    ///
    /// # Errors
    ///
    /// - `Http` if the PDP answered with a non-success status
    /// - `Unexpected` for encoding, transport, body read or decode failures
    async fn check_url(&self, request: CheckUrlRequest) -> Result<bool, PdpClientError>;

    /// Same as [`PdpClient::check_url`] but returns the full decoded response
    /// (`query`, `debug` and `result` included) for diagnostics.
    ///
    /// # Errors
    ///
    /// Same as [`PdpClient::check_url`].
    async fn check_url_detailed(
        &self,
        request: CheckUrlRequest,
    ) -> Result<CheckUrlResponse, PdpClientError>;
}
