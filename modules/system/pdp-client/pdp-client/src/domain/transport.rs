//! Outbound HTTP transport.
//!
//! Every PDP call is a single `POST` with a JSON body and a bearer token.
//! The transport is a trait object so callers can swap in their own client.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use pdp_client_sdk::error::BoxError;
use secrecy::{ExposeSecret, SecretString};

use super::error::DomainError;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A fully prepared PDP call.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub body: Bytes,
    pub token: SecretString,
}

impl TransportRequest {
    /// Value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

/// Raw PDP answer. The body is read eagerly; a read failure is kept so the
/// interpreter can report it separately from HTTP status errors.
#[derive(Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Result<Bytes, BoxError>,
}

impl TransportResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: Ok(body.into()),
        }
    }
}

#[async_trait]
pub trait PdpTransport: Send + Sync {
    /// `POST` `request.body` to `request.url` with JSON and bearer headers.
    ///
    /// # Errors
    ///
    /// Returns the underlying cause when the request cannot be sent or no
    /// response is received.
    async fn post_json(&self, request: TransportRequest) -> Result<TransportResponse, BoxError>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// `TransportSetup` if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::TransportSetup(Box::new(e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing client (shared pools, custom TLS, proxies).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PdpTransport for HttpTransport {
    async fn post_json(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
        let authorization = request.authorization();
        let response = self
            .client
            .post(&request.url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(AUTHORIZATION, authorization)
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await.map_err(BoxError::from);
        Ok(TransportResponse { status, body })
    }
}
