//! Domain errors for the PDP client.

use pdp_client_sdk::PdpClientError;
use pdp_client_sdk::error::BoxError;

/// Internal domain errors, one per failure point of a check.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("failed to encode check request: {0}")]
    EncodeRequest(#[source] serde_json::Error),

    #[error("failed to build HTTP transport: {0}")]
    TransportSetup(#[source] BoxError),

    #[error("failed to send request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("PDP responded with HTTP {status}")]
    HttpStatus { status: u16, body: String },

    #[error("failed to read PDP response body: {source}")]
    ReadBody {
        status: u16,
        #[source]
        source: BoxError,
    },

    #[error("failed to decode {backend} response: {source}")]
    DecodeResponse {
        backend: &'static str,
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DomainError {
    /// Response body associated with the error, for diagnostics.
    #[must_use]
    pub fn response_body(&self) -> &str {
        match self {
            Self::HttpStatus { body, .. } | Self::DecodeResponse { body, .. } => body,
            _ => "",
        }
    }
}

impl From<DomainError> for PdpClientError {
    fn from(e: DomainError) -> Self {
        let message = e.to_string();
        match e {
            DomainError::HttpStatus { status, body } => Self::Http { status, body },
            DomainError::EncodeRequest(source) => Self::unexpected(message, source),
            DomainError::TransportSetup(source) | DomainError::Transport { source, .. } => {
                Self::unexpected(message, source)
            }
            DomainError::ReadBody { status, source } => Self::Unexpected {
                message,
                source,
                status: Some(status),
                body: None,
            },
            DomainError::DecodeResponse {
                status,
                body,
                source,
                ..
            } => Self::Unexpected {
                message,
                source: Box::new(source),
                status: Some(status),
                body: Some(body),
            },
        }
    }
}
