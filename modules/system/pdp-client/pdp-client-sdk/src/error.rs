//! Error types for the PDP client.

use thiserror::Error;

/// Boxed underlying cause of an unexpected failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when using the PDP client API.
///
/// Access denial is not an error: it is expressed as `Ok(false)` from
/// [`crate::PdpClient::check_url`].
#[derive(Debug, Error)]
pub enum PdpClientError {
    /// The PDP answered with a non-success HTTP status.
    #[error("PDP responded with HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// A local failure: encoding, transport, body read or decode.
    #[error("unexpected error: {message}")]
    Unexpected {
        /// What failed.
        message: String,
        /// Underlying cause.
        #[source]
        source: BoxError,
        /// HTTP status of the response, when one was received.
        status: Option<u16>,
        /// Raw response body, when one was read.
        body: Option<String>,
    },
}

impl PdpClientError {
    /// Create an `Http` error.
    #[must_use]
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create an `Unexpected` error without response details.
    #[must_use]
    pub fn unexpected(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Unexpected {
            message: message.into(),
            source: source.into(),
            status: None,
            body: None,
        }
    }

    /// Returns `true` for errors caused by a non-success HTTP status.
    #[must_use]
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// HTTP status associated with the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unexpected { status, .. } => *status,
        }
    }

    /// Raw response body associated with the error, if any.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => Some(body),
            Self::Unexpected { body, .. } => body.as_deref(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn http_error_carries_status_and_body() {
        let err = PdpClientError::http(403, "forbidden");

        assert!(err.is_http());
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.response_body(), Some("forbidden"));
        assert_eq!(err.to_string(), "PDP responded with HTTP 403: forbidden");
    }

    #[test]
    fn unexpected_error_exposes_source() {
        let err = PdpClientError::unexpected("reading response body", "connection reset");

        assert!(!err.is_http());
        assert_eq!(err.status(), None);
        assert_eq!(err.response_body(), None);
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("connection reset"));
    }
}
