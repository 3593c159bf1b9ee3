//! Backend shapes a PDP can take.
//!
//! A native sidecar exposes fixed REST paths and plain JSON bodies. An
//! OPA-style engine is addressed by package path under `/v1/data/`, expects
//! the request under `input` and answers under `result`.

use pdp_client_sdk::PolicyOperation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::PdpClientConfig;

/// Path prefix of the OPA data API.
const OPA_DATA_PREFIX: &str = "/v1/data/";

#[derive(Serialize)]
struct OpaInput<'a, T> {
    input: &'a T,
}

#[derive(Deserialize)]
struct OpaResult<T> {
    result: T,
}

/// Backend selected once per client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    /// Native sidecar PDP at `base_url`.
    Sidecar { base_url: String },
    /// OPA-style engine at `base_url`.
    Opa { base_url: String },
}

impl BackendMode {
    /// OPA-style when an OPA URL is configured, sidecar otherwise.
    #[must_use]
    pub fn from_config(cfg: &PdpClientConfig) -> Self {
        match cfg.opa_url() {
            Some(opa_url) => Self::opa(opa_url),
            None => Self::sidecar(&cfg.pdp_url),
        }
    }

    #[must_use]
    pub fn sidecar(base_url: &str) -> Self {
        Self::Sidecar {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn opa(base_url: &str) -> Self {
        Self::Opa {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn is_opa(&self) -> bool {
        matches!(self, Self::Opa { .. })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sidecar { .. } => "sidecar",
            Self::Opa { .. } => "opa",
        }
    }

    /// Full URL to invoke for `operation`.
    #[must_use]
    pub fn endpoint(&self, operation: PolicyOperation) -> String {
        let descriptor = operation.descriptor();
        match self {
            Self::Sidecar { base_url } => format!("{base_url}{}", descriptor.sidecar_path),
            Self::Opa { base_url } => {
                format!("{base_url}{OPA_DATA_PREFIX}{}", descriptor.opa_path)
            }
        }
    }

    /// Serialize `request` into the envelope this backend expects.
    ///
    /// # Errors
    ///
    /// Returns the encoding error; no partial body is produced.
    pub fn wrap_request<T: Serialize>(&self, request: &T) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Self::Sidecar { .. } => serde_json::to_vec(request),
            Self::Opa { .. } => serde_json::to_vec(&OpaInput { input: request }),
        }
    }

    /// Decode a response body, unwrapping the `result` envelope on OPA.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when the body does not match the expected shape.
    pub fn unwrap_response<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, serde_json::Error> {
        match self {
            Self::Sidecar { .. } => serde_json::from_slice(body),
            Self::Opa { .. } => serde_json::from_slice::<OpaResult<T>>(body).map(|r| r.result),
        }
    }
}
