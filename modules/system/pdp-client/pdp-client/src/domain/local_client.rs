//! Local (in-process) client for the PDP.

use std::sync::Arc;

use async_trait::async_trait;
use pdp_client_sdk::{CheckUrlRequest, CheckUrlResponse, PdpClient, PdpClientError};

use super::{DomainError, Service};
use crate::config::PdpClientConfig;

/// Local client wrapping the service.
pub struct PdpClientLocal {
    svc: Arc<Service>,
}

impl PdpClientLocal {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }

    /// Build a client with the default HTTP transport.
    ///
    /// # Errors
    ///
    /// `Unexpected` if the HTTP client cannot be created.
    pub fn from_config(cfg: &PdpClientConfig) -> Result<Self, PdpClientError> {
        let svc = Service::from_config(cfg).map_err(|e| log_and_convert("init", e))?;
        Ok(Self::new(Arc::new(svc)))
    }

    #[must_use]
    pub fn service(&self) -> &Arc<Service> {
        &self.svc
    }
}

fn log_and_convert(op: &str, e: DomainError) -> PdpClientError {
    tracing::error!(
        operation = op,
        error = %e,
        response_body = e.response_body(),
        "pdp_client call failed"
    );
    e.into()
}

#[async_trait]
impl PdpClient for PdpClientLocal {
    async fn check_url(&self, request: CheckUrlRequest) -> Result<bool, PdpClientError> {
        self.check_url_detailed(request).await.map(|r| r.allow)
    }

    async fn check_url_detailed(
        &self,
        request: CheckUrlRequest,
    ) -> Result<CheckUrlResponse, PdpClientError> {
        self.svc
            .check_url(&request)
            .await
            .map_err(|e| log_and_convert("check_url", e))
    }
}
