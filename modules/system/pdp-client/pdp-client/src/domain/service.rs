//! Domain service for the PDP client.

use std::collections::BTreeMap;
use std::sync::Arc;

use pdp_client_sdk::{CheckUrlRequest, CheckUrlResponse, PolicyOperation, User};
use secrecy::SecretString;
use tracing::debug;

use super::backend::BackendMode;
use super::error::DomainError;
use super::request::{build_check_url_body, encode_check_url_request};
use super::response::parse_check_url_response;
use super::transport::{HttpTransport, PdpTransport, TransportRequest};
use crate::config::PdpClientConfig;

/// PDP client service.
///
/// Holds only immutable state, so one instance can serve concurrent checks.
pub struct Service {
    mode: BackendMode,
    token: SecretString,
    default_tenant: String,
    transport: Arc<dyn PdpTransport>,
}

impl Service {
    #[must_use]
    pub fn new(cfg: &PdpClientConfig, transport: Arc<dyn PdpTransport>) -> Self {
        Self {
            mode: BackendMode::from_config(cfg),
            token: cfg.token.clone(),
            default_tenant: cfg.default_tenant.clone(),
            transport,
        }
    }

    /// Build a service with the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// `TransportSetup` if the HTTP client cannot be created.
    pub fn from_config(cfg: &PdpClientConfig) -> Result<Self, DomainError> {
        let transport = HttpTransport::new(cfg.timeout())?;
        Ok(Self::new(cfg, Arc::new(transport)))
    }

    #[must_use]
    pub fn mode(&self) -> &BackendMode {
        &self.mode
    }

    #[must_use]
    pub fn default_tenant(&self) -> &str {
        &self.default_tenant
    }

    /// `tenant` if given, otherwise the configured default tenant.
    #[must_use]
    pub fn tenant_or_default<'a>(&'a self, tenant: Option<&'a str>) -> &'a str {
        tenant.unwrap_or(&self.default_tenant)
    }

    /// Send a URL check and decode the PDP's answer.
    ///
    /// # Errors
    ///
    /// - `EncodeRequest` if the request cannot be serialized
    /// - `Transport` if the call cannot be made
    /// - `HttpStatus`, `ReadBody`, `DecodeResponse` from response interpretation
    #[tracing::instrument(
        skip_all,
        fields(
            backend = self.mode.name(),
            user = %request.user.key,
            url = %request.url,
            method = %request.http_method,
            tenant = %request.tenant,
        )
    )]
    pub async fn check_url(
        &self,
        request: &CheckUrlRequest,
    ) -> Result<CheckUrlResponse, DomainError> {
        let body = encode_check_url_request(&self.mode, request)?;
        self.send(body).await
    }

    /// Convenience entry taking the request parts directly. `tenant` falls
    /// back to the configured default tenant.
    ///
    /// # Errors
    ///
    /// Same as [`Service::check_url`].
    #[tracing::instrument(
        skip_all,
        fields(backend = self.mode.name(), user = %user.key, url = %url, method = %http_method)
    )]
    pub async fn check(
        &self,
        user: User,
        url: &str,
        http_method: &str,
        tenant: Option<&str>,
        context: Option<BTreeMap<String, String>>,
    ) -> Result<bool, DomainError> {
        let tenant = self.tenant_or_default(tenant);
        let body = build_check_url_body(&self.mode, user, url, http_method, tenant, context)?;
        self.send(body).await.map(|r| r.allow)
    }

    async fn send(&self, body: Vec<u8>) -> Result<CheckUrlResponse, DomainError> {
        let url = self.mode.endpoint(PolicyOperation::AllowedUrl);
        debug!(endpoint = %url, "Sending URL check to PDP");

        let response = self
            .transport
            .post_json(TransportRequest {
                url: url.clone(),
                body: body.into(),
                token: self.token.clone(),
            })
            .await
            .map_err(|source| DomainError::Transport { url, source })?;

        let decision = parse_check_url_response(response, &self.mode)?;
        debug!(allow = decision.allow, "PDP decision received");
        Ok(decision)
    }
}
