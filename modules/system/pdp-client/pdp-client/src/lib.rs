//! PDP Client
//!
//! Sends URL-based authorization checks to a remote Policy Decision Point.
//! The same client targets either a native sidecar PDP or an OPA-style
//! policy engine; the backend is chosen once from configuration.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::{ConfigError, PdpClientConfig};
pub use domain::{
    BackendMode, HttpTransport, PdpClientLocal, PdpTransport, Service, TransportRequest,
    TransportResponse,
};
