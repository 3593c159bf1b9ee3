#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! PDP Client SDK
//!
//! This crate provides the public API for the `pdp_client` module:
//!
//! - [`PdpClient`] - Public API trait for consumers
//! - [`CheckUrlRequest`], [`CheckUrlResponse`], [`User`] - URL check models
//! - [`PolicyOperation`], [`PolicyOperationDescriptor`] - Policy operation registry
//! - [`PdpClientError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use pdp_client_sdk::{CheckUrlRequest, PdpClient, User};
//!
//! let request = CheckUrlRequest::new(
//!     User::new("john@example.com"),
//!     "https://api.example.com/documents/42",
//!     "GET",
//!     "default",
//! );
//!
//! // `Err` on any failure; `Ok(true)` only when the PDP reports `allow: true`
//! let allowed = client.check_url(request).await?;
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod operations;

// Re-export main types at crate root
pub use api::PdpClient;
pub use error::PdpClientError;
pub use models::{ALLOW_KEY, CheckUrlRequest, CheckUrlResponse, DEFAULT_TENANT, User};
pub use operations::{PolicyOperation, PolicyOperationDescriptor};
