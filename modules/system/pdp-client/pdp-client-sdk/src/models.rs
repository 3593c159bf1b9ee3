//! Domain models for the PDP client.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Tenant used when the caller does not scope the check to a specific tenant.
pub const DEFAULT_TENANT: &str = "default";

/// Name of the decision field in PDP responses.
pub const ALLOW_KEY: &str = "allow";

/// The principal whose access is being checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user key, as synced to the PDP.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Extra attributes for ABAC policies.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl User {
    /// Create a user with only a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Add a single attribute.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// URL check request: may `user` perform `http_method` on `url` within `tenant`?
///
/// `context` is an ordered map so the serialized body is stable for equal input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckUrlRequest {
    pub user: User,
    pub url: String,
    pub http_method: String,
    pub tenant: String,
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

impl CheckUrlRequest {
    /// Create a request with an empty context.
    #[must_use]
    pub fn new(
        user: User,
        url: impl Into<String>,
        http_method: impl Into<String>,
        tenant: impl Into<String>,
    ) -> Self {
        Self {
            user,
            url: url.into(),
            http_method: http_method.into(),
            tenant: tenant.into(),
            context: BTreeMap::new(),
        }
    }

    /// Replace the whole context. `None` leaves an empty context.
    #[must_use]
    pub fn with_context(mut self, context: Option<BTreeMap<String, String>>) -> Self {
        self.context = context.unwrap_or_default();
        self
    }

    /// Add one context entry.
    #[must_use]
    pub fn context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Decision returned by the PDP for a URL check.
///
/// `allow` must be present on the wire; a body without it fails to decode
/// instead of silently denying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckUrlResponse {
    pub allow: bool,
    #[serde(default)]
    pub query: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub debug: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub result: bool,
}
