//! Registry of logical policy-check operations.
//!
//! Each [`PolicyOperation`] has exactly one [`PolicyOperationDescriptor`]
//! holding its native sidecar path and its OPA-style path. The OPA path is
//! derived from the dotted policy package name (`permit.allowed_url` becomes
//! `permit/allowed_url`). The table is built once on first use and is
//! read-only afterwards.

use std::fmt;
use std::sync::LazyLock;

/// Logical policy-check operation exposed by a PDP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyOperation {
    /// Single `allowed` check.
    Main,
    /// Bulk `allowed` checks.
    Bulk,
    /// `allowed` check across all tenants.
    AllTenants,
    /// Permissions of a user.
    UserPermissions,
    /// URL-based check.
    AllowedUrl,
}

impl PolicyOperation {
    /// All operations, in registry order.
    pub const ALL: [Self; 5] = [
        Self::Main,
        Self::Bulk,
        Self::AllTenants,
        Self::UserPermissions,
        Self::AllowedUrl,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Main => 0,
            Self::Bulk => 1,
            Self::AllTenants => 2,
            Self::UserPermissions => 3,
            Self::AllowedUrl => 4,
        }
    }

    /// Dotted policy package name.
    #[must_use]
    pub const fn package(self) -> &'static str {
        match self {
            Self::Main => "permit.root",
            Self::Bulk => "permit.bulk",
            Self::AllTenants => "permit.all_tenants",
            Self::UserPermissions => "permit.user_permissions",
            Self::AllowedUrl => "permit.allowed_url",
        }
    }

    const fn sidecar_path(self) -> &'static str {
        match self {
            Self::Main => "/allowed",
            Self::Bulk => "/allowed/bulk",
            Self::AllTenants => "/allowed/all-tenants",
            Self::UserPermissions => "/user-permissions",
            Self::AllowedUrl => "/allowed_url",
        }
    }

    /// Registry entry for this operation.
    #[must_use]
    pub fn descriptor(self) -> &'static PolicyOperationDescriptor {
        &REGISTRY[self.index()]
    }
}

impl fmt::Display for PolicyOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package())
    }
}

/// Wire paths of one policy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyOperationDescriptor {
    pub operation: PolicyOperation,
    /// Path on the native sidecar, e.g. `/allowed_url`.
    pub sidecar_path: &'static str,
    /// Slash-separated package path on an OPA-style engine, e.g. `permit/allowed_url`.
    pub opa_path: String,
}

static REGISTRY: LazyLock<Vec<PolicyOperationDescriptor>> = LazyLock::new(|| {
    PolicyOperation::ALL
        .iter()
        .map(|&operation| PolicyOperationDescriptor {
            operation,
            sidecar_path: operation.sidecar_path(),
            opa_path: operation.package().replace('.', "/"),
        })
        .collect()
});
