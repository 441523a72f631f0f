use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC.
///
/// Roles are opaque strings at this layer; the mapping from role to granted
/// permissions lives in [`crate::policy`]. The school deployments ship four
/// well-known roles (see the constructors below) but nothing stops a caller
/// from defining more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full access, including access-control administration.
    pub fn admin() -> Self {
        Self::new("admin")
    }

    /// Fee billing, vouchers, approvals, financial reports.
    pub fn accountant() -> Self {
        Self::new("accountant")
    }

    /// Student records and admissions.
    pub fn registrar() -> Self {
        Self::new("registrar")
    }

    /// Read-only front desk access.
    pub fn clerk() -> Self {
        Self::new("clerk")
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
