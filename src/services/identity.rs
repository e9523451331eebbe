//! Tenant identity resolution.
//!
//! The reserve operation asks this seam who the requesting tenant is. The
//! default implementation answers with a fixed placeholder until a real
//! authentication context is wired in.

/// Resolves the tenant on whose behalf a reservation is made.
pub trait IdentityProvider: Send + Sync {
    fn current_tenant_id(&self) -> String;
}

/// Identity provider that always answers with the same tenant id.
#[derive(Debug, Clone)]
pub struct FixedIdentityProvider {
    tenant_id: String,
}

impl FixedIdentityProvider {
    pub const DEFAULT_TENANT_ID: &'static str = "tenantUserId";

    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
        }
    }
}

impl Default for FixedIdentityProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TENANT_ID)
    }
}

impl IdentityProvider for FixedIdentityProvider {
    fn current_tenant_id(&self) -> String {
        self.tenant_id.clone()
    }
}
