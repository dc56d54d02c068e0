//! Tenant/customer identity and the authorization headers derived from it

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Header carrying the tenant id; present on every request
pub const TENANT_ID_HEADER: &str = "x-tenant-id";

/// Header carrying the customer id; only sent when a customer is given
pub const CUSTOMER_ID_HEADER: &str = "x-customer-id";

/// Header asserting the role the request is made under
pub const AUTH_ROLES_HEADER: &str = "x-auth-request-roles";

/// Role asserted towards the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthRole {
    /// Tenant-wide administrative access
    Admin,
    /// Access scoped to a single customer
    Customer,
}

impl AuthRole {
    /// Value sent in `x-auth-request-roles`
    pub fn header_value(&self) -> &'static str {
        match self {
            AuthRole::Admin => "role:admin",
            AuthRole::Customer => "role:customer",
        }
    }
}

impl fmt::Display for AuthRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_value())
    }
}

/// Who a registry call is made on behalf of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestIdentity {
    /// Tenant id
    pub tenant_id: String,
    /// Customer id within the tenant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

impl RequestIdentity {
    /// Identity acting for the whole tenant
    pub fn tenant(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            customer_id: None,
        }
    }

    /// Identity acting for one customer of a tenant
    pub fn customer(tenant_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            customer_id: Some(customer_id.into()),
        }
    }

    /// Customer id, with an empty string treated as absent
    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Role asserted when creating things
    pub fn role(&self) -> AuthRole {
        if self.customer_id().is_some() {
            AuthRole::Customer
        } else {
            AuthRole::Admin
        }
    }

    /// Headers for a create call: tenant, optional customer and derived role
    pub fn create_headers(&self) -> RegistryResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(customer_id) = self.customer_id() {
            insert(&mut headers, CUSTOMER_ID_HEADER, customer_id)?;
        }
        insert(&mut headers, TENANT_ID_HEADER, &self.tenant_id)?;
        insert(&mut headers, AUTH_ROLES_HEADER, self.role().header_value())?;
        Ok(headers)
    }
}

/// Headers for a delete call: tenant and the admin role, whatever the caller's customer
pub fn delete_headers(tenant_id: &str) -> RegistryResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    insert(&mut headers, TENANT_ID_HEADER, tenant_id)?;
    insert(&mut headers, AUTH_ROLES_HEADER, AuthRole::Admin.header_value())?;
    Ok(headers)
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) -> RegistryResult<()> {
    let header_value = HeaderValue::from_str(value).map_err(|_| RegistryError::InvalidHeader {
        name,
        value: value.to_string(),
    })?;
    headers.insert(HeaderName::from_static(name), header_value);
    Ok(())
}
