//! Cloud environment record
//!
//! The environment is carried as a plain value and handed to the auth
//! provider and ARM clients directly; there is no process-global registry.

use serde::Serialize;

/// Endpoints and authentication parameters of a target cloud
#[derive(Debug, Clone, Serialize)]
pub struct CloudEnvironment {
    pub name: String,
    /// Base login endpoint, without a tenant segment
    pub authority_host: String,
    /// ARM endpoint all management calls are rooted at
    pub management_endpoint: String,
    /// Resource the access token is requested for
    pub token_audience: String,
    pub portal_endpoint: String,
    pub gallery_endpoint: String,
    pub graph_endpoint: String,
    pub storage_endpoint_suffix: String,
    pub key_vault_dns_suffix: String,
    /// Disabled when the authority is an ADFS federation endpoint
    pub validate_authority: bool,
    pub adfs: bool,
}

impl CloudEnvironment {
    /// The well-known Azure public cloud
    pub fn public_cloud() -> Self {
        Self {
            name: "AzureCloud".to_string(),
            authority_host: "https://login.microsoftonline.com".to_string(),
            management_endpoint: "https://management.azure.com".to_string(),
            token_audience: "https://management.azure.com".to_string(),
            portal_endpoint: "https://portal.azure.com".to_string(),
            gallery_endpoint: "https://gallery.azure.com".to_string(),
            graph_endpoint: "https://graph.windows.net".to_string(),
            storage_endpoint_suffix: ".core.windows.net".to_string(),
            key_vault_dns_suffix: ".vault.azure.net".to_string(),
            validate_authority: true,
            adfs: false,
        }
    }

    /// Tenant actually used for authentication; ADFS authorities use the
    /// fixed `adfs` placeholder instead of the configured tenant
    pub fn effective_tenant(&self, configured: &str) -> String {
        if self.adfs {
            "adfs".to_string()
        } else {
            configured.to_string()
        }
    }

    /// OAuth scope for the management plane
    pub fn management_scope(&self) -> String {
        format!("{}/.default", self.token_audience.trim_end_matches('/'))
    }
}
