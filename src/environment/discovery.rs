//! Endpoint discovery for hybrid (Azure Stack) clouds
//!
//! One unauthenticated GET against `<arm>/metadata/endpoints?api-version=1.0`
//! yields the endpoints of the target cloud. Failure here aborts the run
//! before any authenticated call is attempted.

use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::models::CloudEnvironment;
use crate::error::{Result, StorsmokeError};
use crate::utils::network::classify_network_error;

const METADATA_API_VERSION: &str = "1.0";

/// Body of the metadata-endpoints response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointMetadata {
    pub gallery_endpoint: String,
    pub graph_endpoint: String,
    #[serde(default)]
    pub portal_endpoint: String,
    pub authentication: AuthenticationMetadata,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationMetadata {
    pub login_endpoint: String,
    #[serde(default)]
    pub audiences: Vec<String>,
}

/// Fetch the endpoint metadata of the cloud behind `arm_endpoint`
pub async fn fetch_endpoint_metadata(
    http_client: &Client,
    arm_endpoint: &str,
) -> Result<EndpointMetadata> {
    let url = format!(
        "{}/metadata/endpoints?api-version={}",
        arm_endpoint.trim_end_matches('/'),
        METADATA_API_VERSION
    );
    info!("Fetching endpoint metadata from {}", url);

    let response = http_client
        .get(&url)
        .send()
        .await
        .map_err(|e| classify_network_error(&e, &url))?;

    if !response.status().is_success() {
        return Err(StorsmokeError::discovery(format!(
            "HTTP {} from {}",
            response.status().as_u16(),
            url
        )));
    }

    response
        .json::<EndpointMetadata>()
        .await
        .map_err(|e| StorsmokeError::discovery(format!("malformed metadata response: {}", e)))
}

/// Derive the full environment record from discovered metadata
///
/// Suffix derivation slices the raw ARM endpoint at its first `.` (keeping
/// the dot). An endpoint without any dot falls back to the whole string;
/// that mirrors the long-standing behavior of the original walkthrough and
/// is pinned by tests, not extended.
pub fn derive_environment(arm_endpoint: &str, metadata: &EndpointMetadata) -> Result<CloudEnvironment> {
    let audience = metadata
        .authentication
        .audiences
        .first()
        .cloned()
        .ok_or_else(|| StorsmokeError::discovery("metadata response carries no audiences"))?;

    let authority = metadata.authentication.login_endpoint.clone();
    let adfs = authority.trim_end_matches('/').ends_with("adfs");

    let endpoint_suffix = match arm_endpoint.find('.') {
        Some(index) => &arm_endpoint[index..],
        None => arm_endpoint,
    };

    Ok(CloudEnvironment {
        name: "AzureStack".to_string(),
        authority_host: authority,
        management_endpoint: arm_endpoint.trim_end_matches('/').to_string(),
        token_audience: audience,
        portal_endpoint: metadata.portal_endpoint.clone(),
        gallery_endpoint: metadata.gallery_endpoint.clone(),
        graph_endpoint: metadata.graph_endpoint.clone(),
        storage_endpoint_suffix: endpoint_suffix.to_string(),
        key_vault_dns_suffix: format!(".vault{}", endpoint_suffix),
        validate_authority: !adfs,
        adfs,
    })
}

/// Discover and derive the hybrid environment in one call
pub async fn discover_environment(
    http_client: &Client,
    arm_endpoint: &str,
) -> Result<CloudEnvironment> {
    let metadata = fetch_endpoint_metadata(http_client, arm_endpoint).await?;
    derive_environment(arm_endpoint, &metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(login_endpoint: &str) -> EndpointMetadata {
        EndpointMetadata {
            gallery_endpoint: "https://gallery.local.azurestack.external".to_string(),
            graph_endpoint: "https://graph.local.azurestack.external".to_string(),
            portal_endpoint: "https://portal.local.azurestack.external".to_string(),
            authentication: AuthenticationMetadata {
                login_endpoint: login_endpoint.to_string(),
                audiences: vec!["https://management.adfs.azurestack.local/abc123".to_string()],
            },
        }
    }

    const ARM: &str = "https://management.local.azurestack.external";

    #[test]
    fn test_aad_environment_keeps_configured_tenant() {
        let env = derive_environment(ARM, &metadata("https://login.microsoftonline.com")).unwrap();
        assert!(!env.adfs);
        assert!(env.validate_authority);
        assert_eq!(env.effective_tenant("contoso.onmicrosoft.com"), "contoso.onmicrosoft.com");
    }

    #[test]
    fn test_adfs_environment_overrides_tenant() {
        let env = derive_environment(ARM, &metadata("https://adfs.local.azurestack.external/adfs")).unwrap();
        assert!(env.adfs);
        assert!(!env.validate_authority);
        assert_eq!(env.effective_tenant("ignored-tenant"), "adfs");
    }

    #[test]
    fn test_adfs_detection_tolerates_trailing_slash() {
        let env = derive_environment(ARM, &metadata("https://adfs.local.azurestack.external/adfs/")).unwrap();
        assert!(env.adfs);
    }

    #[test]
    fn test_suffix_derivation() {
        let env = derive_environment(ARM, &metadata("https://login.microsoftonline.com")).unwrap();
        assert_eq!(env.storage_endpoint_suffix, ".local.azurestack.external");
        assert_eq!(env.key_vault_dns_suffix, ".vault.local.azurestack.external");
    }

    #[test]
    fn test_suffix_derivation_without_dot_falls_back_to_whole_endpoint() {
        let env = derive_environment("https://management", &metadata("https://login.microsoftonline.com"))
            .unwrap();
        assert_eq!(env.storage_endpoint_suffix, "https://management");
        assert_eq!(env.key_vault_dns_suffix, ".vaulthttps://management");
    }

    #[test]
    fn test_empty_audiences_rejected() {
        let mut md = metadata("https://login.microsoftonline.com");
        md.authentication.audiences.clear();
        assert!(derive_environment(ARM, &md).is_err());
    }
}
