//! Shared ARM REST client plumbing
//!
//! Token-bearing headers, endpoint-rooted URL building, and error-body
//! parsing shared by the resource and storage operation sets.

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

use crate::auth::ArmAuthProvider;
use crate::environment::CloudEnvironment;
use crate::error::{Result, StorsmokeError};
use crate::utils::network::{create_http_client, NetworkConfig};

/// API versions used against each resource provider
#[derive(Debug, Clone, Copy)]
pub struct ArmApiVersions {
    pub resources: &'static str,
    pub storage: &'static str,
}

impl ArmApiVersions {
    /// Versions used against the Azure public cloud
    pub const PUBLIC: Self = Self {
        resources: "2021-04-01",
        storage: "2022-09-01",
    };

    /// Versions of the 2019-03-01 hybrid profile supported by Azure Stack
    pub const HYBRID: Self = Self {
        resources: "2018-05-01",
        storage: "2017-10-01",
    };
}

/// Authenticated client rooted at one ARM endpoint and subscription
#[derive(Clone)]
pub struct ArmClient {
    auth_provider: Arc<dyn ArmAuthProvider>,
    http_client: Client,
    endpoint: String,
    subscription_id: String,
    api_versions: ArmApiVersions,
}

impl ArmClient {
    pub fn new(
        auth_provider: Arc<dyn ArmAuthProvider>,
        environment: &CloudEnvironment,
        subscription_id: String,
        api_versions: ArmApiVersions,
    ) -> Result<Self> {
        let network_config = NetworkConfig::default();
        let http_client = create_http_client(&network_config)?;

        Ok(Self {
            auth_provider,
            http_client,
            endpoint: environment.management_endpoint.trim_end_matches('/').to_string(),
            subscription_id,
            api_versions,
        })
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn api_versions(&self) -> ArmApiVersions {
        self.api_versions
    }

    /// Create authorized headers for the ARM REST API
    pub async fn create_headers(&self) -> Result<HeaderMap> {
        let token = self.auth_provider.get_management_token().await?;
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            format!("Bearer {}", token).parse().map_err(|e| {
                StorsmokeError::authentication(format!("Invalid token format: {}", e))
            })?,
        );
        headers.insert("Content-Type", "application/json".parse().unwrap());
        Ok(headers)
    }

    /// Build a URL under the ARM endpoint with an explicit api-version
    pub fn build_url(&self, path: &str, api_version: &str) -> String {
        format!("{}{}?api-version={}", self.endpoint, path, api_version)
    }

    /// Subscription-scoped resource path
    pub fn subscription_path(&self, suffix: &str) -> String {
        format!("/subscriptions/{}{}", self.subscription_id, suffix)
    }

    /// Parse an ARM error response body
    pub fn parse_arm_error(&self, status: u16, body: &str) -> StorsmokeError {
        if let Ok(error_json) = serde_json::from_str::<Value>(body) {
            if let Some(error) = error_json.get("error") {
                if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
                    return StorsmokeError::arm_api(format!("HTTP {}: {}", status, message));
                }
            }
        }
        StorsmokeError::arm_api(format!("HTTP {}: {}", status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticToken;

    #[async_trait::async_trait]
    impl ArmAuthProvider for StaticToken {
        async fn get_token(&self, _scopes: &[&str]) -> Result<azure_core::auth::AccessToken> {
            Err(StorsmokeError::authentication("not used"))
        }

        async fn get_management_token(&self) -> Result<String> {
            Ok("token".to_string())
        }
    }

    fn client() -> ArmClient {
        ArmClient::new(
            Arc::new(StaticToken),
            &CloudEnvironment::public_cloud(),
            "sub-1".to_string(),
            ArmApiVersions::PUBLIC,
        )
        .unwrap()
    }

    #[test]
    fn test_build_url() {
        let url = client().build_url("/subscriptions/sub-1/resourcegroups/rg1", "2021-04-01");
        assert_eq!(
            url,
            "https://management.azure.com/subscriptions/sub-1/resourcegroups/rg1?api-version=2021-04-01"
        );
    }

    #[test]
    fn test_parse_arm_error_extracts_message() {
        let body = r#"{"error":{"code":"Conflict","message":"name already taken"}}"#;
        let err = client().parse_arm_error(409, body);
        assert!(err.to_string().contains("HTTP 409"));
        assert!(err.to_string().contains("name already taken"));
    }

    #[test]
    fn test_parse_arm_error_falls_back_to_body() {
        let err = client().parse_arm_error(500, "boom");
        assert!(err.to_string().contains("boom"));
    }
}
