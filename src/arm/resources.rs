//! Resource-group operations
//!
//! The walkthrough only needs create-or-update; the generated group is torn
//! down by the external cleanup script.

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::client::ArmClient;
use super::models::ResourceGroup;
use crate::error::{Result, StorsmokeError};
use crate::utils::network::classify_network_error;

/// Trait for resource-group operations
#[async_trait]
pub trait ResourceGroupOperations: Send + Sync {
    /// Create (or update) a resource group
    async fn create_resource_group(&self, name: &str, location: &str) -> Result<ResourceGroup>;
}

/// ARM REST implementation of resource-group operations
pub struct ArmResourceGroupOperations {
    client: ArmClient,
}

impl ArmResourceGroupOperations {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceGroupOperations for ArmResourceGroupOperations {
    async fn create_resource_group(&self, name: &str, location: &str) -> Result<ResourceGroup> {
        let headers = self.client.create_headers().await?;
        let path = self
            .client
            .subscription_path(&format!("/resourcegroups/{}", name));
        let url = self
            .client
            .build_url(&path, self.client.api_versions().resources);

        let body = json!({
            "location": location,
            "tags": { "sampletag": "sampleValue" }
        });

        info!("Creating resource group: {}", name);

        let response = self
            .client
            .http_client()
            .put(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.client.parse_arm_error(status_code, &error_body));
        }

        response.json::<ResourceGroup>().await.map_err(|e| {
            StorsmokeError::serialization(format!("Failed to parse resource group response: {}", e))
        })
    }
}
