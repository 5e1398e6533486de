//! Storage-account operations
//!
//! Every storage-provider call the walkthrough makes, spoken as ARM REST.
//! Account creation is a long-running operation; the create call polls the
//! provisioning state to completion before returning.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use super::client::ArmClient;
use super::models::{
    CheckNameAvailabilityResult, ListResult, StorageAccount, StorageAccountCreateParameters,
    StorageAccountKey, StorageAccountKeyList, StorageAccountUpdateParameters, Usage,
};
use crate::error::{Result, StorsmokeError};
use crate::utils::network::classify_network_error;

const PROVISIONING_SUCCEEDED: &str = "Succeeded";
const PROVISIONING_POLL_INTERVAL: Duration = Duration::from_secs(5);
const PROVISIONING_POLL_ATTEMPTS: usize = 60;

/// Trait for storage-account operations
#[async_trait]
pub trait StorageAccountOperations: Send + Sync {
    /// Create a storage account and wait for provisioning to finish
    async fn create_storage_account(
        &self,
        resource_group: &str,
        account_name: &str,
        parameters: &StorageAccountCreateParameters,
    ) -> Result<StorageAccount>;

    /// Get the properties of one storage account
    async fn get_storage_account(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<StorageAccount>;

    /// List the storage accounts of one resource group
    async fn list_by_resource_group(&self, resource_group: &str) -> Result<Vec<StorageAccount>>;

    /// List the storage accounts of the subscription
    async fn list_by_subscription(&self) -> Result<Vec<StorageAccount>>;

    /// List the access keys of one storage account
    async fn list_keys(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<Vec<StorageAccountKey>>;

    /// Regenerate one named access key
    async fn regenerate_key(
        &self,
        resource_group: &str,
        account_name: &str,
        key_name: &str,
    ) -> Result<Vec<StorageAccountKey>>;

    /// Update mutable account properties (SKU)
    async fn update_storage_account(
        &self,
        resource_group: &str,
        account_name: &str,
        parameters: &StorageAccountUpdateParameters,
    ) -> Result<StorageAccount>;

    /// Check whether an account name is still available
    async fn check_name_availability(&self, account_name: &str)
        -> Result<CheckNameAvailabilityResult>;

    /// List the storage usage counters of the subscription
    async fn list_usage(&self) -> Result<Vec<Usage>>;
}

/// ARM REST implementation of storage-account operations
pub struct ArmStorageAccountOperations {
    client: ArmClient,
}

impl ArmStorageAccountOperations {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    fn account_path(&self, resource_group: &str, account_name: &str) -> String {
        self.client.subscription_path(&format!(
            "/resourceGroups/{}/providers/Microsoft.Storage/storageAccounts/{}",
            resource_group, account_name
        ))
    }

    fn storage_api_version(&self) -> &'static str {
        self.client.api_versions().storage
    }

    async fn parse_failure(&self, response: reqwest::Response) -> StorsmokeError {
        let status_code = response.status().as_u16();
        let error_body = response.text().await.unwrap_or_default();
        self.client.parse_arm_error(status_code, &error_body)
    }

    /// Poll the account until its provisioning state settles
    async fn wait_for_provisioning(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<StorageAccount> {
        for attempt in 0..PROVISIONING_POLL_ATTEMPTS {
            let account = self.get_storage_account(resource_group, account_name).await?;
            let state = account
                .properties
                .as_ref()
                .and_then(|p| p.provisioning_state.clone())
                .unwrap_or_default();

            debug!(
                account = account_name,
                state = %state,
                attempt,
                "Polling storage account provisioning state"
            );

            match state.as_str() {
                PROVISIONING_SUCCEEDED => return Ok(account),
                "Failed" | "Canceled" => {
                    return Err(StorsmokeError::arm_api(format!(
                        "Storage account '{}' provisioning ended in state '{}'",
                        account_name, state
                    )))
                }
                _ => tokio::time::sleep(PROVISIONING_POLL_INTERVAL).await,
            }
        }

        Err(StorsmokeError::Timeout)
    }
}

#[async_trait]
impl StorageAccountOperations for ArmStorageAccountOperations {
    async fn create_storage_account(
        &self,
        resource_group: &str,
        account_name: &str,
        parameters: &StorageAccountCreateParameters,
    ) -> Result<StorageAccount> {
        let headers = self.client.create_headers().await?;
        let path = self.account_path(resource_group, account_name);
        let url = self.client.build_url(&path, self.storage_api_version());

        info!(
            "Creating storage account: {} with parameters:\n{}",
            account_name,
            serde_json::to_string_pretty(parameters)?
        );

        let response = self
            .client
            .http_client()
            .put(&url)
            .headers(headers)
            .json(parameters)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        if !response.status().is_success() {
            return Err(self.parse_failure(response).await);
        }

        // A 202 carries no body; the settled account comes from polling.
        self.wait_for_provisioning(resource_group, account_name).await
    }

    async fn get_storage_account(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<StorageAccount> {
        let headers = self.client.create_headers().await?;
        let path = self.account_path(resource_group, account_name);
        let url = self.client.build_url(&path, self.storage_api_version());

        let response = self
            .client
            .http_client()
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        if !response.status().is_success() {
            return Err(self.parse_failure(response).await);
        }

        response.json::<StorageAccount>().await.map_err(|e| {
            StorsmokeError::serialization(format!("Failed to parse storage account response: {}", e))
        })
    }

    async fn list_by_resource_group(&self, resource_group: &str) -> Result<Vec<StorageAccount>> {
        let headers = self.client.create_headers().await?;
        let path = self.client.subscription_path(&format!(
            "/resourceGroups/{}/providers/Microsoft.Storage/storageAccounts",
            resource_group
        ));
        let url = self.client.build_url(&path, self.storage_api_version());

        info!("Listing storage accounts in the resource group: {}", resource_group);

        let response = self
            .client
            .http_client()
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        if !response.status().is_success() {
            return Err(self.parse_failure(response).await);
        }

        let result: ListResult<StorageAccount> = response.json().await.map_err(|e| {
            StorsmokeError::serialization(format!("Failed to parse account list response: {}", e))
        })?;
        Ok(result.value)
    }

    async fn list_by_subscription(&self) -> Result<Vec<StorageAccount>> {
        let headers = self.client.create_headers().await?;
        let path = self
            .client
            .subscription_path("/providers/Microsoft.Storage/storageAccounts");
        let url = self.client.build_url(&path, self.storage_api_version());

        info!("Listing storage accounts in the current subscription.");

        let response = self
            .client
            .http_client()
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        if !response.status().is_success() {
            return Err(self.parse_failure(response).await);
        }

        let result: ListResult<StorageAccount> = response.json().await.map_err(|e| {
            StorsmokeError::serialization(format!("Failed to parse account list response: {}", e))
        })?;
        Ok(result.value)
    }

    async fn list_keys(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<Vec<StorageAccountKey>> {
        let headers = self.client.create_headers().await?;
        let path = format!("{}/listKeys", self.account_path(resource_group, account_name));
        let url = self.client.build_url(&path, self.storage_api_version());

        info!("Listing storage account keys for account: {}", account_name);

        let response = self
            .client
            .http_client()
            .post(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        if !response.status().is_success() {
            return Err(self.parse_failure(response).await);
        }

        let result: StorageAccountKeyList = response.json().await.map_err(|e| {
            StorsmokeError::serialization(format!("Failed to parse key list response: {}", e))
        })?;
        Ok(result.keys)
    }

    async fn regenerate_key(
        &self,
        resource_group: &str,
        account_name: &str,
        key_name: &str,
    ) -> Result<Vec<StorageAccountKey>> {
        let headers = self.client.create_headers().await?;
        let path = format!(
            "{}/regenerateKey",
            self.account_path(resource_group, account_name)
        );
        let url = self.client.build_url(&path, self.storage_api_version());

        info!("Regenerating storage account keys for account: {}", account_name);

        let response = self
            .client
            .http_client()
            .post(&url)
            .headers(headers)
            .json(&json!({ "keyName": key_name }))
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        if !response.status().is_success() {
            return Err(self.parse_failure(response).await);
        }

        let result: StorageAccountKeyList = response.json().await.map_err(|e| {
            StorsmokeError::serialization(format!("Failed to parse key list response: {}", e))
        })?;
        Ok(result.keys)
    }

    async fn update_storage_account(
        &self,
        resource_group: &str,
        account_name: &str,
        parameters: &StorageAccountUpdateParameters,
    ) -> Result<StorageAccount> {
        let headers = self.client.create_headers().await?;
        let path = self.account_path(resource_group, account_name);
        let url = self.client.build_url(&path, self.storage_api_version());

        info!(
            "Updating storage account: {} with parameters:\n{}",
            account_name,
            serde_json::to_string_pretty(parameters)?
        );

        let response = self
            .client
            .http_client()
            .patch(&url)
            .headers(headers)
            .json(parameters)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        if !response.status().is_success() {
            return Err(self.parse_failure(response).await);
        }

        response.json::<StorageAccount>().await.map_err(|e| {
            StorsmokeError::serialization(format!("Failed to parse storage account response: {}", e))
        })
    }

    async fn check_name_availability(
        &self,
        account_name: &str,
    ) -> Result<CheckNameAvailabilityResult> {
        let headers = self.client.create_headers().await?;
        let path = self
            .client
            .subscription_path("/providers/Microsoft.Storage/checkNameAvailability");
        let url = self.client.build_url(&path, self.storage_api_version());

        info!("Checking if the storage account name '{}' is available.", account_name);

        let body = json!({
            "name": account_name,
            "type": "Microsoft.Storage/storageAccounts"
        });

        let response = self
            .client
            .http_client()
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        if !response.status().is_success() {
            return Err(self.parse_failure(response).await);
        }

        response.json::<CheckNameAvailabilityResult>().await.map_err(|e| {
            StorsmokeError::serialization(format!(
                "Failed to parse name availability response: {}",
                e
            ))
        })
    }

    async fn list_usage(&self) -> Result<Vec<Usage>> {
        let headers = self.client.create_headers().await?;
        let path = self
            .client
            .subscription_path("/providers/Microsoft.Storage/usages");
        let url = self.client.build_url(&path, self.storage_api_version());

        info!("Listing usage for storage accounts in the current subscription.");

        let response = self
            .client
            .http_client()
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        if !response.status().is_success() {
            return Err(self.parse_failure(response).await);
        }

        let result: ListResult<Usage> = response.json().await.map_err(|e| {
            StorsmokeError::serialization(format!("Failed to parse usage list response: {}", e))
        })?;
        Ok(result.value)
    }
}
