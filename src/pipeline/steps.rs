//! The walkthrough's step list
//!
//! Builds the ordered provisioning sequence over the ARM operation traits.
//! The hybrid variant runs the same list minus the usage listing, which its
//! profile does not expose at subscription scope.

use serde_json::to_value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::arm::models::{Sku, StorageAccountCreateParameters, StorageAccountUpdateParameters};
use crate::arm::{ResourceGroupOperations, StorageAccountOperations};
use crate::utils::naming::NameGenerator;

use super::runner::Step;

const RESOURCE_GROUP_PREFIX: &str = "testrg";
const STORAGE_ACCOUNT_PREFIX: &str = "testacc";
const CREATE_SKU: &str = "Standard_LRS";
const UPDATE_SKU: &str = "Standard_GRS";
const REGENERATED_KEY: &str = "key1";

/// The names and parameters of one provisioning run
#[derive(Debug, Clone)]
pub struct ProvisioningPlan {
    pub resource_group: String,
    pub storage_account: String,
    pub location: String,
}

impl ProvisioningPlan {
    /// Generate fresh ephemeral names for one run
    pub fn generate(names: &mut NameGenerator, location: &str) -> Self {
        Self {
            resource_group: names.next(RESOURCE_GROUP_PREFIX),
            storage_account: names.next(STORAGE_ACCOUNT_PREFIX),
            location: location.to_string(),
        }
    }

    fn create_parameters(&self) -> StorageAccountCreateParameters {
        let mut tags = HashMap::new();
        tags.insert("tag1".to_string(), "val1".to_string());
        tags.insert("tag2".to_string(), "val2".to_string());

        StorageAccountCreateParameters {
            location: self.location.clone(),
            sku: Sku::new(CREATE_SKU),
            kind: "Storage".to_string(),
            tags,
        }
    }
}

/// Build the ordered step list of the walkthrough
pub fn build_steps(
    resources: Arc<dyn ResourceGroupOperations>,
    storage: Arc<dyn StorageAccountOperations>,
    plan: &ProvisioningPlan,
    include_usage: bool,
) -> Vec<Step<'static>> {
    let mut steps = Vec::new();

    {
        let resources = resources.clone();
        let plan = plan.clone();
        steps.push(Step::new(
            "create resource group",
            Box::pin(async move {
                let group = resources
                    .create_resource_group(&plan.resource_group, &plan.location)
                    .await?;
                Ok(to_value(group)?)
            }),
        ));
    }

    {
        let storage = storage.clone();
        let plan = plan.clone();
        steps.push(Step::new(
            "create storage account",
            Box::pin(async move {
                let account = storage
                    .create_storage_account(
                        &plan.resource_group,
                        &plan.storage_account,
                        &plan.create_parameters(),
                    )
                    .await?;
                Ok(to_value(account)?)
            }),
        ));
    }

    {
        let storage = storage.clone();
        let plan = plan.clone();
        steps.push(Step::new(
            "get storage account properties",
            Box::pin(async move {
                let account = storage
                    .get_storage_account(&plan.resource_group, &plan.storage_account)
                    .await?;
                Ok(to_value(account)?)
            }),
        ));
    }

    {
        let storage = storage.clone();
        let plan = plan.clone();
        steps.push(Step::new(
            "list storage accounts by resource group",
            Box::pin(async move {
                let accounts = storage.list_by_resource_group(&plan.resource_group).await?;
                Ok(to_value(accounts)?)
            }),
        ));
    }

    {
        let storage = storage.clone();
        steps.push(Step::new(
            "list storage accounts in subscription",
            Box::pin(async move {
                let accounts = storage.list_by_subscription().await?;
                Ok(to_value(accounts)?)
            }),
        ));
    }

    {
        let storage = storage.clone();
        let plan = plan.clone();
        steps.push(Step::new(
            "list storage account keys",
            Box::pin(async move {
                let keys = storage
                    .list_keys(&plan.resource_group, &plan.storage_account)
                    .await?;
                Ok(to_value(keys)?)
            }),
        ));
    }

    {
        let storage = storage.clone();
        let plan = plan.clone();
        steps.push(Step::new(
            "regenerate storage account key",
            Box::pin(async move {
                let keys = storage
                    .regenerate_key(&plan.resource_group, &plan.storage_account, REGENERATED_KEY)
                    .await?;
                Ok(to_value(keys)?)
            }),
        ));
    }

    {
        let storage = storage.clone();
        let plan = plan.clone();
        steps.push(Step::new(
            "update storage account sku",
            Box::pin(async move {
                let parameters = StorageAccountUpdateParameters {
                    sku: Sku::new(UPDATE_SKU),
                };
                let account = storage
                    .update_storage_account(&plan.resource_group, &plan.storage_account, &parameters)
                    .await?;
                Ok(to_value(account)?)
            }),
        ));
    }

    {
        let storage = storage.clone();
        let plan = plan.clone();
        steps.push(Step::new(
            "check storage account name availability",
            Box::pin(async move {
                let availability = storage.check_name_availability(&plan.storage_account).await?;
                Ok(to_value(availability)?)
            }),
        ));
    }

    if include_usage {
        steps.push(Step::new(
            "list subscription usage",
            Box::pin(async move {
                let usage = storage.list_usage().await?;
                Ok(to_value(usage)?)
            }),
        ));
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_generates_prefixed_names() {
        let mut names = NameGenerator::new();
        let plan = ProvisioningPlan::generate(&mut names, "westus");

        assert!(plan.resource_group.starts_with(RESOURCE_GROUP_PREFIX));
        assert!(plan.storage_account.starts_with(STORAGE_ACCOUNT_PREFIX));
        assert_eq!(plan.location, "westus");
    }

    #[test]
    fn test_create_parameters_shape() {
        let mut names = NameGenerator::new();
        let plan = ProvisioningPlan::generate(&mut names, "westus");
        let params = plan.create_parameters();

        assert_eq!(params.sku.name, CREATE_SKU);
        assert_eq!(params.kind, "Storage");
        assert_eq!(params.tags.len(), 2);
    }
}
