//! CLI commands and argument parsing
//!
//! Two variants of the same walkthrough: `public` runs against the Azure
//! public cloud, `hybrid` against a caller-supplied Azure Stack ARM
//! endpoint discovered at startup. Neither takes further flags; everything
//! comes from environment variables.

use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};

use crate::arm::{
    ArmApiVersions, ArmClient, ArmResourceGroupOperations, ArmStorageAccountOperations,
};
use crate::auth::{ArmAuthProvider, ClientSecretProvider};
use crate::config::{HybridRunConfig, PublicRunConfig};
use crate::environment::{discover_environment, CloudEnvironment};
use crate::error::Result;
use crate::pipeline::{build_steps, cleanup_hint, execute, ProvisioningPlan};
use crate::utils::naming::NameGenerator;
use crate::utils::network::{create_http_client, NetworkConfig};

#[derive(Parser)]
#[command(name = "storsmoke")]
#[command(about = "Walk through Azure Storage management-plane provisioning")]
#[command(version, author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the walkthrough against the Azure public cloud
    Public,
    /// Run the walkthrough against an Azure Stack ARM endpoint
    Hybrid,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Public => run_public().await,
            Commands::Hybrid => run_hybrid().await,
        }
    }
}

async fn run_public() -> Result<()> {
    let config = PublicRunConfig::from_env()?;
    let environment = CloudEnvironment::public_cloud();

    let mut names = NameGenerator::new();
    let plan = ProvisioningPlan::generate(&mut names, &config.location);

    let auth_provider = match ClientSecretProvider::new(
        &environment,
        config.client_id.clone(),
        config.secret.clone(),
        &config.domain,
    ) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!("Authentication setup failed: {}", e);
            return Ok(());
        }
    };

    // Exchange credentials up front; a bad principal never starts the pipeline.
    if let Err(e) = auth_provider.get_management_token().await {
        error!("Authentication failed: {}", e);
        return Ok(());
    }

    let client = ArmClient::new(
        auth_provider,
        &environment,
        config.subscription_id.clone(),
        ArmApiVersions::PUBLIC,
    )?;

    run_pipeline(client, plan, true).await
}

async fn run_hybrid() -> Result<()> {
    let config = HybridRunConfig::from_env()?;

    let http_client = create_http_client(&NetworkConfig::default())?;
    let environment = match discover_environment(&http_client, &config.arm_endpoint).await {
        Ok(environment) => environment,
        Err(e) => {
            error!("Endpoint discovery failed: {}", e);
            return Ok(());
        }
    };
    info!(
        cloud = %environment.name,
        adfs = environment.adfs,
        storage_suffix = %environment.storage_endpoint_suffix,
        "Derived cloud environment"
    );

    let mut names = NameGenerator::new();
    let plan = ProvisioningPlan::generate(&mut names, &config.location);

    let auth_provider = match ClientSecretProvider::new(
        &environment,
        config.client_id.clone(),
        config.client_secret.clone(),
        &config.tenant_id,
    ) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!("Authentication setup failed: {}", e);
            return Ok(());
        }
    };

    if let Err(e) = auth_provider.get_management_token().await {
        error!("Authentication failed: {}", e);
        return Ok(());
    }

    let client = ArmClient::new(
        auth_provider,
        &environment,
        config.subscription_id.clone(),
        ArmApiVersions::HYBRID,
    )?;

    run_pipeline(client, plan, false).await
}

/// Run the step list and always print the cleanup follow-up
async fn run_pipeline(client: ArmClient, plan: ProvisioningPlan, include_usage: bool) -> Result<()> {
    let resources = Arc::new(ArmResourceGroupOperations::new(client.clone()));
    let storage = Arc::new(ArmStorageAccountOperations::new(client));

    let steps = build_steps(resources, storage, &plan, include_usage);
    let report = execute(steps).await;

    if let Some(failure) = &report.failure {
        error!(
            "Pipeline aborted after {}/{} steps: {}",
            report.completed, report.total, failure
        );
    } else {
        info!("All {} steps completed.", report.total);
    }

    println!("\n###### Exit ######\n");
    println!(
        "{}",
        cleanup_hint(&plan.resource_group, &plan.storage_account)
    );

    Ok(())
}
