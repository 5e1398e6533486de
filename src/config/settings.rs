//! Run configuration loaded from environment variables
//!
//! Both variants validate all of their required variables up front and
//! report every missing name in a single error, in the order checked.
//! Nothing here touches the network.

use serde::Serialize;
use std::env;

use crate::error::{Result, StorsmokeError};

/// Default region for the public-cloud walkthrough
pub const DEFAULT_LOCATION: &str = "westus";

/// Configuration for a run against the Azure public cloud
#[derive(Debug, Clone, Serialize)]
pub struct PublicRunConfig {
    pub client_id: String,
    pub domain: String,
    #[serde(skip_serializing)]
    pub secret: String,
    pub subscription_id: String,
    pub location: String,
}

impl PublicRunConfig {
    /// Required environment variables, in the order they are checked
    pub const REQUIRED_VARS: [&'static str; 4] = [
        "CLIENT_ID",
        "DOMAIN",
        "APPLICATION_SECRET",
        "AZURE_SUBSCRIPTION_ID",
    ];

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an injected variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = require_all(&Self::REQUIRED_VARS, lookup)?;
        let [client_id, domain, secret, subscription_id] = values;

        Ok(Self {
            client_id,
            domain,
            secret,
            subscription_id,
            location: DEFAULT_LOCATION.to_string(),
        })
    }
}

/// Configuration for a run against an Azure Stack / private-cloud endpoint
#[derive(Debug, Clone, Serialize)]
pub struct HybridRunConfig {
    pub client_id: String,
    pub tenant_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub subscription_id: String,
    pub arm_endpoint: String,
    pub location: String,
}

impl HybridRunConfig {
    /// Required environment variables, in the order they are checked
    pub const REQUIRED_VARS: [&'static str; 6] = [
        "CLIENT_ID",
        "TENANT_ID",
        "CLIENT_SECRET",
        "SUBSCRIPTION_ID",
        "ARM_ENDPOINT",
        "LOCATION",
    ];

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an injected variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = require_all(&Self::REQUIRED_VARS, lookup)?;
        let [client_id, tenant_id, client_secret, subscription_id, arm_endpoint, location] = values;

        Ok(Self {
            client_id,
            tenant_id,
            client_secret,
            subscription_id,
            arm_endpoint,
            location,
        })
    }
}

/// Resolve every named variable, collecting all missing names before failing
fn require_all<const N: usize, F>(names: &[&str; N], lookup: F) -> Result<[String; N]>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = Vec::new();
    let mut values = Vec::with_capacity(N);

    for name in names {
        match lookup(name).filter(|v| !v.is_empty()) {
            Some(value) => values.push(value),
            None => missing.push((*name).to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(StorsmokeError::MissingEnvironment(missing));
    }

    // values holds exactly N entries when nothing is missing
    values
        .try_into()
        .map_err(|_| StorsmokeError::config("environment variable lookup mismatch"))
}
