//! Authentication provider trait and implementation
//!
//! The provider is built from an explicit `CloudEnvironment` record plus the
//! service-principal credentials; the environment is never read from any
//! global state.

use async_trait::async_trait;
use azure_core::auth::{AccessToken, TokenCredential};
use azure_identity::ClientSecretCredential;
use std::sync::Arc;
use tracing::debug;

use crate::environment::CloudEnvironment;
use crate::error::{Result, StorsmokeError};

/// Trait for management-plane authentication providers
#[async_trait]
pub trait ArmAuthProvider: Send + Sync {
    /// Get an access token for the specified scopes
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken>;

    /// Get a bearer token for the environment's management audience
    async fn get_management_token(&self) -> Result<String>;
}

/// Client-credentials (service principal secret) provider
pub struct ClientSecretProvider {
    credential: Arc<ClientSecretCredential>,
    management_scope: String,
}

impl ClientSecretProvider {
    /// Create a provider for `environment` using a service principal secret
    ///
    /// The credential appends the environment's effective tenant (the
    /// literal `adfs` for federation authorities) to the authority host when
    /// it builds the token endpoint.
    pub fn new(
        environment: &CloudEnvironment,
        client_id: String,
        client_secret: String,
        tenant: &str,
    ) -> Result<Self> {
        let effective_tenant = environment.effective_tenant(tenant);
        let authority_url = url::Url::parse(environment.authority_host.trim_end_matches('/'))
            .map_err(|e| StorsmokeError::config(format!("Invalid authority URL: {}", e)))?;

        debug!(
            authority = %authority_url,
            tenant = %effective_tenant,
            validate_authority = environment.validate_authority,
            "Configuring service principal credential"
        );

        let http_client_arc = Arc::new(reqwest::Client::new());
        let credential = Arc::new(ClientSecretCredential::new(
            http_client_arc,
            authority_url,
            effective_tenant,
            client_id,
            client_secret,
        ));

        Ok(Self {
            credential,
            management_scope: environment.management_scope(),
        })
    }
}

#[async_trait]
impl ArmAuthProvider for ClientSecretProvider {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken> {
        let token_response = self
            .credential
            .get_token(scopes)
            .await
            .map_err(|e| StorsmokeError::authentication(format!("Failed to get token: {}", e)))?;

        Ok(token_response)
    }

    async fn get_management_token(&self) -> Result<String> {
        let token = self.get_token(&[self.management_scope.as_str()]).await?;
        Ok(token.token.secret().to_string())
    }
}
