//! Chained credential resolution in fixed priority order

use async_trait::async_trait;
use std::sync::Arc;

use super::{
    AmbientStrategy, InstalledFlowStrategy, OAuthClient, ServiceAccountStrategy, TokenFileStrategy,
};
use crate::config::{CredentialsConfig, DriveConfig};
use crate::domain::credentials::{
    AuthorizationFlow, CredentialResolver, CredentialStrategy, Credentials, TokenStore,
};
use crate::domain::DomainError;

/// Tries each strategy in priority order; the first success wins. A
/// strategy failure falls through to the next tier; exhausting every tier
/// is a fatal, user-visible condition and is not retried.
#[derive(Debug)]
pub struct ChainedCredentialResolver {
    strategies: Vec<Arc<dyn CredentialStrategy>>,
}

impl ChainedCredentialResolver {
    pub fn new(strategies: Vec<Arc<dyn CredentialStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn builder() -> ChainedCredentialResolverBuilder {
        ChainedCredentialResolverBuilder::new()
    }

    /// Assemble the standard four-tier chain from configuration:
    /// service-account key, cached token, ambient default, interactive
    /// flow (only when a flow collaborator is configured).
    pub fn from_config(
        credentials: &CredentialsConfig,
        drive: &DriveConfig,
        store: Arc<dyn TokenStore>,
        flow: Option<Arc<dyn AuthorizationFlow>>,
    ) -> Self {
        let oauth = OAuthClient::new(drive.token_url.clone());

        let mut builder = Self::builder()
            .with_strategy(Arc::new(ServiceAccountStrategy::new(
                credentials.service_account_key.clone(),
                oauth.clone(),
            )))
            .with_strategy(Arc::new(TokenFileStrategy::new(store.clone(), oauth)))
            .with_strategy(Arc::new(AmbientStrategy::new(
                drive.metadata_token_url.clone(),
            )));

        if let Some(flow) = flow {
            builder = builder.with_strategy(Arc::new(InstalledFlowStrategy::new(flow, store)));
        }

        builder.build()
    }
}

#[async_trait]
impl CredentialResolver for ChainedCredentialResolver {
    async fn resolve(
        &self,
        acting_user: &str,
        scopes: &[String],
    ) -> Result<Credentials, DomainError> {
        for strategy in &self.strategies {
            if !strategy.available(acting_user).await {
                continue;
            }

            match strategy.resolve(acting_user, scopes).await {
                Ok(credentials) => {
                    tracing::debug!(
                        strategy = strategy.strategy_name(),
                        acting_user,
                        "credentials resolved"
                    );
                    return Ok(credentials);
                }
                Err(e) => {
                    tracing::debug!(
                        strategy = strategy.strategy_name(),
                        acting_user,
                        error = %e,
                        "strategy failed, trying next"
                    );
                    continue;
                }
            }
        }

        Err(DomainError::credentials_unavailable(format!(
            "no credential strategy succeeded for '{}'",
            acting_user
        )))
    }
}

/// Builder for ChainedCredentialResolver
pub struct ChainedCredentialResolverBuilder {
    strategies: Vec<Arc<dyn CredentialStrategy>>,
}

impl ChainedCredentialResolverBuilder {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn CredentialStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn build(self) -> ChainedCredentialResolver {
        ChainedCredentialResolver::new(self.strategies)
    }
}

impl Default for ChainedCredentialResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
