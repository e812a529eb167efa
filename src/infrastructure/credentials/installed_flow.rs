//! Interactive authorization strategy (tier 4)

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::credentials::{AuthorizationFlow, CredentialStrategy, Credentials, TokenStore};
use crate::domain::DomainError;

/// Last-resort tier: run the interactive authorization flow (delegated to
/// the [`AuthorizationFlow`] collaborator, which blocks on a local
/// callback) and persist the obtained token for subsequent requests.
#[derive(Debug)]
pub struct InstalledFlowStrategy {
    flow: Arc<dyn AuthorizationFlow>,
    store: Arc<dyn TokenStore>,
}

impl InstalledFlowStrategy {
    pub fn new(flow: Arc<dyn AuthorizationFlow>, store: Arc<dyn TokenStore>) -> Self {
        Self { flow, store }
    }
}

#[async_trait]
impl CredentialStrategy for InstalledFlowStrategy {
    async fn available(&self, _acting_user: &str) -> bool {
        true
    }

    async fn resolve(
        &self,
        acting_user: &str,
        scopes: &[String],
    ) -> Result<Credentials, DomainError> {
        let token = self.flow.authorize(scopes).await?;

        let lock = self.store.user_lock(acting_user).await;
        let _guard = lock.lock().await;
        self.store.save(acting_user, &token).await?;

        tracing::info!(acting_user, "persisted token from interactive authorization");
        Ok(token.to_credentials())
    }

    fn strategy_name(&self) -> &'static str {
        "installed_flow"
    }
}
