//! Cached token strategy (tier 2): load, refresh in place, persist back

use async_trait::async_trait;
use std::sync::Arc;

use super::oauth::OAuthClient;
use crate::domain::credentials::{CredentialStrategy, Credentials, TokenStore};
use crate::domain::DomainError;

/// Resolves from a previously persisted token blob. An expired token with a
/// refresh token is refreshed against the OAuth endpoint and the refreshed
/// blob is written back; the whole sequence holds the store's per-user lock
/// so concurrent requests for the same acting-user cannot interleave writes.
#[derive(Debug)]
pub struct TokenFileStrategy {
    store: Arc<dyn TokenStore>,
    oauth: OAuthClient,
}

impl TokenFileStrategy {
    pub fn new(store: Arc<dyn TokenStore>, oauth: OAuthClient) -> Self {
        Self { store, oauth }
    }
}

#[async_trait]
impl CredentialStrategy for TokenFileStrategy {
    async fn available(&self, acting_user: &str) -> bool {
        matches!(self.store.load(acting_user).await, Ok(Some(_)))
    }

    async fn resolve(
        &self,
        acting_user: &str,
        _scopes: &[String],
    ) -> Result<Credentials, DomainError> {
        let lock = self.store.user_lock(acting_user).await;
        let _guard = lock.lock().await;

        let token = self
            .store
            .load(acting_user)
            .await?
            .ok_or_else(|| DomainError::credential(format!("no cached token for '{}'", acting_user)))?;

        if !token.is_expired() {
            return Ok(token.to_credentials());
        }

        if !token.can_refresh() {
            return Err(DomainError::credential(format!(
                "cached token for '{}' expired with no refresh token",
                acting_user
            )));
        }

        let refresh_token = token.refresh_token.as_deref().unwrap_or_default();
        let response = self
            .oauth
            .refresh(&token.client_id, &token.client_secret, refresh_token)
            .await?;

        let refreshed = token.refreshed(
            response.access_token,
            response.expires_in,
            response.refresh_token,
        );
        self.store.save(acting_user, &refreshed).await?;

        tracing::debug!(acting_user, "refreshed cached token");
        Ok(refreshed.to_credentials())
    }

    fn strategy_name(&self) -> &'static str {
        "token_file"
    }
}
