//! Delegated per-acting-user session construction

use async_trait::async_trait;
use std::sync::Arc;

use super::client::{DriveClient, DriveEndpoints};
use crate::config::{CredentialsConfig, DriveConfig};
use crate::domain::credentials::scopes;
use crate::domain::drive::{DriveApi, SessionFactory};
use crate::domain::DomainError;
use crate::infrastructure::credentials::{OAuthClient, ServiceAccountStrategy};

/// Builds authenticated Drive sessions acting "as" a specific end user:
/// a service-account credential scoped to metadata-readonly plus full
/// drive access, bound to the acting-user via subject delegation. Every
/// extractor call goes through here; sessions are not reused.
#[derive(Debug)]
pub struct DelegatedSessionFactory {
    signer: ServiceAccountStrategy,
    endpoints: DriveEndpoints,
}

impl DelegatedSessionFactory {
    pub fn new(signer: ServiceAccountStrategy, endpoints: DriveEndpoints) -> Self {
        Self { signer, endpoints }
    }

    /// Wire the factory from configuration; the same service-account key
    /// feeds both the resolution chain and this delegated path.
    pub fn from_config(credentials: &CredentialsConfig, drive: &DriveConfig) -> Self {
        let signer = ServiceAccountStrategy::new(
            credentials.service_account_key.clone(),
            OAuthClient::new(drive.token_url.clone()),
        );
        Self::new(signer, DriveEndpoints::from(drive))
    }
}

#[async_trait]
impl SessionFactory for DelegatedSessionFactory {
    async fn session(&self, acting_user: &str) -> Result<Arc<dyn DriveApi>, DomainError> {
        let credentials = self
            .signer
            .token_for(&scopes::delegated(), Some(acting_user))
            .await
            .map_err(|e| {
                DomainError::credentials_unavailable(format!(
                    "delegated session for '{}': {}",
                    acting_user, e
                ))
            })?;

        Ok(Arc::new(DriveClient::new(
            self.endpoints.clone(),
            credentials.access_token(),
        )))
    }
}
