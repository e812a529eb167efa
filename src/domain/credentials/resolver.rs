use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use super::{Credentials, StoredToken};
use crate::domain::DomainError;

/// One credential resolution tier (service-account key, cached token,
/// ambient default, interactive flow). Tiers are tried in a fixed priority
/// order by the chained resolver; the first success wins.
#[async_trait]
pub trait CredentialStrategy: Send + Sync + Debug {
    /// Cheap precondition probe; a strategy that is not available is
    /// skipped without being resolved.
    async fn available(&self, acting_user: &str) -> bool;

    /// Produce scoped credentials for the acting-user.
    async fn resolve(
        &self,
        acting_user: &str,
        scopes: &[String],
    ) -> Result<Credentials, DomainError>;

    /// Strategy name for logging/debugging
    fn strategy_name(&self) -> &'static str;
}

/// Resolves an authenticated, scoped identity for an acting-user.
#[async_trait]
pub trait CredentialResolver: Send + Sync + Debug {
    async fn resolve(
        &self,
        acting_user: &str,
        scopes: &[String],
    ) -> Result<Credentials, DomainError>;
}

/// Persistence for serialized credential blobs, keyed by acting-user.
///
/// The store is the only resource shared across concurrent requests;
/// refresh-and-write sequences must hold the per-user lock.
#[async_trait]
pub trait TokenStore: Send + Sync + Debug {
    /// Load the blob for an acting-user. Absence is `Ok(None)`, not an error.
    async fn load(&self, acting_user: &str) -> Result<Option<StoredToken>, DomainError>;

    async fn save(&self, acting_user: &str, token: &StoredToken) -> Result<(), DomainError>;

    /// The mutex serializing refresh/write sequences for one acting-user.
    async fn user_lock(&self, acting_user: &str) -> Arc<tokio::sync::Mutex<()>>;
}

/// Interactive authorization collaborator. The flow itself (local callback
/// server, browser hand-off) lives outside this crate; implementations
/// block until the user completes or cancels authorization.
#[async_trait]
pub trait AuthorizationFlow: Send + Sync + Debug {
    async fn authorize(&self, scopes: &[String]) -> Result<StoredToken, DomainError>;
}
