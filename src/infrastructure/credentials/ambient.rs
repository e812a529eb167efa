//! Ambient default credentials (tier 3): environment-resolved identity

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::domain::credentials::{CredentialStrategy, Credentials};
use crate::domain::DomainError;

const CREDENTIALS_FILE_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

#[derive(Debug, Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Workload-identity credentials fetched from the metadata server. Only
/// applies when no explicit credentials-file environment variable is set;
/// tokens obtained here are never persisted.
#[derive(Debug)]
pub struct AmbientStrategy {
    http: reqwest::Client,
    token_url: String,
}

impl AmbientStrategy {
    pub fn new(token_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: token_url.into(),
        }
    }
}

#[async_trait]
impl CredentialStrategy for AmbientStrategy {
    async fn available(&self, _acting_user: &str) -> bool {
        std::env::var_os(CREDENTIALS_FILE_ENV_VAR).is_none()
    }

    async fn resolve(
        &self,
        _acting_user: &str,
        scopes: &[String],
    ) -> Result<Credentials, DomainError> {
        let response = self
            .http
            .get(&self.token_url)
            .header("Metadata-Flavor", "Google")
            .query(&[("scopes", scopes.join(","))])
            .send()
            .await
            .map_err(|e| {
                DomainError::credential(format!("metadata server unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(DomainError::credential(format!(
                "metadata server returned HTTP {}",
                response.status()
            )));
        }

        let token: MetadataTokenResponse = response.json().await.map_err(|e| {
            DomainError::credential(format!("malformed metadata token response: {}", e))
        })?;

        let mut credentials = Credentials::new(token.access_token, scopes.to_vec());

        if let Some(expires_in) = token.expires_in {
            credentials = credentials.with_expiration(Utc::now() + Duration::seconds(expires_in));
        }

        Ok(credentials)
    }

    fn strategy_name(&self) -> &'static str {
        "ambient_default"
    }
}
