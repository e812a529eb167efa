//! OAuth token endpoint client (JWT grant and refresh)

use serde::Deserialize;

use crate::domain::DomainError;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Successful token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Thin client for the OAuth 2.0 token endpoint
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: reqwest::Client,
    token_url: String,
}

impl OAuthClient {
    pub fn new(token_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: token_url.into(),
        }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Exchange a signed service-account JWT assertion for an access token
    pub async fn exchange_assertion(&self, assertion: &str) -> Result<TokenResponse, DomainError> {
        self.post_form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
            .await
    }

    /// Refresh an authorized-user token
    pub async fn refresh(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<TokenResponse, DomainError> {
        self.post_form(&[
            ("grant_type", "refresh_token"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn post_form(&self, form: &[(&str, &str)]) -> Result<TokenResponse, DomainError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| DomainError::provider("oauth", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "oauth",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::provider("oauth", format!("Failed to parse response: {}", e)))
    }
}
