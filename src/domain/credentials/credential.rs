use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// OAuth scope strings used against the Drive APIs
pub mod scopes {
    pub const DRIVE_READONLY: &str = "https://www.googleapis.com/auth/drive.readonly";
    pub const DRIVE_METADATA_READONLY: &str =
        "https://www.googleapis.com/auth/drive.metadata.readonly";
    pub const DRIVE: &str = "https://www.googleapis.com/auth/drive";

    /// Default scope set for credential resolution
    pub fn read_only() -> Vec<String> {
        vec![DRIVE_READONLY.to_string()]
    }

    /// Scope set for per-acting-user delegated sessions
    pub fn delegated() -> Vec<String> {
        vec![DRIVE_METADATA_READONLY.to_string(), DRIVE.to_string()]
    }
}

/// An authenticated, scoped client identity bound to one acting-user.
///
/// Held only for the duration of one API client construction; never shared
/// across concurrent acting-users.
#[derive(Debug, Clone)]
pub struct Credentials {
    access_token: String,
    scopes: Vec<String>,
    expires_at: Option<DateTime<Utc>>,
    refresh_token: Option<String>,
    subject: Option<String>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            access_token: access_token.into(),
            scopes,
            expires_at: None,
            refresh_token: None,
            subject: None,
        }
    }

    pub fn with_expiration(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Bind to an acting-user identity (domain-wide delegation subject)
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|exp| exp < Utc::now()).unwrap_or(false)
    }
}

/// The serialized credential blob read from and written to a token store.
///
/// Absence in the store is not an error; it triggers the next resolution
/// tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredToken {
    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|exp| exp < Utc::now()).unwrap_or(false)
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Produce the blob to persist after a successful refresh. The refresh
    /// token is carried over unless the endpoint rotated it.
    pub fn refreshed(
        &self,
        access_token: impl Into<String>,
        expires_in: Option<i64>,
        new_refresh_token: Option<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: new_refresh_token.or_else(|| self.refresh_token.clone()),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            scopes: self.scopes.clone(),
            expires_at: expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }

    pub fn to_credentials(&self) -> Credentials {
        let mut credentials = Credentials::new(self.access_token.clone(), self.scopes.clone());

        if let Some(expires_at) = self.expires_at {
            credentials = credentials.with_expiration(expires_at);
        }

        if let Some(ref refresh_token) = self.refresh_token {
            credentials = credentials.with_refresh_token(refresh_token);
        }

        credentials
    }
}
