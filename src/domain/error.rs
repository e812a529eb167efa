use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Credentials unavailable: {message}")]
    CredentialsUnavailable { message: String },

    #[error("Traversal failed for folder '{folder_id}': {message}")]
    Traversal { folder_id: String, message: String },

    #[error("Extraction failed for file '{file_id}': {message}")]
    Extraction { file_id: String, message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("Token store error: {message}")]
    TokenStore { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn credentials_unavailable(message: impl Into<String>) -> Self {
        Self::CredentialsUnavailable {
            message: message.into(),
        }
    }

    pub fn traversal(folder_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Traversal {
            folder_id: folder_id.into(),
            message: message.into(),
        }
    }

    pub fn extraction(file_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            file_id: file_id.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    pub fn token_store(message: impl Into<String>) -> Self {
        Self::TokenStore {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether this error is fatal for the whole ingestion request, as
    /// opposed to a single file contributing zero documents.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::CredentialsUnavailable { .. }
                | Self::Traversal { .. }
        )
    }
}
