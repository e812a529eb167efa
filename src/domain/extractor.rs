//! Content extractor contract

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::document::NormalizedDocument;
use crate::domain::DomainError;

/// Turns one remote file into zero or more normalized documents.
///
/// Each implementation obtains its own delegated credentials per call and
/// constructs its own typed API client; clients are not shared across
/// extractor calls.
#[async_trait]
pub trait ContentExtractor: Send + Sync + Debug {
    async fn extract(
        &self,
        file_id: &str,
        acting_user: &str,
    ) -> Result<Vec<NormalizedDocument>, DomainError>;
}
