//! Document sink collaborator contract

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::document::NormalizedDocument;
use crate::domain::DomainError;

/// Downstream consumer of ingested documents. Chunking, embedding, storage
/// and similarity search live behind this seam, outside this crate.
#[async_trait]
pub trait DocumentSink: Send + Sync + Debug {
    async fn accept(&self, documents: Vec<NormalizedDocument>) -> Result<(), DomainError>;
}
