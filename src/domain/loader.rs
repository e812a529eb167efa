//! Pluggable binary file loader contract

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

use crate::domain::document::NormalizedDocument;
use crate::domain::DomainError;

/// Optional sub-loader for binary files with no built-in extractor.
///
/// Output documents get their `source` metadata overwritten with the
/// canonical file-view URL by the binary extractor.
#[async_trait]
pub trait FileLoader: Send + Sync + Debug {
    async fn load(
        &self,
        content: Bytes,
        filename: Option<&str>,
    ) -> Result<Vec<NormalizedDocument>, DomainError>;
}
