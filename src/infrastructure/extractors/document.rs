//! Google Doc extractor: plain-text export, one document per file

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::document::NormalizedDocument;
use crate::domain::drive::SessionFactory;
use crate::domain::extractor::ContentExtractor;
use crate::domain::remote_file::document_edit_url;
use crate::domain::DomainError;

/// Exports a Doc-type file as plain text and emits exactly one document.
/// A missing file (404) produces no document and is not fatal to the batch.
#[derive(Debug)]
pub struct DocExtractor {
    sessions: Arc<dyn SessionFactory>,
}

impl DocExtractor {
    pub fn new(sessions: Arc<dyn SessionFactory>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl ContentExtractor for DocExtractor {
    async fn extract(
        &self,
        file_id: &str,
        acting_user: &str,
    ) -> Result<Vec<NormalizedDocument>, DomainError> {
        let api = self.sessions.session(acting_user).await?;

        let metadata = match api.get_metadata(file_id).await {
            Ok(metadata) => metadata,
            Err(DomainError::NotFound { .. }) => {
                tracing::warn!(file_id, "file not found");
                return Ok(vec![]);
            }
            Err(e) => return Err(e),
        };

        let exported = match api.export(file_id, "text/plain").await {
            Ok(bytes) => bytes,
            Err(DomainError::NotFound { .. }) => {
                tracing::warn!(file_id, "file not found during export");
                return Ok(vec![]);
            }
            Err(e) => return Err(e),
        };

        let text = String::from_utf8(exported.to_vec())
            .map_err(|e| DomainError::extraction(file_id, format!("invalid UTF-8: {}", e)))?;

        let mut document =
            NormalizedDocument::new(text, document_edit_url(file_id)).with_title(metadata.name);

        if let Some(modified_time) = metadata.modified_time {
            document = document.with_when(modified_time);
        }

        Ok(vec![document])
    }
}
