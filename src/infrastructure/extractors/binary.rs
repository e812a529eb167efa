//! Binary file extractor: pluggable loader or per-page PDF text

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::document::NormalizedDocument;
use crate::domain::drive::SessionFactory;
use crate::domain::extractor::ContentExtractor;
use crate::domain::loader::FileLoader;
use crate::domain::remote_file::file_view_url;
use crate::domain::DomainError;

/// Downloads raw bytes and either delegates to a configured sub-loader
/// (rewriting each produced document's source to the canonical view URL)
/// or parses the bytes as a PDF, one document per page. Empty page text is
/// permitted.
#[derive(Debug)]
pub struct BinaryExtractor {
    sessions: Arc<dyn SessionFactory>,
    loader: Option<Arc<dyn FileLoader>>,
}

impl BinaryExtractor {
    pub fn new(sessions: Arc<dyn SessionFactory>) -> Self {
        Self {
            sessions,
            loader: None,
        }
    }

    pub fn with_loader(mut self, loader: Arc<dyn FileLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn has_loader(&self) -> bool {
        self.loader.is_some()
    }
}

#[async_trait]
impl ContentExtractor for BinaryExtractor {
    async fn extract(
        &self,
        file_id: &str,
        acting_user: &str,
    ) -> Result<Vec<NormalizedDocument>, DomainError> {
        let api = self.sessions.session(acting_user).await?;

        let metadata = api.get_metadata(file_id).await?;
        let content = api.download(file_id).await?;

        if let Some(loader) = &self.loader {
            let mut documents = loader.load(content, Some(&metadata.name)).await?;
            for document in &mut documents {
                document.set_source(file_view_url(file_id));
            }
            return Ok(documents);
        }

        let text = pdf_extract::extract_text_from_mem(&content)
            .map_err(|e| DomainError::extraction(file_id, format!("PDF parse failed: {}", e)))?;

        let source = file_view_url(file_id);

        // pdf-extract inserts form feeds between pages.
        let documents = text
            .split('\x0C')
            .enumerate()
            .map(|(page, page_text)| {
                NormalizedDocument::new(page_text, &source)
                    .with_title(&metadata.name)
                    .with_page(page)
            })
            .collect();

        Ok(documents)
    }
}
