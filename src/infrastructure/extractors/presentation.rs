//! Presentation extractor: one document per slide

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::document::NormalizedDocument;
use crate::domain::drive::SessionFactory;
use crate::domain::extractor::ContentExtractor;
use crate::domain::remote_file::presentation_edit_url;
use crate::domain::DomainError;

/// Concatenates the text runs of every shape on each slide, in element
/// order, and emits one document per slide. Slides without text still
/// emit a document with empty content.
#[derive(Debug)]
pub struct SlideExtractor {
    sessions: Arc<dyn SessionFactory>,
}

impl SlideExtractor {
    pub fn new(sessions: Arc<dyn SessionFactory>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl ContentExtractor for SlideExtractor {
    async fn extract(
        &self,
        file_id: &str,
        acting_user: &str,
    ) -> Result<Vec<NormalizedDocument>, DomainError> {
        let api = self.sessions.session(acting_user).await?;
        let presentation = api.get_presentation(file_id).await?;

        let source = presentation_edit_url(file_id);

        let documents = presentation
            .slides
            .iter()
            .enumerate()
            .map(|(index, slide)| {
                NormalizedDocument::new(slide.text_runs.concat(), &source)
                    .with_title(&presentation.title)
                    .with_page(index + 1)
            })
            .collect();

        Ok(documents)
    }
}
