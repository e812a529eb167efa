//! Ingestion orchestrator: mode selection, traversal, dispatch, aggregation

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::document::NormalizedDocument;
use crate::domain::drive::SessionFactory;
use crate::domain::extractor::ContentExtractor;
use crate::domain::loader::FileLoader;
use crate::domain::remote_file::mime;
use crate::domain::request::IngestionRequest;
use crate::domain::sink::DocumentSink;
use crate::domain::DomainError;
use crate::infrastructure::drive::{DelegatedSessionFactory, TreeWalker};
use crate::infrastructure::extractors::{
    BinaryExtractor, DocExtractor, SheetExtractor, SlideExtractor,
};

/// Top-level coordinator for one ingestion request.
///
/// Built per configuration and passed around as an explicit handle; the
/// token store behind the session factory is the only shared resource.
/// A single file's extraction failure never aborts the batch; traversal
/// and credential failures do.
#[derive(Debug)]
pub struct DriveIngestionService {
    sessions: Arc<dyn SessionFactory>,
    doc: DocExtractor,
    sheet: SheetExtractor,
    slide: SlideExtractor,
    binary: BinaryExtractor,
}

impl DriveIngestionService {
    pub fn new(sessions: Arc<dyn SessionFactory>) -> Self {
        Self {
            doc: DocExtractor::new(sessions.clone()),
            sheet: SheetExtractor::new(sessions.clone()),
            slide: SlideExtractor::new(sessions.clone()),
            binary: BinaryExtractor::new(sessions.clone()),
            sessions,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let sessions = Arc::new(DelegatedSessionFactory::from_config(
            &config.credentials,
            &config.drive,
        ));
        Self::new(sessions)
    }

    /// Configure the pluggable sub-loader for binary files. Files with no
    /// built-in extractor are routed to it instead of being skipped.
    pub fn with_file_loader(mut self, loader: Arc<dyn FileLoader>) -> Self {
        self.binary = self.binary.with_loader(loader);
        self
    }

    /// Run one ingestion request for an acting-user and aggregate every
    /// extracted document, preserving per-file output order.
    pub async fn ingest(
        &self,
        request: &IngestionRequest,
        acting_user: &str,
    ) -> Result<Vec<NormalizedDocument>, DomainError> {
        match request {
            IngestionRequest::Folder {
                folder_id,
                recursive,
                include_trashed,
                file_types,
            } => {
                let api = self.sessions.session(acting_user).await?;
                let walker = TreeWalker::new(api);
                let files = walker
                    .enumerate(folder_id, *recursive, *include_trashed)
                    .await?;

                let mut documents = Vec::new();
                for file in files {
                    if let Some(filter) = file_types {
                        if !filter.matches(&file.mime_type) {
                            continue;
                        }
                    }
                    documents.extend(
                        self.extract_file(&file.id, &file.mime_type, acting_user)
                            .await?,
                    );
                }

                tracing::info!(
                    folder_id = %folder_id,
                    documents = documents.len(),
                    "folder ingestion complete"
                );
                Ok(documents)
            }

            IngestionRequest::DocumentIds(ids) => {
                let mut documents = Vec::new();
                for id in ids {
                    documents.extend(self.recover(id, self.doc.extract(id, acting_user).await)?);
                }
                Ok(documents)
            }

            IngestionRequest::FileIds(ids) => {
                let mut documents = Vec::new();
                for id in ids {
                    documents
                        .extend(self.recover(id, self.binary.extract(id, acting_user).await)?);
                }
                Ok(documents)
            }

            IngestionRequest::FileList(files) => {
                let mut documents = Vec::new();
                for file in files {
                    documents.extend(
                        self.extract_file(&file.file_id, &file.mime_type, acting_user)
                            .await?,
                    );
                }
                Ok(documents)
            }
        }
    }

    /// Run a request and hand the aggregate to the document sink. Returns
    /// the number of documents delivered.
    pub async fn ingest_to_sink(
        &self,
        request: &IngestionRequest,
        acting_user: &str,
        sink: &dyn DocumentSink,
    ) -> Result<usize, DomainError> {
        let documents = self.ingest(request, acting_user).await?;
        let count = documents.len();
        sink.accept(documents).await?;
        Ok(count)
    }

    /// Dispatch one file by declared mimetype. Unrecognized mimetypes are
    /// skipped, not errors.
    async fn extract_file(
        &self,
        file_id: &str,
        mime_type: &str,
        acting_user: &str,
    ) -> Result<Vec<NormalizedDocument>, DomainError> {
        let outcome = match mime_type {
            mime::DOCUMENT => self.doc.extract(file_id, acting_user).await,
            mime::SPREADSHEET => self.sheet.extract(file_id, acting_user).await,
            mime::PRESENTATION => self.slide.extract(file_id, acting_user).await,
            m if m == mime::PDF || self.binary.has_loader() => {
                self.binary.extract(file_id, acting_user).await
            }
            other => {
                tracing::debug!(file_id, mime_type = other, "skipping unsupported mimetype");
                return Ok(vec![]);
            }
        };

        self.recover(file_id, outcome)
    }

    /// Per-file failure policy: swallow and log, unless the failure is
    /// fatal for the whole request (credentials, traversal, configuration).
    fn recover(
        &self,
        file_id: &str,
        outcome: Result<Vec<NormalizedDocument>, DomainError>,
    ) -> Result<Vec<NormalizedDocument>, DomainError> {
        match outcome {
            Ok(documents) => Ok(documents),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::warn!(file_id, error = %e, "extraction failed; file contributes no documents");
                Ok(vec![])
            }
        }
    }
}
