//! Remote file-store collaborator contracts

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use std::fmt::Debug;
use std::sync::Arc;

use crate::domain::remote_file::RemoteFile;
use crate::domain::DomainError;

/// One page of a children listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<RemoteFile>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Per-file metadata needed by extractors
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub modified_time: Option<String>,
}

/// Spreadsheet metadata: title plus every tab
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    pub title: String,
    pub tabs: Vec<SheetTab>,
}

#[derive(Debug, Clone)]
pub struct SheetTab {
    pub title: String,
    pub sheet_id: i64,
}

/// Presentation content: title plus the text runs of every slide, in
/// element order
#[derive(Debug, Clone)]
pub struct Presentation {
    pub title: String,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default)]
pub struct Slide {
    pub text_runs: Vec<String>,
}

/// An authenticated Drive API session. Constructed per extractor call and
/// never shared across acting-users.
#[async_trait]
pub trait DriveApi: Send + Sync + Debug {
    /// One page of entries whose parent set contains `parent_id`.
    async fn list_children(
        &self,
        parent_id: &str,
        page_token: Option<&str>,
    ) -> Result<FileList, DomainError>;

    async fn get_metadata(&self, file_id: &str) -> Result<FileMetadata, DomainError>;

    /// Export a Workspace-native file to `target_mime`, accumulated in
    /// chunks until complete.
    async fn export(&self, file_id: &str, target_mime: &str) -> Result<Bytes, DomainError>;

    /// Download the raw bytes of a binary file.
    async fn download(&self, file_id: &str) -> Result<Bytes, DomainError>;

    async fn get_spreadsheet(&self, spreadsheet_id: &str) -> Result<Spreadsheet, DomainError>;

    /// The 2-D value grid of one tab.
    async fn get_sheet_values(
        &self,
        spreadsheet_id: &str,
        tab_title: &str,
    ) -> Result<Vec<Vec<String>>, DomainError>;

    async fn get_presentation(&self, presentation_id: &str) -> Result<Presentation, DomainError>;
}

/// Builds an authenticated session bound to one acting-user, resolving
/// delegated credentials on every call.
#[async_trait]
pub trait SessionFactory: Send + Sync + Debug {
    async fn session(&self, acting_user: &str) -> Result<Arc<dyn DriveApi>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::RwLock;

    /// Configurable fake Drive API with call counting
    #[derive(Debug, Default)]
    pub struct MockDriveApi {
        pages: RwLock<HashMap<(String, Option<String>), FileList>>,
        metadata: RwLock<HashMap<String, FileMetadata>>,
        exports: RwLock<HashMap<String, Bytes>>,
        downloads: RwLock<HashMap<String, Bytes>>,
        spreadsheets: RwLock<HashMap<String, Spreadsheet>>,
        values: RwLock<HashMap<(String, String), Vec<Vec<String>>>>,
        presentations: RwLock<HashMap<String, Presentation>>,
        failures: RwLock<HashSet<String>>,
        pub calls: AtomicUsize,
    }

    impl MockDriveApi {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a single-page children listing
        pub fn with_children(self, parent_id: impl Into<String>, files: Vec<RemoteFile>) -> Self {
            self.pages.write().unwrap().insert(
                (parent_id.into(), None),
                FileList {
                    files,
                    next_page_token: None,
                },
            );
            self
        }

        /// Register one page keyed by its continuation token
        pub fn with_page(
            self,
            parent_id: impl Into<String>,
            page_token: Option<&str>,
            page: FileList,
        ) -> Self {
            self.pages
                .write()
                .unwrap()
                .insert((parent_id.into(), page_token.map(String::from)), page);
            self
        }

        pub fn with_metadata(self, file_id: impl Into<String>, metadata: FileMetadata) -> Self {
            self.metadata.write().unwrap().insert(file_id.into(), metadata);
            self
        }

        pub fn with_export(self, file_id: impl Into<String>, content: impl Into<Bytes>) -> Self {
            self.exports
                .write()
                .unwrap()
                .insert(file_id.into(), content.into());
            self
        }

        pub fn with_download(self, file_id: impl Into<String>, content: impl Into<Bytes>) -> Self {
            self.downloads
                .write()
                .unwrap()
                .insert(file_id.into(), content.into());
            self
        }

        pub fn with_spreadsheet(
            self,
            spreadsheet_id: impl Into<String>,
            spreadsheet: Spreadsheet,
        ) -> Self {
            self.spreadsheets
                .write()
                .unwrap()
                .insert(spreadsheet_id.into(), spreadsheet);
            self
        }

        pub fn with_values(
            self,
            spreadsheet_id: impl Into<String>,
            tab_title: impl Into<String>,
            values: Vec<Vec<String>>,
        ) -> Self {
            self.values
                .write()
                .unwrap()
                .insert((spreadsheet_id.into(), tab_title.into()), values);
            self
        }

        pub fn with_presentation(
            self,
            presentation_id: impl Into<String>,
            presentation: Presentation,
        ) -> Self {
            self.presentations
                .write()
                .unwrap()
                .insert(presentation_id.into(), presentation);
            self
        }

        /// Make every call against this id fail with a provider error
        pub fn with_failure(self, id: impl Into<String>) -> Self {
            self.failures.write().unwrap().insert(id.into());
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn check_failure(&self, id: &str) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures.read().unwrap().contains(id) {
                return Err(DomainError::provider("mock", format!("forced failure for {}", id)));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DriveApi for MockDriveApi {
        async fn list_children(
            &self,
            parent_id: &str,
            page_token: Option<&str>,
        ) -> Result<FileList, DomainError> {
            self.check_failure(parent_id)?;
            self.pages
                .read()
                .unwrap()
                .get(&(parent_id.to_string(), page_token.map(String::from)))
                .cloned()
                .ok_or_else(|| {
                    DomainError::provider("mock", format!("no listing for {}", parent_id))
                })
        }

        async fn get_metadata(&self, file_id: &str) -> Result<FileMetadata, DomainError> {
            self.check_failure(file_id)?;
            self.metadata
                .read()
                .unwrap()
                .get(file_id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("file {}", file_id)))
        }

        async fn export(&self, file_id: &str, _target_mime: &str) -> Result<Bytes, DomainError> {
            self.check_failure(file_id)?;
            self.exports
                .read()
                .unwrap()
                .get(file_id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("export of {}", file_id)))
        }

        async fn download(&self, file_id: &str) -> Result<Bytes, DomainError> {
            self.check_failure(file_id)?;
            self.downloads
                .read()
                .unwrap()
                .get(file_id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("content of {}", file_id)))
        }

        async fn get_spreadsheet(
            &self,
            spreadsheet_id: &str,
        ) -> Result<Spreadsheet, DomainError> {
            self.check_failure(spreadsheet_id)?;
            self.spreadsheets
                .read()
                .unwrap()
                .get(spreadsheet_id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("spreadsheet {}", spreadsheet_id)))
        }

        async fn get_sheet_values(
            &self,
            spreadsheet_id: &str,
            tab_title: &str,
        ) -> Result<Vec<Vec<String>>, DomainError> {
            self.check_failure(spreadsheet_id)?;
            self.values
                .read()
                .unwrap()
                .get(&(spreadsheet_id.to_string(), tab_title.to_string()))
                .cloned()
                .ok_or_else(|| {
                    DomainError::provider(
                        "mock",
                        format!("no values for tab '{}' of {}", tab_title, spreadsheet_id),
                    )
                })
        }

        async fn get_presentation(
            &self,
            presentation_id: &str,
        ) -> Result<Presentation, DomainError> {
            self.check_failure(presentation_id)?;
            self.presentations
                .read()
                .unwrap()
                .get(presentation_id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("presentation {}", presentation_id)))
        }
    }

    /// Session factory handing out one shared fake API
    #[derive(Debug)]
    pub struct MockSessionFactory {
        api: Arc<MockDriveApi>,
        pub sessions_opened: AtomicUsize,
    }

    impl MockSessionFactory {
        pub fn new(api: Arc<MockDriveApi>) -> Self {
            Self {
                api,
                sessions_opened: AtomicUsize::new(0),
            }
        }

        pub fn api(&self) -> &Arc<MockDriveApi> {
            &self.api
        }
    }

    #[async_trait]
    impl SessionFactory for MockSessionFactory {
        async fn session(&self, _acting_user: &str) -> Result<Arc<dyn DriveApi>, DomainError> {
            self.sessions_opened.fetch_add(1, Ordering::SeqCst);
            Ok(self.api.clone())
        }
    }
}
