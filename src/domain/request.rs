//! Ingestion request modes and eager option validation

use serde::Deserialize;

use crate::domain::remote_file::FileTypeFilter;
use crate::domain::DomainError;

/// A caller-supplied file reference for the explicit file list mode
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub file_id: String,
    pub mime_type: String,
}

impl FileRef {
    pub fn new(file_id: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// A validated ingestion request. Exactly one source mode is active; the
/// only way to build one from loose options is [`IngestionOptions::validate`],
/// which runs before any network access.
#[derive(Debug, Clone)]
pub enum IngestionRequest {
    /// Enumerate a folder tree and dispatch each leaf by mimetype
    Folder {
        folder_id: String,
        recursive: bool,
        include_trashed: bool,
        file_types: Option<FileTypeFilter>,
    },
    /// Explicit Doc-type ids; always routed to the document extractor
    DocumentIds(Vec<String>),
    /// Explicit binary file ids; always routed to the binary extractor
    FileIds(Vec<String>),
    /// Caller-supplied `{fileId, mimeType}` pairs; no enumeration call
    FileList(Vec<FileRef>),
}

impl IngestionRequest {
    /// Build an explicit file list request (the on-demand entry point)
    pub fn file_list(files: Vec<FileRef>) -> Result<Self, DomainError> {
        if files.is_empty() {
            return Err(DomainError::configuration(
                "explicit file list must not be empty",
            ));
        }
        Ok(Self::FileList(files))
    }
}

/// The recognized configuration surface for an ingestion request, mirroring
/// the loader options callers pass in. All contradictions are rejected here,
/// eagerly, with no I/O.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IngestionOptions {
    /// The folder id to load from
    pub folder_id: Option<String>,
    /// The document ids to load from
    pub document_ids: Option<Vec<String>>,
    /// The file ids to load from
    pub file_ids: Option<Vec<String>>,
    /// Whether to descend into subfolders. Only applies when folder_id is given.
    pub recursive: bool,
    /// File type aliases to load. Only applies when folder_id is given.
    pub file_types: Option<Vec<String>>,
    /// Whether to load trashed files. Only applies when folder_id is given.
    pub load_trashed_files: bool,
}

impl IngestionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder_id(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn with_document_ids(mut self, ids: Vec<String>) -> Self {
        self.document_ids = Some(ids);
        self
    }

    pub fn with_file_ids(mut self, ids: Vec<String>) -> Self {
        self.file_ids = Some(ids);
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_file_types(mut self, types: Vec<String>) -> Self {
        self.file_types = Some(types);
        self
    }

    pub fn with_load_trashed_files(mut self, load: bool) -> Self {
        self.load_trashed_files = load;
        self
    }

    /// Validate that exactly one source mode is set and resolve the file
    /// type filter. Fails with a configuration error on any contradiction.
    pub fn validate(self) -> Result<IngestionRequest, DomainError> {
        let folder_id = self.folder_id.filter(|id| !id.is_empty());
        let document_ids = self.document_ids.filter(|ids| !ids.is_empty());
        let file_ids = self.file_ids.filter(|ids| !ids.is_empty());

        if folder_id.is_some() && (document_ids.is_some() || file_ids.is_some()) {
            return Err(DomainError::configuration(
                "Cannot specify both folder_id and document_ids nor folder_id and file_ids",
            ));
        }

        if document_ids.is_some() && file_ids.is_some() {
            return Err(DomainError::configuration(
                "Cannot specify both document_ids and file_ids",
            ));
        }

        let file_types = self.file_types.filter(|t| !t.is_empty());

        if file_types.is_some() && (document_ids.is_some() || file_ids.is_some()) {
            return Err(DomainError::configuration(
                "file_types can only be given when folder_id is given, \
                 (not when document_ids or file_ids are given)",
            ));
        }

        if let Some(folder_id) = folder_id {
            let filter = file_types
                .map(|t| FileTypeFilter::from_aliases(&t))
                .transpose()?;
            return Ok(IngestionRequest::Folder {
                folder_id,
                recursive: self.recursive,
                include_trashed: self.load_trashed_files,
                file_types: filter,
            });
        }

        if let Some(ids) = document_ids {
            return Ok(IngestionRequest::DocumentIds(ids));
        }

        if let Some(ids) = file_ids {
            return Ok(IngestionRequest::FileIds(ids));
        }

        Err(DomainError::configuration(
            "Must specify either folder_id, document_ids, or file_ids",
        ))
    }
}
