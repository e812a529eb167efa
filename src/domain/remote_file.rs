//! Remote file snapshots, mimetype dispatch table and canonical URLs

use serde::Deserialize;

use crate::domain::DomainError;

/// Google Workspace mimetype strings driving extractor dispatch
pub mod mime {
    pub const FOLDER: &str = "application/vnd.google-apps.folder";
    pub const DOCUMENT: &str = "application/vnd.google-apps.document";
    pub const SPREADSHEET: &str = "application/vnd.google-apps.spreadsheet";
    pub const PRESENTATION: &str = "application/vnd.google-apps.presentation";
    pub const PDF: &str = "application/pdf";
}

/// Short aliases accepted in a file type filter, mapped to full mimetypes
const TYPE_ALIASES: &[(&str, &str)] = &[
    ("document", mime::DOCUMENT),
    ("sheet", mime::SPREADSHEET),
    ("pdf", mime::PDF),
    ("presentation", mime::PRESENTATION),
];

/// One entry in the remote store, as returned by a traversal call.
///
/// Read-only snapshot; never mutated, never cached across requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub trashed: bool,
}

impl RemoteFile {
    pub fn is_folder(&self) -> bool {
        self.mime_type == mime::FOLDER
    }
}

/// A validated set of full mimetype strings used to narrow folder-mode
/// traversal results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeFilter(Vec<String>);

impl FileTypeFilter {
    /// Resolve short aliases (and accept full-form mimetype strings) into a
    /// filter. Unknown values are a configuration error, raised before any
    /// network call.
    pub fn from_aliases<S: AsRef<str>>(types: &[S]) -> Result<Self, DomainError> {
        let mut resolved = Vec::with_capacity(types.len());

        for file_type in types {
            let file_type = file_type.as_ref();
            let full = TYPE_ALIASES
                .iter()
                .find(|(alias, full)| *alias == file_type || *full == file_type)
                .map(|(_, full)| full.to_string());

            match full {
                Some(full) => resolved.push(full),
                None => {
                    let short_names = TYPE_ALIASES
                        .iter()
                        .map(|(alias, _)| format!("'{}'", alias))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let full_names = TYPE_ALIASES
                        .iter()
                        .map(|(_, full)| format!("'{}'", full))
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(DomainError::configuration(format!(
                        "File type '{}' is not supported. Supported values are: {}; and \
                         their full-form names: {}",
                        file_type, short_names, full_names
                    )));
                }
            }
        }

        Ok(Self(resolved))
    }

    pub fn matches(&self, mime_type: &str) -> bool {
        self.0.iter().any(|m| m == mime_type)
    }

    pub fn mime_types(&self) -> &[String] {
        &self.0
    }
}

/// Canonical provenance URLs for each file kind
pub fn document_edit_url(file_id: &str) -> String {
    format!("https://docs.google.com/document/d/{}/edit", file_id)
}

pub fn spreadsheet_edit_url(spreadsheet_id: &str, sheet_id: i64) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/edit?gid={}",
        spreadsheet_id, sheet_id
    )
}

pub fn presentation_edit_url(presentation_id: &str) -> String {
    format!(
        "https://docs.google.com/presentation/d/{}/edit",
        presentation_id
    )
}

pub fn file_view_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view", file_id)
}
