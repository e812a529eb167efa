//! Normalized document - the pipeline's output unit

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A normalized document produced by a content extractor.
///
/// Every document carries a non-empty `source` metadata entry pointing at
/// the canonical URL of the remote file it came from (and, for multi-part
/// files, the specific row, slide or page).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// Extracted text content (may be empty, e.g. a textless slide)
    pub content: String,
    /// Metadata key-value pairs; always contains `source`
    pub metadata: HashMap<String, serde_json::Value>,
}

impl NormalizedDocument {
    /// Create a new document bound to its canonical source URL
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(
            "source".to_string(),
            serde_json::Value::String(source.into()),
        );

        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Set the document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata
            .insert("title".to_string(), serde_json::Value::String(title.into()));
        self
    }

    /// Set the 1-based data row index (spreadsheet extraction)
    pub fn with_row(mut self, row: usize) -> Self {
        self.metadata
            .insert("row".to_string(), serde_json::json!(row));
        self
    }

    /// Set the page number (slide or PDF extraction)
    pub fn with_page(mut self, page: usize) -> Self {
        self.metadata
            .insert("page".to_string(), serde_json::json!(page));
        self
    }

    /// Set the last-modified timestamp of the remote file
    pub fn with_when(mut self, when: impl Into<String>) -> Self {
        self.metadata
            .insert("when".to_string(), serde_json::Value::String(when.into()));
        self
    }

    /// Add an arbitrary metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Overwrite the canonical source URL (pluggable loaders produce
    /// documents whose source must be fixed up afterwards)
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.metadata.insert(
            "source".to_string(),
            serde_json::Value::String(source.into()),
        );
    }

    pub fn source(&self) -> &str {
        self.metadata
            .get("source")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(|v| v.as_str())
    }

    pub fn row(&self) -> Option<u64> {
        self.metadata.get("row").and_then(|v| v.as_u64())
    }

    pub fn page(&self) -> Option<u64> {
        self.metadata.get("page").and_then(|v| v.as_u64())
    }
}
