//! Drive Ingest
//!
//! A Google Drive ingestion pipeline for knowledge bases with support for:
//! - Multiple credential sources (service-account key, cached token,
//!   ambient default, interactive flow)
//! - Recursive folder traversal with pagination and trash filtering
//! - Per-mimetype content extraction (Docs, Sheets, Slides, PDF,
//!   pluggable loaders)
//! - Per-acting-user delegated API sessions

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    DomainError, DocumentSink, FileLoader, FileRef, IngestionOptions, IngestionRequest,
    NormalizedDocument,
};
pub use infrastructure::services::DriveIngestionService;
