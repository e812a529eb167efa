//! Domain layer - Core entities and collaborator contracts

pub mod credentials;
pub mod document;
pub mod drive;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod remote_file;
pub mod request;
pub mod sink;

pub use credentials::{
    scopes, AuthorizationFlow, CredentialResolver, CredentialStrategy, Credentials, StoredToken,
    TokenStore,
};
pub use document::NormalizedDocument;
pub use drive::{
    DriveApi, FileList, FileMetadata, Presentation, SessionFactory, SheetTab, Slide, Spreadsheet,
};
pub use error::DomainError;
pub use extractor::ContentExtractor;
pub use loader::FileLoader;
pub use remote_file::{mime, FileTypeFilter, RemoteFile};
pub use request::{FileRef, IngestionOptions, IngestionRequest};
pub use sink::DocumentSink;
