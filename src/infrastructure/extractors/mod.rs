//! Type-specific content extractors

mod binary;
mod document;
mod presentation;
mod spreadsheet;

pub use binary::BinaryExtractor;
pub use document::DocExtractor;
pub use presentation::SlideExtractor;
pub use spreadsheet::SheetExtractor;
