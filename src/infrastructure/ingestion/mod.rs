//! Document ingestion infrastructure
//!
//! Parsers, the recursive chunker and the filesystem document store.

pub mod chunkers;
pub mod factory;
pub mod loader;
pub mod parsers;

pub use chunkers::RecursiveChunker;
pub use factory::ParserFactory;
pub use loader::{sanitize_filename, upload_name, FsDocumentLoader};
pub use parsers::{PdfParser, PlainTextParser};
