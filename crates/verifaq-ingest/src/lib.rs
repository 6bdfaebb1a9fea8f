//! VeriFAQ Ingest — turns uploaded documents into plain text for FAQ extraction.

pub mod docx;
pub mod file;
pub mod json;
pub mod loader;
pub mod markdown;

pub use file::{load_path, DocumentFormat};
pub use loader::{DocumentLoader, StandardLoader};
