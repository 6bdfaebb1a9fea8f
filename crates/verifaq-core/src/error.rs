//! Error types for VeriFAQ.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Insufficient content: found {found} qualifying sentences, need at least {required}")]
    InsufficientContent { found: usize, required: usize },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Empty extraction: {0}")]
    EmptyExtraction(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Generation timed out after {0}ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Short machine-readable name, used by API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientContent { .. } => "insufficient_content",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::EmptyExtraction(_) => "empty_extraction",
            Self::Decode(_) => "decode",
            Self::Timeout(_) => "timeout",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// Message suitable for showing to the person who supplied the document.
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientContent { found, required } => format!(
                "Need more sentences: the document has {} usable sentence(s) but at least {} are required. Provide a longer or more detailed document.",
                found, required
            ),
            Self::UnsupportedFormat(ext) => format!(
                "Unsupported file type '{}'. Use .txt, .md, .pdf, .docx or .json.",
                ext
            ),
            Self::EmptyExtraction(source) => {
                format!("No readable text could be extracted from {}.", source)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
