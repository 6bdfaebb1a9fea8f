//! Document format detection and file-based loading.

use std::path::Path;
use std::str::FromStr;

use verifaq_core::{Error, Result};

use crate::loader::{DocumentLoader, StandardLoader};

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Markdown,
    Pdf,
    Docx,
    Json,
}

impl DocumentFormat {
    /// Detect format from a file extension (with or without the leading dot).
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::PlainText),
            "md" | "mdx" | "markdown" => Ok(Self::Markdown),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "json" => Ok(Self::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// Detect format from a file name or path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    /// Check if this format is decoded from UTF-8 text directly.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::PlainText | Self::Markdown | Self::Json)
    }
}

impl FromStr for DocumentFormat {
    type Err = Error;

    /// Accepts extensions and the common MIME types browsers send on upload.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text/plain" => Ok(Self::PlainText),
            "text/markdown" | "text/x-markdown" => Ok(Self::Markdown),
            "application/pdf" => Ok(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Ok(Self::Docx)
            }
            "application/json" => Ok(Self::Json),
            other => Self::from_extension(other),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlainText => write!(f, "txt"),
            Self::Markdown => write!(f, "md"),
            Self::Pdf => write!(f, "pdf"),
            Self::Docx => write!(f, "docx"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Read a file and extract its plain text, dispatching on the extension.
pub fn load_path(path: &Path) -> Result<String> {
    let format = DocumentFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    tracing::debug!("Loading {} ({} bytes, {})", path.display(), bytes.len(), format);
    StandardLoader.load(&bytes, format)
}
