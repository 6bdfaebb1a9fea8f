//! The document loader seam: bytes in a declared format → plain text.
//!
//! The extraction pipeline never loads documents itself; callers go through
//! a [`DocumentLoader`] first and hand the resulting string over.

use verifaq_core::{Error, Result};

use crate::file::DocumentFormat;
use crate::{docx, json, markdown};

/// Trait for document loaders.
pub trait DocumentLoader: Send + Sync {
    /// Decode `bytes` as `format` and return the extracted plain text.
    ///
    /// Fails with `Decode` for corrupt payloads and `EmptyExtraction`
    /// when nothing readable remains.
    fn load(&self, bytes: &[u8], format: DocumentFormat) -> Result<String>;
}

/// Loader covering every [`DocumentFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLoader;

impl DocumentLoader for StandardLoader {
    fn load(&self, bytes: &[u8], format: DocumentFormat) -> Result<String> {
        let text = match format {
            DocumentFormat::PlainText => decode_utf8(bytes)?,
            DocumentFormat::Markdown => markdown::strip_markup(&decode_utf8(bytes)?),
            DocumentFormat::Json => json::flatten_strings(&decode_utf8(bytes)?)?,
            DocumentFormat::Docx => docx::extract_text(bytes)?,
            DocumentFormat::Pdf => extract_pdf(bytes)?,
        };

        if text.trim().is_empty() {
            tracing::warn!("No text extracted from {} payload ({} bytes)", format, bytes.len());
            return Err(Error::EmptyExtraction(format!("{} document", format)));
        }

        tracing::debug!("Extracted {} chars from {} payload", text.chars().count(), format);
        Ok(text)
    }
}

/// `pdf-extract` panics on some malformed inputs; contain that as a decode error.
fn extract_pdf(bytes: &[u8]) -> Result<String> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(Error::Decode(format!("PDF extraction failed: {}", e))),
        Err(_) => Err(Error::Decode("PDF extraction aborted on malformed input".into())),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::Decode(format!("Invalid UTF-8 text: {}", e)))
}
