//! DOCX text extraction.
//!
//! A .docx file is a ZIP archive; the body lives in `word/document.xml`.
//! Each `<w:p>` paragraph becomes one line built from its `<w:t>` runs.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use verifaq_core::{Error, Result};

const DOCUMENT_PART: &str = "word/document.xml";

static PARAGRAPH_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"</w:p>").unwrap());
static TEXT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab/>|<w:br/>").unwrap());

/// Extract paragraph text from DOCX bytes.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::Decode(format!("Invalid DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| Error::Decode(format!("DOCX is missing {}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| Error::Decode(format!("Unreadable {}: {}", DOCUMENT_PART, e)))?;

    Ok(paragraphs_from_xml(&xml).join("\n"))
}

fn paragraphs_from_xml(xml: &str) -> Vec<String> {
    PARAGRAPH_END
        .split(xml)
        .map(|chunk| {
            let mut line = String::new();
            for cap in TEXT_RUN.captures_iter(chunk) {
                match cap.get(1) {
                    Some(text) => line.push_str(&unescape_xml(text.as_str())),
                    None => line.push(' '),
                }
            }
            line.trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
pub(crate) fn build_test_docx(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;
    let body: String = paragraphs
        .iter()
        .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document><w:body>{}</w:body></w:document>"#,
        body
    );
    let buf = Cursor::new(Vec::new());
    let mut zip = zip::ZipWriter::new(buf);
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file(DOCUMENT_PART, options).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}
