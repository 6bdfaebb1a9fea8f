//! Presentation helpers: plain-text rendering, structured export, and
//! reference lookup for highlighting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use verifaq_core::Result;

use crate::types::FaqRecord;

/// Render records as `Q{n}: …` / `A: …` / `Reference: "…"` blocks separated
/// by blank lines.
pub fn render_text(records: &[FaqRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "Q{}: {}\nA: {}\nReference: \"{}\"",
                r.ordinal, r.question, r.answer, r.reference
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One exported FAQ. The source index is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedFaq {
    pub ordinal: usize,
    pub question: String,
    pub answer: String,
    pub reference: String,
}

impl From<&FaqRecord> for ExportedFaq {
    fn from(record: &FaqRecord) -> Self {
        Self {
            ordinal: record.ordinal,
            question: record.question.clone(),
            answer: record.answer.clone(),
            reference: record.reference.clone(),
        }
    }
}

/// Structured export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqExport {
    pub generated_at: DateTime<Utc>,
    /// Length of the source document in characters.
    pub source_document_length: usize,
    pub faq_count: usize,
    pub faqs: Vec<ExportedFaq>,
}

impl FaqExport {
    pub fn new(records: &[FaqRecord], document: &str, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            source_document_length: document.chars().count(),
            faq_count: records.len(),
            faqs: records.iter().map(ExportedFaq::from).collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// First character offset of `reference` in `document`.
///
/// Must be given the same document text that produced the reference.
pub fn locate_reference(document: &str, reference: &str) -> Option<usize> {
    if reference.is_empty() {
        return None;
    }
    document
        .find(reference)
        .map(|byte_offset| document[..byte_offset].chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ordinal: usize, question: &str, answer: &str) -> FaqRecord {
        FaqRecord {
            ordinal,
            question: question.to_string(),
            answer: answer.to_string(),
            reference: answer.to_string(),
            source_index: ordinal - 1,
        }
    }

    #[test]
    fn test_render_text() {
        let records = vec![
            record(1, "What does vault require?", "The vault requires two approvals."),
            record(2, "How does SSO help?", "SSO helps staff sign in."),
        ];
        assert_eq!(
            render_text(&records),
            "Q1: What does vault require?\nA: The vault requires two approvals.\nReference: \"The vault requires two approvals.\"\n\n\
             Q2: How does SSO help?\nA: SSO helps staff sign in.\nReference: \"SSO helps staff sign in.\""
        );
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn test_export_shape() {
        let records = vec![record(1, "Q?", "Answer text here.")];
        let export = FaqExport::new(&records, "héllo world", Utc::now());
        let value: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(value["sourceDocumentLength"], 11);
        assert_eq!(value["faqCount"], 1);
        assert!(value["generatedAt"].is_string());
        assert_eq!(value["faqs"][0]["ordinal"], 1);
        assert!(value["faqs"][0].get("sourceIndex").is_none());
    }

    #[test]
    fn test_locate_reference_char_offset() {
        let document = "Résumé first. Then the target sentence.";
        assert_eq!(locate_reference(document, "Then the target"), Some(14));
        assert_eq!(locate_reference(document, "absent"), None);
        assert_eq!(locate_reference(document, ""), None);
    }
}
