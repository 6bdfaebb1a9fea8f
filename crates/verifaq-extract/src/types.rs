//! Pipeline data model: sentences, scored sentences, FAQ records, results.

use serde::{Deserialize, Serialize};

/// How a sentence's reference span was recovered from the raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpanAnchor {
    /// The whole sentence matched (case and whitespace tolerant).
    Exact { start: usize, end: usize },
    /// Only the leading words matched; the span was extended to the next
    /// terminal punctuation mark.
    Prefix { start: usize, end: usize },
    /// No match; the reference is the normalized text itself.
    Unanchored,
}

impl SpanAnchor {
    pub fn is_anchored(&self) -> bool {
        !matches!(self, Self::Unanchored)
    }

    /// Byte range in the source document, when anchored.
    pub fn range(&self) -> Option<std::ops::Range<usize>> {
        match *self {
            Self::Exact { start, end } | Self::Prefix { start, end } => Some(start..end),
            Self::Unanchored => None,
        }
    }
}

/// A qualifying sentence of the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Normalized text; this is what an FAQ answer copies verbatim.
    pub text: String,
    /// Verbatim substring of the untouched document (or `text` when unanchored).
    pub original_span: String,
    pub anchor: SpanAnchor,
    /// 0-based position among qualifying sentences.
    pub index: usize,
    /// Lowercased content words, stop-words removed.
    pub tokens: Vec<String>,
}

/// A sentence paired with its importance for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSentence {
    pub sentence: Sentence,
    pub importance: f64,
}

/// One generated question-answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqRecord {
    /// 1-based presentation order.
    pub ordinal: usize,
    pub question: String,
    /// Exact sentence text; never rewritten.
    pub answer: String,
    /// Original document span the answer came from.
    pub reference: String,
    /// Index of the originating sentence.
    pub source_index: usize,
}

/// Non-fatal conditions reported alongside a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationWarning {
    /// Fewer records than requested could be produced.
    Shortfall { requested: usize, produced: usize },
    /// These records were filled in after diverse candidates ran out and may
    /// overlap other answers.
    RelaxedSelection { ordinals: Vec<usize> },
    /// The reference could not be located in the document and falls back to
    /// the normalized sentence text.
    UnanchoredReference { ordinal: usize },
}

impl std::fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shortfall { requested, produced } => write!(
                f,
                "only {} of {} FAQs could be generated from this document",
                produced, requested
            ),
            Self::RelaxedSelection { ordinals } => write!(
                f,
                "FAQs {:?} were selected without the diversity filter and may repeat content",
                ordinals
            ),
            Self::UnanchoredReference { ordinal } => write!(
                f,
                "FAQ {} reference could not be located verbatim in the source document",
                ordinal
            ),
        }
    }
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub faqs: Vec<FaqRecord>,
    /// Qualifying sentences found by segmentation.
    pub sentence_count: usize,
    pub warnings: Vec<GenerationWarning>,
}
