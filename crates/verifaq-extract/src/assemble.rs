//! FAQ record assembly: synthesized question + verbatim answer + reference.

use verifaq_core::FaqConfig;

use crate::question::synthesize;
use crate::types::{FaqRecord, ScoredSentence};

/// Build the record for one selected sentence.
///
/// The answer is the sentence text, copied unmodified. Returns `None` when
/// no question can be synthesized; the caller backfills from later picks.
pub fn assemble(scored: &ScoredSentence, ordinal: usize, config: &FaqConfig) -> Option<FaqRecord> {
    let sentence = &scored.sentence;
    let question = synthesize(&sentence.text, config.max_subject_words)?;

    Some(FaqRecord {
        ordinal,
        question: question.text,
        answer: sentence.text.clone(),
        reference: sentence.original_span.clone(),
        source_index: sentence.index,
    })
}
