//! FAQ generation pipeline: segment → score → select → synthesize → assemble.

use tracing::{debug, info, warn};
use verifaq_core::{Error, FaqConfig, Result};

use crate::assemble::assemble;
use crate::score::score;
use crate::segment::segment_against;
use crate::select::{select, SelectionPass};
use crate::types::{FaqRecord, Generation, GenerationWarning};

/// Stateless FAQ generator. Holds configuration only; every call is
/// independent of earlier calls.
#[derive(Debug, Clone, Default)]
pub struct FaqGenerator {
    config: FaqConfig,
}

impl FaqGenerator {
    pub fn new(config: FaqConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FaqConfig {
        &self.config
    }

    /// Generate FAQ records from a fully materialized document.
    ///
    /// Fails with `InsufficientContent` before any scoring when fewer than
    /// `min_sentences` qualifying sentences exist. Shortfalls after that
    /// point are reported as warnings next to the partial result.
    pub fn generate(&self, document: &str) -> Result<Generation> {
        self.generate_with_source(document, document)
    }

    /// Like [`generate`](Self::generate), but references are taken from
    /// `source` rather than from the analysed `text`. Answers still copy
    /// `text` verbatim.
    pub fn generate_with_source(&self, text: &str, source: &str) -> Result<Generation> {
        let config = &self.config;
        let sentences = segment_against(text, source, config);
        let sentence_count = sentences.len();

        if sentence_count < config.min_sentences {
            warn!(
                "Insufficient content: {} qualifying sentences, need {}",
                sentence_count, config.min_sentences
            );
            return Err(Error::InsufficientContent {
                found: sentence_count,
                required: config.min_sentences,
            });
        }

        let scored = score(sentences, &config.weights);

        let target = config.faq_count;
        let mut faqs: Vec<FaqRecord> = Vec::with_capacity(target);
        let mut relaxed = Vec::new();
        let mut unanchored = Vec::new();
        let mut processed = 0;
        let mut budget = target.min(scored.len());

        // Selection is prefix-stable, so widening the budget only appends
        // candidates to backfill sentences that yielded no question.
        loop {
            let picks = select(&scored, budget, config.similarity_threshold);
            for pick in &picks[processed..] {
                if faqs.len() == target {
                    break;
                }
                let ordinal = faqs.len() + 1;
                match assemble(pick.scored, ordinal, config) {
                    Some(record) => {
                        if pick.pass == SelectionPass::Relaxed {
                            relaxed.push(ordinal);
                        }
                        if !pick.scored.sentence.anchor.is_anchored() {
                            unanchored.push(ordinal);
                        }
                        faqs.push(record);
                    }
                    None => debug!(
                        "No question for sentence {}, backfilling",
                        pick.scored.sentence.index
                    ),
                }
            }
            processed = picks.len();

            if faqs.len() == target || budget == scored.len() {
                break;
            }
            budget = (budget + target - faqs.len()).min(scored.len());
        }

        let mut warnings = Vec::new();
        if faqs.len() < target {
            warnings.push(GenerationWarning::Shortfall {
                requested: target,
                produced: faqs.len(),
            });
        }
        if !relaxed.is_empty() {
            warnings.push(GenerationWarning::RelaxedSelection { ordinals: relaxed });
        }
        warnings.extend(
            unanchored
                .into_iter()
                .map(|ordinal| GenerationWarning::UnanchoredReference { ordinal }),
        );
        for warning in &warnings {
            warn!("{}", warning);
        }

        info!(
            "Generated {} FAQs from {} sentences ({} warnings)",
            faqs.len(),
            sentence_count,
            warnings.len()
        );

        Ok(Generation {
            faqs,
            sentence_count,
            warnings,
        })
    }
}

/// Generate FAQs with the default configuration.
pub fn generate(document: &str) -> Result<Generation> {
    FaqGenerator::default().generate(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Encryption is essential for every stored customer record. \
        Access logs are retained for ninety days by default. \
        The vault requires two approvals for each secret release. \
        Backups run nightly and are copied to a second region. \
        Operators must rotate signing keys every quarter. \
        Incident reports include a timeline and a root cause summary.";

    #[test]
    fn test_generates_configured_count() {
        let generation = generate(DOC).unwrap();
        assert_eq!(generation.faqs.len(), 5);
        assert_eq!(generation.sentence_count, 6);
        let ordinals: Vec<usize> = generation.faqs.iter().map(|f| f.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_insufficient_content_fails_fast() {
        let err = generate("Only one sentence is present in this text.").unwrap_err();
        assert!(matches!(err, Error::InsufficientContent { found: 1, required: 5 }));
    }

    #[test]
    fn test_custom_count() {
        let generator = FaqGenerator::new(FaqConfig {
            faq_count: 2,
            ..Default::default()
        });
        let generation = generator.generate(DOC).unwrap();
        assert_eq!(generation.faqs.len(), 2);
        assert!(generation.warnings.is_empty());
    }

    #[test]
    fn test_degenerate_sentences_backfilled() {
        let doc = "!!!! ???? !!!! ???? !!!! ????. Firewalls block unsolicited inbound traffic. \
            Patches are applied within seven days of release. \
            Staff complete security training every year. \
            Vendors sign a data processing agreement first. \
            Laptops use full disk encryption at rest.";
        let generator = FaqGenerator::new(FaqConfig {
            faq_count: 6,
            ..Default::default()
        });
        let generation = generator.generate(doc).unwrap();
        assert_eq!(generation.sentence_count, 6);
        assert_eq!(generation.faqs.len(), 5);
        assert!(generation.faqs.iter().all(|f| !f.answer.starts_with('!')));
        assert!(generation.warnings.contains(&GenerationWarning::Shortfall {
            requested: 6,
            produced: 5
        }));
    }

    #[test]
    fn test_relaxed_picks_reported() {
        let doc = "Quarterly access review covers admin accounts. \
            Quarterly access review covers admin accounts again. \
            Quarterly access review covers admin accounts twice. \
            Quarterly access review covers admin accounts thrice. \
            Quarterly access review covers admin accounts always.";
        let generation = generate(doc).unwrap();
        assert_eq!(generation.faqs.len(), 5);
        assert!(generation
            .warnings
            .iter()
            .any(|w| matches!(w, GenerationWarning::RelaxedSelection { ordinals } if ordinals.len() == 4)));
    }
}
