//! Configuration: pipeline tuning constants and server settings.
//!
//! Every value has a default matching the reference behaviour; the
//! environment can override the ones that are useful to calibrate.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Additive weights used by the sentence scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Multiplier applied to the mean per-token salience (dominant signal).
    pub mean_weight_multiplier: f64,
    /// Bonus for the first two sentences of the document.
    pub lead_bonus: f64,
    /// Bonus for the last two sentences of the document.
    pub tail_bonus: f64,
    /// Bonus when the token count lies inside `length_range`.
    pub length_bonus: f64,
    /// Inclusive token-count range that earns `length_bonus`.
    pub length_range: (usize, usize),
    /// Bonus per distinct indicator word.
    pub indicator_bonus: f64,
    /// Bonus for a numeral or percentage.
    pub numeric_bonus: f64,
    /// Bonus for a capitalized word after sentence start.
    pub proper_noun_bonus: f64,
    /// Bonus for a definitional cue ("is", "refers to", ...).
    pub definition_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            mean_weight_multiplier: 3.0,
            lead_bonus: 0.5,
            tail_bonus: 0.3,
            length_bonus: 0.4,
            length_range: (8, 25),
            indicator_bonus: 0.5,
            numeric_bonus: 0.4,
            proper_noun_bonus: 0.3,
            definition_bonus: 0.5,
        }
    }
}

/// Pipeline configuration for FAQ generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqConfig {
    /// Number of FAQ records to produce.
    pub faq_count: usize,
    /// Minimum qualifying sentences before generation is attempted.
    pub min_sentences: usize,
    /// Sentences shorter than this many characters are discarded.
    pub min_sentence_chars: usize,
    /// Jaccard similarity above which a candidate is considered redundant.
    pub similarity_threshold: f64,
    /// Leading words used to re-anchor a sentence when the full match fails.
    pub anchor_words: usize,
    /// Maximum words kept in a question subject.
    pub max_subject_words: usize,
    pub weights: ScoringWeights,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            faq_count: 5,
            min_sentences: 5,
            min_sentence_chars: 20,
            similarity_threshold: 0.5,
            anchor_words: 5,
            max_subject_words: 5,
            weights: ScoringWeights::default(),
        }
    }
}

impl FaqConfig {
    /// Reject values that would make generation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.faq_count == 0 {
            return Err(Error::Config("faq_count must be at least 1".into()));
        }
        if self.min_sentences == 0 {
            return Err(Error::Config("min_sentences must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::Config(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if self.anchor_words == 0 || self.max_subject_words == 0 {
            return Err(Error::Config(
                "anchor_words and max_subject_words must be at least 1".into(),
            ));
        }
        let (lo, hi) = self.weights.length_range;
        if lo > hi {
            return Err(Error::Config(format!("invalid length_range ({}, {})", lo, hi)));
        }
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Upper bound on a single generation request, in milliseconds.
    pub generation_timeout_ms: u64,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3004,
            generation_timeout_ms: 10_000,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Top-level VeriFAQ configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifaqConfig {
    pub faq: FaqConfig,
    pub server: ServerConfig,
}

impl VerifaqConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (environment-shaped).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        override_with(&lookup, "PORT", &mut config.server.port);
        override_with(&lookup, "VERIFAQ_TIMEOUT_MS", &mut config.server.generation_timeout_ms);
        override_with(&lookup, "VERIFAQ_MAX_UPLOAD_BYTES", &mut config.server.max_upload_bytes);
        override_with(&lookup, "VERIFAQ_FAQ_COUNT", &mut config.faq.faq_count);
        override_with(&lookup, "VERIFAQ_MIN_SENTENCES", &mut config.faq.min_sentences);
        override_with(&lookup, "VERIFAQ_MIN_SENTENCE_CHARS", &mut config.faq.min_sentence_chars);
        override_with(
            &lookup,
            "VERIFAQ_SIMILARITY_THRESHOLD",
            &mut config.faq.similarity_threshold,
        );

        config.faq.validate()?;
        Ok(config)
    }
}

fn override_with<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => *slot = value,
            Err(_) => tracing::warn!("Ignoring unparsable {}={:?}, keeping default", key, raw),
        }
    }
}
