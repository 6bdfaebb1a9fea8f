//! Statistical sentence scoring.
//!
//! Term salience is frequency across the document times rarity across
//! sentences: `tf(t) * (ln(n / (1 + sf(t))) + 1)`. A sentence's importance
//! adds seven heuristic signals on top of its mean term salience.

use std::collections::{BTreeSet, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use verifaq_core::ScoringWeights;

use crate::types::{ScoredSentence, Sentence};

/// Words that mark a sentence as carrying emphasis or obligation.
pub const INDICATOR_WORDS: &[&str] = &[
    "important", "essential", "critical", "key", "main", "primary", "significant", "major",
    "fundamental", "crucial", "vital", "necessary", "must", "should", "always", "never",
    "requires", "ensures",
];

static INDICATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b({})\b", INDICATOR_WORDS.join("|"))).unwrap()
});
static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d+(?:[.,]\d+)*\s*%?|\bpercent(?:age)?\b").unwrap());
static DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:is|are|refers\s+to|means|defined\s+as)\b").unwrap());

/// Per-document term statistics. Never shared between documents.
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    term_frequency: HashMap<String, f64>,
    inverse_sentence_frequency: HashMap<String, f64>,
}

impl CorpusStats {
    pub fn compute(sentences: &[Sentence]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut sentence_freq: HashMap<&str, usize> = HashMap::new();

        for sentence in sentences {
            for token in &sentence.tokens {
                *counts.entry(token.as_str()).or_insert(0) += 1;
            }
            let distinct: HashSet<&str> = sentence.tokens.iter().map(String::as_str).collect();
            for token in distinct {
                *sentence_freq.entry(token).or_insert(0) += 1;
            }
        }

        let total_tokens: usize = counts.values().sum();
        let sentence_count = sentences.len() as f64;

        let term_frequency = counts
            .iter()
            .map(|(&t, &c)| (t.to_string(), c as f64 / total_tokens as f64))
            .collect();
        let inverse_sentence_frequency = sentence_freq
            .iter()
            .map(|(&t, &sf)| (t.to_string(), (sentence_count / (1.0 + sf as f64)).ln() + 1.0))
            .collect();

        Self {
            term_frequency,
            inverse_sentence_frequency,
        }
    }

    pub fn term_frequency(&self, token: &str) -> f64 {
        self.term_frequency.get(token).copied().unwrap_or(0.0)
    }

    pub fn inverse_sentence_frequency(&self, token: &str) -> f64 {
        self.inverse_sentence_frequency.get(token).copied().unwrap_or(0.0)
    }

    /// Combined salience of a token; 0 for tokens not in the document.
    pub fn weight(&self, token: &str) -> f64 {
        self.term_frequency(token) * self.inverse_sentence_frequency(token)
    }
}

/// The seven additive signals behind a sentence's importance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Signals {
    pub salience: f64,
    pub position: f64,
    pub length: f64,
    pub indicators: f64,
    pub numeric: f64,
    pub proper_noun: f64,
    pub definition: f64,
}

impl Signals {
    pub fn total(&self) -> f64 {
        self.salience
            + self.position
            + self.length
            + self.indicators
            + self.numeric
            + self.proper_noun
            + self.definition
    }
}

/// Compute the signals for one sentence among `sentence_count`.
pub fn signals(
    sentence: &Sentence,
    sentence_count: usize,
    stats: &CorpusStats,
    weights: &ScoringWeights,
) -> Signals {
    let token_count = sentence.tokens.len();
    let mut out = Signals::default();

    if token_count > 0 {
        let sum: f64 = sentence.tokens.iter().map(|t| stats.weight(t)).sum();
        out.salience = sum / token_count as f64 * weights.mean_weight_multiplier;
    }

    if sentence.index < 2 {
        out.position += weights.lead_bonus;
    }
    if sentence.index + 2 >= sentence_count {
        out.position += weights.tail_bonus;
    }

    let (lo, hi) = weights.length_range;
    if (lo..=hi).contains(&token_count) {
        out.length = weights.length_bonus;
    }

    let indicators: BTreeSet<String> = INDICATOR
        .find_iter(&sentence.text)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    out.indicators = indicators.len() as f64 * weights.indicator_bonus;

    if NUMERIC.is_match(&sentence.text) {
        out.numeric = weights.numeric_bonus;
    }
    if has_inner_capital(&sentence.text) {
        out.proper_noun = weights.proper_noun_bonus;
    }
    if DEFINITION.is_match(&sentence.text) {
        out.definition = weights.definition_bonus;
    }

    out
}

/// Capitalized word anywhere after the first word.
fn has_inner_capital(text: &str) -> bool {
    text.split_whitespace().skip(1).any(|word| {
        word.trim_start_matches(|c: char| !c.is_alphanumeric())
            .chars()
            .next()
            .is_some_and(char::is_uppercase)
    })
}

/// Annotate sentences with importance. Output order equals input order.
pub fn score(sentences: Vec<Sentence>, weights: &ScoringWeights) -> Vec<ScoredSentence> {
    let stats = CorpusStats::compute(&sentences);
    let count = sentences.len();

    let scored: Vec<ScoredSentence> = sentences
        .into_iter()
        .map(|sentence| {
            let importance = signals(&sentence, count, &stats, weights).total();
            ScoredSentence {
                sentence,
                importance,
            }
        })
        .collect();

    tracing::debug!("Scored {} sentences", scored.len());
    scored
}
