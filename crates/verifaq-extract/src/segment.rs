//! Sentence segmentation, tokenization and reference-span recovery.
//!
//! Boundaries are `.`, `!` or `?` followed by whitespace and an uppercase
//! letter. Periods that end a known abbreviation are never boundaries, so
//! "Dr. Smith" stays whole. The document text itself is never rewritten.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use verifaq_core::FaqConfig;

use crate::types::{Sentence, SpanAnchor};

/// Titles match in capitalized form only, so "200 ms." and "Main st." still
/// end sentences.
static ABBREVIATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Mr|Mrs|Ms|Dr|Prof|Sr|Jr|St)\.|(?i:\b(?:etc|e\.g|i\.e|vs)\.)").unwrap()
});

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Closed stop-word list: articles, conjunctions, auxiliaries, pronouns,
/// discourse words.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "if", "then", "than",
    "because", "while", "although", "though", "whether", "is", "am", "are", "was", "were",
    "be", "been", "being", "do", "does", "did", "has", "have", "had", "having", "will",
    "would", "shall", "can", "could", "may", "might", "i", "me", "my", "we", "us", "our",
    "you", "your", "he", "him", "his", "she", "her", "it", "its", "they", "them", "their",
    "this", "that", "these", "those", "who", "whom", "which", "what", "there", "here",
    "also", "just", "very", "really", "however", "therefore", "thus", "such", "some",
    "any", "each", "other", "into", "with", "from", "for", "about", "over", "not",
];

static STOP_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Lowercase, strip punctuation, split, and drop short words and stop-words.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    NON_WORD
        .replace_all(&lower, "")
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && !STOP_SET.contains(w))
        .map(str::to_string)
        .collect()
}

/// Split a document into qualifying sentences in document order.
///
/// Returns an empty vector when nothing survives the length filter.
pub fn segment(document: &str, config: &FaqConfig) -> Vec<Sentence> {
    segment_against(document, document, config)
}

/// Segment `text` but recover reference spans from `source`.
///
/// `text` is what gets analysed; `source` is what the user sees, for example
/// raw Markdown whose markup was stripped before analysis. Sentences that
/// cannot be matched verbatim in `source` fall back to a prefix anchor or
/// stay unanchored.
pub fn segment_against(text: &str, source: &str, config: &FaqConfig) -> Vec<Sentence> {
    let candidates = split_candidates(text);
    let candidate_count = candidates.len();
    let words = word_bounds(source);

    let mut cursor = 0;
    let mut sentences = Vec::new();

    for candidate in candidates {
        let text = normalize(candidate);
        if text.chars().count() < config.min_sentence_chars {
            continue;
        }

        let (original_span, anchor) =
            match locate_span(source, &words, &text, cursor, config.anchor_words) {
                Some((start, end, anchor)) => {
                    cursor = end;
                    (source[start..end].to_string(), anchor)
                }
                None => {
                    tracing::debug!("Could not anchor sentence in source: {:?}", text);
                    (text.clone(), SpanAnchor::Unanchored)
                }
            };

        sentences.push(Sentence {
            tokens: tokenize(&text),
            index: sentences.len(),
            text,
            original_span,
            anchor,
        });
    }

    tracing::debug!(
        "Segmented {} candidates into {} qualifying sentences",
        candidate_count,
        sentences.len()
    );
    sentences
}

/// Split text at sentence boundaries (no lookbehind in `regex`).
fn split_candidates(text: &str) -> Vec<&str> {
    // Byte offsets of periods that close an abbreviation.
    let protected: HashSet<usize> = ABBREVIATION
        .find_iter(text)
        .map(|m| m.end() - 1)
        .collect();

    let mut candidates = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if !matches!(c, '.' | '!' | '?') || protected.contains(&i) {
            continue;
        }
        let end = i + c.len_utf8();
        let rest = &text[end..];
        let after_space = rest.trim_start();
        let has_space = after_space.len() < rest.len();
        let next_upper = after_space.chars().next().is_some_and(char::is_uppercase);
        if has_space && next_upper {
            candidates.push(&text[start..end]);
            start = end;
        }
    }

    if start < text.len() {
        candidates.push(&text[start..]);
    }
    candidates
}

fn normalize(candidate: &str) -> String {
    candidate.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte ranges of the whitespace-separated words of `source`.
fn word_bounds(source: &str) -> Vec<(usize, usize)> {
    let mut bounds = Vec::new();
    let mut start = None;

    for (i, c) in source.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                bounds.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        bounds.push((s, source.len()));
    }
    bounds
}

fn same_word(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// First run of source words, starting at word `from`, equal to `words`
/// ignoring case. Returns the byte range it covers.
fn find_words(
    source: &str,
    bounds: &[(usize, usize)],
    words: &[&str],
    from: usize,
) -> Option<(usize, usize)> {
    let n = words.len();
    if n == 0 || bounds.len() < n {
        return None;
    }
    (from..=bounds.len() - n)
        .find(|&i| {
            words
                .iter()
                .zip(&bounds[i..i + n])
                .all(|(word, &(s, e))| same_word(word, &source[s..e]))
        })
        .map(|i| (bounds[i].0, bounds[i + n - 1].1))
}

/// Find the verbatim source span for a normalized sentence.
///
/// Tries the whole sentence first (case-insensitive, any whitespace between
/// words), then the leading `anchor_words` words extended to the next
/// terminal punctuation. Searches from `cursor`, then from the start.
fn locate_span(
    source: &str,
    bounds: &[(usize, usize)],
    text: &str,
    cursor: usize,
    anchor_words: usize,
) -> Option<(usize, usize, SpanAnchor)> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    let from = bounds.partition_point(|&(start, _)| start < cursor);
    let exact = find_words(source, bounds, &words, from)
        .or_else(|| find_words(source, bounds, &words, 0));
    if let Some((start, end)) = exact {
        return Some((start, end, SpanAnchor::Exact { start, end }));
    }

    let lead: Vec<String> = words
        .iter()
        .take(anchor_words.max(1))
        .map(|w| regex::escape(w))
        .collect();
    let prefix = format!(r"(?i){}[^.!?]*[.!?]?", lead.join(r"\s+"));
    find_from(source, &prefix, cursor)
        .map(|(start, end)| (start, end, SpanAnchor::Prefix { start, end }))
}

fn find_from(source: &str, pattern: &str, cursor: usize) -> Option<(usize, usize)> {
    let re = Regex::new(pattern).ok()?;
    re.find_at(source, cursor)
        .or_else(|| re.find(source))
        .map(|m| (m.start(), m.end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FaqConfig {
        FaqConfig::default()
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("The API's rate-limit is 100 requests, and it resets hourly!");
        assert_eq!(tokens, vec!["apis", "ratelimit", "100", "requests", "resets", "hourly"]);
    }

    #[test]
    fn test_split_on_uppercase_boundary_only() {
        let sentences = segment(
            "Version 2.5 ships with faster parsing. it still reads old files fine. Upgrades are optional for everyone.",
            &config(),
        );
        assert_eq!(sentences.len(), 2);
        assert_eq!(
            sentences[0].text,
            "Version 2.5 ships with faster parsing. it still reads old files fine."
        );
        assert_eq!(sentences[1].text, "Upgrades are optional for everyone.");
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let doc = "Dr. Smith reviewed the audit trail yesterday. Tools such as scanners, e.g. Nessus, were used.";
        let sentences = segment(doc, &config());
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Dr. Smith reviewed the audit trail yesterday.");
        assert_eq!(sentences[1].text, "Tools such as scanners, e.g. Nessus, were used.");
    }

    #[test]
    fn test_length_boundary() {
        let kept = segment("Exactly twenty chars", &config());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text.chars().count(), 20);

        let dropped = segment("Too short by a char", &config());
        assert!(dropped.is_empty());
    }

    #[test]
    fn test_whitespace_normalized_but_span_verbatim() {
        let doc = "The   gateway\nvalidates every token. Short one. Another sentence follows right here.";
        let sentences = segment(doc, &config());
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "The gateway validates every token.");
        assert_eq!(sentences[0].original_span, "The   gateway\nvalidates every token.");
        assert!(matches!(sentences[0].anchor, SpanAnchor::Exact { start: 0, .. }));
        assert!(doc.contains(&sentences[1].original_span));
        assert_eq!(sentences[1].index, 1);
    }

    #[test]
    fn test_repeated_sentence_anchors_in_order() {
        let doc = "Backups run every night at midnight. Logs are kept. Backups run every night at midnight.";
        let sentences = segment(doc, &config());
        assert_eq!(sentences.len(), 2);
        let first = sentences[0].anchor.range().unwrap();
        let second = sentences[1].anchor.range().unwrap();
        assert!(second.start > first.start);
    }

    #[test]
    fn test_empty_document() {
        assert!(segment("", &config()).is_empty());
        assert!(segment("   \n  ", &config()).is_empty());
    }

    #[test]
    fn test_locate_span_prefix_fallback() {
        // Sentence text that no longer matches in full falls back to its lead words.
        let doc = "Access reviews happen quarterly for all admin accounts.";
        let bounds = word_bounds(doc);
        let (start, end, anchor) = locate_span(
            doc,
            &bounds,
            "Access reviews happen quarterly for every account.",
            0,
            5,
        )
        .unwrap();
        assert_eq!(&doc[start..end], doc);
        assert!(matches!(anchor, SpanAnchor::Prefix { .. }));
        assert!(locate_span(doc, &bounds, "Nothing here matches at all.", 0, 5).is_none());
    }

    #[test]
    fn test_exact_match_ignores_case_and_spacing() {
        let doc = "intro text.  BACKUPS run\tnightly in two regions. More follows here.";
        let bounds = word_bounds(doc);
        let (start, end, anchor) =
            locate_span(doc, &bounds, "Backups run nightly in two regions.", 0, 5).unwrap();
        assert_eq!(&doc[start..end], "BACKUPS run\tnightly in two regions.");
        assert_eq!(anchor, SpanAnchor::Exact { start, end });
    }

    #[test]
    fn test_word_bounds() {
        let doc = "  Two\u{E000}words \n and more ";
        let words: Vec<&str> = word_bounds(doc).iter().map(|&(s, e)| &doc[s..e]).collect();
        assert_eq!(words, vec!["Two\u{E000}words", "and", "more"]);
        assert!(word_bounds("").is_empty());
    }

    #[test]
    fn test_private_use_characters_left_untouched() {
        let doc = "Key\u{E000}Value pairs are stored in the vault. Dr. Lee approves every change.";
        let sentences = segment(doc, &config());
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Key\u{E000}Value pairs are stored in the vault.");
        assert_eq!(sentences[0].original_span, sentences[0].text);
        assert!(sentences[0].anchor.is_anchored());
        assert_eq!(sentences[1].text, "Dr. Lee approves every change.");
    }

    #[test]
    fn test_lowercase_units_end_sentences() {
        let doc = "Latency stays under 200 ms. Requests are retried twice on failure. \
                   The office sits on Main st. Deliveries arrive before noon daily. \
                   Mr. Jones signs every purchase order himself.";
        let texts: Vec<String> = segment(doc, &config()).into_iter().map(|s| s.text).collect();
        assert_eq!(
            texts,
            vec![
                "Latency stays under 200 ms.",
                "Requests are retried twice on failure.",
                "The office sits on Main st.",
                "Deliveries arrive before noon daily.",
                "Mr. Jones signs every purchase order himself.",
            ]
        );
    }

    #[test]
    fn test_anchored_against_separate_source() {
        let text = "Customer records are kept encrypted in every region. \
                    The vault requires two approvals for every release.";
        let source = "Customer records are kept encrypted in **every** region.\n\
                      The **vault** requires two approvals for every release.";
        let sentences = segment_against(text, source, &config());
        assert_eq!(sentences.len(), 2);

        assert!(matches!(sentences[0].anchor, SpanAnchor::Prefix { start: 0, .. }));
        assert_eq!(
            sentences[0].original_span,
            "Customer records are kept encrypted in **every** region."
        );

        assert_eq!(sentences[1].anchor, SpanAnchor::Unanchored);
        assert_eq!(sentences[1].original_span, sentences[1].text);
    }

    #[test]
    fn test_large_document_anchors_every_sentence() {
        let doc: String = (0..2_000)
            .map(|i| format!("Record number {} was archived without errors. ", i))
            .collect();
        let sentences = segment(&doc, &config());
        assert_eq!(sentences.len(), 2_000);
        assert!(sentences
            .iter()
            .all(|s| matches!(s.anchor, SpanAnchor::Exact { .. })));
        assert_eq!(sentences[1_999].original_span, "Record number 1999 was archived without errors.");
    }
}
