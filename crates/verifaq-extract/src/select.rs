//! Candidate selection: rank by importance, suppress near-duplicates,
//! then relax the filter if diverse candidates run out.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::ScoredSentence;

/// Which pass accepted a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPass {
    /// Accepted under the similarity filter.
    Strict,
    /// Filled in after the filter exhausted the pool.
    Relaxed,
}

/// A selected sentence.
#[derive(Debug, Clone, Copy)]
pub struct Pick<'a> {
    pub scored: &'a ScoredSentence,
    pub pass: SelectionPass,
}

/// Order by descending importance. The sort is stable, so ties keep
/// document order.
pub fn rank(scored: &[ScoredSentence]) -> Vec<&ScoredSentence> {
    let mut ranked: Vec<&ScoredSentence> = scored.iter().collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked
}

/// |A ∩ B| / |A ∪ B| over deduplicated token sets. Two empty sets score 0.
pub fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn token_set(scored: &ScoredSentence) -> HashSet<&str> {
    scored.sentence.tokens.iter().map(String::as_str).collect()
}

/// Walk `ranked`, accepting candidates whose similarity with every accepted
/// one is at most `threshold`, until `count` are accepted.
pub fn select_strict<'a>(
    ranked: &[&'a ScoredSentence],
    count: usize,
    threshold: f64,
) -> Vec<&'a ScoredSentence> {
    let mut accepted: Vec<(&ScoredSentence, HashSet<&str>)> = Vec::new();

    for &candidate in ranked {
        if accepted.len() >= count {
            break;
        }
        let tokens = token_set(candidate);
        let redundant = accepted
            .iter()
            .any(|(_, other)| jaccard(&tokens, other) > threshold);
        if redundant {
            tracing::trace!("Rejected sentence {} as redundant", candidate.sentence.index);
            continue;
        }
        accepted.push((candidate, tokens));
    }

    accepted.into_iter().map(|(s, _)| s).collect()
}

/// Fill up to `count` total picks from the complement of `chosen`,
/// highest importance first, ignoring similarity.
pub fn select_relaxed<'a>(
    ranked: &[&'a ScoredSentence],
    chosen: &[&'a ScoredSentence],
    count: usize,
) -> Vec<&'a ScoredSentence> {
    let used: HashSet<usize> = chosen.iter().map(|s| s.sentence.index).collect();
    ranked
        .iter()
        .copied()
        .filter(|s| !used.contains(&s.sentence.index))
        .take(count.saturating_sub(chosen.len()))
        .collect()
}

/// Select `min(count, scored.len())` sentences: strict picks first, then
/// relaxed fill. Each sentence appears at most once.
///
/// `select(s, k)` is always a prefix of `select(s, k + 1)`.
pub fn select(scored: &[ScoredSentence], count: usize, threshold: f64) -> Vec<Pick<'_>> {
    let ranked = rank(scored);
    let strict = select_strict(&ranked, count, threshold);
    let relaxed = select_relaxed(&ranked, &strict, count);

    if !relaxed.is_empty() {
        tracing::debug!(
            "Similarity filter yielded {} of {} picks, relaxing for {} more",
            strict.len(),
            count,
            relaxed.len()
        );
    }

    strict
        .into_iter()
        .map(|scored| Pick {
            scored,
            pass: SelectionPass::Strict,
        })
        .chain(relaxed.into_iter().map(|scored| Pick {
            scored,
            pass: SelectionPass::Relaxed,
        }))
        .collect()
}
