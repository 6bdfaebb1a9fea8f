//! Template-based question synthesis.
//!
//! Two ordered tables drive this: subject patterns (which verb family splits
//! subject from predicate) and content cues (which question template to use).
//! New rules go into the tables; the control flow does not change.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Verb families that separate a sentence's subject from its predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbFamily {
    Be,
    Have,
    Modal,
    Enable,
    Cause,
    Require,
    Provide,
    Include,
}

impl VerbFamily {
    /// Tried in this order; the first match supplies the subject.
    pub const ALL: [VerbFamily; 8] = [
        Self::Be,
        Self::Have,
        Self::Modal,
        Self::Enable,
        Self::Cause,
        Self::Require,
        Self::Provide,
        Self::Include,
    ];

    fn verbs(&self) -> &'static str {
        match self {
            Self::Be => r"is|are|was|were",
            Self::Have => r"has|have|had",
            Self::Modal => r"can|could|may|might",
            Self::Enable => r"helps|enables|allows",
            Self::Cause => r"causes|leads\s+to",
            Self::Require => r"requires|needs",
            Self::Provide => r"provides|offers",
            Self::Include => r"includes|contains",
        }
    }
}

/// Question shapes, each bound to a content cue and a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Kind,
    Quantity,
    Cause,
    Reason,
    Enablement,
    Requirement,
    Inclusion,
    Existence,
    Process,
    General,
}

impl QuestionKind {
    /// Cue order; `General` is the fallback and has no cue.
    pub const CUED: [QuestionKind; 9] = [
        Self::Kind,
        Self::Quantity,
        Self::Cause,
        Self::Reason,
        Self::Enablement,
        Self::Requirement,
        Self::Inclusion,
        Self::Existence,
        Self::Process,
    ];

    fn cue(&self) -> Option<&'static str> {
        match self {
            Self::Kind => Some(r"\b(?:types?|kinds?|categor(?:y|ies)|forms?\s+of|variet(?:y|ies))\b"),
            Self::Quantity => Some(r"\d|\bpercent(?:age)?\b|\b(?:number|amount)\s+of\b"),
            Self::Cause => Some(r"\b(?:causes?|caused|leads?\s+to|results?\s+in|triggers?)\b"),
            Self::Reason => Some(r"\b(?:because|since|due\s+to|reasons?)\b"),
            Self::Enablement => Some(r"\b(?:helps?|enables?|allows?|lets)\b"),
            Self::Requirement => Some(r"\b(?:requires?|required|needs?|must|necessary)\b"),
            Self::Inclusion => Some(r"\b(?:includes?|including|contains?|consists?\s+of|comprises?)\b"),
            Self::Existence => Some(
                r"\b(?:located|found\s+(?:in|at|on)|takes?\s+place|occurs?|happens?|held\s+(?:in|at|on)|exists?)\b",
            ),
            Self::Process => Some(
                r"\b(?:process(?:es)?|methods?|steps?|procedures?|approach|works?\s+by)\b",
            ),
            Self::General => None,
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Self::Kind => "What types of {subject} are there?",
            Self::Quantity => "What are the figures for {subject}?",
            Self::Cause => "What does {subject} lead to?",
            Self::Reason => "Why does {subject} matter?",
            Self::Enablement => "How does {subject} help?",
            Self::Requirement => "What does {subject} require?",
            Self::Inclusion => "What does {subject} include?",
            Self::Existence => "Where or when does {subject} take place?",
            Self::Process => "How does {subject} work?",
            Self::General => "What is important to know about {subject}?",
        }
    }

    fn render(&self, subject: &str) -> String {
        self.template().replace("{subject}", subject)
    }
}

static SUBJECT_PATTERNS: Lazy<Vec<(VerbFamily, Regex)>> = Lazy::new(|| {
    VerbFamily::ALL
        .iter()
        .map(|family| {
            let pattern = format!(r"(?i)^(.+?)\s+(?:{})\b", family.verbs());
            (*family, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static CUES: Lazy<Vec<(QuestionKind, Regex)>> = Lazy::new(|| {
    QuestionKind::CUED
        .iter()
        .filter_map(|kind| {
            kind.cue()
                .map(|cue| (*kind, Regex::new(&format!("(?i){}", cue)).unwrap()))
        })
        .collect()
});

static LEADING_ARTICLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:the|a|an)\s+").unwrap());

/// A synthesized question and how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub text: String,
    pub kind: QuestionKind,
    pub subject: String,
    /// Verb family that split the subject off, if any.
    pub verb: Option<VerbFamily>,
}

/// Turn a declarative sentence into a question.
///
/// Returns `None` only when no usable subject can be extracted.
pub fn synthesize(sentence: &str, max_subject_words: usize) -> Option<Question> {
    let body = sentence.trim().trim_end_matches(['.', '!', '?']).trim_end();

    let matched = SUBJECT_PATTERNS.iter().find_map(|(family, re)| {
        let subject = re.captures(body)?.get(1)?.as_str();
        normalize_subject(subject, max_subject_words).map(|s| (*family, s))
    });

    match matched {
        Some((family, subject)) => {
            let kind = CUES
                .iter()
                .find(|(_, re)| re.is_match(body))
                .map(|(kind, _)| *kind)
                .unwrap_or(QuestionKind::General);
            Some(Question {
                text: kind.render(&subject),
                kind,
                subject,
                verb: Some(family),
            })
        }
        None => {
            let subject = normalize_subject(body, max_subject_words)?;
            Some(Question {
                text: QuestionKind::General.render(&subject),
                kind: QuestionKind::General,
                subject,
                verb: None,
            })
        }
    }
}

/// Strip a leading article, cut at the first clause separator, cap the
/// word count. `None` when nothing alphanumeric remains.
fn normalize_subject(raw: &str, max_words: usize) -> Option<String> {
    let stripped = LEADING_ARTICLE.replace(raw.trim(), "");
    let clause = stripped
        .split([',', ';', ':'])
        .next()
        .unwrap_or_default();
    let subject = clause
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");

    if subject.chars().any(char::is_alphanumeric) {
        Some(subject)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(sentence: &str) -> Question {
        synthesize(sentence, 5).expect("question")
    }

    #[test]
    fn test_requirement_template() {
        let q = ask("The process requires no manual intervention.");
        assert_eq!(q.verb, Some(VerbFamily::Require));
        assert_eq!(q.kind, QuestionKind::Requirement);
        assert_eq!(q.text, "What does process require?");
    }

    #[test]
    fn test_first_cue_wins() {
        // Quantity precedes Requirement in the cue table.
        let q = ask("The audit requires 3 independent reviewers.");
        assert_eq!(q.kind, QuestionKind::Quantity);
        assert_eq!(q.text, "What are the figures for audit?");
    }

    #[test]
    fn test_primary_match_without_cue_is_general() {
        let q = ask("Reports are generated automatically every night.");
        assert_eq!(q.verb, Some(VerbFamily::Be));
        assert_eq!(q.kind, QuestionKind::General);
        assert_eq!(q.text, "What is important to know about Reports?");
    }

    #[test]
    fn test_no_primary_match_uses_leading_words() {
        let q = ask("It ensures accuracy at every step.");
        assert_eq!(q.verb, None);
        assert_eq!(q.kind, QuestionKind::General);
        assert_eq!(q.subject, "It ensures accuracy at every");
    }

    #[test]
    fn test_subject_normalization() {
        let q = ask("An encrypted channel, negotiated per session, is mandatory for all traffic.");
        assert_eq!(q.subject, "encrypted channel");

        let long = ask("The very long subject phrase with many extra words is here.");
        assert_eq!(long.subject, "very long subject phrase with");
    }

    #[test]
    fn test_enablement_and_inclusion() {
        assert_eq!(
            ask("Single sign-on helps staff reach every tool quickly.").text,
            "How does Single sign-on help?"
        );
        assert_eq!(
            ask("The release bundle includes signed binaries and notes.").kind,
            QuestionKind::Inclusion
        );
    }

    #[test]
    fn test_reason_cue() {
        let q = ask("Rotation is mandatory because keys can leak over time.");
        assert_eq!(q.kind, QuestionKind::Reason);
        assert_eq!(q.text, "Why does Rotation matter?");
    }

    #[test]
    fn test_degenerate_sentence() {
        assert!(synthesize("!!!! ???? .... !!!! ????", 5).is_none());
        assert!(synthesize("", 5).is_none());
    }
}
