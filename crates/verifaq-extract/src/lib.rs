//! VeriFAQ Extract — verbatim FAQ generation.
//!
//! Every answer is a sentence of the source document copied unmodified, and
//! every record carries the original span it was taken from. Questions are
//! built from ordered pattern tables; nothing is paraphrased.

pub mod assemble;
pub mod export;
pub mod pipeline;
pub mod question;
pub mod score;
pub mod segment;
pub mod select;
pub mod types;

pub use export::{locate_reference, render_text, ExportedFaq, FaqExport};
pub use pipeline::{generate, FaqGenerator};
pub use question::{synthesize, Question, QuestionKind, VerbFamily};
pub use segment::{segment, segment_against, tokenize};
pub use types::{FaqRecord, Generation, GenerationWarning, ScoredSentence, Sentence, SpanAnchor};
