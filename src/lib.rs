pub mod cli;
pub mod config;
pub mod engine;
pub mod pairs;

pub use config::Config;
pub use engine::PhraseEngine;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one discrepancy between a submitted and a reference phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Word matched exactly at the expected position.
    Correct,
    /// One differing character position in a word longer than the short-word cutoff.
    SingleChar,
    /// Two or more differing positions, or a short word with any difference.
    MultiChar,
    /// Paired wrong word sharing no character positions with the reference word.
    Substitution,
    /// Reference word absent from the submission.
    Missing,
    /// Submitted word absent from the reference.
    Extra,
    /// Word present on both sides but demonstrably moved.
    Position,
    /// Word correct, trailing sentence punctuation wrong.
    Punctuation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Correct => "correct",
            ErrorKind::SingleChar => "single_char",
            ErrorKind::MultiChar => "multi_char",
            ErrorKind::Substitution => "substitution",
            ErrorKind::Missing => "missing",
            ErrorKind::Extra => "extra",
            ErrorKind::Position => "position",
            ErrorKind::Punctuation => "punctuation",
        };
        write!(f, "{}", s)
    }
}

/// One classified error with its penalty weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordError {
    pub kind: ErrorKind,
    /// What was submitted (the punctuation run itself for `Punctuation` errors).
    pub submitted: String,
    /// What the reference expected.
    pub correct: String,
    pub votes: u32,
    /// Grapheme offsets where characters differ; only populated for the
    /// single/multi-char kinds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub char_diffs: Vec<usize>,
}

/// One unit of the renderable diff, ordered to mirror the submitted phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySegment {
    pub kind: ErrorKind,
    /// Display text, punctuation retained.
    pub text: String,
    /// The corrected form, when one exists for this segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
    /// Grapheme offsets to highlight inside `text`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub char_diffs: Vec<usize>,
}

/// Full result of comparing a submission against a reference phrase.
///
/// Immutable once returned; every input word lands in exactly one of
/// `correct_words`, `errors`, `missing_words`, or `extra_words`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub correct_words: Vec<String>,
    pub errors: Vec<WordError>,
    pub missing_words: Vec<String>,
    pub extra_words: Vec<String>,
    pub total_votes: u32,
    pub display_segments: Vec<DisplaySegment>,
}

impl Analysis {
    pub fn is_perfect(&self) -> bool {
        self.total_votes == 0
    }
}

/// Analyze with default configuration.
pub fn analyze(submission: &str, reference: &str) -> Analysis {
    PhraseEngine::default().analyze(submission, reference)
}

/// Character-position accuracy with default configuration.
pub fn accuracy(submission: &str, reference: &str) -> usize {
    PhraseEngine::default().accuracy(submission, reference)
}
