use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref TRAILING_PUNCT: Regex = Regex::new(r"[.!?]+$").unwrap();
}

/// A word extracted from a phrase, with its trailing sentence punctuation
/// split into a side channel so word alignment can ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Word with trailing `.`, `!`, `?` runs removed.
    pub text: String,
    /// Word as typed, punctuation retained, for display.
    pub original: String,
    /// The stripped trailing punctuation run, empty when there was none.
    pub punctuation: String,
    /// Position within the source phrase.
    pub index: usize,
}

/// Split a phrase into word tokens on whitespace runs.
///
/// Internal apostrophes and hyphens stay inside the word ("l'ai",
/// "qu'est-ce"). Empty input yields an empty sequence.
pub fn tokenize(phrase: &str) -> Vec<Token> {
    phrase
        .split_whitespace()
        .enumerate()
        .map(|(index, word)| {
            let text = TRAILING_PUNCT.replace(word, "").into_owned();
            let punctuation = word[text.len()..].to_string();
            Token {
                text,
                original: word.to_string(),
                punctuation,
                index,
            }
        })
        .collect()
}
