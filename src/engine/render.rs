use unicode_segmentation::UnicodeSegmentation;

use super::aligner::AlignmentOp;
use super::classifier::{ClassifiedOp, Outcome};
use super::tokenizer::Token;
use crate::{Analysis, DisplaySegment, ErrorKind};

const WRONG_COLOR: &str = "#ff6b6b";
const MISSING_COLOR: &str = "#d3d3d3";
const INSERT_COLOR: &str = "#51cf66";

/// Convert classified ops into display segments ordered to mirror the
/// submitted phrase. Consecutive missing words merge into one segment.
pub(crate) fn build_segments(
    items: &[ClassifiedOp],
    submitted: &[Token],
    correct: &[Token],
) -> Vec<DisplaySegment> {
    let mut segments: Vec<DisplaySegment> = Vec::new();

    for item in items {
        match (&item.op, &item.outcome) {
            (AlignmentOp::Match { sub, .. }, Outcome::Correct) => {
                let token = &submitted[*sub];
                match &item.punct {
                    Some((_, corr_punct)) => segments.push(DisplaySegment {
                        kind: ErrorKind::Punctuation,
                        text: token.original.clone(),
                        correction: Some(corr_punct.clone()),
                        char_diffs: Vec::new(),
                    }),
                    None => segments.push(DisplaySegment {
                        kind: ErrorKind::Correct,
                        text: token.original.clone(),
                        correction: None,
                        char_diffs: Vec::new(),
                    }),
                }
            }
            (AlignmentOp::Match { sub, .. }, Outcome::Position) => {
                segments.push(DisplaySegment {
                    kind: ErrorKind::Position,
                    text: submitted[*sub].original.clone(),
                    correction: None,
                    char_diffs: Vec::new(),
                });
            }
            (
                AlignmentOp::Extra { sub },
                Outcome::PairLead {
                    tail, kind, diffs, ..
                },
            ) => {
                let correction = match items[*tail].op {
                    AlignmentOp::Missing { corr } => correct[corr].original.clone(),
                    _ => unreachable!("pair tail is always a missing op"),
                };
                segments.push(DisplaySegment {
                    kind: *kind,
                    text: submitted[*sub].original.clone(),
                    correction: Some(correction),
                    char_diffs: diffs.clone(),
                });
            }
            (AlignmentOp::Missing { .. }, Outcome::PairTail) => {}
            (AlignmentOp::Extra { sub }, Outcome::Extra) => {
                segments.push(DisplaySegment {
                    kind: ErrorKind::Extra,
                    text: submitted[*sub].original.clone(),
                    correction: None,
                    char_diffs: Vec::new(),
                });
            }
            (AlignmentOp::Missing { corr }, Outcome::Missing) => {
                let text = correct[*corr].original.clone();
                match segments.last_mut() {
                    Some(last) if last.kind == ErrorKind::Missing => {
                        last.text.push(' ');
                        last.text.push_str(&text);
                    }
                    _ => segments.push(DisplaySegment {
                        kind: ErrorKind::Missing,
                        text,
                        correction: None,
                        char_diffs: Vec::new(),
                    }),
                }
            }
            _ => {}
        }
    }

    segments
}

/// Render an analysis as inline-styled HTML spans: wrong words struck through
/// and followed by the expected word, missing words underlined in gray.
pub fn to_markup(analysis: &Analysis) -> String {
    let mut out = Vec::with_capacity(analysis.display_segments.len());

    for segment in &analysis.display_segments {
        match segment.kind {
            ErrorKind::Correct => out.push(segment.text.clone()),
            ErrorKind::Punctuation => out.push(markup_punctuation(segment)),
            ErrorKind::SingleChar => {
                let mut piece = markup_char_errors(&segment.text, &segment.char_diffs);
                if let Some(correction) = &segment.correction {
                    piece.push(' ');
                    piece.push_str(&insert_span(correction));
                }
                out.push(piece);
            }
            ErrorKind::MultiChar | ErrorKind::Substitution => {
                let mut piece = strike_span(&segment.text);
                if let Some(correction) = &segment.correction {
                    piece.push(' ');
                    piece.push_str(&insert_span(correction));
                }
                out.push(piece);
            }
            ErrorKind::Missing => out.push(format!(
                "<span style=\"color: {}; text-decoration: underline;\">{}</span>",
                MISSING_COLOR, segment.text
            )),
            ErrorKind::Extra => out.push(strike_span(&segment.text)),
            ErrorKind::Position => out.push(format!(
                "<span style=\"text-decoration: line-through;\">{}</span>",
                segment.text
            )),
        }
    }

    out.join(" ")
}

fn strike_span(text: &str) -> String {
    format!(
        "<span style=\"color: {}; text-decoration: line-through;\">{}</span>",
        WRONG_COLOR, text
    )
}

fn insert_span(text: &str) -> String {
    format!(
        "<span style=\"color: {}; text-decoration: underline;\">{}</span>",
        INSERT_COLOR, text
    )
}

/// Word is right, trailing punctuation is not: highlight just the punctuation.
fn markup_punctuation(segment: &DisplaySegment) -> String {
    let word = segment.text.trim_end_matches(['.', '!', '?']);
    let punct = &segment.text[word.len()..];
    format!(
        "{}<span style=\"color: {};\">{}</span>",
        word, WRONG_COLOR, punct
    )
}

/// Highlight the differing graphemes inside a near-miss word.
fn markup_char_errors(text: &str, diffs: &[usize]) -> String {
    let mut result = String::new();
    for (i, grapheme) in text.graphemes(true).enumerate() {
        if diffs.contains(&i) {
            result.push_str(&format!(
                "<span style=\"color: {};\">{}</span>",
                WRONG_COLOR, grapheme
            ));
        } else {
            result.push_str(grapheme);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PhraseEngine;

    fn segments(submission: &str, reference: &str) -> Vec<DisplaySegment> {
        PhraseEngine::default()
            .analyze(submission, reference)
            .display_segments
    }

    #[test]
    fn test_segments_mirror_submission_order() {
        let segs = segments("Il est beau aujourd'hui!", "Il fait beau aujourd'hui!");
        let texts: Vec<&str> = segs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Il", "est", "beau", "aujourd'hui!"]);
        assert_eq!(segs[1].kind, ErrorKind::Substitution);
        assert_eq!(segs[1].correction.as_deref(), Some("fait"));
    }

    #[test]
    fn test_consecutive_missing_words_merge() {
        let segs = segments("Je suis", "Je suis très heureux");
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2].kind, ErrorKind::Missing);
        assert_eq!(segs[2].text, "très heureux");
    }

    #[test]
    fn test_punctuation_attaches_to_word_segment() {
        let segs = segments("Bonjour le monde.", "Bonjour le monde!");
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2].kind, ErrorKind::Punctuation);
        assert_eq!(segs[2].text, "monde.");
        assert_eq!(segs[2].correction.as_deref(), Some("!"));
    }

    #[test]
    fn test_markup_wrong_then_correct() {
        let engine = PhraseEngine::default();
        let markup = engine.render("Il est beau", "Il fait beau");
        let est = markup.find("est").unwrap();
        let fait = markup.find("fait").unwrap();
        assert!(est < fait);
        assert!(markup.contains("line-through"));
        assert!(markup.contains("underline"));
    }

    #[test]
    fn test_markup_highlights_single_char() {
        let engine = PhraseEngine::default();
        let markup = engine.render("le morde", "le monde");
        assert!(markup.contains(&format!("<span style=\"color: {};\">r</span>", WRONG_COLOR)));
    }

    #[test]
    fn test_markup_perfect_phrase_is_plain() {
        let engine = PhraseEngine::default();
        let markup = engine.render("Je suis là", "Je suis là");
        assert_eq!(markup, "Je suis là");
    }

    #[test]
    fn test_markup_punctuation_highlight() {
        let engine = PhraseEngine::default();
        let markup = engine.render("Bonjour le monde.", "Bonjour le monde!");
        assert!(markup.starts_with("Bonjour le monde<span"));
        assert!(markup.contains(">.</span>"));
    }
}
