use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

use super::aligner::AlignmentOp;
use super::tokenizer::Token;
use crate::config::Config;
use crate::{Analysis, ErrorKind, WordError};

/// Final classification of one alignment op.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    Pending,
    Correct,
    /// Matched word demonstrably moved to a different position.
    Position,
    /// Submitted word paired with a reference word as a substitution; `tail`
    /// is the alignment index of the consumed `Missing` op.
    PairLead {
        tail: usize,
        kind: ErrorKind,
        votes: u32,
        diffs: Vec<usize>,
    },
    /// Missing op consumed by a substitution pair.
    PairTail,
    Extra,
    Missing,
}

#[derive(Debug, Clone)]
pub(crate) struct ClassifiedOp {
    pub op: AlignmentOp,
    pub outcome: Outcome,
    /// Punctuation mismatch on an otherwise correct word: (submitted, correct).
    pub punct: Option<(String, String)>,
}

/// Walk an alignment and classify every discrepancy, producing the complete
/// `Analysis` (display segments included).
pub fn classify(
    alignment: &[AlignmentOp],
    submitted: &[Token],
    correct: &[Token],
    config: &Config,
) -> Analysis {
    let items = classify_ops(alignment, submitted, correct, config);

    let mut analysis = Analysis::default();

    for item in &items {
        match (&item.op, &item.outcome) {
            (AlignmentOp::Match { sub, .. }, Outcome::Correct) => {
                analysis.correct_words.push(submitted[*sub].text.clone());
                if let Some((sub_punct, corr_punct)) = &item.punct {
                    let votes = config.votes.punctuation;
                    analysis.errors.push(WordError {
                        kind: ErrorKind::Punctuation,
                        submitted: sub_punct.clone(),
                        correct: corr_punct.clone(),
                        votes,
                        char_diffs: Vec::new(),
                    });
                    analysis.total_votes += votes;
                }
            }
            (AlignmentOp::Match { sub, .. }, Outcome::Position) => {
                let votes = config.votes.position;
                let text = submitted[*sub].text.clone();
                analysis.errors.push(WordError {
                    kind: ErrorKind::Position,
                    submitted: text.clone(),
                    correct: text,
                    votes,
                    char_diffs: Vec::new(),
                });
                analysis.total_votes += votes;
            }
            (
                AlignmentOp::Extra { sub },
                Outcome::PairLead {
                    tail,
                    kind,
                    votes,
                    diffs,
                },
            ) => {
                let corr_index = match items[*tail].op {
                    AlignmentOp::Missing { corr } => corr,
                    _ => unreachable!("pair tail is always a missing op"),
                };
                analysis.errors.push(WordError {
                    kind: *kind,
                    submitted: submitted[*sub].text.clone(),
                    correct: correct[corr_index].text.clone(),
                    votes: *votes,
                    char_diffs: diffs.clone(),
                });
                analysis.total_votes += *votes;
            }
            (AlignmentOp::Missing { .. }, Outcome::PairTail) => {}
            (AlignmentOp::Extra { sub }, Outcome::Extra) => {
                analysis.extra_words.push(submitted[*sub].text.clone());
                analysis.total_votes += config.votes.extra;
            }
            (AlignmentOp::Missing { corr }, Outcome::Missing) => {
                analysis.missing_words.push(correct[*corr].text.clone());
                analysis.total_votes += config.votes.missing;
            }
            (op, outcome) => {
                debug_assert!(false, "inconsistent op/outcome: {:?}/{:?}", op, outcome);
            }
        }
    }

    analysis.display_segments = super::render::build_segments(&items, submitted, correct);
    analysis
}

/// Per-op classification passes: position detection, in-run pairing, the
/// whole-alignment rescue pass, leftover assignment, punctuation comparison.
fn classify_ops(
    alignment: &[AlignmentOp],
    submitted: &[Token],
    correct: &[Token],
    config: &Config,
) -> Vec<ClassifiedOp> {
    let mut items: Vec<ClassifiedOp> = alignment
        .iter()
        .map(|op| ClassifiedOp {
            op: *op,
            outcome: Outcome::Pending,
            punct: None,
        })
        .collect();

    // Where each word occurs in the submission. A shifted match counts as
    // moved only when the text is demonstrably repeated elsewhere and no
    // occurrence already sits at the reference's slot (a duplicate covering
    // the right position is not a transposition).
    let mut occurrences: HashMap<&str, Vec<usize>> = HashMap::new();
    for token in submitted {
        occurrences
            .entry(token.text.as_str())
            .or_default()
            .push(token.index);
    }

    for item in items.iter_mut() {
        if let AlignmentOp::Match { sub, corr } = item.op {
            let positions = &occurrences[submitted[sub].text.as_str()];
            let moved = sub != corr && positions.len() > 1 && !positions.contains(&corr);
            item.outcome = if moved {
                Outcome::Position
            } else {
                Outcome::Correct
            };
        }
    }

    // Pair extras with missings inside each run of consecutive non-match ops,
    // in encounter order.
    let mut run_start = None;
    for idx in 0..=items.len() {
        let is_gap = idx < items.len() && !matches!(items[idx].op, AlignmentOp::Match { .. });
        match (run_start, is_gap) {
            (None, true) => run_start = Some(idx),
            (Some(start), false) => {
                pair_run(&mut items, start..idx, submitted, correct, config);
                run_start = None;
            }
            _ => {}
        }
    }

    rescue_split_pairs(&mut items, submitted, correct, config);

    for item in items.iter_mut() {
        if item.outcome == Outcome::Pending {
            item.outcome = match item.op {
                AlignmentOp::Extra { .. } => Outcome::Extra,
                AlignmentOp::Missing { .. } => Outcome::Missing,
                AlignmentOp::Match { .. } => unreachable!("matches classified above"),
            };
        }
    }

    // Trailing punctuation only matters where the words themselves lined up.
    for item in items.iter_mut() {
        if item.outcome != Outcome::Correct {
            continue;
        }
        if let AlignmentOp::Match { sub, corr } = item.op {
            let sub_punct = &submitted[sub].punctuation;
            let corr_punct = &correct[corr].punctuation;
            if sub_punct != corr_punct {
                item.punct = Some((sub_punct.clone(), corr_punct.clone()));
            }
        }
    }

    items
}

fn pair_run(
    items: &mut [ClassifiedOp],
    range: std::ops::Range<usize>,
    submitted: &[Token],
    correct: &[Token],
    config: &Config,
) {
    let extras: Vec<usize> = range
        .clone()
        .filter(|&i| matches!(items[i].op, AlignmentOp::Extra { .. }))
        .collect();
    let missings: Vec<usize> = range
        .filter(|&i| matches!(items[i].op, AlignmentOp::Missing { .. }))
        .collect();

    for (&extra_idx, &missing_idx) in extras.iter().zip(missings.iter()) {
        bind_pair(items, extra_idx, missing_idx, submitted, correct, config);
    }
}

/// Re-scan unpaired extras/missings across the whole alignment: a pair whose
/// character similarity clears the threshold is a misspelling the LCS
/// happened to split into different runs.
fn rescue_split_pairs(
    items: &mut [ClassifiedOp],
    submitted: &[Token],
    correct: &[Token],
    config: &Config,
) {
    let extras: Vec<usize> = (0..items.len())
        .filter(|&i| {
            items[i].outcome == Outcome::Pending
                && matches!(items[i].op, AlignmentOp::Extra { .. })
        })
        .collect();

    for extra_idx in extras {
        let sub_text = match items[extra_idx].op {
            AlignmentOp::Extra { sub } => submitted[sub].text.as_str(),
            _ => continue,
        };

        let candidate = (0..items.len()).find(|&i| {
            if items[i].outcome != Outcome::Pending {
                return false;
            }
            match items[i].op {
                AlignmentOp::Missing { corr } => {
                    similarity(sub_text, &correct[corr].text) > config.similarity_threshold
                }
                _ => false,
            }
        });

        if let Some(missing_idx) = candidate {
            bind_pair(items, extra_idx, missing_idx, submitted, correct, config);
        }
    }
}

fn bind_pair(
    items: &mut [ClassifiedOp],
    extra_idx: usize,
    missing_idx: usize,
    submitted: &[Token],
    correct: &[Token],
    config: &Config,
) {
    let sub_index = match items[extra_idx].op {
        AlignmentOp::Extra { sub } => sub,
        _ => return,
    };
    let corr_index = match items[missing_idx].op {
        AlignmentOp::Missing { corr } => corr,
        _ => return,
    };

    let (kind, votes, diffs) = classify_pair(
        &submitted[sub_index].text,
        &correct[corr_index].text,
        config,
    );

    items[extra_idx].outcome = Outcome::PairLead {
        tail: missing_idx,
        kind,
        votes,
        diffs,
    };
    items[missing_idx].outcome = Outcome::PairTail;
}

/// Character-level sub-classification of a substitution pair.
fn classify_pair(sub_text: &str, corr_text: &str, config: &Config) -> (ErrorKind, u32, Vec<usize>) {
    // Identical texts can only reach here through the rescue pass, which
    // means the word exists on both sides but was moved.
    if sub_text == corr_text {
        return (ErrorKind::Position, config.votes.position, Vec::new());
    }

    let diffs = char_diff_positions(sub_text, corr_text);
    debug_assert!(!diffs.is_empty(), "differing words with no differing chars");

    let sub_len = sub_text.graphemes(true).count();
    let corr_len = corr_text.graphemes(true).count();
    let both_long = sub_len > config.short_word_len && corr_len > config.short_word_len;

    if diffs.len() == 1 && both_long {
        (ErrorKind::SingleChar, config.votes.single_char, diffs)
    } else if matching_positions(sub_text, corr_text) == 0 {
        (ErrorKind::Substitution, config.votes.substitution, diffs)
    } else {
        (ErrorKind::MultiChar, config.votes.multi_char, diffs)
    }
}

/// Grapheme offsets where the two words differ, compared position by position
/// up to the longer word's length; unmatched tail positions count as differing.
pub(crate) fn char_diff_positions(a: &str, b: &str) -> Vec<usize> {
    let a_chars: Vec<&str> = a.graphemes(true).collect();
    let b_chars: Vec<&str> = b.graphemes(true).collect();
    let max_len = a_chars.len().max(b_chars.len());

    (0..max_len)
        .filter(|&i| a_chars.get(i) != b_chars.get(i))
        .collect()
}

fn matching_positions(a: &str, b: &str) -> usize {
    a.graphemes(true)
        .zip(b.graphemes(true))
        .filter(|(x, y)| x == y)
        .count()
}

/// Matching-position count over the longer word's length, in 0.0..=1.0.
pub(crate) fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.graphemes(true).count().max(b.graphemes(true).count());
    if max_len == 0 {
        return 0.0;
    }
    matching_positions(a, b) as f64 / max_len as f64
}
