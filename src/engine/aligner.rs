use super::tokenizer::Token;

/// One step of a word-level alignment. A `Match` consumes a token from each
/// side; `Missing`/`Extra` consume from one side only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentOp {
    /// Same word at submitted index `sub` and reference index `corr`.
    Match { sub: usize, corr: usize },
    /// Reference word at `corr` absent from the submission.
    Missing { corr: usize },
    /// Submitted word at `sub` absent from the reference.
    Extra { sub: usize },
}

/// Align two token sequences by longest common subsequence over their word
/// texts (case-sensitive exact equality).
///
/// Backtracking prefers `Missing` over `Extra` on score ties, so ambiguous
/// runs report the reference's perspective first. Fuzzy matching is left to
/// the classifier.
pub fn align(submitted: &[Token], correct: &[Token]) -> Vec<AlignmentOp> {
    let m = submitted.len();
    let n = correct.len();

    let mut lcs = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            lcs[i][j] = if submitted[i - 1].text == correct[j - 1].text {
                lcs[i - 1][j - 1] + 1
            } else {
                lcs[i - 1][j].max(lcs[i][j - 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(m.max(n));
    let mut i = m;
    let mut j = n;

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && submitted[i - 1].text == correct[j - 1].text {
            ops.push(AlignmentOp::Match {
                sub: i - 1,
                corr: j - 1,
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i][j - 1] >= lcs[i - 1][j]) {
            ops.push(AlignmentOp::Missing { corr: j - 1 });
            j -= 1;
        } else {
            ops.push(AlignmentOp::Extra { sub: i - 1 });
            i -= 1;
        }
    }

    ops.reverse();
    ops
}
