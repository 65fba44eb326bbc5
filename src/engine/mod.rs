pub mod aligner;
pub mod classifier;
pub mod render;
pub mod tokenizer;

use crate::{Analysis, Config};

/// Stateless phrase comparison engine.
///
/// Carries only constant configuration; every call is a pure function of its
/// two string inputs, so a single instance is safe to share across callers.
#[derive(Debug, Clone, Default)]
pub struct PhraseEngine {
    config: Config,
}

impl PhraseEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compare a submitted phrase against the reference and classify every
    /// discrepancy. Total over all string pairs; empty input yields an empty
    /// analysis.
    pub fn analyze(&self, submission: &str, reference: &str) -> Analysis {
        let submitted = tokenizer::tokenize(submission);
        let correct = tokenizer::tokenize(reference);
        let alignment = aligner::align(&submitted, &correct);
        classifier::classify(&alignment, &submitted, &correct, &self.config)
    }

    /// Analyze and render as inline-styled markup in one step.
    pub fn render(&self, submission: &str, reference: &str) -> String {
        render::to_markup(&self.analyze(submission, reference))
    }

    /// Legacy scoring metric: exact character-position matches up to the
    /// shorter input's length. Independent of the word-level vote system.
    pub fn accuracy(&self, submission: &str, reference: &str) -> usize {
        submission
            .chars()
            .zip(reference.chars())
            .filter(|(a, b)| a == b)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_sample_pairs_never_score_zero() {
        // Flawed variants from the game's phrase list must always draw votes.
        let pairs = [
            ("On va jouer Minecraft ce soir.", "On va jouer à Minecraft ce soir."),
            ("Tu es de la chance de venir avec nous!", "Tu as de la chance de venir avec nous!"),
            ("Il n'y a pas un problème.", "Il n'y a pas de problème."),
            ("Je vais à mon ami.", "Je vais chez mon ami."),
            ("Je l'ai vu lui hier.", "Je l'ai vu hier."),
        ];

        let engine = PhraseEngine::default();
        for (flawed, reference) in pairs {
            let analysis = engine.analyze(flawed, reference);
            assert!(
                analysis.total_votes > 0,
                "expected votes for {:?} vs {:?}",
                flawed,
                reference
            );
        }
    }

    #[test]
    fn test_es_for_as_is_one_substituted_word() {
        let engine = PhraseEngine::default();
        let analysis = engine.analyze(
            "Tu es de la chance de venir avec nous!",
            "Tu as de la chance de venir avec nous!",
        );
        assert_eq!(analysis.errors.len(), 1);
        assert_eq!(analysis.errors[0].submitted, "es");
        assert_eq!(analysis.errors[0].correct, "as");
        // Short word: always the multi-char tier even with one differing char.
        assert_eq!(analysis.errors[0].kind, ErrorKind::MultiChar);
        assert_eq!(analysis.total_votes, 2);
    }

    #[test]
    fn test_accuracy_counts_matching_positions() {
        let engine = PhraseEngine::default();
        assert_eq!(engine.accuracy("abc", "abc"), 3);
        assert_eq!(engine.accuracy("abc", "abd"), 2);
        assert_eq!(engine.accuracy("abc", "xbcdef"), 2);
        assert_eq!(engine.accuracy("", "anything"), 0);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let engine = PhraseEngine::default();
        let a = engine.analyze("Je vais avec l'avion.", "Je vais en avion.");
        let b = engine.analyze("Je vais avec l'avion.", "Je vais en avion.");
        assert_eq!(a, b);
    }

    #[test]
    fn test_whitespace_only_input() {
        let engine = PhraseEngine::default();
        let analysis = engine.analyze("   \t  ", "Je suis");
        assert_eq!(analysis.missing_words.len(), 2);
        assert!(analysis.correct_words.is_empty());
    }
}
