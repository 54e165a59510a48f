//! Probability estimation
//!
//! Converts presence counts into smoothed conditional probabilities
//! P(word | class) and class priors P(class).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::corpus::{ClassCounts, WordCounts};
use crate::error::{Result, SpamError};

/// P(word | ham) and P(word | spam)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordProbability {
    pub ham: f64,
    pub spam: f64,
}

impl WordProbability {
    /// Multiplicatively neutral value used for words unseen in training
    pub const NEUTRAL: WordProbability = WordProbability { ham: 1.0, spam: 1.0 };
}

/// P(ham) and P(spam)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassPrior {
    pub ham: f64,
    pub spam: f64,
}

/// Smoothed probabilities estimated from a training corpus
///
/// Only produced by [`estimate`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityModel {
    word_class_prob: HashMap<String, WordProbability>,
    class_prior: ClassPrior,
}

impl ProbabilityModel {
    /// Conditional probabilities of a word, `None` if it was never seen
    pub fn word_probability(&self, word: &str) -> Option<WordProbability> {
        self.word_class_prob.get(word).copied()
    }

    pub fn class_prior(&self) -> ClassPrior {
        self.class_prior
    }

    pub fn word_probabilities(&self) -> &HashMap<String, WordProbability> {
        &self.word_class_prob
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.word_class_prob.contains_key(word)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.word_class_prob.len()
    }
}

/// Check that `alpha` is a usable additive smoothing constant
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && alpha >= 0.0 {
        Ok(())
    } else {
        Err(SpamError::InvalidAlpha(alpha))
    }
}

/// Estimate P(word | class) and P(class) with additive smoothing.
///
/// Word conditionals are divided by the same smoothed class totals as the
/// priors. At least one of `class_counts.ham`, `class_counts.spam` and
/// `alpha` must be positive, and a class with a zero smoothed total cannot
/// have word conditionals.
pub fn estimate(word_counts: &WordCounts, class_counts: ClassCounts, alpha: f64) -> Result<ProbabilityModel> {
    validate_alpha(alpha)?;

    let mut n_ham = class_counts.ham as f64;
    let mut n_spam = class_counts.spam as f64;
    let n_total = n_ham + n_spam + 2.0 * alpha;
    if n_total == 0.0 {
        return Err(SpamError::DegenerateModel(
            "no training messages and no smoothing: class priors are undefined".to_string(),
        ));
    }

    if alpha > 0.0 {
        n_ham += alpha;
        n_spam += alpha;
    }

    let class_prior = ClassPrior {
        ham: n_ham / n_total,
        spam: n_spam / n_total,
    };

    if !word_counts.is_empty() && (n_ham == 0.0 || n_spam == 0.0) {
        return Err(SpamError::DegenerateModel(format!(
            "a class has no training messages and no smoothing (ham={}, spam={}): word probabilities are undefined",
            class_counts.ham, class_counts.spam
        )));
    }

    let word_class_prob: HashMap<String, WordProbability> = word_counts
        .iter()
        .map(|(word, count)| {
            let probability = WordProbability {
                ham: (count.ham as f64 + alpha) / n_ham,
                spam: (count.spam as f64 + alpha) / n_spam,
            };
            (word.clone(), probability)
        })
        .collect();

    debug!(
        vocabulary = word_class_prob.len(),
        p_ham = class_prior.ham,
        p_spam = class_prior.spam,
        "Estimated probabilities"
    );

    Ok(ProbabilityModel {
        word_class_prob,
        class_prior,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::WordCount;

    const EPSILON: f64 = 1e-12;

    fn word_counts(entries: &[(&str, u64, u64)]) -> WordCounts {
        entries
            .iter()
            .map(|&(word, ham, spam)| (word.to_string(), WordCount { ham, spam }))
            .collect()
    }

    #[test]
    fn test_estimate_with_smoothing() {
        let counts = word_counts(&[("hello", 1, 0), ("world", 2, 0), ("money", 0, 1)]);
        let model = estimate(&counts, ClassCounts { ham: 2, spam: 1 }, 1.0).unwrap();

        let prior = model.class_prior();
        assert!((prior.ham - 0.6).abs() < EPSILON);
        assert!((prior.spam - 0.4).abs() < EPSILON);

        let hello = model.word_probability("hello").unwrap();
        assert!((hello.ham - 2.0 / 3.0).abs() < EPSILON);
        assert!((hello.spam - 0.5).abs() < EPSILON);

        let world = model.word_probability("world").unwrap();
        assert!((world.ham - 1.0).abs() < EPSILON);
        assert!((world.spam - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_estimate_without_smoothing() {
        let counts = word_counts(&[("free", 1, 3)]);
        let model = estimate(&counts, ClassCounts { ham: 4, spam: 6 }, 0.0).unwrap();

        let prior = model.class_prior();
        assert!((prior.ham - 0.4).abs() < EPSILON);
        assert!((prior.spam - 0.6).abs() < EPSILON);

        let free = model.word_probability("free").unwrap();
        assert!((free.ham - 0.25).abs() < EPSILON);
        assert!((free.spam - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_priors_sum_to_one() {
        for alpha in [0.01, 0.5, 1.0, 3.0, 100.0] {
            for (ham, spam) in [(0, 0), (0, 5), (7, 0), (3, 11), (1000, 1)] {
                let model = estimate(&WordCounts::new(), ClassCounts { ham, spam }, alpha).unwrap();
                let prior = model.class_prior();
                assert!((prior.ham + prior.spam - 1.0).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_zero_total_is_degenerate() {
        let result = estimate(&WordCounts::new(), ClassCounts::default(), 0.0);
        assert!(matches!(result, Err(SpamError::DegenerateModel(_))));
    }

    #[test]
    fn test_empty_class_without_smoothing_is_degenerate() {
        let counts = word_counts(&[("hello", 2, 0)]);
        let result = estimate(&counts, ClassCounts { ham: 2, spam: 0 }, 0.0);
        assert!(matches!(result, Err(SpamError::DegenerateModel(_))));
    }

    #[test]
    fn test_invalid_alpha() {
        let counts = WordCounts::new();
        let class_counts = ClassCounts { ham: 1, spam: 1 };
        assert!(matches!(estimate(&counts, class_counts, -1.0), Err(SpamError::InvalidAlpha(_))));
        assert!(matches!(estimate(&counts, class_counts, f64::NAN), Err(SpamError::InvalidAlpha(_))));
    }

    #[test]
    fn test_unseen_word() {
        let counts = word_counts(&[("hello", 1, 0)]);
        let model = estimate(&counts, ClassCounts { ham: 1, spam: 1 }, 1.0).unwrap();
        assert!(model.word_probability("goodbye").is_none());
        assert!(!model.contains_word("goodbye"));
        assert_eq!(model.vocabulary_size(), 1);
    }
}
