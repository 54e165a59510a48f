//! Naive Bayes classification of single messages

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::estimator::{ProbabilityModel, WordProbability};
use crate::corpus::Label;
use crate::error::{Result, SpamError};
use crate::text::message_words;

/// A message is ham when its ham posterior is strictly above this value
pub const HAM_THRESHOLD: f64 = 0.5;

/// Normalized class distribution of a message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posterior {
    pub ham: f64,
    pub spam: f64,
}

impl Posterior {
    /// Ham iff `ham > 0.5`; an exact tie is spam
    pub fn label(&self) -> Label {
        if self.ham > HAM_THRESHOLD {
            Label::Ham
        } else {
            Label::Spam
        }
    }
}

/// Compute P(ham | message) and P(spam | message).
///
/// Per-word conditionals are multiplied directly; words absent from the
/// training vocabulary contribute a neutral 1.0 to both classes.
pub fn posterior(message: &str, model: &ProbabilityModel) -> Result<Posterior> {
    let mut p_msg_ham = 1.0f64;
    let mut p_msg_spam = 1.0f64;

    for word in message_words(message) {
        let p_word = model.word_probability(&word).unwrap_or(WordProbability::NEUTRAL);
        p_msg_ham *= p_word.ham;
        p_msg_spam *= p_word.spam;
    }

    let prior = model.class_prior();
    let joint_ham = p_msg_ham * prior.ham;
    let joint_spam = p_msg_spam * prior.spam;
    let joint_total = joint_ham + joint_spam;

    if joint_total == 0.0 {
        return Err(SpamError::DegenerateModel(
            "both joint class probabilities are zero".to_string(),
        ));
    }

    Ok(Posterior {
        ham: joint_ham / joint_total,
        spam: joint_spam / joint_total,
    })
}

/// Predicted class of a message
pub fn label(message: &str, model: &ProbabilityModel) -> Result<Label> {
    posterior(message, model).map(|p| p.label())
}

/// [`posterior`] for each message, in input order
pub fn posterior_batch<S: AsRef<str>>(messages: &[S], model: &ProbabilityModel) -> Result<Vec<Posterior>> {
    messages.iter().map(|m| posterior(m.as_ref(), model)).collect()
}

/// [`label`] for each message, in input order
pub fn label_batch<S: AsRef<str>>(messages: &[S], model: &ProbabilityModel) -> Result<Vec<Label>> {
    messages.iter().map(|m| label(m.as_ref(), model)).collect()
}

/// Conditional probabilities of the message words known to the model.
///
/// Unseen words are left out rather than defaulted.
pub fn word_contributions(message: &str, model: &ProbabilityModel) -> HashMap<String, WordProbability> {
    message_words(message)
        .into_iter()
        .filter_map(|word| model.word_probability(&word).map(|p| (word, p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{count_classes, count_words_by_class, LabeledMessage};
    use crate::model::estimator::estimate;

    const EPSILON: f64 = 1e-12;

    fn train(messages: &[LabeledMessage], alpha: f64) -> ProbabilityModel {
        estimate(&count_words_by_class(messages), count_classes(messages), alpha).unwrap()
    }

    fn small_model() -> ProbabilityModel {
        train(
            &[
                LabeledMessage::new("ham", "hello world"),
                LabeledMessage::new("spam", "win money now"),
                LabeledMessage::new("ham", "world peace"),
            ],
            1.0,
        )
    }

    #[test]
    fn test_posterior_hello() {
        let p = posterior("hello", &small_model()).unwrap();
        // joint ham = 2/3 * 3/5, joint spam = 1/2 * 2/5
        assert!((p.ham - 2.0 / 3.0).abs() < EPSILON);
        assert!((p.spam - 1.0 / 3.0).abs() < EPSILON);
        assert_eq!(p.label(), Label::Ham);
    }

    #[test]
    fn test_posterior_spammy_message() {
        let model = small_model();
        let p = posterior("WIN MONEY now!!!", &model).unwrap();
        assert!(p.spam > p.ham);
        assert_eq!(label("WIN MONEY now!!!", &model).unwrap(), Label::Spam);
    }

    #[test]
    fn test_posterior_sums_to_one() {
        let model = small_model();
        for message in ["", "hello", "world peace now", "win", "completely unrelated", "hello hello win"] {
            let p = posterior(message, &model).unwrap();
            assert!((p.ham + p.spam - 1.0).abs() < EPSILON, "message {:?}", message);
        }
    }

    #[test]
    fn test_unseen_words_yield_prior() {
        let model = small_model();
        let prior = model.class_prior();
        let p = posterior("zebra quantum xylophone", &model).unwrap();
        assert_eq!(p.ham, prior.ham / (prior.ham + prior.spam));
        assert_eq!(p.spam, prior.spam / (prior.ham + prior.spam));
    }

    #[test]
    fn test_exact_tie_is_spam() {
        let model = train(
            &[
                LabeledMessage::new("ham", "hello"),
                LabeledMessage::new("spam", "hello"),
            ],
            1.0,
        );
        let p = posterior("hello", &model).unwrap();
        assert_eq!(p.ham, 0.5);
        assert_eq!(p.label(), Label::Spam);
    }

    #[test]
    fn test_label_is_deterministic() {
        let model = small_model();
        let first = label("hello world money", &model).unwrap();
        for _ in 0..10 {
            assert_eq!(label("hello world money", &model).unwrap(), first);
        }
    }

    #[test]
    fn test_batch_matches_single() {
        let model = small_model();
        let messages = ["hello", "win money", "peace now", "unseen"];

        let posteriors = posterior_batch(&messages, &model).unwrap();
        let labels = label_batch(&messages, &model).unwrap();
        assert_eq!(posteriors.len(), messages.len());

        for (i, message) in messages.iter().enumerate() {
            assert_eq!(posteriors[i], posterior(message, &model).unwrap());
            assert_eq!(labels[i], label(message, &model).unwrap());
        }
    }

    #[test]
    fn test_batch_empty() {
        let messages: [&str; 0] = [];
        assert!(posterior_batch(&messages, &small_model()).unwrap().is_empty());
    }

    #[test]
    fn test_zero_joint_is_degenerate() {
        // Without smoothing, "hello" never occurs in spam and "money" never in ham
        let model = train(
            &[
                LabeledMessage::new("ham", "hello"),
                LabeledMessage::new("spam", "money"),
            ],
            0.0,
        );
        let result = posterior("hello money", &model);
        assert!(matches!(result, Err(SpamError::DegenerateModel(_))));
    }

    #[test]
    fn test_word_contributions_omit_unseen() {
        let model = small_model();
        let contributions = word_contributions("Hello, stranger! Win?", &model);

        assert_eq!(contributions.len(), 2);
        assert_eq!(contributions["hello"], model.word_probability("hello").unwrap());
        assert_eq!(contributions["win"], model.word_probability("win").unwrap());
        assert!(!contributions.contains_key("stranger"));
    }

    #[test]
    fn test_long_message_underflows_to_degenerate() {
        // Direct products of many small probabilities reach zero for both classes
        let mut messages = Vec::new();
        for i in 0..1000 {
            messages.push(LabeledMessage::new("ham", format!("common {}", word_for(i))));
            messages.push(LabeledMessage::new("spam", format!("common {}", word_for(i + 1000))));
        }
        let model = train(&messages, 1.0);

        let long_message: Vec<String> = (0..2000).map(word_for).collect();
        let result = posterior(&long_message.join(" "), &model);
        assert!(matches!(result, Err(SpamError::DegenerateModel(_))));
    }

    fn word_for(i: usize) -> String {
        // Letters only, so the normalizer keeps the whole word
        let mut n = i;
        let mut word = String::from("w");
        loop {
            word.push((b'a' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        word
    }
}
