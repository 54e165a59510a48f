//! Stateful spam detector
//!
//! Wraps the counting, estimation and classification steps behind a
//! fit/predict interface.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use super::classifier::{self, Posterior};
use super::estimator::{estimate, validate_alpha, ProbabilityModel, WordProbability};
use crate::corpus::{count_classes, count_words_by_class, ClassCounts, Label, LabeledMessage, WordCounts};
use crate::error::{Result, SpamError};
use crate::text::message_words;

/// Default additive smoothing constant
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Everything learned by one call to [`SpamDetector::fit`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorState {
    /// Smoothing constant the model was estimated with
    pub alpha: f64,
    /// Number of training messages, whatever their annotation
    pub n_train_messages: usize,
    pub class_counts: ClassCounts,
    pub word_counts: WordCounts,
    pub model: ProbabilityModel,
}

/// Naive Bayes ham/spam detector
#[derive(Debug, Clone)]
pub struct SpamDetector {
    alpha: f64,
    state: Option<DetectorState>,
}

impl SpamDetector {
    /// Create an unfitted detector
    pub fn new(alpha: f64) -> Result<Self> {
        validate_alpha(alpha)?;
        Ok(Self { alpha, state: None })
    }

    /// Create a detector from a previously fitted state
    pub fn from_state(state: DetectorState) -> Result<Self> {
        validate_alpha(state.alpha)?;
        Ok(Self {
            alpha: state.alpha,
            state: Some(state),
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Fitted state, if any
    pub fn state(&self) -> Option<&DetectorState> {
        self.state.as_ref()
    }

    /// Replace the fitted state with a restored one
    pub fn restore(&mut self, state: DetectorState) -> Result<()> {
        validate_alpha(state.alpha)?;
        self.alpha = state.alpha;
        self.state = Some(state);
        Ok(())
    }

    /// Fit the detector on an annotated corpus.
    ///
    /// The previous state is only replaced once the new one is complete; on
    /// error the detector is left as it was.
    pub fn fit(&mut self, messages: &[LabeledMessage]) -> Result<&mut Self> {
        let word_counts = count_words_by_class(messages);
        let class_counts = count_classes(messages);
        let model = estimate(&word_counts, class_counts, self.alpha)?;

        info!(
            messages = messages.len(),
            ham = class_counts.ham,
            spam = class_counts.spam,
            vocabulary = model.vocabulary_size(),
            alpha = self.alpha,
            "Detector fitted"
        );

        self.state = Some(DetectorState {
            alpha: self.alpha,
            n_train_messages: messages.len(),
            class_counts,
            word_counts,
            model,
        });
        Ok(self)
    }

    fn fitted(&self) -> Result<&DetectorState> {
        self.state.as_ref().ok_or(SpamError::NotFitted)
    }

    /// Fitted probability model
    pub fn model(&self) -> Result<&ProbabilityModel> {
        self.fitted().map(|state| &state.model)
    }

    /// Class probabilities of a single message
    pub fn predict_proba(&self, message: &str) -> Result<Posterior> {
        classifier::posterior(message, self.model()?)
    }

    /// Class probabilities of each message, in input order
    pub fn predict_proba_batch<S: AsRef<str>>(&self, messages: &[S]) -> Result<Vec<Posterior>> {
        classifier::posterior_batch(messages, self.model()?)
    }

    /// Predicted class of a single message
    pub fn predict(&self, message: &str) -> Result<Label> {
        classifier::label(message, self.model()?)
    }

    /// Predicted class of each message, in input order
    pub fn predict_batch<S: AsRef<str>>(&self, messages: &[S]) -> Result<Vec<Label>> {
        classifier::label_batch(messages, self.model()?)
    }

    /// P(word | class) for the message words seen in training
    pub fn word_contributions(&self, message: &str) -> Result<HashMap<String, WordProbability>> {
        Ok(classifier::word_contributions(message, self.model()?))
    }

    /// P(class | word) for the message words seen in training.
    ///
    /// Computed from the raw presence counts, smoothed by alpha, and
    /// normalized over the two classes for each word independently.
    pub fn word_posteriors(&self, message: &str) -> Result<HashMap<String, Posterior>> {
        let state = self.fitted()?;
        let alpha = state.alpha;

        let posteriors = message_words(message)
            .into_iter()
            .filter_map(|word| {
                let count = state.word_counts.get(&word)?;
                let mut n_ham = count.ham as f64;
                let mut n_spam = count.spam as f64;
                if alpha > 0.0 {
                    n_ham += alpha;
                    n_spam += alpha;
                }
                let n_total = n_ham + n_spam;
                Some((
                    word,
                    Posterior {
                        ham: n_ham / n_total,
                        spam: n_spam / n_total,
                    },
                ))
            })
            .collect();

        Ok(posteriors)
    }
}

impl Default for SpamDetector {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            state: None,
        }
    }
}
