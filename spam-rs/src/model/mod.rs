//! Naive Bayes model
//!
//! Probability estimation from corpus counts, message classification and the
//! stateful detector built on both.

pub mod classifier;
pub mod detector;
pub mod estimator;

pub use classifier::{label, label_batch, posterior, posterior_batch, word_contributions, Posterior, HAM_THRESHOLD};
pub use detector::{DetectorState, SpamDetector, DEFAULT_ALPHA};
pub use estimator::{estimate, ClassPrior, ProbabilityModel, WordProbability};
