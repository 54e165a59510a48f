//! spam-rs: Naive Bayes ham/spam classifier for short messages
//!
//! Messages are reduced to the set of distinct lowercase words they contain.
//! Training counts, per class, how many messages contain each word; these
//! counts are turned into Laplace-smoothed probabilities P(word | class) and
//! class priors, which are combined under the naive independence assumption
//! to classify new messages.
//!
//! # Example
//!
//! ```
//! use spam_rs::corpus::{Label, LabeledMessage};
//! use spam_rs::SpamDetector;
//!
//! let corpus = vec![
//!     LabeledMessage::new("ham", "hello world"),
//!     LabeledMessage::new("spam", "win money now"),
//!     LabeledMessage::new("ham", "world peace"),
//! ];
//!
//! let mut detector = SpamDetector::new(1.0)?;
//! detector.fit(&corpus)?;
//!
//! assert_eq!(detector.predict("hello")?, Label::Ham);
//! # Ok::<(), spam_rs::SpamError>(())
//! ```
//!
//! # Modules
//!
//! - [`text`]: Message normalization and tokenization
//! - [`corpus`]: Corpus loading, counting and splitting
//! - [`model`]: Probability estimation, classification and the detector
//! - [`persistence`]: Saving and loading fitted detectors
//! - [`metrics`]: Misclassification rate and confusion matrix
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling

pub mod config;
pub mod corpus;
pub mod error;
pub mod metrics;
pub mod model;
pub mod persistence;
pub mod text;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpamError};
pub use model::SpamDetector;
