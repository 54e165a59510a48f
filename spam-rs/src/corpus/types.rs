//! Corpus types and data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Message annotation
///
/// Only `Ham` and `Spam` take part in training. Any other annotation found in
/// a corpus is kept as `Other` and skipped by the counters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Legitimate message
    Ham,
    /// Unwanted message
    Spam,
    /// Unrecognised annotation
    Other(String),
}

impl Label {
    pub fn as_str(&self) -> &str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
            Label::Other(other) => other,
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        match value {
            "ham" => Label::Ham,
            "spam" => Label::Spam,
            other => Label::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An annotated message from a corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledMessage {
    /// Annotation
    pub label: Label,
    /// Message body
    pub text: String,
}

impl LabeledMessage {
    pub fn new(label: impl Into<Label>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Number of training messages per class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub ham: u64,
    pub spam: u64,
}

/// Number of messages of each class containing a word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub ham: u64,
    pub spam: u64,
}

/// Presence counts for every word of the training vocabulary
///
/// A word seen in only one class is present with a zero count for the other;
/// a word missing from the map was never seen at all.
pub type WordCounts = HashMap<String, WordCount>;
