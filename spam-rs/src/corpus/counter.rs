//! Class and word counting over labeled corpora

use std::collections::HashMap;
use tracing::{debug, warn};

use super::types::{ClassCounts, Label, LabeledMessage, WordCount, WordCounts};
use crate::text::message_words;

/// Count ham and spam messages. Other annotations are ignored.
pub fn count_classes(messages: &[LabeledMessage]) -> ClassCounts {
    let mut counts = ClassCounts::default();
    let mut ignored = 0usize;

    for message in messages {
        match message.label {
            Label::Ham => counts.ham += 1,
            Label::Spam => counts.spam += 1,
            Label::Other(_) => ignored += 1,
        }
    }

    if ignored > 0 {
        warn!("Ignored {} message(s) annotated neither ham nor spam", ignored);
    }

    counts
}

/// Count, for each word, the number of messages containing it at least once
pub fn count_words<'a, I>(messages: I) -> HashMap<String, u64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for message in messages {
        for word in message_words(message) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    counts
}

/// Count the ham and spam messages containing each word of the corpus
pub fn count_words_by_class(messages: &[LabeledMessage]) -> WordCounts {
    let ham_counts = count_words(
        messages
            .iter()
            .filter(|m| m.label == Label::Ham)
            .map(|m| m.text.as_str()),
    );
    let spam_counts = count_words(
        messages
            .iter()
            .filter(|m| m.label == Label::Spam)
            .map(|m| m.text.as_str()),
    );

    debug!(
        ham_words = ham_counts.len(),
        spam_words = spam_counts.len(),
        "Counted word presence per class"
    );

    let mut counts = WordCounts::with_capacity(ham_counts.len().max(spam_counts.len()));
    for (word, n) in ham_counts {
        counts.entry(word).or_default().ham = n;
    }
    for (word, n) in spam_counts {
        counts.entry(word).or_default().spam = n;
    }

    counts
}
