//! Corpus file loading
//!
//! A corpus is a text file with one message per line: the annotation, a tab,
//! then the message body. Blank lines are skipped.

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::types::LabeledMessage;
use crate::error::{Result, SpamError};

const SEPARATOR: char = '\t';

/// Read a file and return its non-blank lines, trimmed
pub fn split_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = fs::read_to_string(path.as_ref())?;

    let lines: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!("Read {} non-blank line(s) from {}", lines.len(), path.as_ref().display());
    Ok(lines)
}

/// Split a line into annotation and message body at the first tab.
///
/// Tabs inside the body are replaced by a single space.
pub fn split_line(line: &str) -> Option<LabeledMessage> {
    let (label, body) = line.split_once(SEPARATOR)?;
    Some(LabeledMessage::new(label, body.replace(SEPARATOR, " ")))
}

/// Split every line, failing on the first line without a separator
pub fn split_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<LabeledMessage>> {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            split_line(line.as_ref()).ok_or_else(|| SpamError::Parse {
                line: index + 1,
                message: "missing tab separator between annotation and message".to_string(),
            })
        })
        .collect()
}

/// Load an annotated corpus file
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledMessage>> {
    let lines = split_file(path.as_ref())?;
    let messages = split_lines(&lines)?;
    info!("Loaded {} message(s) from {}", messages.len(), path.as_ref().display());
    Ok(messages)
}
