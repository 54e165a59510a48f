//! Corpus module
//!
//! Loading, counting and splitting of annotated message corpora.

pub mod counter;
pub mod loader;
pub mod split;
pub mod types;

pub use counter::{count_classes, count_words, count_words_by_class};
pub use loader::{load_corpus, split_file, split_line, split_lines};
pub use split::{random_split, random_split_seeded};
pub use types::*;
