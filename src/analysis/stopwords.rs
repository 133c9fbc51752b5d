use std::collections::HashSet;

use crate::analysis::tokenizer::{is_valid_text, split_into_words};
use crate::core::error::{Error, Result};

/// Words excluded from indexing and from query matching, fixed at
/// construction.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Builds the set from a space-separated string.
    pub fn from_text(text: &str) -> Result<Self> {
        if !is_valid_text(text) {
            return Err(Error::invalid_argument(
                "stop words contain invalid characters",
            ));
        }
        Ok(StopWordSet {
            words: split_into_words(text)
                .into_iter()
                .map(str::to_owned)
                .collect(),
        })
    }

    /// Builds the set from a collection of words.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if !is_valid_text(word) {
                return Err(Error::invalid_argument(
                    "stop words contain invalid characters",
                ));
            }
            set.insert(word.to_owned());
        }
        Ok(StopWordSet { words: set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
