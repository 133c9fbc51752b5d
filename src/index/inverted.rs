use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::core::types::DocId;
use crate::index::dictionary::TermDictionary;

/// Shared empty map returned for ids that are not indexed.
static EMPTY_FREQS: BTreeMap<Arc<str>, f64> = BTreeMap::new();

/// Two mutually consistent inverted maps: word -> (id -> term frequency)
/// and id -> (word -> term frequency). Every `(word, id, freq)` triple is
/// present in both or in neither.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    dictionary: TermDictionary,
    word_to_docs: HashMap<Arc<str>, BTreeMap<DocId, f64>>,
    doc_to_words: HashMap<DocId, BTreeMap<Arc<str>, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Indexes `words` (already tokenized and stop-filtered) for `id`.
    /// Each occurrence contributes `1 / words.len()` to its word's term
    /// frequency, so the frequencies of one document sum to 1.
    pub fn insert_document(&mut self, id: DocId, words: &[&str]) {
        let frequencies = self.doc_to_words.entry(id).or_default();
        let inv_word_count = 1.0 / words.len() as f64;
        for &word in words {
            let word = self.dictionary.intern(word);
            *frequencies.entry(Arc::clone(&word)).or_insert(0.0) += inv_word_count;
            *self
                .word_to_docs
                .entry(word)
                .or_default()
                .entry(id)
                .or_insert(0.0) += inv_word_count;
        }
    }

    /// Erases every `(word, id)` entry of `id` from both maps. Inner
    /// posting maps may legitimately become empty; lookups always test the
    /// (word, id) pair.
    pub fn remove_document(&mut self, id: DocId) {
        if let Some(words) = self.doc_to_words.remove(&id) {
            for word in words.keys() {
                if let Some(postings) = self.word_to_docs.get_mut(word) {
                    postings.remove(&id);
                }
            }
        }
    }

    /// Same result as [`InvertedIndex::remove_document`]; the per-word
    /// erase fans out over the posting lists.
    pub fn remove_document_parallel(&mut self, id: DocId) {
        if let Some(words) = self.doc_to_words.remove(&id) {
            self.word_to_docs
                .par_iter_mut()
                .filter(|(word, _)| words.contains_key(&***word))
                .for_each(|(_, postings)| {
                    postings.remove(&id);
                });
        }
    }

    /// Postings for `word`: id -> term frequency, ascending by id.
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.word_to_docs.get(word)
    }

    /// Whether `word` occurs in document `id`.
    pub fn contains(&self, word: &str, id: DocId) -> bool {
        self.word_to_docs
            .get(word)
            .map_or(false, |postings| postings.contains_key(&id))
    }

    /// Word -> term frequency map of `id`; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocId) -> &BTreeMap<Arc<str>, f64> {
        self.doc_to_words.get(&id).unwrap_or(&EMPTY_FREQS)
    }
}
