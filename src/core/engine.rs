use log::debug;
use rayon::prelude::*;
use std::collections::{btree_set, BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::analysis::stopwords::StopWordSet;
use crate::analysis::tokenizer::{is_valid_text, split_into_words};
use crate::core::config::EngineConfig;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, Document, DocumentData, DocumentStatus, ExecutionPolicy};
use crate::index::inverted::InvertedIndex;
use crate::query::parser::parse_query;
use crate::search::ranker::{self, DocumentFilter};

/// In-memory search engine: documents go in with a status and ratings,
/// free-text queries with positive and negative words come back as a
/// ranked TF-IDF result list. Mutating operations take `&mut self`; read
/// operations may run concurrently with one another.
pub struct SearchEngine {
    stop_words: StopWordSet,
    index: InvertedIndex,
    documents: HashMap<DocId, DocumentData>,
    document_ids: BTreeSet<DocId>,
    config: EngineConfig,
}

impl SearchEngine {
    /// Builds an engine from a space-separated stop-word string.
    pub fn new(stop_words: &str) -> Result<Self> {
        Self::with_config(stop_words, EngineConfig::default())
    }

    pub fn with_config(stop_words: &str, config: EngineConfig) -> Result<Self> {
        Ok(Self::from_parts(StopWordSet::from_text(stop_words)?, config))
    }

    /// Builds an engine from a stop-word collection.
    pub fn from_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_parts(
            StopWordSet::from_words(stop_words)?,
            EngineConfig::default(),
        ))
    }

    fn from_parts(stop_words: StopWordSet, config: EngineConfig) -> Self {
        SearchEngine {
            stop_words,
            index: InvertedIndex::new(),
            documents: HashMap::new(),
            document_ids: BTreeSet::new(),
            config,
        }
    }

    /// Indexes a document. All validation happens before any state is
    /// touched, so a rejected call leaves the engine unchanged.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id.value() < 0 {
            return Err(Error::invalid_argument(format!(
                "document id {} is negative",
                id
            )));
        }
        if self.document_ids.contains(&id) {
            return Err(Error::invalid_argument(format!(
                "document id {} already exists",
                id
            )));
        }
        if !is_valid_text(text) {
            return Err(Error::invalid_argument(
                "document text contains invalid characters",
            ));
        }

        let mut words = Vec::new();
        for word in split_into_words(text) {
            if word.starts_with('-') {
                return Err(Error::invalid_argument(format!(
                    "document word {:?} starts with '-'",
                    word
                )));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }

        self.index.insert_document(id, &words);
        self.documents.insert(
            id,
            DocumentData {
                rating: average_rating(ratings),
                status,
            },
        );
        self.document_ids.insert(id);
        debug!("indexed document {} ({} searchable words)", id, words.len());
        Ok(())
    }

    /// Up to `max_results` best documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(
            ExecutionPolicy::Sequential,
            raw_query,
            DocumentStatus::Actual,
        )
    }

    /// Policy form of [`SearchEngine::find_top_documents`].
    pub fn find_top_documents_with_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(policy, raw_query, DocumentStatus::Actual)
    }

    /// Up to `max_results` best documents accepted by `filter`.
    pub fn find_top_documents_filtered<F>(&self, raw_query: &str, filter: F) -> Result<Vec<Document>>
    where
        F: DocumentFilter + Sync,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, filter)
    }

    /// Full form: explicit execution policy and filter. The filter may be
    /// a closure over `(id, status, rating)` or a bare [`DocumentStatus`];
    /// it is consumed by the call and never stored.
    pub fn find_top_documents_with<F>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>>
    where
        F: DocumentFilter + Sync,
    {
        let query = parse_query(raw_query, &self.stop_words, true)?;
        let mut results = match policy {
            ExecutionPolicy::Sequential => {
                ranker::find_all_documents(&self.index, &self.documents, &query, &filter)
            }
            ExecutionPolicy::Parallel => ranker::find_all_documents_parallel(
                &self.index,
                &self.documents,
                &query,
                &filter,
                self.config.accumulator_buckets,
            ),
        };
        ranker::sort_and_truncate(&mut results, self.config.max_results);
        Ok(results)
    }

    /// Positive query words present in document `id`, plus the document's
    /// status. The word list is empty as soon as any negative query word
    /// hits the document.
    pub fn match_document<'q>(
        &self,
        raw_query: &'q str,
        id: DocId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, id)
    }

    pub fn match_document_with<'q>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &'q str,
        id: DocId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        let status = match self.documents.get(&id) {
            Some(data) => data.status,
            None => {
                return Err(Error::out_of_range(format!(
                    "document id {} is not indexed",
                    id
                )))
            }
        };

        match policy {
            ExecutionPolicy::Sequential => {
                let query = parse_query(raw_query, &self.stop_words, true)?;
                for &word in &query.minus_words {
                    if self.index.contains(word, id) {
                        return Ok((Vec::new(), status));
                    }
                }
                let matched = query
                    .plus_words
                    .iter()
                    .copied()
                    .filter(|&word| self.index.contains(word, id))
                    .collect();
                Ok((matched, status))
            }
            ExecutionPolicy::Parallel => {
                // No query dedup here; the matched set below is narrower
                // and gets its own sort + unique pass.
                let query = parse_query(raw_query, &self.stop_words, false)?;
                if query
                    .minus_words
                    .par_iter()
                    .any(|&word| self.index.contains(word, id))
                {
                    return Ok((Vec::new(), status));
                }
                let mut matched: Vec<&str> = query
                    .plus_words
                    .par_iter()
                    .copied()
                    .filter(|&word| self.index.contains(word, id))
                    .collect();
                matched.sort_unstable();
                matched.dedup();
                Ok((matched, status))
            }
        }
    }

    /// Removes `id` from every structure. Unknown ids are a no-op.
    pub fn remove_document(&mut self, id: DocId) {
        self.remove_document_with(ExecutionPolicy::Sequential, id)
    }

    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: DocId) {
        if !self.document_ids.contains(&id) {
            return;
        }
        match policy {
            ExecutionPolicy::Sequential => self.index.remove_document(id),
            ExecutionPolicy::Parallel => self.index.remove_document_parallel(id),
        }
        self.documents.remove(&id);
        self.document_ids.remove(&id);
        debug!("removed document {}", id);
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Word -> term frequency map of `id`; a shared empty map for unknown
    /// ids.
    pub fn word_frequencies(&self, id: DocId) -> &BTreeMap<Arc<str>, f64> {
        self.index.word_frequencies(id)
    }

    /// Ascending iterator over live document ids.
    pub fn iter(&self) -> btree_set::Iter<'_, DocId> {
        self.document_ids.iter()
    }
}

impl<'a> IntoIterator for &'a SearchEngine {
    type Item = &'a DocId;
    type IntoIter = btree_set::Iter<'a, DocId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Arithmetic mean truncated toward zero; 0 for an empty list.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| i64::from(rating)).sum();
    (sum / ratings.len() as i64) as i32
}
