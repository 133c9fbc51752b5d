use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::core::types::{DocId, Document, DocumentData, DocumentStatus};
use crate::index::concurrent::ConcurrentMap;
use crate::index::inverted::InvertedIndex;
use crate::query::parser::Query;

/// Relevances closer than this are considered equal and tie-broken by
/// rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Per-document acceptance test consumed by `find_top_documents`. Any
/// closure over `(id, status, rating)` implements it, and a bare
/// [`DocumentStatus`] acts as a status-equality filter.
pub trait DocumentFilter {
    fn accept(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentFilter for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool,
{
    fn accept(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}

impl DocumentFilter for DocumentStatus {
    fn accept(&self, _id: DocId, status: DocumentStatus, _rating: i32) -> bool {
        status == *self
    }
}

fn inverse_document_freq(document_count: usize, containing: usize) -> f64 {
    (document_count as f64 / containing as f64).ln()
}

/// Sequential accumulation: every positive word scores its documents, then
/// every negative word erases its documents. The result is id-ascending.
pub(crate) fn find_all_documents<F: DocumentFilter>(
    index: &InvertedIndex,
    documents: &HashMap<DocId, DocumentData>,
    query: &Query<'_>,
    filter: &F,
) -> Vec<Document> {
    let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();

    for &word in &query.plus_words {
        let postings = match index.postings(word) {
            Some(postings) if !postings.is_empty() => postings,
            _ => continue,
        };
        let idf = inverse_document_freq(documents.len(), postings.len());
        for (&id, &tf) in postings {
            let data = &documents[&id];
            if filter.accept(id, data.status, data.rating) {
                *relevance.entry(id).or_insert(0.0) += tf * idf;
            }
        }
    }

    for &word in &query.minus_words {
        if let Some(postings) = index.postings(word) {
            for &id in postings.keys() {
                relevance.remove(&id);
            }
        }
    }

    relevance
        .into_iter()
        .map(|(id, relevance)| Document::new(id, relevance, documents[&id].rating))
        .collect()
}

/// Parallel accumulation over query words through the sharded map. Both
/// passes are join points: negative words run only after every positive
/// word has been folded in, on either policy.
pub(crate) fn find_all_documents_parallel<F>(
    index: &InvertedIndex,
    documents: &HashMap<DocId, DocumentData>,
    query: &Query<'_>,
    filter: &F,
    buckets: usize,
) -> Vec<Document>
where
    F: DocumentFilter + Sync,
{
    let relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(buckets);

    query.plus_words.par_iter().for_each(|&word| {
        let postings = match index.postings(word) {
            Some(postings) if !postings.is_empty() => postings,
            _ => return,
        };
        let idf = inverse_document_freq(documents.len(), postings.len());
        for (&id, &tf) in postings {
            let data = &documents[&id];
            if filter.accept(id, data.status, data.rating) {
                *relevance.get_or_insert(id) += tf * idf;
            }
        }
    });

    query.minus_words.par_iter().for_each(|&word| {
        if let Some(postings) = index.postings(word) {
            for &id in postings.keys() {
                relevance.erase(id);
            }
        }
    });

    relevance
        .drain()
        .into_iter()
        .map(|(id, relevance)| Document::new(id, relevance, documents[&id].rating))
        .collect()
}

/// Orders by relevance descending, breaking near-ties (within
/// [`RELEVANCE_EPSILON`]) by rating descending, and truncates to
/// `max_results`. Candidates arrive id-ascending and the sort is stable,
/// so exact ties stay id-ascending.
pub(crate) fn sort_and_truncate(results: &mut Vec<Document>, max_results: usize) {
    results.sort_by(|lhs, rhs| {
        if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
            rhs.rating.cmp(&lhs.rating)
        } else {
            rhs.relevance
                .partial_cmp(&lhs.relevance)
                .unwrap_or(Ordering::Equal)
        }
    });
    results.truncate(max_results);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i32, relevance: f64, rating: i32) -> Document {
        Document::new(DocId(id), relevance, rating)
    }

    #[test]
    fn orders_by_relevance_descending() {
        let mut results = vec![doc(1, 0.1, 0), doc(2, 0.9, 0), doc(3, 0.5, 0)];
        sort_and_truncate(&mut results, 5);
        let ids: Vec<i32> = results.iter().map(|d| d.id.value()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn near_tie_breaks_by_rating() {
        let mut results = vec![doc(1, 0.5, 1), doc(2, 0.5000001, 9)];
        sort_and_truncate(&mut results, 5);
        let ids: Vec<i32> = results.iter().map(|d| d.id.value()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn exact_tie_keeps_id_order() {
        let mut results = vec![doc(1, 0.25, 3), doc(2, 0.25, 3), doc(3, 0.25, 3)];
        sort_and_truncate(&mut results, 5);
        let ids: Vec<i32> = results.iter().map(|d| d.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn truncates_to_limit() {
        let mut results = (0..10).map(|i| doc(i, f64::from(i), 0)).collect::<Vec<_>>();
        sort_and_truncate(&mut results, 5);
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].id, DocId(9));
    }

    #[test]
    fn status_acts_as_equality_filter() {
        let filter = DocumentStatus::Banned;
        assert!(filter.accept(DocId(0), DocumentStatus::Banned, 0));
        assert!(!filter.accept(DocId(0), DocumentStatus::Actual, 0));
    }

    #[test]
    fn closures_are_filters() {
        let filter = |id: DocId, _status: DocumentStatus, rating: i32| {
            id.value() % 2 == 0 && rating > 0
        };
        assert!(filter.accept(DocId(2), DocumentStatus::Actual, 5));
        assert!(!filter.accept(DocId(3), DocumentStatus::Actual, 5));
    }
}
