use serde::{Deserialize, Serialize};
use std::fmt;

/// Document identifier. Negative values are representable so that
/// `add_document` can reject them with a proper error instead of a cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub i32);

impl DocId {
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle tag attached to every document. Discriminants are fixed so
/// serialized values stay wire-compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Actual = 0,
    Irrelevant = 1,
    Banned = 2,
    Removed = 3,
}

/// Rating and status kept per indexed document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Search hit yielded to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// How a query or removal is executed. The engine is a passive object;
/// callers pick the policy per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}
