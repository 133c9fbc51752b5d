//! In-memory text search engine for small-to-mid document corpora.
//!
//! Documents carry an integer id, a status tag, and ratings; free-text
//! queries with positive and negative words come back as a ranked TF-IDF
//! result list. Callers pick sequential or parallel execution per call;
//! the parallel paths aggregate through a sharded concurrent map.

pub mod analysis;
pub mod core;
pub mod index;
pub mod query;
pub mod search;

// Flat re-exports for callers that prefer a single import path.
pub use crate::core::config::EngineConfig;
pub use crate::core::engine::SearchEngine;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{DocId, Document, DocumentStatus, ExecutionPolicy};
pub use crate::index::concurrent::{ConcurrentMap, ShardKey};
pub use crate::search::dedup::{remove_duplicates, remove_duplicates_to};
pub use crate::search::ranker::DocumentFilter;
