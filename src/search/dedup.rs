use std::collections::BTreeSet;
use std::io::{self, Write};
use std::sync::Arc;

use crate::core::engine::SearchEngine;
use crate::core::error::Result;
use crate::core::types::DocId;

/// Removes every document whose distinct word set repeats that of an
/// earlier (lower-id) document, reporting
/// `Found duplicate document id {id}` to `out` per removal, ascending.
pub fn remove_duplicates_to<W: Write>(engine: &mut SearchEngine, out: &mut W) -> Result<()> {
    let mut seen_word_sets: BTreeSet<BTreeSet<Arc<str>>> = BTreeSet::new();
    let mut duplicates: BTreeSet<DocId> = BTreeSet::new();

    for &id in engine.iter() {
        let words: BTreeSet<Arc<str>> = engine.word_frequencies(id).keys().cloned().collect();
        if !seen_word_sets.insert(words) {
            duplicates.insert(id);
        }
    }

    for id in duplicates {
        writeln!(out, "Found duplicate document id {}", id)?;
        engine.remove_document(id);
    }

    Ok(())
}

/// [`remove_duplicates_to`] with standard output as the sink.
pub fn remove_duplicates(engine: &mut SearchEngine) -> Result<()> {
    remove_duplicates_to(engine, &mut io::stdout())
}
