use std::collections::HashSet;
use std::sync::Arc;

/// Interns every indexed word once. Both index maps key on the shared
/// handle, so a word is stored a single time no matter how many documents
/// contain it and index entries never dangle when documents go away.
#[derive(Debug, Default)]
pub struct TermDictionary {
    words: HashSet<Arc<str>>,
}

impl TermDictionary {
    pub fn new() -> Self {
        TermDictionary::default()
    }

    /// Returns the canonical handle for `word`, interning it on first use.
    pub fn intern(&mut self, word: &str) -> Arc<str> {
        match self.words.get(word) {
            Some(interned) => Arc::clone(interned),
            None => {
                let interned: Arc<str> = Arc::from(word);
                self.words.insert(Arc::clone(&interned));
                interned
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let mut dictionary = TermDictionary::new();
        let first = dictionary.intern("cat");
        let second = dictionary.intern("cat");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn distinct_words_get_distinct_handles() {
        let mut dictionary = TermDictionary::new();
        let cat = dictionary.intern("cat");
        let dog = dictionary.intern("dog");
        assert!(!Arc::ptr_eq(&cat, &dog));
        assert_eq!(&*cat, "cat");
        assert_eq!(&*dog, "dog");
    }
}
