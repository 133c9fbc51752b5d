use crate::analysis::stopwords::StopWordSet;
use crate::analysis::tokenizer::{is_valid_text, split_into_words};
use crate::core::error::{Error, Result};

/// Parsed free-text query. Positive words score documents, negative words
/// exclude them; both lists borrow the raw query text.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

struct QueryWord<'a> {
    word: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(text: &'a str, stop_words: &StopWordSet) -> Result<QueryWord<'a>> {
    if text.is_empty() {
        return Err(Error::invalid_argument("query word is empty"));
    }
    let (word, is_minus) = match text.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    if word.is_empty() || word.starts_with('-') || !is_valid_text(word) {
        return Err(Error::invalid_argument("query word is invalid"));
    }
    Ok(QueryWord {
        word,
        is_minus,
        is_stop: stop_words.contains(word),
    })
}

/// Parses `text` into plus and minus word lists, dropping stop words. With
/// `dedup` both lists are sorted and deduplicated; the parallel matcher
/// skips that and sorts the narrower matched set itself.
pub fn parse_query<'a>(text: &'a str, stop_words: &StopWordSet, dedup: bool) -> Result<Query<'a>> {
    if !is_valid_text(text) {
        return Err(Error::invalid_argument(
            "query text contains invalid characters",
        ));
    }

    let mut query = Query::default();
    for token in split_into_words(text) {
        let parsed = parse_query_word(token, stop_words)?;
        if parsed.is_stop {
            continue;
        }
        if parsed.is_minus {
            query.minus_words.push(parsed.word);
        } else {
            query.plus_words.push(parsed.word);
        }
    }

    if dedup {
        query.plus_words.sort_unstable();
        query.plus_words.dedup();
        query.minus_words.sort_unstable();
        query.minus_words.dedup();
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    fn stop() -> StopWordSet {
        StopWordSet::from_text("and in on").unwrap()
    }

    #[test]
    fn classifies_plus_and_minus_words() {
        let query = parse_query("fluffy -cat tail", &stop(), true).unwrap();
        assert_eq!(query.plus_words, vec!["fluffy", "tail"]);
        assert_eq!(query.minus_words, vec!["cat"]);
    }

    #[test]
    fn drops_stop_words() {
        let query = parse_query("cat and dog", &stop(), true).unwrap();
        assert_eq!(query.plus_words, vec!["cat", "dog"]);
        assert!(query.minus_words.is_empty());
    }

    #[test]
    fn dedup_sorts_and_removes_repeats() {
        let query = parse_query("tail cat tail -dog -dog", &stop(), true).unwrap();
        assert_eq!(query.plus_words, vec!["cat", "tail"]);
        assert_eq!(query.minus_words, vec!["dog"]);
    }

    #[test]
    fn without_dedup_repeats_survive() {
        let query = parse_query("tail cat tail", &stop(), false).unwrap();
        assert_eq!(query.plus_words, vec!["tail", "cat", "tail"]);
    }

    #[test]
    fn rejects_double_minus() {
        let err = parse_query("--x", &stop(), true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn rejects_bare_minus() {
        let err = parse_query("cat -", &stop(), true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn rejects_control_bytes() {
        let err = parse_query("ca\u{3}t", &stop(), true).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn minus_stop_word_is_dropped() {
        let query = parse_query("cat -and", &stop(), true).unwrap();
        assert_eq!(query.plus_words, vec!["cat"]);
        assert!(query.minus_words.is_empty());
    }
}
