/// Splits `text` on runs of ASCII space. Returned slices borrow the input;
/// leading and trailing spaces are trimmed and no token is empty.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// A valid text contains no byte below 0x20.
pub fn is_valid_text(text: &str) -> bool {
    !text.bytes().any(|b| b < 0x20)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_space_runs() {
        assert_eq!(split_into_words("white cat"), vec!["white", "cat"]);
        assert_eq!(split_into_words("  white   cat "), vec!["white", "cat"]);
    }

    #[test]
    fn empty_input_yields_no_words() {
        assert!(split_into_words("").is_empty());
        assert!(split_into_words("   ").is_empty());
    }

    #[test]
    fn only_space_separates() {
        assert_eq!(split_into_words("a-b c_d"), vec!["a-b", "c_d"]);
    }

    #[test]
    fn rejects_control_bytes() {
        assert!(is_valid_text("plain words"));
        assert!(is_valid_text(""));
        assert!(!is_valid_text("bad\u{2}word"));
        assert!(!is_valid_text("tab\tseparated"));
        assert!(!is_valid_text("line\nbreak"));
    }

    #[test]
    fn accepts_non_ascii() {
        assert!(is_valid_text("пушистый кот"));
    }
}
