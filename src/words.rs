//! Whitespace word splitting and case folding.
//!
//! The same splitter is used when loading dictionary lines and when expanding
//! a matched value into output words, so both sides agree on what a word is.

/// Case-fold a string for key comparison.
///
/// Uses Unicode lowercasing rather than ASCII lowercasing so that keys such as
/// `ÉCOLE` and `école` compare equal.
#[inline]
pub fn case_fold(s: &str) -> String {
    s.to_lowercase()
}

/// Check whether a line is a comment (first non-space character is `#`).
#[inline]
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Find the next whitespace-delimited word in `input`.
///
/// Returns the word and the remainder of the input directly after it, or
/// `None` if `input` holds only whitespace.
pub fn find_word(input: &str) -> Option<(&str, &str)> {
    let start = input.trim_start();
    if start.is_empty() {
        return None;
    }
    let end = start.find(char::is_whitespace).unwrap_or(start.len());
    Some(start.split_at(end))
}

/// Iterator over the whitespace-delimited words of a string.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let (word, rest) = find_word(self.rest)?;
        self.rest = rest;
        Some(word)
    }
}

/// Split `input` into whitespace-delimited words.
pub fn words(input: &str) -> Words<'_> {
    Words { rest: input }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_word_skips_leading_space() {
        assert_eq!(find_word("  cat feline"), Some(("cat", " feline")));
        assert_eq!(find_word("cat"), Some(("cat", "")));
        assert_eq!(find_word("\tcat\t"), Some(("cat", "\t")));
    }

    #[test]
    fn test_find_word_empty() {
        assert_eq!(find_word(""), None);
        assert_eq!(find_word("   \t "), None);
    }

    #[test]
    fn test_words_iterates_all() {
        let collected: Vec<_> = words("  feline   kitty\tmoggy ").collect();
        assert_eq!(collected, vec!["feline", "kitty", "moggy"]);
        assert_eq!(words("").count(), 0);
    }

    #[test]
    fn test_hash_inside_value_is_a_word() {
        let collected: Vec<_> = words("c# sharp").collect();
        assert_eq!(collected, vec!["c#", "sharp"]);
    }

    #[test]
    fn test_is_comment() {
        assert!(is_comment("# note"));
        assert!(is_comment("   #note"));
        assert!(!is_comment("key #value"));
        assert!(!is_comment(""));
    }

    #[test]
    fn test_case_fold_unicode() {
        assert_eq!(case_fold("DOG"), "dog");
        assert_eq!(case_fold("ÉCOLE"), "école");
        assert_eq!(case_fold("Straße"), "straße");
    }

    #[test]
    fn test_unicode_whitespace_splits() {
        // U+3000 IDEOGRAPHIC SPACE
        let collected: Vec<_> = words("日本\u{3000}語").collect();
        assert_eq!(collected, vec!["日本", "語"]);
    }
}
