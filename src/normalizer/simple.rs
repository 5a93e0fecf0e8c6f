//! Lowercasing normalizer with an optional stopword list.

use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;

use super::{Lexeme, Normalizer};
use crate::dictionary::reader::DictLineReader;
use crate::error::Result;
use crate::words::case_fold;

const STOPWORD_FILE: &str = "stop-word";

/// Normalizer that case-folds tokens.
///
/// Stopwords produce an empty result. Other tokens produce their folded form
/// when `accept` is set, or no result at all when it is not, which lets a
/// later dictionary in the pipeline have a go at them.
#[derive(Debug, Clone)]
pub struct SimpleNormalizer {
    stopwords: BTreeSet<String>,
    accept: bool,
}

impl Default for SimpleNormalizer {
    fn default() -> Self {
        Self {
            stopwords: BTreeSet::new(),
            accept: true,
        }
    }
}

impl SimpleNormalizer {
    /// Create a normalizer with the given stopwords.
    pub fn new<I, S>(stopwords: I, accept: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|w| case_fold(w.as_ref().trim()))
                .filter(|w| !w.is_empty())
                .collect(),
            accept,
        }
    }

    /// Load stopwords from a file, one per line.
    pub fn from_stopword_file(path: &Path, accept: bool) -> Result<Self> {
        Self::read_stopwords(DictLineReader::open_as(path, STOPWORD_FILE)?, accept)
    }

    /// Load stopwords from a reader, one per line.
    pub fn from_stopword_reader<R: BufRead>(reader: R, accept: bool) -> Result<Self> {
        let reader = DictLineReader::new(reader, "stopwords").with_label(STOPWORD_FILE);
        Self::read_stopwords(reader, accept)
    }

    fn read_stopwords<R: BufRead>(mut reader: DictLineReader<R>, accept: bool) -> Result<Self> {
        let mut words = Vec::new();
        while let Some(line) = reader.next_line()? {
            words.push(line.to_string());
        }
        Ok(Self::new(words, accept))
    }

    /// Check if `word` (already folded) is a stopword.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Number of stopwords.
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

impl Normalizer for SimpleNormalizer {
    fn normalize(&self, token: &str) -> Option<Vec<Lexeme>> {
        let folded = case_fold(token);
        if self.is_stopword(&folded) {
            Some(Vec::new())
        } else if self.accept {
            Some(vec![Lexeme::new(folded)])
        } else {
            None
        }
    }
}
