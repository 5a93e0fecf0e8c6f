//! Dictionary file loader.
//!
//! Parses translation dictionary files into a [`TranslationTable`].
//!
//! # Format
//!
//! One entry per line, fields separated by any whitespace:
//!
//! ```text
//! # comment lines start with '#'
//! cat   feline kitty
//! Dog   hound
//! ```
//!
//! The whole line is case-folded before it is split, so both keys and output
//! words end up lowercase. Blank lines, comments and lines with fewer than two
//! fields are skipped without error.
//!
//! # Example
//!
//! ```rust,ignore
//! use dict_translate::dictionary::loader::TranslationFileLoader;
//! use std::path::Path;
//!
//! let (table, stats) = TranslationFileLoader::load(Path::new("animals.trn"))?;
//! assert_eq!(table.len(), stats.entries);
//! ```

use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::reader::DictLineReader;
use super::{TranslationEntry, TranslationTable};
use crate::error::Result;
use crate::words::{case_fold, find_word, is_comment};

/// Initial capacity of the entry buffer; `Vec` doubles from here.
pub const INITIAL_CAPACITY: usize = 64;

/// Outcome of parsing a single dictionary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// A key with at least one output word
    Entry(TranslationEntry),
    /// Empty or whitespace-only line
    Blank,
    /// Line whose first non-space character is `#`
    Comment,
    /// A key without any value
    SingleField,
}

/// Counters gathered while loading a dictionary file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Lines read from the source
    pub lines: usize,
    /// Entries in the final table
    pub entries: usize,
    /// Blank lines skipped
    pub blank: usize,
    /// Comment lines skipped
    pub comments: usize,
    /// Single-field lines skipped
    pub single_field: usize,
    /// Entries dropped because an earlier line had the same key
    pub duplicates: usize,
}

/// Parse one dictionary line.
pub fn parse_line(line: &str) -> ParsedLine {
    if line.trim().is_empty() {
        return ParsedLine::Blank;
    }
    if is_comment(line) {
        return ParsedLine::Comment;
    }

    let folded = case_fold(line);
    let Some((key, rest)) = find_word(&folded) else {
        return ParsedLine::Blank;
    };
    let value = rest.trim();
    if value.is_empty() {
        return ParsedLine::SingleField;
    }
    ParsedLine::Entry(TranslationEntry::new(key, value))
}

/// Loads translation dictionaries from text sources.
pub struct TranslationFileLoader;

impl TranslationFileLoader {
    /// Load a dictionary file.
    ///
    /// # Errors
    ///
    /// Returns a file-class error if the file cannot be opened or a line cannot
    /// be read. Malformed lines are never errors.
    pub fn load(path: &Path) -> Result<(TranslationTable, LoadStats)> {
        tracing::debug!(path = %path.display(), "loading translate dictionary");
        let reader = DictLineReader::open(path)?;
        Self::load_lines(reader)
    }

    /// Load a dictionary from any buffered reader.
    ///
    /// `name` is used in error messages in place of a file path.
    pub fn load_from_reader<R: BufRead>(
        reader: R,
        name: &str,
    ) -> Result<(TranslationTable, LoadStats)> {
        Self::load_lines(DictLineReader::new(reader, name))
    }

    fn load_lines<R: BufRead>(
        mut reader: DictLineReader<R>,
    ) -> Result<(TranslationTable, LoadStats)> {
        let mut stats = LoadStats::default();
        let mut entries = Vec::with_capacity(INITIAL_CAPACITY);

        while let Some(line) = reader.next_line()? {
            stats.lines += 1;
            match parse_line(line) {
                ParsedLine::Entry(entry) => entries.push(entry),
                ParsedLine::Blank => stats.blank += 1,
                ParsedLine::Comment => stats.comments += 1,
                ParsedLine::SingleField => stats.single_field += 1,
            }
        }

        let (table, duplicates) = TranslationTable::from_entries(entries);
        stats.entries = table.len();
        stats.duplicates = duplicates;

        tracing::debug!(
            source = %reader.path().display(),
            lines = stats.lines,
            entries = stats.entries,
            duplicates = stats.duplicates,
            "translate dictionary loaded"
        );
        Ok((table, stats))
    }
}
