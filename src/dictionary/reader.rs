//! Line reader for dictionary source files.
//!
//! Yields one line at a time with the line terminator removed, and turns I/O
//! and UTF-8 failures into [`TranslateError`]s that carry the file path and
//! line number.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{Result, TranslateError};

const BOM: char = '\u{feff}';

/// Label used in errors for translation dictionary sources.
pub const TRANSLATE_FILE: &str = "translate";

/// Reads a dictionary source one line at a time.
pub struct DictLineReader<R> {
    reader: R,
    path: PathBuf,
    label: &'static str,
    line_no: usize,
    buf: String,
}

impl DictLineReader<BufReader<File>> {
    /// Open a translation dictionary file for line reading.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::FileOpen`] with the OS error if the file
    /// cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_as(path, TRANSLATE_FILE)
    }

    /// Open a file whose errors name it as a `label` file.
    pub fn open_as(path: &Path, label: &'static str) -> Result<Self> {
        let file = File::open(path).map_err(|source| TranslateError::FileOpen {
            label,
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), path).with_label(label))
    }
}

impl<T: Read> DictLineReader<BufReader<T>> {
    /// Build a buffered reader over any `Read` source.
    pub fn from_reader(reader: T, path: impl Into<PathBuf>) -> Self {
        Self::new(BufReader::new(reader), path)
    }
}

impl<R: BufRead> DictLineReader<R> {
    /// Wrap an already opened reader. `path` is only used in error messages.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            label: TRANSLATE_FILE,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Name read errors after a `label` file instead of a translate file.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// 1-based number of the last line returned.
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    /// Path used in error messages.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the next line, or `None` at end of file.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        self.buf.clear();
        let read = self
            .reader
            .read_line(&mut self.buf)
            .map_err(|source| TranslateError::FileRead {
                label: self.label,
                path: self.path.clone(),
                line: self.line_no + 1,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        let mut line = self.buf.as_str();
        line = line.strip_suffix('\n').unwrap_or(line);
        line = line.strip_suffix('\r').unwrap_or(line);
        if self.line_no == 1 {
            line = line.strip_prefix(BOM).unwrap_or(line);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead> Iterator for DictLineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
            .map(|line| line.map(str::to_string))
            .transpose()
    }
}
