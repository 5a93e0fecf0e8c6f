//! Error types for dictionary construction and translation.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`TranslateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing construction-time parameters.
    Config,
    /// The dictionary source file could not be opened or read.
    File,
}

/// Errors that can occur while building or using a translation dictionary.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// An option was given more than once.
    #[error("multiple {0} parameters")]
    DuplicateOption(&'static str),

    /// A required option was not given.
    #[error("missing {0} parameter")]
    MissingOption(&'static str),

    /// An option name is not understood by the translate template.
    #[error("unrecognized translate parameter: \"{0}\"")]
    UnrecognizedOption(String),

    /// An option list could not be parsed.
    #[error("invalid parameter list format: \"{0}\"")]
    InvalidOptionList(String),

    /// A qualified name could not be parsed.
    #[error("invalid name syntax: \"{0}\"")]
    InvalidName(String),

    /// The upstream normalizer cannot be found.
    #[error("text search dictionary \"{0}\" does not exist")]
    NormalizerNotFound(String),

    /// A bare dictionary file reference contains forbidden characters.
    #[error("invalid text search configuration file name \"{0}\"")]
    InvalidFileName(String),

    /// A source file could not be opened.
    #[error("could not open {label} file \"{}\": {source}", path.display())]
    FileOpen {
        /// What the file holds, such as `translate` or `stop-word`
        label: &'static str,
        /// Resolved path of the file
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be read.
    #[error("could not read {label} file \"{}\" line {line}: {source}", path.display())]
    FileRead {
        /// What the file holds, such as `translate` or `stop-word`
        label: &'static str,
        /// Resolved path of the file
        path: PathBuf,
        /// 1-based line number where reading failed
        line: usize,
        /// Underlying I/O or decoding error
        #[source]
        source: std::io::Error,
    },
}

impl TranslateError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslateError::FileOpen { .. } | TranslateError::FileRead { .. } => ErrorKind::File,
            _ => ErrorKind::Config,
        }
    }
}

/// A specialized `Result` type for translation dictionary operations.
pub type Result<T> = std::result::Result<T, TranslateError>;
