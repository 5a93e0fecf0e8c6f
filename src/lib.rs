//! # dict-translate
//!
//! Translation dictionary for text-search normalization pipelines.
//!
//! A translate dictionary sits behind an upstream normalizer (a stemmer, a
//! lowercaser, ...). Each token is first normalized, then every normalized
//! lexeme is looked up in a table loaded from a plain text file, and matching
//! entries are expanded into one or more substitute words. The substitutes are
//! returned as numbered variants for the indexing or query side to consume.
//!
//! ## Dictionary files
//!
//! ```text
//! # key   substitutes...
//! cat     feline kitty
//! dog     hound
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use dict_translate::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(NormalizerRegistry::with_builtins());
//! let dict = TranslateDictionary::init(
//!     [("DictFile", "animals"), ("InputDict", "simple")],
//!     registry,
//!     &FileResolver::new("/usr/share/tsearch_data"),
//! )?;
//!
//! let result = dict.translate("Cat")?.expect("cat is in the dictionary");
//! assert_eq!(result.words(), vec!["feline", "kitty"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod normalizer;
pub mod translator;
pub mod words;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::config::{FileResolver, TranslateOptions, DICT_FILE, INPUT_DICT};
    pub use crate::dictionary::loader::{LoadStats, TranslationFileLoader};
    pub use crate::dictionary::{TranslationEntry, TranslationTable};
    pub use crate::error::{ErrorKind, Result, TranslateError};
    pub use crate::normalizer::{
        Lexeme, Normalizer, NormalizerCache, NormalizerEntry, NormalizerId, NormalizerRegistry,
        QualifiedName, SimpleNormalizer,
    };
    pub use crate::translator::{TranslateDictionary, TranslatedLexeme, TranslationResult};
}
