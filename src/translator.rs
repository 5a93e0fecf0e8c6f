//! Lexeme translation.
//!
//! A [`TranslateDictionary`] owns a loaded [`TranslationTable`] and a handle to
//! an upstream normalizer. [`TranslateDictionary::translate`] normalizes a raw
//! token, looks each resulting lexeme up in the table and expands every match
//! into one output per substitute word.
//!
//! # Example
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
//! if let Some(result) = dict.translate("Cat")? {
//!     for lexeme in &result {
//!         println!("{} (variant {})", lexeme.lexeme, lexeme.nvariant);
//!     }
//! }
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::{FileResolver, TranslateOptions};
use crate::dictionary::loader::{LoadStats, TranslationFileLoader};
use crate::dictionary::TranslationTable;
use crate::error::Result;
use crate::normalizer::{NormalizerCache, NormalizerEntry, NormalizerId, QualifiedName};
use crate::words::case_fold;

/// One output of a translation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TranslatedLexeme {
    /// Output word
    pub lexeme: String,
    /// 1-based variant number, unique within one translation call
    pub nvariant: u32,
    /// Always 0
    pub flags: u16,
}

/// Ordered outputs of one translation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TranslationResult {
    lexemes: Vec<TranslatedLexeme>,
}

impl TranslationResult {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            lexemes: Vec::with_capacity(capacity),
        }
    }

    /// Append an output with the next variant number.
    ///
    /// Returns `false` without appending once variant numbers are exhausted.
    fn push(&mut self, lexeme: &str) -> bool {
        let Some(nvariant) = u32::try_from(self.lexemes.len())
            .ok()
            .and_then(|n| n.checked_add(1))
        else {
            return false;
        };
        self.lexemes.push(TranslatedLexeme {
            lexeme: lexeme.to_string(),
            nvariant,
            flags: 0,
        });
        true
    }

    /// Number of outputs.
    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    /// Check if there are no outputs.
    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    /// Outputs in order.
    pub fn lexemes(&self) -> &[TranslatedLexeme] {
        &self.lexemes
    }

    /// Iterate over outputs.
    pub fn iter(&self) -> std::slice::Iter<'_, TranslatedLexeme> {
        self.lexemes.iter()
    }

    /// Output words in order.
    pub fn words(&self) -> Vec<&str> {
        self.lexemes.iter().map(|l| l.lexeme.as_str()).collect()
    }
}

impl IntoIterator for TranslationResult {
    type Item = TranslatedLexeme;
    type IntoIter = std::vec::IntoIter<TranslatedLexeme>;

    fn into_iter(self) -> Self::IntoIter {
        self.lexemes.into_iter()
    }
}

impl<'a> IntoIterator for &'a TranslationResult {
    type Item = &'a TranslatedLexeme;
    type IntoIter = std::slice::Iter<'a, TranslatedLexeme>;

    fn into_iter(self) -> Self::IntoIter {
        self.lexemes.iter()
    }
}

/// A translation dictionary bound to an upstream normalizer.
pub struct TranslateDictionary {
    table: TranslationTable,
    input_dict: QualifiedName,
    input_id: NormalizerId,
    cache: Arc<dyn NormalizerCache>,
    normalizer: RwLock<Arc<NormalizerEntry>>,
}

impl TranslateDictionary {
    /// Build a dictionary from `DictFile` / `InputDict` options.
    ///
    /// All options are validated before the dictionary file is read.
    ///
    /// # Errors
    ///
    /// Config-class errors for bad options or an unknown normalizer,
    /// file-class errors if the dictionary file cannot be read.
    pub fn init<I, K, V>(
        options: I,
        cache: Arc<dyn NormalizerCache>,
        resolver: &FileResolver,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::from_options(&TranslateOptions::parse(options)?, cache, resolver).map(|(d, _)| d)
    }

    /// Build a dictionary from validated options, returning load statistics.
    pub fn from_options(
        options: &TranslateOptions,
        cache: Arc<dyn NormalizerCache>,
        resolver: &FileResolver,
    ) -> Result<(Self, LoadStats)> {
        let input_id = cache.resolve(&options.input_dict)?;
        let path = resolver.resolve(&options.dict_file)?;
        let (table, stats) = TranslationFileLoader::load(&path)?;
        let dict = Self::with_resolved(table, options.input_dict.clone(), input_id, cache)?;
        Ok((dict, stats))
    }

    /// Build a dictionary around an already loaded table.
    ///
    /// # Errors
    ///
    /// Returns an error if `input_dict` cannot be resolved.
    pub fn new(
        table: TranslationTable,
        input_dict: QualifiedName,
        cache: Arc<dyn NormalizerCache>,
    ) -> Result<Self> {
        let input_id = cache.resolve(&input_dict)?;
        Self::with_resolved(table, input_dict, input_id, cache)
    }

    fn with_resolved(
        table: TranslationTable,
        input_dict: QualifiedName,
        input_id: NormalizerId,
        cache: Arc<dyn NormalizerCache>,
    ) -> Result<Self> {
        let entry = cache.lookup(input_id)?;
        Ok(Self {
            table,
            input_dict,
            input_id,
            cache,
            normalizer: RwLock::new(entry),
        })
    }

    /// The translation table.
    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Name of the upstream normalizer as configured.
    pub fn input_dict(&self) -> &QualifiedName {
        &self.input_dict
    }

    /// Id of the upstream normalizer.
    pub fn input_id(&self) -> NormalizerId {
        self.input_id
    }

    /// Translate a raw token.
    ///
    /// Returns `Ok(None)` when nothing matched: an empty token, an empty
    /// table, no normalizer output, or no normalized lexeme present in the
    /// table. Otherwise returns the outputs of every matching lexeme, in
    /// normalizer order, with variants numbered from 1.
    ///
    /// # Errors
    ///
    /// Fails only if the upstream normalizer has been removed from the cache.
    pub fn translate(&self, token: &str) -> Result<Option<TranslationResult>> {
        if token.is_empty() || self.table.is_empty() {
            return Ok(None);
        }

        let normalizer = self.current_normalizer()?;
        let lexemes = match normalizer.normalize(token) {
            Some(lexemes) if !lexemes.is_empty() => lexemes,
            _ => return Ok(None),
        };

        let mut result = TranslationResult::with_capacity(lexemes.len());
        let mut matched = false;
        // Compound lexemes are not recombined; each is looked up on its own.
        'lexemes: for lexeme in &lexemes {
            let key = case_fold(&lexeme.text);
            let Some(entry) = self.table.find(&key) else {
                continue;
            };
            matched = true;
            for word in entry.outputs() {
                if !result.push(word) {
                    tracing::warn!(token, "variant numbers exhausted, truncating translation");
                    break 'lexemes;
                }
            }
        }

        tracing::trace!(token, lexemes = lexemes.len(), outputs = result.len(), "translate");
        Ok(matched.then_some(result))
    }

    /// Current normalizer entry, re-resolved if the cached one went stale.
    fn current_normalizer(&self) -> Result<Arc<NormalizerEntry>> {
        {
            let cached = self.normalizer.read();
            if cached.is_valid() {
                return Ok(Arc::clone(&cached));
            }
        }

        tracing::debug!(input_dict = %self.input_dict, id = %self.input_id, "normalizer entry stale, revalidating");
        let fresh = self.cache.lookup(self.input_id)?;
        *self.normalizer.write() = Arc::clone(&fresh);
        Ok(fresh)
    }
}

impl std::fmt::Debug for TranslateDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslateDictionary")
            .field("entries", &self.table.len())
            .field("input_dict", &self.input_dict)
            .field("input_id", &self.input_id)
            .finish()
    }
}
