//! Upstream normalizer abstraction.
//!
//! A translate dictionary never looks up raw tokens directly. It first hands
//! the token to an upstream [`Normalizer`] (a stemmer, a simple lowercaser,
//! ...) and then translates each lexeme the normalizer produces.
//!
//! Normalizers are found through a [`NormalizerCache`], which maps a
//! [`QualifiedName`] to a stable [`NormalizerId`] and an id to the currently
//! installed [`NormalizerEntry`]. Entries can go stale when the backing
//! definition changes; holders of an entry check [`NormalizerEntry::is_valid`]
//! and look the id up again when it turns false.

pub mod registry;
pub mod simple;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Result, TranslateError};

pub use registry::NormalizerRegistry;
pub use simple::SimpleNormalizer;

/// A lexeme produced by a normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// Normalized text
    pub text: String,
    /// Normalizer-specific flags
    pub flags: u16,
}

impl Lexeme {
    /// Create a lexeme without flags.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flags: 0,
        }
    }
}

/// Reduces a raw token to zero or more normalized lexemes.
pub trait Normalizer: Send + Sync {
    /// Normalize `token`.
    ///
    /// Returns `None` when the normalizer does not recognize the token and an
    /// empty vector when it recognizes the token but produces no lexeme (for
    /// example a stopword).
    fn normalize(&self, token: &str) -> Option<Vec<Lexeme>>;
}

impl<F> Normalizer for F
where
    F: Fn(&str) -> Option<Vec<Lexeme>> + Send + Sync,
{
    fn normalize(&self, token: &str) -> Option<Vec<Lexeme>> {
        self(token)
    }
}

/// Stable identifier of a registered normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizerId(pub u32);

impl fmt::Display for NormalizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cached, possibly stale, instance of a normalizer.
pub struct NormalizerEntry {
    id: NormalizerId,
    name: QualifiedName,
    normalizer: Arc<dyn Normalizer>,
    valid: AtomicBool,
}

impl NormalizerEntry {
    /// Create a valid entry.
    pub fn new(id: NormalizerId, name: QualifiedName, normalizer: Arc<dyn Normalizer>) -> Self {
        Self {
            id,
            name,
            normalizer,
            valid: AtomicBool::new(true),
        }
    }

    /// Identifier the entry was registered under.
    pub fn id(&self) -> NormalizerId {
        self.id
    }

    /// Fully qualified name of the normalizer.
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Whether this entry still reflects the current definition.
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Mark the entry stale.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    /// Run the normalizer.
    pub fn normalize(&self, token: &str) -> Option<Vec<Lexeme>> {
        self.normalizer.normalize(token)
    }
}

impl fmt::Debug for NormalizerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizerEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// Thread-safe lookup of normalizers by name and id.
///
/// Implemented by [`NormalizerRegistry`]; hosts embedding the translator in a
/// larger search system can supply their own.
pub trait NormalizerCache: Send + Sync {
    /// Resolve a name to an id.
    fn resolve(&self, name: &QualifiedName) -> Result<NormalizerId>;

    /// Get the current entry for an id.
    fn lookup(&self, id: NormalizerId) -> Result<Arc<NormalizerEntry>>;
}

/// An optionally schema-qualified normalizer name such as `public.english_stem`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Schema, if given
    pub schema: Option<String>,
    /// Object name
    pub name: String,
}

impl QualifiedName {
    /// Create an unqualified name.
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Create a schema-qualified name.
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// Parse `name` or `schema.name`.
    ///
    /// Unquoted identifiers are case-folded; double-quoted identifiers keep
    /// their case and may contain `.` and whitespace, with `""` standing for a
    /// literal quote.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::InvalidName`] for empty parts, unterminated
    /// quotes or more than two parts.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || TranslateError::InvalidName(input.to_string());
        let mut parts = Vec::new();
        let mut chars = input.trim().chars().peekable();

        loop {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            let mut part = String::new();
            if chars.next_if_eq(&'"').is_some() {
                loop {
                    match chars.next() {
                        Some('"') if chars.next_if_eq(&'"').is_some() => part.push('"'),
                        Some('"') => break,
                        Some(c) => part.push(c),
                        None => return Err(invalid()),
                    }
                }
            } else {
                while let Some(c) = chars.next_if(|c| *c != '.' && !c.is_whitespace()) {
                    part.push(c);
                }
                part = part.to_lowercase();
            }
            if part.is_empty() {
                return Err(invalid());
            }
            parts.push(part);

            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            match chars.next() {
                None => break,
                Some('.') => continue,
                Some(_) => return Err(invalid()),
            }
        }

        match parts.len() {
            1 => Ok(Self::unqualified(parts.remove(0))),
            2 => {
                let name = parts.remove(1);
                Ok(Self::qualified(parts.remove(0), name))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl std::str::FromStr for QualifiedName {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unqualified() {
        assert_eq!(
            QualifiedName::parse("English_Stem").unwrap(),
            QualifiedName::unqualified("english_stem")
        );
    }

    #[test]
    fn test_parse_qualified() {
        assert_eq!(
            QualifiedName::parse(" public . simple ").unwrap(),
            QualifiedName::qualified("public", "simple")
        );
    }

    #[test]
    fn test_parse_quoted_keeps_case() {
        assert_eq!(
            QualifiedName::parse(r#""My Schema"."Dict.V2""#).unwrap(),
            QualifiedName::qualified("My Schema", "Dict.V2")
        );
        assert_eq!(
            QualifiedName::parse(r#""say ""hi""""#).unwrap(),
            QualifiedName::unqualified(r#"say "hi""#)
        );
    }

    #[test]
    fn test_parse_invalid() {
        for bad in ["", "a.", ".a", "a..b", "a.b.c", "\"open", "a b", "\"\""] {
            let err = QualifiedName::parse(bad).unwrap_err();
            assert!(matches!(err, TranslateError::InvalidName(_)), "{bad:?}");
        }
    }

    #[test]
    fn test_display_roundtrip_simple() {
        let name = QualifiedName::qualified("public", "simple");
        assert_eq!(name.to_string(), "public.simple");
        assert_eq!(name.to_string().parse::<QualifiedName>().unwrap(), name);
    }

    #[test]
    fn test_entry_invalidation() {
        let entry = NormalizerEntry::new(
            NormalizerId(1),
            QualifiedName::unqualified("upper"),
            Arc::new(|t: &str| Some(vec![Lexeme::new(t.to_uppercase())])),
        );
        assert!(entry.is_valid());
        assert_eq!(entry.normalize("ab").unwrap()[0].text, "AB");
        entry.invalidate();
        assert!(!entry.is_valid());
    }
}
