//! Construction-time options for a translate dictionary.
//!
//! A dictionary is defined by two options:
//!
//! - `DictFile`: reference to the dictionary source file
//! - `InputDict`: qualified name of the upstream normalizer
//!
//! Both are required exactly once; option names are matched
//! case-insensitively. Options can be given as pairs or as an option list
//! string such as `DictFile = animals, InputDict = 'public.simple'`.

use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use crate::error::{Result, TranslateError};
use crate::normalizer::QualifiedName;

/// Name of the dictionary file option.
pub const DICT_FILE: &str = "DictFile";

/// Name of the upstream normalizer option.
pub const INPUT_DICT: &str = "InputDict";

/// Extension appended to bare dictionary file names.
pub const DICT_FILE_EXTENSION: &str = "trn";

/// Validated options of a translate dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Unresolved dictionary file reference
    pub dict_file: String,
    /// Upstream normalizer name
    pub input_dict: QualifiedName,
}

impl TranslateOptions {
    /// Validate a list of `(name, value)` options.
    ///
    /// # Errors
    ///
    /// Returns a config-class error for unknown, repeated or missing options
    /// and for a malformed `InputDict` name.
    pub fn parse<I, K, V>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut dict_file: Option<String> = None;
        let mut input_dict: Option<String> = None;

        for (name, value) in options {
            let name = name.as_ref();
            let (slot, option) = if name.eq_ignore_ascii_case(DICT_FILE) {
                (&mut dict_file, DICT_FILE)
            } else if name.eq_ignore_ascii_case(INPUT_DICT) {
                (&mut input_dict, INPUT_DICT)
            } else {
                return Err(TranslateError::UnrecognizedOption(name.to_string()));
            };
            if slot.is_some() {
                return Err(TranslateError::DuplicateOption(option));
            }
            *slot = Some(value.as_ref().to_string());
        }

        let dict_file = dict_file.ok_or(TranslateError::MissingOption(DICT_FILE))?;
        let input_dict = input_dict.ok_or(TranslateError::MissingOption(INPUT_DICT))?;
        Ok(Self {
            dict_file,
            input_dict: QualifiedName::parse(&input_dict)?,
        })
    }

    /// Validate an option list string.
    pub fn parse_list(list: &str) -> Result<Self> {
        Self::parse(parse_option_list(list)?)
    }
}

/// Parse `name = value, name = value` into pairs.
///
/// Values may be bare words or single-quoted strings in which `''` stands for
/// a quote. Names are bare words.
///
/// # Errors
///
/// Returns [`TranslateError::InvalidOptionList`] on any syntax error.
pub fn parse_option_list(list: &str) -> Result<Vec<(String, String)>> {
    let invalid = || TranslateError::InvalidOptionList(list.to_string());
    let mut options = Vec::new();
    let mut chars = list.chars().peekable();

    skip_space(&mut chars);
    if chars.peek().is_none() {
        return Ok(options);
    }

    loop {
        skip_space(&mut chars);
        let mut name = String::new();
        while let Some(c) = chars.next_if(|c| c.is_alphanumeric() || *c == '_') {
            name.push(c);
        }
        if name.is_empty() {
            return Err(invalid());
        }

        skip_space(&mut chars);
        if chars.next_if_eq(&'=').is_none() {
            return Err(invalid());
        }
        skip_space(&mut chars);

        let mut value = String::new();
        if chars.next_if_eq(&'\'').is_some() {
            loop {
                match chars.next() {
                    Some('\'') if chars.next_if_eq(&'\'').is_some() => value.push('\''),
                    Some('\'') => break,
                    Some(c) => value.push(c),
                    None => return Err(invalid()),
                }
            }
        } else {
            while let Some(c) = chars.next_if(|c| *c != ',' && !c.is_whitespace()) {
                value.push(c);
            }
            if value.is_empty() {
                return Err(invalid());
            }
        }
        options.push((name, value));

        skip_space(&mut chars);
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return Err(invalid()),
        }
    }

    Ok(options)
}

fn skip_space(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

/// Resolves dictionary file references to paths.
///
/// A bare name (lowercase letters, digits and `_` only) resolves to
/// `<data_dir>/<name>.trn`. A reference containing a path separator or a `.`
/// is taken as a path; relative paths are resolved against `data_dir`.
#[derive(Debug, Clone, Default)]
pub struct FileResolver {
    data_dir: Option<PathBuf>,
}

impl FileResolver {
    /// Resolve relative to `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Resolve relative to the current directory.
    pub fn current_dir() -> Self {
        Self { data_dir: None }
    }

    /// The directory bare names are resolved against.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Resolve a dictionary file reference.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::InvalidFileName`] for an empty reference or a
    /// bare name with characters outside `[a-z0-9_]`.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let looks_like_path = reference.contains(['/', '\\', '.']);
        let path = if looks_like_path {
            PathBuf::from(reference)
        } else {
            let bare = !reference.is_empty()
                && reference
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
            if !bare {
                return Err(TranslateError::InvalidFileName(reference.to_string()));
            }
            PathBuf::from(format!("{reference}.{DICT_FILE_EXTENSION}"))
        };

        Ok(match &self.data_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options() {
        let opts = TranslateOptions::parse([("DictFile", "animals"), ("InputDict", "simple")]).unwrap();
        assert_eq!(opts.dict_file, "animals");
        assert_eq!(opts.input_dict, QualifiedName::unqualified("simple"));
    }

    #[test]
    fn test_option_names_case_insensitive() {
        let opts = TranslateOptions::parse([("inputdict", "public.Simple"), ("DICTFILE", "x")]).unwrap();
        assert_eq!(opts.input_dict, QualifiedName::qualified("public", "simple"));
    }

    #[test]
    fn test_duplicate_option() {
        let err = TranslateOptions::parse([("DictFile", "a"), ("dictfile", "b"), ("InputDict", "s")])
            .unwrap_err();
        assert_eq!(err.to_string(), "multiple DictFile parameters");

        let err = TranslateOptions::parse([("InputDict", "a"), ("InputDict", "b")]).unwrap_err();
        assert_eq!(err.to_string(), "multiple InputDict parameters");
    }

    #[test]
    fn test_missing_options() {
        let err = TranslateOptions::parse([("InputDict", "s")]).unwrap_err();
        assert_eq!(err.to_string(), "missing DictFile parameter");

        let err = TranslateOptions::parse([("DictFile", "f")]).unwrap_err();
        assert_eq!(err.to_string(), "missing InputDict parameter");

        let none: [(&str, &str); 0] = [];
        let err = TranslateOptions::parse(none).unwrap_err();
        assert_eq!(err.to_string(), "missing DictFile parameter");
    }

    #[test]
    fn test_unrecognized_option() {
        let err = TranslateOptions::parse([("DictFile", "f"), ("Synonyms", "x")]).unwrap_err();
        assert!(matches!(err, TranslateError::UnrecognizedOption(ref n) if n == "Synonyms"));
    }

    #[test]
    fn test_invalid_input_dict_name() {
        let err = TranslateOptions::parse([("DictFile", "f"), ("InputDict", "a.b.c")]).unwrap_err();
        assert!(matches!(err, TranslateError::InvalidName(_)));
    }

    #[test]
    fn test_parse_option_list() {
        let opts = parse_option_list("DictFile = animals , InputDict='public.simple'").unwrap();
        assert_eq!(
            opts,
            vec![
                ("DictFile".to_string(), "animals".to_string()),
                ("InputDict".to_string(), "public.simple".to_string()),
            ]
        );
        assert!(parse_option_list("   ").unwrap().is_empty());
        assert_eq!(
            parse_option_list("x = 'it''s here'").unwrap()[0].1,
            "it's here"
        );
    }

    #[test]
    fn test_parse_option_list_errors() {
        for bad in ["DictFile", "DictFile =", "= x", "a = 'open", "a = b c", "a = b,"] {
            assert!(
                matches!(parse_option_list(bad), Err(TranslateError::InvalidOptionList(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_list() {
        let opts = TranslateOptions::parse_list("DictFile=animals, InputDict=simple").unwrap();
        assert_eq!(opts.dict_file, "animals");
    }

    #[test]
    fn test_resolve_bare_name() {
        let resolver = FileResolver::new("/usr/share/tsearch_data");
        assert_eq!(
            resolver.resolve("animals").unwrap(),
            PathBuf::from("/usr/share/tsearch_data/animals.trn")
        );
    }

    #[test]
    fn test_resolve_paths() {
        let resolver = FileResolver::new("/data");
        assert_eq!(resolver.resolve("/abs/x.trn").unwrap(), PathBuf::from("/abs/x.trn"));
        assert_eq!(resolver.resolve("sub/x.txt").unwrap(), PathBuf::from("/data/sub/x.txt"));
        assert_eq!(
            FileResolver::current_dir().resolve("animals").unwrap(),
            PathBuf::from("animals.trn")
        );
    }

    #[test]
    fn test_resolve_invalid_bare_name() {
        let resolver = FileResolver::current_dir();
        for bad in ["", "Animals", "my-dict", "a b"] {
            assert!(matches!(
                resolver.resolve(bad),
                Err(TranslateError::InvalidFileName(_))
            ));
        }
    }
}
