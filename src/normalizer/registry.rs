//! In-process normalizer registry.
//!
//! Names map to ids for the lifetime of the registry. Redefining a name keeps
//! its id but installs a fresh [`NormalizerEntry`] and invalidates the old
//! one, so dictionaries holding the old entry notice on their next call and
//! look the id up again.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{Normalizer, NormalizerCache, NormalizerEntry, NormalizerId, QualifiedName};
use crate::error::{Result, TranslateError};

/// Default schema search path for unqualified names.
pub const DEFAULT_SEARCH_PATH: &[&str] = &["pg_catalog", "public"];

/// Schema used when registering an unqualified name.
pub const DEFAULT_SCHEMA: &str = "public";

/// Thread-safe registry of normalizers.
pub struct NormalizerRegistry {
    names: RwLock<FxHashMap<QualifiedName, NormalizerId>>,
    entries: RwLock<FxHashMap<NormalizerId, Arc<NormalizerEntry>>>,
    search_path: Vec<String>,
    next_id: AtomicU32,
}

impl NormalizerRegistry {
    /// Create an empty registry with the default search path.
    pub fn new() -> Self {
        Self::with_search_path(DEFAULT_SEARCH_PATH.iter().map(|s| s.to_string()))
    }

    /// Create an empty registry that resolves unqualified names through
    /// `search_path`, in order.
    pub fn with_search_path<I, S>(search_path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: RwLock::new(FxHashMap::default()),
            entries: RwLock::new(FxHashMap::default()),
            search_path: search_path.into_iter().map(Into::into).collect(),
            next_id: AtomicU32::new(1),
        }
    }

    /// Create a registry holding the built-in `pg_catalog.simple` normalizer.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(
            QualifiedName::qualified("pg_catalog", "simple"),
            Arc::new(super::SimpleNormalizer::default()),
        );
        registry
    }

    /// Register or redefine a normalizer.
    ///
    /// Unqualified names are placed in [`DEFAULT_SCHEMA`]. Redefining an
    /// existing name keeps its id and invalidates the previous entry.
    pub fn register(&self, name: QualifiedName, normalizer: Arc<dyn Normalizer>) -> NormalizerId {
        let name = Self::qualify(name);
        let mut names = self.names.write();
        let id = *names
            .entry(name.clone())
            .or_insert_with(|| NormalizerId(self.next_id.fetch_add(1, Ordering::Relaxed)));

        let entry = Arc::new(NormalizerEntry::new(id, name.clone(), normalizer));
        if let Some(previous) = self.entries.write().insert(id, entry) {
            tracing::debug!(%name, %id, "normalizer redefined, invalidating cached entry");
            previous.invalidate();
        }
        id
    }

    /// Remove a normalizer. Its current entry is invalidated.
    ///
    /// Returns `true` if the name was registered.
    pub fn unregister(&self, name: &QualifiedName) -> bool {
        let name = Self::qualify(name.clone());
        let Some(id) = self.names.write().remove(&name) else {
            return false;
        };
        if let Some(entry) = self.entries.write().remove(&id) {
            entry.invalidate();
        }
        true
    }

    /// Mark the current entry for `id` stale without changing the definition.
    ///
    /// The next lookup installs a fresh entry around the same normalizer.
    pub fn invalidate(&self, id: NormalizerId) {
        if let Some(entry) = self.entries.read().get(&id) {
            entry.invalidate();
        }
    }

    /// Number of registered normalizers.
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    /// Check if no normalizers are registered.
    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }

    fn qualify(name: QualifiedName) -> QualifiedName {
        match name.schema {
            Some(_) => name,
            None => QualifiedName::qualified(DEFAULT_SCHEMA, name.name),
        }
    }
}

impl Default for NormalizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizerCache for NormalizerRegistry {
    fn resolve(&self, name: &QualifiedName) -> Result<NormalizerId> {
        let names = self.names.read();
        let found = match &name.schema {
            Some(_) => names.get(name).copied(),
            None => self.search_path.iter().find_map(|schema| {
                names
                    .get(&QualifiedName::qualified(schema.as_str(), name.name.as_str()))
                    .copied()
            }),
        };
        found.ok_or_else(|| TranslateError::NormalizerNotFound(name.to_string()))
    }

    fn lookup(&self, id: NormalizerId) -> Result<Arc<NormalizerEntry>> {
        let current = self.entries.read().get(&id).cloned();
        let entry =
            current.ok_or_else(|| TranslateError::NormalizerNotFound(format!("id {id}")))?;
        if entry.is_valid() {
            return Ok(entry);
        }

        // Stale but still defined: rebuild the entry around the same normalizer.
        let mut entries = self.entries.write();
        let slot = entries
            .get_mut(&id)
            .ok_or_else(|| TranslateError::NormalizerNotFound(format!("id {id}")))?;
        if !slot.is_valid() {
            let fresh = NormalizerEntry::new(id, slot.name().clone(), Arc::clone(&slot.normalizer));
            *slot = Arc::new(fresh);
        }
        Ok(Arc::clone(slot))
    }
}
