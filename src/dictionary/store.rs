// Dictionary store - holds the mapping currently in effect for substitution
//
// The mapping is replaced wholesale on load and never mutated in place, so
// readers always observe either the previous or the next mapping, never a
// torn one. Lookups trim the key; stored keys stay exactly as loaded.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Store for the active key→value substitution mapping
///
/// Read-many/replace-whole: the replacement engine only reads, loading
/// collaborators (default source, import, programmatic edits) swap the whole
/// mapping. A replacement job that started before a swap keeps working
/// against whichever mapping each of its chunks observes.
#[derive(Debug)]
pub struct DictionaryStore {
    mapping: RwLock<Arc<HashMap<String, String>>>,
}

impl DictionaryStore {
    /// Create a store with an empty mapping (pass-through mode)
    pub fn new() -> Self {
        Self {
            mapping: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// Replace the entire active mapping atomically
    ///
    /// Returns the number of entries now in effect.
    pub fn load(&self, mapping: HashMap<String, String>) -> usize {
        let count = mapping.len();
        *self.mapping.write() = Arc::new(mapping);
        crate::debug!("Dictionary mapping replaced: {} entries", count);
        count
    }

    /// Drop every entry, returning the store to pass-through mode
    pub fn clear(&self) {
        *self.mapping.write() = Arc::new(HashMap::new());
    }

    /// Exact, case-sensitive lookup of the whitespace-trimmed key
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.mapping.read().get(key.trim()).cloned()
    }

    /// Cheap handle to the mapping currently in effect
    ///
    /// The returned map is immutable; a concurrent `load` swaps the store's
    /// reference without affecting handles already taken.
    pub fn snapshot(&self) -> Arc<HashMap<String, String>> {
        Arc::clone(&self.mapping.read())
    }

    /// Number of entries in the active mapping
    pub fn len(&self) -> usize {
        self.mapping.read().len()
    }

    /// True when no mapping is loaded and replacement is a pass-through
    pub fn is_empty(&self) -> bool {
        self.mapping.read().is_empty()
    }

    /// All entries sorted by key, for deterministic export
    pub fn entries(&self) -> Vec<(String, String)> {
        let mapping = self.snapshot();
        let mut entries: Vec<(String, String)> = mapping
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl Default for DictionaryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
