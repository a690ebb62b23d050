//! In-memory store for country-data provider responses
//!
//! Provides a `CacheStore` that maps query keys to previously fetched
//! results. There is no expiry policy: a stored value is returned unchanged
//! for every lookup of its key until `clear` removes all entries at once.
//! Per-key removal is deliberately not offered.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::data::Country;

/// A cached lookup result
///
/// List lookups (all countries, name search, region filter) store ordered
/// sequences; an exact code lookup stores the single matching country. A
/// given key always maps to the same shape because the operation name is
/// part of the key.
#[derive(Debug, Clone)]
pub enum CachedLookup {
    /// Ordered sequence of countries, in provider order
    Countries(Vec<Country>),
    /// Single country from an exact alpha-code match
    Country(Box<Country>),
}

/// Process-wide in-memory cache keyed by query
///
/// The store is created empty at application start, populated lazily on the
/// first successful fetch per key, and emptied only by an explicit `clear`.
/// Cloning the store shares the underlying map, so a gateway and the
/// application can hold handles to the same entries.
#[derive(Debug, Clone, Default)]
pub struct CacheStore {
    entries: Arc<Mutex<HashMap<String, CachedLookup>>>,
}

impl CacheStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the entry for `key`, if one exists
    pub fn get(&self, key: &str) -> Option<CachedLookup> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    /// Stores `value` under `key`, replacing any previous entry
    pub fn insert(&self, key: impl Into<String>, value: CachedLookup) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.into(), value);
        }
    }

    /// Removes every entry unconditionally
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Returns the number of stored entries
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns true if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Country;

    fn country(code: &str, name: &str) -> Country {
        let mut c = Country::default();
        c.cca2 = code.to_string();
        c.name.common = name.to_string();
        c
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = CacheStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.get("all").is_none());
    }

    #[test]
    fn test_insert_then_get_returns_stored_value() {
        let store = CacheStore::new();
        store.insert(
            "code:fr",
            CachedLookup::Country(Box::new(country("FR", "France"))),
        );

        match store.get("code:fr") {
            Some(CachedLookup::Country(c)) => assert_eq!(c.name.common, "France"),
            other => panic!("Expected cached country, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_overwrites_existing_entry() {
        let store = CacheStore::new();
        store.insert(
            "code:de",
            CachedLookup::Country(Box::new(country("DE", "Deutschland"))),
        );
        store.insert(
            "code:de",
            CachedLookup::Country(Box::new(country("DE", "Germany"))),
        );

        match store.get("code:de") {
            Some(CachedLookup::Country(c)) => assert_eq!(c.name.common, "Germany"),
            other => panic!("Expected cached country, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_removes_all_entries() {
        let store = CacheStore::new();
        store.insert("all", CachedLookup::Countries(vec![country("FR", "France")]));
        store.insert(
            "region:europe",
            CachedLookup::Countries(vec![country("FR", "France")]),
        );
        assert_eq!(store.len(), 2);

        store.clear();

        assert!(store.is_empty());
        assert!(store.get("all").is_none());
        assert!(store.get("region:europe").is_none());
    }

    #[test]
    fn test_clear_on_empty_store_is_a_noop() {
        let store = CacheStore::new();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = CacheStore::new();
        let handle = store.clone();

        store.insert("all", CachedLookup::Countries(vec![country("JP", "Japan")]));
        assert_eq!(handle.len(), 1);

        handle.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_repeated_get_returns_same_value() {
        let store = CacheStore::new();
        store.insert(
            "name:japan",
            CachedLookup::Countries(vec![country("JP", "Japan")]),
        );

        for _ in 0..3 {
            match store.get("name:japan") {
                Some(CachedLookup::Countries(list)) => {
                    assert_eq!(list.len(), 1);
                    assert_eq!(list[0].name.common, "Japan");
                }
                other => panic!("Expected cached list, got {:?}", other),
            }
        }
    }
}
