//! Cache module for storing provider responses in memory
//!
//! This module provides the in-memory store used to deduplicate repeated
//! lookups against the country-data provider. Entries never expire and are
//! never persisted; invalidation is explicit and always empties the whole
//! store at once.

mod store;

pub use store::{CacheStore, CachedLookup};
