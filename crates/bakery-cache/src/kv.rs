//! JSON wrapper over a key-value backend.

use crate::{CacheError, KvStore, MemoryStore};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
pub struct Cache {
    store: Box<dyn KvStore>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("backend", &self.store.backend_name())
            .finish()
    }
}

impl Cache {
    /// Wrap a backend.
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// A cache backed by a fresh in-process map.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// `CacheError::SerializeError` if it exists but does not decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<LineItem>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("cart", &items)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("cart", user_id);
/// // Returns "cart:user123"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        quantity: i64,
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::in_memory();
        let rows = vec![Row {
            id: "bun".to_string(),
            quantity: 2,
        }];

        cache.set("cart", &rows).unwrap();
        let loaded: Option<Vec<Row>> = cache.get("cart").unwrap();
        assert_eq!(loaded, Some(rows));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::in_memory();
        let loaded: Option<Vec<Row>> = cache.get("nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_value_is_serialize_error() {
        let store = MemoryStore::new();
        store.set("cart", b"{not json").unwrap();
        let cache = Cache::new(store);

        let err = cache.get::<Vec<Row>>("cart").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_delete_and_exists() {
        let cache = Cache::in_memory();
        cache.set("cart", &Vec::<Row>::new()).unwrap();
        assert!(cache.exists("cart").unwrap());

        cache.delete("cart").unwrap();
        assert!(!cache.exists("cart").unwrap());
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("cart", "user123"), "cart:user123");
        assert_eq!(cache_key!("cart", "u", 7), "cart:u:7");
    }
}
