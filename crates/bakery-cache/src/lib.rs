//! Type-safe key-value persistence layer for the bakery cart.
//!
//! Provides a small, ergonomic API for keeping JSON values in a key-value
//! store. Backends implement [`KvStore`]; [`Cache`] adds serialization on top.
//!
//! # Example
//!
//! ```rust,ignore
//! use bakery_cache::{cache_key, Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::open(".bakery")?);
//!
//! // Store a value
//! cache.set(&cache_key!("cart", "user123"), &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<LineItem>> = cache.get("cart:user123")?;
//!
//! // Delete a value
//! cache.delete("cart:user123")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cache_key, Cache, CacheError, FileStore, KvStore, MemoryStore};
}
