//! Type-safe local key-value slot for the TeeShack storefront.
//!
//! Provides a simple, ergonomic API for keeping small pieces of client state
//! (the cart snapshot, the signed-in user) with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use teeshack_cache::Cache;
//!
//! let cache = Cache::open_dir(".teeshack")?;
//!
//! // Store a value
//! cache.set("teeshack_cart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<LineItem>> = cache.get("teeshack_cart")?;
//!
//! // Delete a value
//! cache.delete("teeshack_cart")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{Cache, FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
