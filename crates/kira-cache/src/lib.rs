//! Durable local key-value persistence for the Kira storefront.
//!
//! The storefront core keeps small client-side state (the shopping cart, the
//! auth token) in a key-value slot that survives process restarts. This crate
//! defines the [`KeyValue`] trait the rest of the workspace is written
//! against, with automatic JSON serialization for any type that implements
//! `Serialize` and `DeserializeOwned`.
//!
//! Two backends are provided: [`MemoryStore`] for native builds and tests,
//! and `SpinStore` (on `wasm32`) backed by Spin's Key-Value Store.
//!
//! # Example
//!
//! ```rust
//! use kira_cache::{KeyValueExt, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("cart", &vec![1, 2, 3]).unwrap();
//! let items: Option<Vec<i32>> = store.get("cart").unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;

pub use error::StorageError;
pub use kv::{KeyValue, KeyValueExt, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use kv::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{KeyValue, KeyValueExt, MemoryStore, StorageError};
}
