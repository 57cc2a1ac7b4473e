//! Key-value store trait and backends.

use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A durable key-value slot.
///
/// Values are opaque byte strings; [`KeyValueExt`] layers JSON serialization
/// on top. Implementations are injected into their consumers (the cart store,
/// the auth state) so that tests can substitute an in-memory backend.
pub trait KeyValue {
    /// Get the raw bytes stored under `key`, or `None` if absent.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store raw bytes under `key`, overwriting any previous value.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Deleting an absent key is not an
    /// error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Check whether `key` has a stored value.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

/// JSON-typed accessors for any [`KeyValue`] backend.
pub trait KeyValueExt: KeyValue {
    /// Get and deserialize the value stored under `key`.
    ///
    /// Returns `None` if the key is absent. Undecodable bytes are an error;
    /// callers that treat corrupt data as "no data" handle that themselves.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value under `key`, overwriting wholesale.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }
}

impl<S: KeyValue + ?Sized> KeyValueExt for S {}

impl<S: KeyValue + ?Sized> KeyValue for &S {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

impl<S: KeyValue + ?Sized> KeyValue for Rc<S> {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

/// In-memory key-value store.
///
/// The default backend on native targets, and the one tests use. Durability
/// is process-lifetime only; the single-threaded client model means a plain
/// `RefCell` suffices.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValue for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Key-value store backed by Spin's Key-Value Store.
#[cfg(target_arch = "wasm32")]
pub struct SpinStore {
    store: spin_sdk::key_value::Store,
}

#[cfg(target_arch = "wasm32")]
impl SpinStore {
    /// Open the default Key-Value store.
    pub fn open_default() -> Result<Self, StorageError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| StorageError::Open(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named Key-Value store.
    pub fn open(name: &str) -> Result<Self, StorageError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| StorageError::Open(e.to_string()))?;
        Ok(Self { store })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValue for SpinStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.store
            .get(key)
            .map_err(|e| StorageError::Store(e.to_string()))
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.store
            .set(key, value)
            .map_err(|e| StorageError::Store(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.store
            .delete(key)
            .map_err(|e| StorageError::Store(e.to_string()))
    }
}
