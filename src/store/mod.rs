//! Key-value state - the storage seam between record logic and the ledger host.
//!
//! The host platform owns persistence and commit semantics. Record logic only
//! needs three calls against it, so that is all this trait asks for. Anything
//! implementing it can back a [`RecordStore`](crate::RecordStore): the ledger's
//! own state API, a database, or the [`InMemoryStore`] used in tests.
//!
//! ## Example
//!
//! ```ignore
//! use car_ledger::{InMemoryStore, KeyValueStore};
//!
//! let store = InMemoryStore::new();
//! store.put("E1", br#"{"engine_no":"E1"}"#.to_vec())?;
//! assert!(store.get("E1")?.is_some());
//! store.delete("E1")?;
//! ```

mod in_memory;

use std::fmt;
use std::sync::Arc;

/// Error type for key-value store calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A lock guarding in-process state was poisoned.
    LockPoisoned(&'static str),
    /// The backing store rejected or failed the call.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::Backend(msg) => write!(f, "store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Abstract key-value state.
///
/// `get` returns `None` for an absent key. Callers treat a zero-length value
/// the same way, since some ledger hosts report deletion that way.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, replacing anything already there.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

pub use in_memory::InMemoryStore;
