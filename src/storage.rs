//! Storage
//!
//! Durable key-value persistence used for the guest cart, the active voucher and the
//! remembered shipping address. Single writer, last write wins.

use std::{cell::RefCell, collections::BTreeMap, fmt, io};

use thiserror::Error;

/// Key holding the remembered shipping address draft.
pub const SAVED_ADDRESS_KEY: &str = "checkout.saved_address";

/// Key holding the "remember address" preference.
pub const REMEMBER_ADDRESS_KEY: &str = "checkout.remember_address";

/// Key holding the guest cart lines.
pub const GUEST_CART_KEY: &str = "cart.lines";

/// Key holding the currently active voucher code.
pub const ACTIVE_VOUCHER_KEY: &str = "cart.voucher";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be read from or written to.
    #[error("storage io error")]
    Io(#[from] io::Error),

    /// The backend's own contents could not be encoded or decoded.
    #[error("storage encoding error")]
    Encoding(#[from] serde_json::Error),
}

/// A durable string key-value store.
pub trait KeyValueStore: fmt::Debug {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store, for tests and embedders without a durable backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
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

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_then_get_returns_value() -> TestResult {
        let store = MemoryStore::new();

        store.set("k", "v")?;

        assert_eq!(store.get("k")?.as_deref(), Some("v"));

        Ok(())
    }

    #[test]
    fn last_write_wins() -> TestResult {
        let store = MemoryStore::new();

        store.set("k", "first")?;
        store.set("k", "second")?;

        assert_eq!(store.get("k")?.as_deref(), Some("second"));
        assert_eq!(store.len(), 1);

        Ok(())
    }

    #[test]
    fn remove_missing_key_is_ok() -> TestResult {
        let store = MemoryStore::new();

        store.remove("missing")?;

        assert!(store.is_empty());

        Ok(())
    }

    #[test]
    fn store_is_usable_through_a_reference() -> TestResult {
        let store = MemoryStore::new();
        let by_ref = &store;

        by_ref.set("k", "v")?;

        assert_eq!(store.get("k")?.as_deref(), Some("v"));

        Ok(())
    }
}
