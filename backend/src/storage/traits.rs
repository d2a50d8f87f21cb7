//! # Storage Traits
//!
//! The storage abstraction that lets the repository run over different
//! backends without modification.

use anyhow::Result;

/// String key-value storage
///
/// Values are opaque strings; the repository decides how they are encoded.
pub trait KeyValueStore {
    /// Retrieve a value, `None` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
