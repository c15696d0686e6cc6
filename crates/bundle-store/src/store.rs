//! Key-value store abstraction
//!
//! Mirrors a browser-style local storage: string keys, string values, and
//! writes that may fail for reasons outside the caller's control.

use crate::error::StoreError;
use std::collections::HashMap;

/// Client-local string key-value store
pub trait KeyValueStore {
    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing storage refuses the write.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read the value under `key`, `None` when absent
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing storage cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Remove `key`; absent keys are not an error
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing storage refuses the change.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Check whether `key` holds a value
    ///
    /// # Errors
    ///
    /// Same as [`KeyValueStore::read`].
    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.read(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        (**self).contains(key)
    }
}

/// In-memory store with an optional byte quota
///
/// Can be switched off to emulate storage that is disabled entirely.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStore {
    /// Create unlimited store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With capacity in bytes (keys plus values)
    #[inline]
    #[must_use]
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Store that rejects every operation
    #[inline]
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Switch availability at runtime
    #[inline]
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Bytes currently held
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn check_enabled(&self) -> Result<(), StoreError> {
        if self.disabled {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_enabled()?;
        if let Some(limit) = self.quota {
            let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded { needed, limit });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_enabled()?;
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check_enabled()?;
        self.entries.remove(key);
        Ok(())
    }
}
