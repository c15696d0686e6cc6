//! Last-box archive
//!
//! Saves the most recent selection under one fixed key and restores it
//! against whatever the catalog looks like today. Store failures are logged
//! and swallowed; callers only ever see a flag or an empty selection.

use crate::error::StoreError;
use crate::store::KeyValueStore;
use bundle_core::config::DEFAULT_STORAGE_KEY;
use bundle_core::{validate_restored_selection, Catalog, Selection, SelectionPersistence};

/// Selection save/restore over a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct SelectionArchive<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SelectionArchive<S> {
    /// Archive under the default key
    #[inline]
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Archive under a custom key
    #[inline]
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Key in use
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the underlying store
    #[inline]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwrap into the underlying store
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Forget the saved selection; `false` if the store refused
    pub fn clear(&mut self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to clear saved box");
                false
            }
        }
    }

    fn try_save(&mut self, selection: &Selection) -> Result<(), StoreError> {
        let json = serde_json::to_string(selection)?;
        self.store.write(&self.key, &json)
    }

    fn try_restore(&self, catalog: &Catalog) -> Result<Selection, StoreError> {
        let Some(text) = self.store.read(&self.key)? else {
            return Ok(Selection::new());
        };
        let raw: serde_json::Value = serde_json::from_str(&text)?;
        Ok(validate_restored_selection(&raw, catalog))
    }
}

impl<S: KeyValueStore> SelectionPersistence for SelectionArchive<S> {
    fn save(&mut self, selection: &Selection) -> bool {
        if selection.is_empty() {
            return false;
        }
        match self.try_save(selection) {
            Ok(()) => {
                tracing::debug!(key = %self.key, items = selection.len(), "saved box");
                true
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to save box");
                false
            }
        }
    }

    fn restore(&self, catalog: &Catalog) -> Selection {
        self.try_restore(catalog).unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "failed to load saved box");
            Selection::new()
        })
    }

    fn has_saved_selection(&self) -> bool {
        self.store.contains(&self.key).unwrap_or_else(|e| {
            tracing::debug!(key = %self.key, error = %e, "storage not readable");
            false
        })
    }
}
