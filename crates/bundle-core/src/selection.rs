//! Selection state
//!
//! Item id → `{option, quantity}` with the invariant that every stored
//! quantity is positive. Entries keep insertion order so that cart lines come
//! out in the order the shopper picked them.

use crate::catalog::{ItemId, OptionId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One selected item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    /// Purchasing option the units are bought as
    #[serde(rename = "variantId")]
    pub option_id: OptionId,
    /// Units selected, always > 0 while stored
    pub quantity: u32,
}

/// The shopper's in-progress choice for one bundle
///
/// Serializes as `{ "<itemId>": {"variantId": "...", "quantity": n} }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    entries: IndexMap<ItemId, SelectionEntry>,
}

impl Selection {
    /// Create empty selection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace or remove the entry for an item
    ///
    /// A quantity of 0 removes the entry. Returns the previous entry.
    pub fn set_quantity(
        &mut self,
        item: impl Into<ItemId>,
        option: impl Into<OptionId>,
        quantity: u32,
    ) -> Option<SelectionEntry> {
        let item = item.into();
        if quantity == 0 {
            return self.entries.shift_remove(&item);
        }
        self.entries.insert(
            item,
            SelectionEntry {
                option_id: option.into(),
                quantity,
            },
        )
    }

    /// Apply a signed change, clamping at zero; returns the new quantity
    pub fn adjust(
        &mut self,
        item: impl Into<ItemId>,
        option: impl Into<OptionId>,
        delta: i64,
    ) -> u32 {
        let item = item.into();
        let current = i64::from(self.quantity_of(item.as_str()));
        let next = u32::try_from(current.saturating_add(delta).max(0)).unwrap_or(u32::MAX);
        self.set_quantity(item, option, next);
        next
    }

    /// Add one unit, keeping an existing entry's option
    pub(crate) fn increment(&mut self, item: &ItemId, option: &OptionId) {
        match self.entries.get_mut(item.as_str()) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(1),
            None => {
                self.entries.insert(
                    item.clone(),
                    SelectionEntry {
                        option_id: option.clone(),
                        quantity: 1,
                    },
                );
            }
        }
    }

    /// Quantity selected for an item (0 when absent)
    #[inline]
    #[must_use]
    pub fn quantity_of(&self, item: &str) -> u32 {
        self.entries.get(item).map_or(0, |e| e.quantity)
    }

    /// Entry for an item
    #[inline]
    #[must_use]
    pub fn get(&self, item: &str) -> Option<&SelectionEntry> {
        self.entries.get(item)
    }

    /// Check whether an item is selected
    #[inline]
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.entries.contains_key(item)
    }

    /// Sum of all quantities
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries
            .values()
            .fold(0u32, |sum, e| sum.saturating_add(e.quantity))
    }

    /// Iterate entries in selection order
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &SelectionEntry)> {
        self.entries.iter()
    }

    /// Number of distinct items selected
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keep only entries accepted by the predicate
    pub fn retain(&mut self, mut keep: impl FnMut(&ItemId, &SelectionEntry) -> bool) {
        self.entries.retain(|item, entry| keep(item, entry));
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = (&'a ItemId, &'a SelectionEntry);
    type IntoIter = indexmap::map::Iter<'a, ItemId, SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_quantity_removes_entry() {
        let mut selection = Selection::new();
        selection.set_quantity("a", "a1", 2);
        assert!(selection.contains("a"));

        let previous = selection.set_quantity("a", "a1", 0);
        assert_eq!(previous.map(|e| e.quantity), Some(2));
        assert!(!selection.contains("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn set_quantity_replaces() {
        let mut selection = Selection::new();
        selection.set_quantity("a", "a1", 2);
        selection.set_quantity("a", "a2", 5);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get("a").unwrap().option_id.as_str(), "a2");
        assert_eq!(selection.total(), 5);
    }

    #[test]
    fn adjust_clamps_at_zero() {
        let mut selection = Selection::new();
        assert_eq!(selection.adjust("a", "a1", 2), 2);
        assert_eq!(selection.adjust("a", "a1", -5), 0);
        assert!(!selection.contains("a"));
    }

    #[test]
    fn adjust_saturates_on_extreme_deltas() {
        let mut selection = Selection::new();
        selection.set_quantity("a", "a1", 2);
        assert_eq!(selection.adjust("a", "a1", i64::MAX), u32::MAX);
        assert_eq!(selection.quantity_of("a"), u32::MAX);

        assert_eq!(selection.adjust("a", "a1", i64::MIN), 0);
        assert!(!selection.contains("a"));
    }

    #[test]
    fn removal_keeps_order() {
        let mut selection = Selection::new();
        selection.set_quantity("a", "a1", 1);
        selection.set_quantity("b", "b1", 1);
        selection.set_quantity("c", "c1", 1);
        selection.set_quantity("b", "b1", 0);

        let order: Vec<&str> = selection.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["a", "c"]);
    }

    #[test]
    fn increment_creates_then_grows() {
        let mut selection = Selection::new();
        let item = ItemId::new("a");
        let option = OptionId::new("a1");
        selection.increment(&item, &option);
        selection.increment(&item, &option);
        assert_eq!(selection.quantity_of("a"), 2);
    }

    #[test]
    fn serializes_as_storefront_blob() {
        let mut selection = Selection::new();
        selection.set_quantity("a", "a1", 3);
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"a":{"variantId":"a1","quantity":3}}"#);
    }
}
