//! Catalog model
//!
//! Items a bundle can be composed of. The catalog is supplied by an external
//! adapter and never mutated during a session.

use crate::error::BundleError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;

/// Default stock count at or below which an item is reported as low
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Catalog item identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create item id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Purchasing option identifier (the id a cart line is created for)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    /// Create option id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check for the empty id
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for OptionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OptionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as delivered by the storefront
    pub amount: String,
    /// ISO currency code
    pub currency_code: String,
}

impl Money {
    /// Create money value
    #[inline]
    #[must_use]
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${} {}", self.amount, self.currency_code)
    }
}

/// Representative purchasing option of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOption {
    /// Option id
    pub id: OptionId,
    /// Whether the option can currently be bought
    #[serde(default = "available_by_default")]
    pub available_for_sale: bool,
    /// Remaining stock, when the storefront exposes it
    #[serde(default)]
    pub quantity_available: Option<u32>,
}

impl PurchaseOption {
    /// Create an available option with unknown stock
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<OptionId>) -> Self {
        Self {
            id: id.into(),
            available_for_sale: true,
            quantity_available: None,
        }
    }

    /// Mark as sold out
    #[inline]
    #[must_use]
    pub fn sold_out(mut self) -> Self {
        self.available_for_sale = false;
        self
    }

    /// With known stock count
    #[inline]
    #[must_use]
    pub fn with_stock(mut self, quantity: u32) -> Self {
        self.quantity_available = Some(quantity);
        self
    }
}

fn available_by_default() -> bool {
    true
}

/// Stock indicator shown next to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// Not for sale
    Unavailable,
    /// Only a few units left
    Low(u32),
    /// Plenty, or stock not tracked
    InStock,
    /// For sale while reporting zero units; no indicator is shown
    Unconfirmed,
}

/// An item that can fill a bundle slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Item id
    pub id: ItemId,
    /// Display title
    pub title: String,
    /// Representative purchasing option; absent in some storefront payloads
    #[serde(default)]
    pub option: Option<PurchaseOption>,
    /// Display price
    pub price: Money,
}

impl CatalogItem {
    /// Create item with no purchasing option and zero price
    #[must_use]
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            option: None,
            price: Money::new("0", "USD"),
        }
    }

    /// With purchasing option
    #[inline]
    #[must_use]
    pub fn with_option(mut self, option: PurchaseOption) -> Self {
        self.option = Some(option);
        self
    }

    /// With display price
    #[inline]
    #[must_use]
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    /// Option id used for cart lines; falls back to the item id
    #[must_use]
    pub fn option_id(&self) -> OptionId {
        match &self.option {
            Some(option) => option.id.clone(),
            None => OptionId::new(self.id.as_str()),
        }
    }

    /// Items without an explicit option count as available
    #[inline]
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.option.as_ref().map_or(true, |o| o.available_for_sale)
    }

    /// Stock indicator for this item
    #[must_use]
    pub fn stock_level(&self, low_threshold: u32) -> StockLevel {
        if !self.is_available() {
            return StockLevel::Unavailable;
        }
        match self.option.as_ref().and_then(|o| o.quantity_available) {
            Some(0) => StockLevel::Unconfirmed,
            Some(n) if n <= low_threshold => StockLevel::Low(n),
            _ => StockLevel::InStock,
        }
    }
}

/// Immutable snapshot of catalog items, in storefront order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Create catalog; later duplicates of an id are dropped
    #[must_use]
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id.clone());
                if !fresh {
                    tracing::warn!(item = %item.id, "duplicate catalog item dropped");
                }
                fresh
            })
            .collect();
        Self { items }
    }

    /// Decode a catalog snapshot (JSON array of items)
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Catalog`] if the JSON does not match the item
    /// shape.
    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        let items: Vec<CatalogItem> =
            serde_json::from_str(json).map_err(|e| BundleError::Catalog(e.to_string()))?;
        Ok(Self::new(items))
    }

    /// Copy of this catalog without one item (the bundle product itself)
    #[must_use]
    pub fn without(&self, id: &str) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id.as_str() != id)
                .cloned()
                .collect(),
        }
    }

    /// All items
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Items currently for sale
    pub fn available(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(|item| item.is_available())
    }

    /// Look up item by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    /// Check whether id is in the catalog
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of items
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<CatalogItem> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
