//! Bundle editing session
//!
//! Owns the catalog snapshot, the configuration and the one mutable
//! [`Selection`] of a shopper's box. UI layers call into the session and
//! re-render from [`BundleSession::status`]; nothing is global.
//!
//! Analytics events are emitted as `tracing` events under the
//! `bundle::analytics` target.

use crate::allocator::Allocator;
use crate::catalog::{Catalog, CatalogItem};
use crate::config::BundleConfig;
use crate::error::BundleError;
use crate::persistence::SelectionPersistence;
use crate::projector::{project_cart_lines, CartLineRequest};
use crate::random::RandomSource;
use crate::selection::Selection;
use crate::status::BundleStatus;
use crate::tokens::TokenSource;

const ANALYTICS: &str = "bundle::analytics";

/// One shopper's box in progress
#[derive(Debug, Clone)]
pub struct BundleSession {
    catalog: Catalog,
    config: BundleConfig,
    allocator: Allocator,
    selection: Selection,
}

impl BundleSession {
    /// Start with an empty selection
    #[must_use]
    pub fn new(catalog: Catalog, config: BundleConfig) -> Self {
        let allocator = Allocator::new().with_max_units_per_draw(config.max_units_per_draw);
        Self {
            catalog,
            config,
            allocator,
            selection: Selection::new(),
        }
    }

    /// Catalog snapshot
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Session configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    /// Current selection
    #[inline]
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current fill level
    #[inline]
    #[must_use]
    pub fn status(&self) -> BundleStatus {
        BundleStatus::of(&self.selection, self.config.target)
    }

    /// Set an item's quantity; 0 removes it
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::UnknownItem`] if the id is not in the catalog.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) -> Result<(), BundleError> {
        let item = lookup(&self.catalog, item_id)?;
        self.selection
            .set_quantity(item.id.clone(), item.option_id(), quantity);
        if quantity > 0 {
            tracing::info!(
                target: ANALYTICS,
                event = "bundle_flavor_selected",
                flavor = %item.title,
                value = quantity
            );
        }
        Ok(())
    }

    /// "+" control; returns `false` when the box is already full
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::UnknownItem`] if the id is not in the catalog.
    pub fn increment(&mut self, item_id: &str) -> Result<bool, BundleError> {
        lookup(&self.catalog, item_id)?;
        if !self.status().can_increase() {
            return Ok(false);
        }
        let next = self.selection.quantity_of(item_id) + 1;
        self.set_quantity(item_id, next)?;
        Ok(true)
    }

    /// "−" control; returns `false` when the item is not selected
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::UnknownItem`] if the id is not in the catalog.
    pub fn decrement(&mut self, item_id: &str) -> Result<bool, BundleError> {
        lookup(&self.catalog, item_id)?;
        if !self.can_decrease(item_id) {
            return Ok(false);
        }
        let next = self.selection.quantity_of(item_id) - 1;
        self.set_quantity(item_id, next)?;
        Ok(true)
    }

    /// Whether the "−" control is enabled for an item
    #[inline]
    #[must_use]
    pub fn can_decrease(&self, item_id: &str) -> bool {
        self.selection.quantity_of(item_id) > 0
    }

    /// Replace the selection with a random full box
    ///
    /// Leaves the selection untouched and returns `false` when no item is
    /// available.
    pub fn surprise_me<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        tracing::info!(target: ANALYTICS, event = "bundle_random_selection");
        let selection =
            self.allocator
                .random_allocate(self.catalog.items(), self.config.target, rng);
        if selection.is_empty() {
            return false;
        }
        self.selection = selection;
        true
    }

    /// Drop the whole selection
    #[inline]
    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Replace the selection, dropping entries for items not in the catalog
    pub fn load_selection(&mut self, mut selection: Selection) {
        let catalog = &self.catalog;
        selection.retain(|item, _| catalog.contains(item.as_str()));
        self.selection = selection;
    }

    /// Whether the "repeat last box" control should be offered
    #[must_use]
    pub fn can_load_last<P: SelectionPersistence + ?Sized>(&self, persistence: &P) -> bool {
        self.selection.is_empty() && persistence.has_saved_selection()
    }

    /// Replace the selection with the saved last box
    ///
    /// Returns `false` when nothing usable was saved.
    pub fn load_last<P: SelectionPersistence + ?Sized>(&mut self, persistence: &P) -> bool {
        tracing::info!(target: ANALYTICS, event = "bundle_load_last_box");
        if !persistence.has_saved_selection() {
            return false;
        }
        let restored = persistence.restore(&self.catalog);
        self.load_selection(restored);
        !self.selection.is_empty()
    }

    /// Save the current selection if it is non-empty
    pub fn persist<P: SelectionPersistence + ?Sized>(&self, persistence: &mut P) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        persistence.save(&self.selection)
    }

    /// `"Title (qty), ..."` in selection order
    #[must_use]
    pub fn combination_summary(&self) -> String {
        self.selection
            .iter()
            .filter_map(|(id, entry)| {
                self.catalog
                    .get(id.as_str())
                    .map(|item| format!("{} ({})", item.title, entry.quantity))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Cart lines for the finished box
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::EmptySelection`], [`BundleError::Incomplete`] or
    /// [`BundleError::OverTarget`] unless the box is exactly full.
    pub fn checkout<T: TokenSource + ?Sized>(
        &self,
        tokens: &mut T,
    ) -> Result<Vec<CartLineRequest>, BundleError> {
        let status = self.status();
        if let Some(block) = status.checkout_block() {
            tracing::debug!(%status, "checkout blocked");
            return Err(block);
        }

        let lines = project_cart_lines(&self.selection, &self.config.label, tokens);
        tracing::info!(
            target: ANALYTICS,
            event = "bundle_completed",
            label = %self.config.label,
            lines = lines.len()
        );
        tracing::info!(
            target: ANALYTICS,
            event = "bundle_combination",
            combination = %self.combination_summary()
        );
        Ok(lines)
    }
}

fn lookup<'a>(catalog: &'a Catalog, item_id: &str) -> Result<&'a CatalogItem, BundleError> {
    catalog
        .get(item_id)
        .ok_or_else(|| BundleError::UnknownItem(item_id.to_string()))
}
