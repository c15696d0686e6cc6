//! Bundle allocator
//!
//! Pure functions over [`Selection`]:
//! - totals and progress against a target
//! - randomized "surprise me" allocation
//! - validation of a previously saved selection against the current catalog

use crate::catalog::{Catalog, CatalogItem, ItemId};
use crate::random::{shuffle, RandomSource};
use crate::selection::Selection;
use serde_json::Value;

/// Default upper bound for a single item's draw in the first pass
pub const DEFAULT_MAX_UNITS_PER_DRAW: u32 = 3;

/// Sum of all quantities in a selection
#[inline]
#[must_use]
pub fn compute_total(selection: &Selection) -> u32 {
    selection.total()
}

/// `100 * total / target`, unbounded above 100
///
/// A zero target counts as complete (100).
#[must_use]
pub fn compute_progress_percent(total: u32, target: u32) -> f64 {
    if target == 0 {
        return 100.0;
    }
    f64::from(total) * 100.0 / f64::from(target)
}

/// Progress clamped to `[0, 100]` for progress bars
#[inline]
#[must_use]
pub fn display_percent(progress: f64) -> f64 {
    progress.clamp(0.0, 100.0)
}

/// Random allocation with the default per-draw cap
pub fn random_allocate<R: RandomSource + ?Sized>(
    items: &[CatalogItem],
    target: u32,
    rng: &mut R,
) -> Selection {
    Allocator::new().random_allocate(items, target, rng)
}

/// Randomized allocation across available items
#[derive(Debug, Clone, Copy)]
pub struct Allocator {
    max_units_per_draw: u32,
}

impl Allocator {
    /// Create allocator with the default per-draw cap
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With per-draw cap (at least 1)
    #[inline]
    #[must_use]
    pub fn with_max_units_per_draw(mut self, max: u32) -> Self {
        self.max_units_per_draw = max.max(1);
        self
    }

    /// Produce a fresh selection summing to exactly `target`
    ///
    /// Only available items are considered; with none available the result
    /// is empty. The first pass walks a shuffled copy once and draws
    /// `[0, min(cap, remaining + 1))` units per item; whatever is left is then
    /// handed out one unit at a time to uniformly chosen items.
    pub fn random_allocate<R: RandomSource + ?Sized>(
        &self,
        items: &[CatalogItem],
        target: u32,
        rng: &mut R,
    ) -> Selection {
        let mut pool: Vec<&CatalogItem> = items.iter().filter(|i| i.is_available()).collect();
        let mut selection = Selection::new();
        if pool.is_empty() {
            tracing::debug!(target, "no available items, nothing allocated");
            return selection;
        }

        shuffle(&mut pool, rng);

        let mut remaining = target;
        for item in &pool {
            if remaining == 0 {
                break;
            }
            let upper = self.max_units_per_draw.min(remaining.saturating_add(1));
            let drawn = draw(rng, upper);
            if drawn > 0 {
                selection.set_quantity(item.id.clone(), item.option_id(), drawn);
                remaining -= drawn;
            }
        }

        let first_pass = target - remaining;
        while remaining > 0 {
            let item = pool[rng.below(pool.len())];
            selection.increment(&item.id, &item.option_id());
            remaining -= 1;
        }

        tracing::debug!(
            target,
            first_pass,
            items = selection.len(),
            "random allocation complete"
        );
        selection
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self {
            max_units_per_draw: DEFAULT_MAX_UNITS_PER_DRAW,
        }
    }
}

fn draw<R: RandomSource + ?Sized>(rng: &mut R, upper: u32) -> u32 {
    let upper = usize::try_from(upper).unwrap_or(usize::MAX);
    u32::try_from(rng.below(upper)).unwrap_or(0)
}

/// Filter a raw saved selection down to entries usable with `catalog`
///
/// An entry survives when its item is in the catalog, its `variantId` is a
/// non-empty string and its `quantity` is a finite, non-negative whole
/// number. Zero quantities are dropped as well since a selection never
/// stores them. Anything that is not a JSON object yields an empty
/// selection.
#[must_use]
pub fn validate_restored_selection(raw: &Value, catalog: &Catalog) -> Selection {
    let mut selection = Selection::new();
    let Some(object) = raw.as_object() else {
        tracing::debug!("saved selection is not an object, ignoring");
        return selection;
    };

    for (item_id, data) in object {
        if !catalog.contains(item_id) {
            tracing::debug!(item = %item_id, "dropping saved entry for unknown item");
            continue;
        }
        let option = data
            .get("variantId")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        let quantity = data.get("quantity").and_then(whole_quantity);
        match (option, quantity) {
            (Some(option), Some(quantity)) => {
                selection.set_quantity(ItemId::new(item_id.as_str()), option, quantity);
            }
            _ => tracing::debug!(item = %item_id, "dropping malformed saved entry"),
        }
    }
    selection
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_quantity(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
        return Some(f as u32);
    }
    None
}
