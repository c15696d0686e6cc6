//! Testing utilities for the bundle workspace
//!
//! Shared catalog fixtures and a scripted random source.

#![allow(missing_docs)]

use bundle_core::{Catalog, CatalogItem, Money, PurchaseOption, RandomSource, Selection};
use std::collections::VecDeque;

pub fn flavor(id: &str, title: &str) -> CatalogItem {
    CatalogItem::new(id, title)
        .with_option(PurchaseOption::new(format!("{id}-v1")))
        .with_price(Money::new("1290", "CLP"))
}

pub fn sold_out_flavor(id: &str, title: &str) -> CatalogItem {
    CatalogItem::new(id, title)
        .with_option(PurchaseOption::new(format!("{id}-v1")).sold_out())
        .with_price(Money::new("1290", "CLP"))
}

/// Six flavors, one of them sold out
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        flavor("classic", "Classic Beef"),
        flavor("merken", "Merken Power"),
        flavor("teriyaki", "Teriyaki"),
        sold_out_flavor("habanero", "Habanero"),
        flavor("pepper", "Black Pepper"),
        flavor("smoky", "Smoky BBQ"),
    ])
}

/// `count` available flavors named `f0`, `f1`, ...
pub fn catalog_of(count: usize) -> Catalog {
    (0..count)
        .map(|i| flavor(&format!("f{i}"), &format!("Flavor {i}")))
        .collect()
}

/// Selection using each flavor's `-v1` option
pub fn selection_of(quantities: &[(&str, u32)]) -> Selection {
    let mut selection = Selection::new();
    for (id, quantity) in quantities {
        selection.set_quantity(*id, format!("{id}-v1"), *quantity);
    }
    selection
}

/// Replays fixed draws, then returns 0 forever
///
/// Panics when a scripted draw does not fit the requested bound, so a test
/// with a wrong script fails loudly instead of allocating something else.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<usize>,
    consumed: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn is_exhausted(&self) -> bool {
        self.draws.is_empty()
    }
}

impl RandomSource for ScriptedSource {
    fn below(&mut self, upper: usize) -> usize {
        self.consumed += 1;
        let Some(draw) = self.draws.pop_front() else {
            return 0;
        };
        assert!(
            draw < upper.max(1),
            "scripted draw #{} = {draw} out of range 0..{upper}",
            self.consumed
        );
        draw
    }
}
