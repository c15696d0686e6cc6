//! Regrouping cart lines into bundles
//!
//! The cart view reads back the tags written by the projector: lines sharing
//! a grouping token form one bundle, untagged lines stay regular.

use crate::projector::{CartLineRequest, BUNDLE_ID_KEY, BUNDLE_LABEL_KEY};
use indexmap::IndexMap;

/// Label used when a bundle line carries no label tag
pub const FALLBACK_BUNDLE_LABEL: &str = "Bundle";

/// Read access to a cart line's tags and quantity
pub trait TaggedLine {
    /// Value of an attribute by key
    fn attribute(&self, key: &str) -> Option<&str>;

    /// Units on the line
    fn quantity(&self) -> u32;
}

impl TaggedLine for CartLineRequest {
    fn attribute(&self, key: &str) -> Option<&str> {
        CartLineRequest::attribute(self, key)
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Lines of one checkout action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleGroup<L> {
    /// Shared grouping token
    pub token: String,
    /// Label of the first line in the group
    pub label: String,
    /// Member lines in cart order
    pub lines: Vec<L>,
}

impl<L: TaggedLine> BundleGroup<L> {
    /// Units across the group
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(TaggedLine::quantity).sum()
    }
}

/// Cart lines split into bundles and regular lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartGrouping<L> {
    /// Bundles in first-seen order
    pub bundles: Vec<BundleGroup<L>>,
    /// Lines without a grouping token
    pub regular: Vec<L>,
}

/// Group lines by their grouping token
pub fn group_cart_lines<L: TaggedLine + Clone>(lines: &[L]) -> CartGrouping<L> {
    let mut bundles: IndexMap<String, BundleGroup<L>> = IndexMap::new();
    let mut regular = Vec::new();

    for line in lines {
        let Some(token) = line.attribute(BUNDLE_ID_KEY) else {
            regular.push(line.clone());
            continue;
        };
        bundles
            .entry(token.to_string())
            .or_insert_with(|| BundleGroup {
                token: token.to_string(),
                label: line
                    .attribute(BUNDLE_LABEL_KEY)
                    .unwrap_or(FALLBACK_BUNDLE_LABEL)
                    .to_string(),
                lines: Vec::new(),
            })
            .lines
            .push(line.clone());
    }

    CartGrouping {
        bundles: bundles.into_values().collect(),
        regular,
    }
}
