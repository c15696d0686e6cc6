//! Cart line projection
//!
//! Turns a finished [`Selection`] into the line requests handed to the
//! external cart. Every line carries the bundle label and a grouping token
//! shared by all lines of the same call.

use crate::catalog::OptionId;
use crate::selection::Selection;
use crate::tokens::TokenSource;
use serde::{Deserialize, Serialize};

/// Attribute key holding the bundle label
pub const BUNDLE_LABEL_KEY: &str = "_bundle";

/// Attribute key holding the grouping token
pub const BUNDLE_ID_KEY: &str = "_bundle_id";

/// Key/value tag on a cart line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAttribute {
    /// Attribute key
    pub key: String,
    /// Attribute value
    pub value: String,
}

impl LineAttribute {
    /// Create attribute
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One "add lines to cart" entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    /// Purchasing option to add
    #[serde(rename = "merchandiseId")]
    pub purchasing_option_id: OptionId,
    /// Units to add
    pub quantity: u32,
    /// Bundle label and grouping token
    pub attributes: Vec<LineAttribute>,
}

impl CartLineRequest {
    /// Value of an attribute by key
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Bundle label tag
    #[inline]
    #[must_use]
    pub fn bundle_label(&self) -> Option<&str> {
        self.attribute(BUNDLE_LABEL_KEY)
    }

    /// Grouping token tag
    #[inline]
    #[must_use]
    pub fn bundle_token(&self) -> Option<&str> {
        self.attribute(BUNDLE_ID_KEY)
    }
}

/// Project selection entries into tagged cart lines
///
/// One token is drawn per call (none for an empty selection).
pub fn project_cart_lines<T: TokenSource + ?Sized>(
    selection: &Selection,
    bundle_label: &str,
    tokens: &mut T,
) -> Vec<CartLineRequest> {
    if selection.is_empty() {
        return Vec::new();
    }
    let token = tokens.next_token();

    selection
        .iter()
        .filter(|(_, entry)| entry.quantity > 0)
        .map(|(_, entry)| CartLineRequest {
            purchasing_option_id: entry.option_id.clone(),
            quantity: entry.quantity,
            attributes: vec![
                LineAttribute::new(BUNDLE_LABEL_KEY, bundle_label),
                LineAttribute::new(BUNDLE_ID_KEY, token.as_str()),
            ],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::CounterTokens;
    use pretty_assertions::assert_eq;

    fn two_flavors() -> Selection {
        let mut selection = Selection::new();
        selection.set_quantity("A", "v1", 2);
        selection.set_quantity("B", "v2", 5);
        selection
    }

    #[test]
    fn lines_share_one_token() {
        let mut tokens = CounterTokens::new();
        let lines = project_cart_lines(&two_flavors(), "Box of 7", &mut tokens);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].purchasing_option_id.as_str(), "v1");
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[1].purchasing_option_id.as_str(), "v2");
        assert_eq!(lines[1].quantity, 5);
        assert_eq!(lines[0].bundle_token(), lines[1].bundle_token());
        assert_eq!(lines[0].bundle_token(), Some("bundle-1"));
        assert_eq!(lines[1].bundle_label(), Some("Box of 7"));
    }

    #[test]
    fn each_call_gets_new_token() {
        let mut tokens = CounterTokens::new();
        let first = project_cart_lines(&two_flavors(), "Box of 7", &mut tokens);
        let second = project_cart_lines(&two_flavors(), "Box of 7", &mut tokens);
        assert_ne!(first[0].bundle_token(), second[0].bundle_token());
    }

    #[test]
    fn empty_selection_draws_no_token() {
        let mut tokens = CounterTokens::new();
        assert!(project_cart_lines(&Selection::new(), "Box of 7", &mut tokens).is_empty());
        assert_eq!(tokens.next_token().as_str(), "bundle-1");
    }

    #[test]
    fn serializes_for_cart_api() {
        let mut selection = Selection::new();
        selection.set_quantity("A", "v1", 1);
        let lines = project_cart_lines(&selection, "Box of 7", &mut CounterTokens::new());
        let json = serde_json::to_value(&lines[0]).unwrap();
        assert_eq!(json["merchandiseId"], "v1");
        assert_eq!(json["attributes"][0]["key"], "_bundle");
        assert_eq!(json["attributes"][1]["value"], "bundle-1");
    }
}
