//! Bundle configuration
//!
//! One immutable [`BundleConfig`] per session. Loaded from TOML or built in
//! code with the `with_*` helpers.

use crate::allocator::DEFAULT_MAX_UNITS_PER_DRAW;
use crate::catalog::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of units in a box
pub const DEFAULT_TARGET: u32 = 7;

/// Default store key for the last completed box
pub const DEFAULT_STORAGE_KEY: &str = "last_box";

/// Bundle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Required total quantity across all selected items
    pub target: u32,
    /// Human-readable label attached to every cart line
    pub label: String,
    /// Key under which the last box is saved
    pub storage_key: String,
    /// Per-item upper bound for a single random draw
    pub max_units_per_draw: u32,
    /// Stock at or below this count is reported as low
    pub low_stock_threshold: u32,
}

impl BundleConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With bundle target; the label follows unless set explicitly afterwards
    #[inline]
    #[must_use]
    pub fn with_target(mut self, target: u32) -> Self {
        self.target = target;
        self.label = default_label(target);
        self
    }

    /// With bundle label
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// With storage key
    #[inline]
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// With per-draw cap for random allocation
    #[inline]
    #[must_use]
    pub fn with_max_units_per_draw(mut self, max: u32) -> Self {
        self.max_units_per_draw = max;
        self
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on bad syntax and
    /// [`ConfigError::Invalid`] when a value fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`BundleConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Check that every value is usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target == 0 {
            return Err(ConfigError::Invalid("target must be at least 1".to_string()));
        }
        if self.label.trim().is_empty() {
            return Err(ConfigError::Invalid("label must not be empty".to_string()));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".to_string()));
        }
        if self.max_units_per_draw == 0 {
            return Err(ConfigError::Invalid(
                "max_units_per_draw must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            label: default_label(DEFAULT_TARGET),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_units_per_draw: DEFAULT_MAX_UNITS_PER_DRAW,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

fn default_label(target: u32) -> String {
    format!("Box of {target}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BundleConfig::new();
        assert_eq!(config.target, 7);
        assert_eq!(config.label, "Box of 7");
        assert_eq!(config.storage_key, "last_box");
        assert_eq!(config.max_units_per_draw, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn with_target_relabels() {
        let config = BundleConfig::new().with_target(12);
        assert_eq!(config.label, "Box of 12");

        let config = BundleConfig::new().with_target(12).with_label("Dozen");
        assert_eq!(config.label, "Dozen");
    }

    #[test]
    fn toml_partial_override() {
        let config = BundleConfig::from_toml_str("target = 5\nlabel = \"Box of 5\"").unwrap();
        assert_eq!(config.target, 5);
        assert_eq!(config.label, "Box of 5");
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn toml_rejects_zero_target() {
        let err = BundleConfig::from_toml_str("target = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn toml_rejects_bad_syntax() {
        let err = BundleConfig::from_toml_str("target = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validate_rejects_empty_key() {
        let config = BundleConfig::new().with_storage_key("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_missing_file() {
        let err = BundleConfig::load("/nonexistent/bundle.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
