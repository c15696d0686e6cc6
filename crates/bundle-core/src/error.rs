//! Error types for bundle-core
//!
//! Provides error handling for:
//! - Checkout attempts on bundles that are not ready
//! - Mutations referencing items outside the catalog
//! - Catalog snapshot decoding
//! - Configuration loading and validation

use std::path::PathBuf;

/// Main bundle error type
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// Checkout attempted before the box is full
    #[error("bundle incomplete: {missing} more units required")]
    Incomplete {
        /// Units still missing to reach the target
        missing: u32,
    },

    /// Checkout attempted while the box holds too many units
    #[error("bundle over target by {excess} units")]
    OverTarget {
        /// Units above the target
        excess: u32,
    },

    /// Nothing selected
    #[error("selection is empty")]
    EmptySelection,

    /// Item id is not part of the current catalog
    #[error("unknown catalog item: {0}")]
    UnknownItem(String),

    /// Catalog snapshot could not be decoded
    #[error("catalog error: {0}")]
    Catalog(String),
}

impl BundleError {
    /// Check if the error only blocks checkout (the session itself is fine)
    #[inline]
    #[must_use]
    pub fn is_checkout_block(&self) -> bool {
        matches!(
            self,
            Self::Incomplete { .. } | Self::OverTarget { .. } | Self::EmptySelection
        )
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Path of the config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML could not be parsed
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but are not usable
    #[error("invalid config value: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_error_display() {
        let err = BundleError::OverTarget { excess: 1 };
        assert_eq!(err.to_string(), "bundle over target by 1 units");

        let err = BundleError::UnknownItem("beef-01".to_string());
        assert!(err.to_string().contains("beef-01"));
    }

    #[test]
    fn checkout_block_classification() {
        assert!(BundleError::Incomplete { missing: 2 }.is_checkout_block());
        assert!(BundleError::EmptySelection.is_checkout_block());
        assert!(!BundleError::UnknownItem("x".to_string()).is_checkout_block());
    }

    #[test]
    fn config_io_error_names_path() {
        let err = ConfigError::io_error(
            "/etc/bundle.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/etc/bundle.toml"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
