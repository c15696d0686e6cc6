//! Bundle Core
//!
//! Logic for fixed-size "build your own box" bundles:
//! - Selection state with positive-quantity entries
//! - Totals, progress and random "surprise me" allocation
//! - Validation of a saved selection against the current catalog
//! - Projection into tagged cart lines, and regrouping of those lines
//!
//! # Example
//!
//! ```rust,ignore
//! use bundle_core::{BundleConfig, BundleSession, Catalog, RngSource, UuidTokens};
//!
//! let catalog = Catalog::from_json(&snapshot)?;
//! let mut session = BundleSession::new(catalog, BundleConfig::new());
//!
//! session.surprise_me(&mut RngSource::thread());
//! assert!(session.status().is_complete());
//!
//! let lines = session.checkout(&mut UuidTokens)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod allocator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grouping;
pub mod persistence;
pub mod projector;
pub mod random;
pub mod selection;
pub mod session;
pub mod status;
pub mod tokens;

// Re-exports
pub use allocator::{
    compute_progress_percent, compute_total, display_percent, random_allocate,
    validate_restored_selection, Allocator,
};
pub use catalog::{Catalog, CatalogItem, ItemId, Money, OptionId, PurchaseOption, StockLevel};
pub use config::BundleConfig;
pub use error::{BundleError, ConfigError};
pub use grouping::{group_cart_lines, BundleGroup, CartGrouping, TaggedLine};
pub use persistence::SelectionPersistence;
pub use projector::{project_cart_lines, CartLineRequest, LineAttribute};
pub use random::{RandomSource, RngSource};
pub use selection::{Selection, SelectionEntry};
pub use session::BundleSession;
pub use status::{BundleStatus, Progress};
pub use tokens::{BundleToken, CounterTokens, TimestampTokens, TokenSource, UuidTokens};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
