//! Bundle Store
//!
//! Best-effort persistence of the last completed box:
//! - [`KeyValueStore`]: string key-value storage that may refuse writes
//! - [`MemoryStore`]: in-memory store with quota and on/off switch
//! - [`FileStore`]: one JSON file per key under a directory
//! - [`SelectionArchive`]: save/restore of a selection under a fixed key
//!
//! # Example
//!
//! ```rust,ignore
//! use bundle_core::SelectionPersistence;
//! use bundle_store::{FileStore, SelectionArchive};
//!
//! let mut archive = SelectionArchive::new(FileStore::new(".bundle"));
//! archive.save(session.selection());
//!
//! let restored = archive.restore(session.catalog());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod archive;
mod error;
mod file;
mod store;

// Re-exports
pub use archive::SelectionArchive;
pub use error::StoreError;
pub use file::FileStore;
pub use store::{KeyValueStore, MemoryStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
