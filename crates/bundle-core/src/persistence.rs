//! Seam for best-effort saving of the last box
//!
//! Implemented by `bundle-store`. Nothing here may fail the session: a save
//! reports success as a flag, a restore degrades to an empty selection.

use crate::catalog::Catalog;
use crate::selection::Selection;

/// Best-effort save/restore of the last selection
pub trait SelectionPersistence {
    /// Save a non-empty selection; `false` when skipped or failed
    fn save(&mut self, selection: &Selection) -> bool;

    /// Restore the saved selection, validated against `catalog`
    fn restore(&self, catalog: &Catalog) -> Selection;

    /// Whether anything is saved, regardless of its validity
    fn has_saved_selection(&self) -> bool;
}

impl<T: SelectionPersistence + ?Sized> SelectionPersistence for &mut T {
    fn save(&mut self, selection: &Selection) -> bool {
        (**self).save(selection)
    }

    fn restore(&self, catalog: &Catalog) -> Selection {
        (**self).restore(catalog)
    }

    fn has_saved_selection(&self) -> bool {
        (**self).has_saved_selection()
    }
}
