//! Progress of a bundle against its target

use crate::allocator::{compute_progress_percent, display_percent};
use crate::error::BundleError;
use crate::selection::Selection;

/// Where the selection stands relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Fewer units than the target
    Incomplete {
        /// Units still needed
        missing: u32,
    },
    /// Exactly the target
    Complete,
    /// More units than the target; checkout is blocked
    OverTarget {
        /// Units to remove
        excess: u32,
    },
}

/// Snapshot of a bundle's fill level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleStatus {
    /// Units selected
    pub total: u32,
    /// Units required
    pub target: u32,
    /// Classification of `total` against `target`
    pub progress: Progress,
}

impl BundleStatus {
    /// Classify a total against a target
    #[must_use]
    pub fn new(total: u32, target: u32) -> Self {
        let progress = match total.cmp(&target) {
            std::cmp::Ordering::Less => Progress::Incomplete {
                missing: target - total,
            },
            std::cmp::Ordering::Equal => Progress::Complete,
            std::cmp::Ordering::Greater => Progress::OverTarget {
                excess: total - target,
            },
        };
        Self {
            total,
            target,
            progress,
        }
    }

    /// Status of a selection
    #[inline]
    #[must_use]
    pub fn of(selection: &Selection, target: u32) -> Self {
        Self::new(selection.total(), target)
    }

    /// Numeric progress, may exceed 100
    #[inline]
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        compute_progress_percent(self.total, self.target)
    }

    /// Progress capped for a progress bar
    #[inline]
    #[must_use]
    pub fn display_percent(&self) -> f64 {
        display_percent(self.progress_percent())
    }

    /// Exactly at target
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.progress, Progress::Complete)
    }

    /// Above target
    #[inline]
    #[must_use]
    pub fn is_over_limit(&self) -> bool {
        matches!(self.progress, Progress::OverTarget { .. })
    }

    /// Checkout is only enabled on a complete box
    #[inline]
    #[must_use]
    pub fn can_checkout(&self) -> bool {
        self.is_complete()
    }

    /// The "+" control is enabled while below target
    #[inline]
    #[must_use]
    pub fn can_increase(&self) -> bool {
        self.total < self.target
    }

    /// Error explaining why checkout is blocked, if it is
    #[must_use]
    pub fn checkout_block(&self) -> Option<BundleError> {
        match self.progress {
            Progress::Complete => None,
            Progress::Incomplete { .. } if self.total == 0 => Some(BundleError::EmptySelection),
            Progress::Incomplete { missing } => Some(BundleError::Incomplete { missing }),
            Progress::OverTarget { excess } => Some(BundleError::OverTarget { excess }),
        }
    }

    /// Inline status text
    #[must_use]
    pub fn message(&self) -> String {
        match self.progress {
            Progress::Incomplete { missing } => format!("{missing} more to go"),
            Progress::Complete => "complete".to_string(),
            Progress::OverTarget { excess } => format!("over by {excess}"),
        }
    }

    /// Text of the checkout button
    #[must_use]
    pub fn action_label(&self) -> String {
        match self.progress {
            Progress::Incomplete { missing } => format!("Select {missing} more"),
            Progress::Complete => "Add to cart".to_string(),
            Progress::OverTarget { .. } => "Reduce your selection".to_string(),
        }
    }
}

impl std::fmt::Display for BundleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} ({})", self.total, self.target, self.message())
    }
}
