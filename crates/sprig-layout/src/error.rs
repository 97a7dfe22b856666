//! Layout error types.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors raised while configuring or running layout.
///
/// The two buffer errors never abort a pass. The engine records the first
/// one on the [`LayoutResult`](crate::LayoutResult) and returns every box
/// emitted before it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The configured box limit was hit.
    #[error("box limit reached after {emitted} boxes (limit {limit})")]
    BoxLimitReached {
        /// Boxes emitted before the limit was hit.
        emitted: usize,
        /// The configured limit.
        limit: usize,
    },

    /// Growing the box buffer failed.
    #[error("could not grow box buffer past {emitted} boxes")]
    AllocationFailed {
        /// Boxes emitted before growth failed.
        emitted: usize,
        /// The allocator's error.
        #[source]
        source: TryReserveError,
    },

    /// A configuration value is out of range.
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),
}

impl LayoutError {
    /// True for errors that cut a pass short rather than preventing it.
    #[must_use]
    pub const fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::BoxLimitReached { .. } | Self::AllocationFailed { .. }
        )
    }
}
