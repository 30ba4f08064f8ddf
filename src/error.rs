//! Fatal setup errors

use crate::surface::Zone;
use thiserror::Error;

/// Errors that abort paginator construction.
///
/// These are non-recoverable: no partial engine is created and nothing is
/// retried. Everything that can go wrong after construction is either logged
/// and dropped (re-entrant recompute) or propagated arithmetically (see
/// `layout::geometry`).
#[derive(Debug, Error)]
pub enum PaginatorError {
    /// A required structural zone is missing or duplicated.
    #[error("expected exactly one {zone} layer, found {count}")]
    Zone { zone: Zone, count: usize },

    /// A configured page length could not be resolved to pixels.
    #[error("cannot resolve length {value:?} for {field}")]
    UnparseableLength { field: &'static str, value: String },

    /// The options document was not valid JSON.
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
