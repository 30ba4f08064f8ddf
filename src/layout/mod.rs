//! Pagination passes over the rendering surface

pub mod breakables;
pub mod drift;
pub mod geometry;
pub mod overflow;
pub mod spacer;

pub use geometry::{page_boundaries, Boundaries, PageBoundary, ResolvedGeometry};
