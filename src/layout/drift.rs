//! Post-scroll drift validation
//!
//! Scroll-driven layout shifts (lazy images, late font loads) can move
//! content without changing its total height, leaving spacers sized for a
//! layout that no longer exists. After scroll settles, this check compares
//! each spacer-adjacent element against the page top it was pushed to; any
//! excess beyond the configured threshold demands a full recompute.

use crate::layout::geometry::{PageBoundary, ResolvedGeometry};
use crate::surface::Surface;

/// Check every spacer's following element against its ideal page-top.
///
/// The ideal top is the content-area top of the last page starting at or
/// above the element's measured position, derived from the same arithmetic
/// that produced `boundaries`. Scanning stops at the first element off by
/// more than `threshold` pixels; the verdict is the same either way and a
/// recompute rebuilds everything.
pub fn validate<S: Surface>(
    surface: &S,
    geometry: &ResolvedGeometry,
    boundaries: &[PageBoundary],
    threshold: f32,
) -> bool {
    for spacer in surface.spacers() {
        let Some(element) = surface.next_sibling(spacer) else {
            continue;
        };
        if !surface.is_breakable(element) {
            continue;
        }

        let top = surface.node_top(element);
        let mut ideal_top = geometry.content_top(0);
        for page in 0..boundaries.len() {
            let content_top = geometry.content_top(page);
            if top >= content_top {
                ideal_top = content_top;
            } else {
                break;
            }
        }

        if (top - ideal_top).abs() > threshold {
            return true;
        }
    }

    false
}
