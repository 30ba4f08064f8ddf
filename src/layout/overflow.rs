//! Overflow resolution
//!
//! The central pass: walk breakable elements in document order against the
//! page boundaries, decide which overflow their current page, and insert
//! spacers that push them whole onto the next page. Elements are visited
//! exactly once and the page cursor never moves backwards.

use crate::layout::geometry::PageBoundary;
use crate::layout::spacer;
use crate::surface::{NodeId, Surface};

/// Walk `breakables` against `boundaries`, inserting spacers where elements
/// would straddle a page bottom. Returns the final page cursor.
///
/// For each element, measured live: first the cursor advances past pages the
/// element already starts beyond (catching drift without overflow), then the
/// element overflows when its bottom edge passes the current page's content
/// bottom. The spacer height is the exact leftover room on that page, so the
/// element lands at the boundary the cursor advance rule recognizes as the
/// next page.
///
/// An element taller than a page is pushed once, never split and never
/// re-checked against its new page; whatever still overflows stays where it
/// lands. When content runs past the last computed page the cursor is clamped
/// for boundary lookup, keeping the pass total instead of reading past the
/// end of the list.
pub fn resolve<S: Surface>(
    surface: &mut S,
    breakables: &[NodeId],
    boundaries: &[PageBoundary],
) -> usize {
    let mut current_page = 0usize;
    let Some(last_page) = boundaries.len().checked_sub(1) else {
        return current_page;
    };

    for &element in breakables {
        let top = surface.node_top(element);
        let height = surface.node_height(element);

        while current_page < last_page && top >= boundaries[current_page].bottom {
            current_page += 1;
        }

        let page_bottom = boundaries[current_page.min(last_page)].bottom;
        if top + height > page_bottom {
            let space_needed = page_bottom - top;
            spacer::insert_before(surface, element, space_needed);
            current_page += 1;
        }
    }

    current_page
}
