//! Page boundary calculation and page-card reconciliation

use crate::surface::Surface;
use serde::Serialize;
use smallvec::SmallVec;

/// One page's usable content extent, in content-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageBoundary {
    pub top: f32,
    pub bottom: f32,
}

/// Page geometry with every length resolved to pixels, once per cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub page_inset: f32,
    pub page_gap: f32,
}

impl ResolvedGeometry {
    /// Content height available per page. Degenerate geometry (inset
    /// consuming the whole page) clamps to zero rather than going negative.
    pub fn usable_height(&self) -> f32 {
        (self.page_height - 2.0 * self.page_inset).max(0.0)
    }

    /// Vertical distance between the same point on consecutive pages.
    pub fn page_stride(&self) -> f32 {
        self.page_height + self.page_gap
    }

    /// Content-area top of page `index`, in content-local coordinates.
    pub fn content_top(&self, index: usize) -> f32 {
        index as f32 * self.page_stride() + self.page_inset
    }

    /// False when any length failed to resolve (NaN propagation from unit
    /// conversion means no pagination is possible this cycle).
    pub fn is_finite(&self) -> bool {
        self.page_width.is_finite()
            && self.page_height.is_finite()
            && self.page_inset.is_finite()
            && self.page_gap.is_finite()
    }
}

pub type Boundaries = SmallVec<[PageBoundary; 8]>;

/// Derive the page count and each page's content boundaries from the measured
/// content height.
///
/// Content no taller than one page yields exactly one page. Otherwise the
/// count is the smallest number of pages whose combined capacity (plus the
/// inter-page gaps) covers the content past the first page's top inset.
/// Degenerate geometry yields a single page of zero usable height.
pub fn page_boundaries(ink_height: f32, geometry: &ResolvedGeometry) -> Boundaries {
    let usable = geometry.usable_height();

    let mut total_pages = 1usize;
    if usable > 0.0 && ink_height > usable {
        let effective = ink_height - geometry.page_inset;
        total_pages = (effective / (usable + geometry.page_gap)).ceil() as usize;
        if total_pages == 0 && ink_height > 0.0 {
            total_pages = 1;
        }
    }

    (0..total_pages)
        .map(|index| {
            let page_y = index as f32 * geometry.page_stride();
            let top = page_y + geometry.page_inset;
            let bottom = (page_y + geometry.page_height - geometry.page_inset).max(top);
            PageBoundary { top, bottom }
        })
        .collect()
}

/// Reconcile the paper layer's card pool to exactly `total` cards.
///
/// Order preserving: surviving cards are untouched, missing ones are appended,
/// excess ones are discarded from the end.
pub fn reconcile_page_cards<S: Surface>(surface: &mut S, total: usize) {
    while surface.page_card_count() > total {
        surface.pop_page_card();
    }
    while surface.page_card_count() < total {
        surface.push_page_card();
    }
}
