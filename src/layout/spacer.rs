//! Spacer lifecycle
//!
//! Spacers occupy the leftover space at the bottom of a page and carry the
//! forced-break hint on the element they precede. They never persist across
//! cycles: every recomputation clears them all before measuring, then the
//! overflow pass recreates whatever is needed.

use crate::surface::{NodeId, Surface};

/// Insert a spacer of exactly `height` pixels immediately before `node` and
/// tag the node with the forced-break hint.
///
/// A negative height (content already past the page bottom) renders as zero,
/// matching how a layout engine resolves a negative extent.
pub fn insert_before<S: Surface>(surface: &mut S, node: NodeId, height: f32) -> NodeId {
    let spacer = surface.insert_spacer_before(node, height.max(0.0));
    surface.mark_break_before(node);
    spacer
}

/// Remove every spacer unconditionally.
///
/// Must run before boundary recalculation so stale spacers never contribute
/// to the measured content height.
pub fn clear_all<S: Surface>(surface: &mut S) {
    for spacer in surface.spacers() {
        surface.remove_spacer(spacer);
    }
}

/// Guarantee a zero-height breakable terminates the content.
///
/// The sentinel lets the engine measure the true end of content without
/// requiring a non-empty trailing element. Appends a fresh sentinel when the
/// last child is absent, not breakable, or has non-zero rendered height;
/// otherwise a no-op.
pub fn ensure_sentinel<S: Surface>(surface: &mut S) -> NodeId {
    match surface.last_child() {
        Some(last) if surface.is_breakable(last) && surface.node_height(last) == 0.0 => last,
        _ => surface.append_sentinel(),
    }
}
