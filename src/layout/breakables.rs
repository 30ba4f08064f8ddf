//! Breakable element collection

use crate::layout::spacer;
use crate::surface::{NodeId, Surface};
use smallvec::SmallVec;

pub type BreakableList = SmallVec<[NodeId; 16]>;

/// Gather every element eligible to be pushed across a page break, in strict
/// document order, ending with the zero-height sentinel.
///
/// The sentinel is created on demand; when the selector does not match it
/// (first cycle after creation), it is appended explicitly so the walk always
/// reaches the true end of content.
pub fn collect<S: Surface>(surface: &mut S, selector: &str) -> BreakableList {
    let mut breakables: BreakableList = surface.query_breakables(selector).into();

    spacer::ensure_sentinel(surface);
    if let Some(last) = surface.last_child() {
        if !breakables.contains(&last) {
            breakables.push(last);
        }
    }

    breakables.sort_by_key(|&node| surface.document_position(node));
    // Equal positions would mean two handles to one tree slot: a caller bug.
    debug_assert!(breakables
        .windows(2)
        .all(|w| surface.document_position(w[0]) < surface.document_position(w[1])));

    breakables
}
