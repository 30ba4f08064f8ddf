//! The rendering-surface seam
//!
//! The engine never touches a concrete document tree. It measures and mutates
//! through [`Surface`], a total-order view over content nodes: any tree with a
//! stable in-order traversal position per node satisfies the contract. Two
//! implementations ship: [`MemorySurface`] for headless use (tests, benches,
//! native simulation) and the WASM bridge's host-backed surface.

mod memory;

pub use memory::MemorySurface;

use std::fmt;

/// Opaque handle to a content node owned by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Structural zones the paginator requires inside its container.
///
/// Exactly one of each must exist or initialization fails: the paper layer
/// holds the page-card pool, the ink layer holds the flowing content, and the
/// console layer is reserved for operator diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Paper,
    Ink,
    Console,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Paper, Zone::Ink, Zone::Console];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Paper => "paper",
            Zone::Ink => "ink",
            Zone::Console => "console",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live measurement and mutation interface over the content container.
///
/// Measurements are ground truth: the engine reads them at query time, every
/// cycle, and caches nothing across cycles except the computed boundary list.
/// The engine is the sole writer of spacer and page-card nodes; everything
/// else in the tree may be mutated by others between cycles.
pub trait Surface {
    /// Number of structural zones of the given kind inside the container.
    fn zone_count(&self, zone: Zone) -> usize;

    /// Total measured extent of the flowing content, in pixels.
    fn content_height(&self) -> f32;

    /// Pixels per one unit of the given token, measured live. `NaN` when the
    /// unit cannot be realized.
    fn unit_px(&self, unit: &str) -> f32;

    /// Nodes matching the breakable criterion, order unspecified.
    fn query_breakables(&self, selector: &str) -> Vec<NodeId>;

    /// Top offset of a node relative to the content container's origin.
    fn node_top(&self, node: NodeId) -> f32;

    /// Rendered height of a node.
    fn node_height(&self, node: NodeId) -> f32;

    /// Total-order key by in-order traversal position. No two live nodes may
    /// report the same position.
    fn document_position(&self, node: NodeId) -> u64;

    /// Last content child of the container, if any.
    fn last_child(&self) -> Option<NodeId>;

    /// Node immediately following the given one in document order.
    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Whether the node matches the breakable criterion.
    fn is_breakable(&self, node: NodeId) -> bool;

    /// Every engine-owned spacer currently in the tree, in document order.
    fn spacers(&self) -> Vec<NodeId>;

    /// Create a spacer of the given height immediately before `node`.
    fn insert_spacer_before(&mut self, node: NodeId, height: f32) -> NodeId;

    /// Remove one spacer node.
    fn remove_spacer(&mut self, node: NodeId);

    /// Tag a node with the forced-break rendering hint (consumed at print
    /// or paint time).
    fn mark_break_before(&mut self, node: NodeId);

    /// Append a zero-height, overflow-suppressed breakable as the last child.
    fn append_sentinel(&mut self) -> NodeId;

    /// Current size of the page-card pool.
    fn page_card_count(&self) -> usize;

    /// Append one page card to the pool.
    fn push_page_card(&mut self);

    /// Discard the last page card from the pool.
    fn pop_page_card(&mut self);
}
