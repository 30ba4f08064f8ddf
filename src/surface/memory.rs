//! Headless in-memory surface

use crate::surface::{NodeId, Surface, Zone};
use rustc_hash::FxHashMap;

/// Role of a block within the vertical stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockRole {
    Content,
    Breakable,
    Spacer,
    Sentinel,
}

#[derive(Debug, Clone)]
struct Block {
    id: NodeId,
    role: BlockRole,
    height: f32,
    break_before: bool,
}

/// An in-memory rendering surface: a single column of vertically stacked
/// blocks. Inserting or removing a block reflows everything after it, so
/// measured tops always reflect the current tree, the same way a live layout
/// engine reflows after a mutation.
///
/// The breakable criterion is modelled as a flag per block; the selector
/// string is accepted for interface parity and matches flagged blocks.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    blocks: Vec<Block>,
    /// Offset of the first block from the container origin (the content
    /// area's top inset in a real layout).
    origin: f32,
    next_id: u64,
    page_cards: usize,
    units: FxHashMap<String, f32>,
    zones: FxHashMap<Zone, usize>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        let mut units = FxHashMap::default();
        units.insert("px".to_string(), 1.0);
        units.insert("in".to_string(), 96.0);
        units.insert("pt".to_string(), 96.0 / 72.0);
        units.insert("cm".to_string(), 96.0 / 2.54);

        let mut zones = FxHashMap::default();
        for zone in Zone::ALL {
            zones.insert(zone, 1);
        }

        Self {
            blocks: Vec::new(),
            origin: 0.0,
            next_id: 0,
            page_cards: 0,
            units,
            zones,
        }
    }

    /// Set the offset of the first block from the container origin.
    pub fn with_origin(mut self, origin: f32) -> Self {
        self.origin = origin;
        self
    }

    /// Override how many pixels one unit of a token measures.
    pub fn set_unit(&mut self, unit: &str, px: f32) {
        self.units.insert(unit.to_string(), px);
    }

    /// Override a zone count (for setup-validation tests).
    pub fn set_zone_count(&mut self, zone: Zone, count: usize) {
        self.zones.insert(zone, count);
    }

    /// Append a plain content block.
    pub fn push_content(&mut self, height: f32) -> NodeId {
        self.push_block(BlockRole::Content, height)
    }

    /// Append a breakable block.
    pub fn push_breakable(&mut self, height: f32) -> NodeId {
        self.push_block(BlockRole::Breakable, height)
    }

    /// Change a block's rendered height (simulates a content reflow).
    pub fn set_height(&mut self, node: NodeId, height: f32) {
        if let Some(idx) = self.index_of(node) {
            self.blocks[idx].height = height;
        }
    }

    /// Whether the node carries the forced-break hint.
    pub fn has_break_before(&self, node: NodeId) -> bool {
        self.index_of(node)
            .map(|idx| self.blocks[idx].break_before)
            .unwrap_or(false)
    }

    /// Spacer configuration as (stack index, height) pairs, in document order.
    pub fn spacer_layout(&self) -> Vec<(usize, f32)> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.role == BlockRole::Spacer)
            .map(|(idx, b)| (idx, b.height))
            .collect()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn push_block(&mut self, role: BlockRole, height: f32) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.blocks.push(Block {
            id,
            role,
            height,
            break_before: false,
        });
        id
    }

    fn index_of(&self, node: NodeId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == node)
    }
}

impl Surface for MemorySurface {
    fn zone_count(&self, zone: Zone) -> usize {
        self.zones.get(&zone).copied().unwrap_or(0)
    }

    fn content_height(&self) -> f32 {
        self.origin + self.blocks.iter().map(|b| b.height).sum::<f32>()
    }

    fn unit_px(&self, unit: &str) -> f32 {
        self.units.get(unit).copied().unwrap_or(f32::NAN)
    }

    fn query_breakables(&self, _selector: &str) -> Vec<NodeId> {
        self.blocks
            .iter()
            .filter(|b| matches!(b.role, BlockRole::Breakable | BlockRole::Sentinel))
            .map(|b| b.id)
            .collect()
    }

    fn node_top(&self, node: NodeId) -> f32 {
        match self.index_of(node) {
            Some(idx) => {
                self.origin + self.blocks[..idx].iter().map(|b| b.height).sum::<f32>()
            }
            None => f32::NAN,
        }
    }

    fn node_height(&self, node: NodeId) -> f32 {
        match self.index_of(node) {
            Some(idx) => self.blocks[idx].height,
            None => f32::NAN,
        }
    }

    fn document_position(&self, node: NodeId) -> u64 {
        self.index_of(node).map(|idx| idx as u64).unwrap_or(u64::MAX)
    }

    fn last_child(&self) -> Option<NodeId> {
        self.blocks.last().map(|b| b.id)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let idx = self.index_of(node)?;
        self.blocks.get(idx + 1).map(|b| b.id)
    }

    fn is_breakable(&self, node: NodeId) -> bool {
        self.index_of(node)
            .map(|idx| {
                matches!(
                    self.blocks[idx].role,
                    BlockRole::Breakable | BlockRole::Sentinel
                )
            })
            .unwrap_or(false)
    }

    fn spacers(&self) -> Vec<NodeId> {
        self.blocks
            .iter()
            .filter(|b| b.role == BlockRole::Spacer)
            .map(|b| b.id)
            .collect()
    }

    fn insert_spacer_before(&mut self, node: NodeId, height: f32) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let block = Block {
            id,
            role: BlockRole::Spacer,
            height,
            break_before: false,
        };
        match self.index_of(node) {
            Some(idx) => self.blocks.insert(idx, block),
            None => self.blocks.push(block),
        }
        id
    }

    fn remove_spacer(&mut self, node: NodeId) {
        self.blocks
            .retain(|b| !(b.id == node && b.role == BlockRole::Spacer));
    }

    fn mark_break_before(&mut self, node: NodeId) {
        if let Some(idx) = self.index_of(node) {
            self.blocks[idx].break_before = true;
        }
    }

    fn append_sentinel(&mut self) -> NodeId {
        self.push_block(BlockRole::Sentinel, 0.0)
    }

    fn page_card_count(&self) -> usize {
        self.page_cards
    }

    fn push_page_card(&mut self) {
        self.page_cards += 1;
    }

    fn pop_page_card(&mut self) {
        self.page_cards = self.page_cards.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacked_tops_reflow_on_insert() {
        let mut surface = MemorySurface::new().with_origin(100.0);
        let a = surface.push_content(300.0);
        let b = surface.push_breakable(50.0);

        assert_eq!(surface.node_top(a), 100.0);
        assert_eq!(surface.node_top(b), 400.0);
        assert_eq!(surface.content_height(), 450.0);

        surface.insert_spacer_before(b, 20.0);
        assert_eq!(surface.node_top(b), 420.0);
        assert_eq!(surface.content_height(), 470.0);
    }

    #[test]
    fn test_document_order_is_stack_order() {
        let mut surface = MemorySurface::new();
        let a = surface.push_breakable(10.0);
        let b = surface.push_breakable(10.0);
        assert!(surface.document_position(a) < surface.document_position(b));
        assert_eq!(surface.next_sibling(a), Some(b));
        assert_eq!(surface.next_sibling(b), None);
        assert_eq!(surface.last_child(), Some(b));
    }

    #[test]
    fn test_remove_spacer_only_removes_spacers() {
        let mut surface = MemorySurface::new();
        let a = surface.push_breakable(10.0);
        let s = surface.insert_spacer_before(a, 5.0);
        surface.remove_spacer(a);
        assert_eq!(surface.block_count(), 2);
        surface.remove_spacer(s);
        assert_eq!(surface.block_count(), 1);
    }
}
