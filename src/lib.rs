//! Ink-Paginator: a pagination engine for flowing content
//!
//! Splits a scrollable column of content into fixed-size visual pages by
//! inserting spacers so elements never straddle a page boundary, and keeps
//! that layout correct as content and container change:
//! - Page boundaries derived from live content measurement every cycle
//! - Whole-element placement (an overflowing element is pushed to the next
//!   page, never split)
//! - Drift validation after scroll-driven layout shifts
//! - A surface trait at the seam, so the engine runs against a real document
//!   tree (WASM bridge) or a headless in-memory stack
//!
//! The engine recomputes from scratch each cycle; nothing is cached across
//! cycles except the last boundary list.

pub mod debounce;
pub mod engine;
pub mod error;
pub mod layout;
pub mod options;
pub mod surface;
pub mod units;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPaginator;

// Re-export primary types
pub use debounce::{Clock, Debouncer, SystemClock};
pub use engine::{EngineState, Paginator};
pub use error::PaginatorError;
pub use layout::{Boundaries, PageBoundary, ResolvedGeometry};
pub use options::PaginatorOptions;
pub use surface::{MemorySurface, NodeId, Surface, Zone};
pub use units::{Length, UnitConverter};
